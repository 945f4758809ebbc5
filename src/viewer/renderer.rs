//! Render-on-demand bookkeeping for the headless viewer.

use super::plugins::{Plugin, PluginKind, PluginRegistry};

/// A pass in the composed pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Depth/normal prepass.
    GBuffer,
    /// Ambient occlusion.
    Ssao,
    /// Main scene pass.
    Scene,
    /// Screen-space reflections.
    Ssr,
    /// Bloom.
    Bloom,
    /// Tone mapping.
    Tonemap,
    /// Progressive accumulation.
    Accumulate,
}

/// Tracks when the scene must be rendered and what view-dependent caches
/// are still valid. Renders nothing.
#[derive(Debug, Clone)]
pub struct Renderer {
    antialias: bool,
    use_rgbm: bool,
    pipeline: Vec<PassKind>,
    progressive_frames: u32,
    accumulated: u32,
    needs_render: bool,
    shadow_generation: u64,
    frames_rendered: u64,
}

impl Renderer {
    /// A renderer with only the scene pass, needing a first render.
    #[must_use]
    pub fn new(antialias: bool, use_rgbm: bool) -> Self {
        Self {
            antialias,
            use_rgbm,
            pipeline: vec![PassKind::Scene],
            progressive_frames: 1,
            accumulated: 0,
            needs_render: true,
            shadow_generation: 0,
            frames_rendered: 0,
        }
    }

    /// Rebuild the pass list from the registered plugins.
    pub fn refresh_pipeline(&mut self, plugins: &PluginRegistry) {
        let has = |kind| plugins.contains(kind);
        let mut pipeline = Vec::with_capacity(7);
        if has(PluginKind::GBuffer) {
            pipeline.push(PassKind::GBuffer);
        }
        if has(PluginKind::Ssao) {
            pipeline.push(PassKind::Ssao);
        }
        pipeline.push(PassKind::Scene);
        if has(PluginKind::Ssr) {
            pipeline.push(PassKind::Ssr);
        }
        if has(PluginKind::Bloom) {
            pipeline.push(PassKind::Bloom);
        }
        if let Some(Plugin::Tonemap { enabled: true }) = plugins.get(PluginKind::Tonemap) {
            pipeline.push(PassKind::Tonemap);
        }
        self.progressive_frames = match plugins.get(PluginKind::Progressive) {
            Some(Plugin::Progressive { frames }) => {
                pipeline.push(PassKind::Accumulate);
                (*frames).max(1)
            }
            _ => 1,
        };
        log::debug!(
            "pipeline refreshed: {pipeline:?} (antialias: {}, rgbm: {})",
            self.antialias,
            self.use_rgbm
        );
        self.pipeline = pipeline;
        self.set_dirty();
    }

    /// Request a render and restart progressive accumulation.
    pub fn set_dirty(&mut self) {
        self.needs_render = true;
        self.accumulated = 0;
    }

    /// Invalidate view-dependent shadow data.
    pub fn reset_shadows(&mut self) {
        self.shadow_generation += 1;
    }

    /// Render one frame if the scene is dirty or still accumulating.
    /// Returns whether a frame was rendered.
    pub fn render(&mut self) -> bool {
        if !self.needs_render && self.accumulated >= self.progressive_frames {
            return false;
        }
        self.needs_render = false;
        self.accumulated += 1;
        self.frames_rendered += 1;
        true
    }

    /// Current pass list.
    #[must_use]
    pub fn pipeline(&self) -> &[PassKind] {
        &self.pipeline
    }

    /// Number of shadow invalidations so far.
    #[must_use]
    pub fn shadow_generation(&self) -> u64 {
        self.shadow_generation
    }

    /// Number of frames actually rendered.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Whether a render is pending.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_registry() -> PluginRegistry {
        let mut registry = PluginRegistry::default();
        for plugin in [
            Plugin::AssetManager,
            Plugin::GBuffer,
            Plugin::Progressive { frames: 4 },
            Plugin::Tonemap { enabled: true },
            Plugin::Ssr,
            Plugin::Ssao,
            Plugin::Bloom,
        ] {
            let _ = registry.add(plugin).unwrap();
        }
        registry
    }

    #[test]
    fn pipeline_follows_plugins() {
        let mut renderer = Renderer::new(true, false);
        renderer.refresh_pipeline(&full_registry());
        assert_eq!(
            renderer.pipeline(),
            &[
                PassKind::GBuffer,
                PassKind::Ssao,
                PassKind::Scene,
                PassKind::Ssr,
                PassKind::Bloom,
                PassKind::Tonemap,
                PassKind::Accumulate,
            ]
        );
    }

    #[test]
    fn renders_once_per_invalidation_without_progressive() {
        let mut renderer = Renderer::new(true, false);
        assert!(renderer.render());
        assert!(!renderer.render());
        renderer.set_dirty();
        assert!(renderer.render());
        assert!(!renderer.render());
        assert_eq!(renderer.frames_rendered(), 2);
    }

    #[test]
    fn progressive_accumulates_after_invalidation() {
        let mut renderer = Renderer::new(true, false);
        renderer.refresh_pipeline(&full_registry());
        let rendered = (0..10).filter(|_| renderer.render()).count();
        assert_eq!(rendered, 4);
        renderer.set_dirty();
        let rendered = (0..10).filter(|_| renderer.render()).count();
        assert_eq!(rendered, 4);
    }
}
