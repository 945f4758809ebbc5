//! The viewer runtime the sequencer drives.
//!
//! [`ViewerRuntime`] is the contract the core consumes: a mutable pose, the
//! explicit "pose was mutated" notifications, shadow invalidation and the
//! render-dirty flag. [`HeadlessViewer`] implements it in-process with the
//! bookkeeping of a render-on-demand viewer (camera, plugin registry, asset
//! registry, pre-frame listeners) but no GPU work.

pub mod assets;
pub mod plugins;
pub mod renderer;

pub use assets::{AssetFormat, AssetInfo, AssetManager};
pub use plugins::{Plugin, PluginHandle, PluginKind, PluginRegistry};
pub use renderer::{PassKind, Renderer};

use crate::{
    camera::{Camera, CameraPose},
    error::ScrollError,
    options::ViewerOptions,
};

/// What the scroll core needs from a viewer.
pub trait ViewerRuntime {
    /// The active camera's pose.
    fn pose(&self) -> &CameraPose;

    /// The active camera's pose, for in-place mutation.
    fn pose_mut(&mut self) -> &mut CameraPose;

    /// The pose position was mutated externally; re-derive the view.
    fn position_updated(&mut self, force: bool);

    /// The pose target was mutated externally; re-derive the view.
    fn target_updated(&mut self, force: bool);

    /// Drop cached shadow data (it depends on the camera position).
    fn reset_shadows(&mut self);

    /// Ask the frame scheduler to render the scene again.
    fn set_dirty(&mut self);
}

/// Everything a pre-frame listener may touch.
#[derive(Debug)]
pub struct ViewerContext {
    camera: Camera,
    renderer: Renderer,
    plugins: PluginRegistry,
    assets: AssetManager,
    synced_this_frame: bool,
}

impl ViewerContext {
    /// Active camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Renderer bookkeeping.
    #[must_use]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Registered plugins.
    #[must_use]
    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Loaded assets.
    #[must_use]
    pub fn assets(&self) -> &[AssetInfo] {
        self.assets.assets()
    }
}

impl ViewerRuntime for ViewerContext {
    fn pose(&self) -> &CameraPose {
        &self.camera.pose
    }

    fn pose_mut(&mut self) -> &mut CameraPose {
        &mut self.camera.pose
    }

    fn position_updated(&mut self, force: bool) {
        self.synced_this_frame |= self.camera.position_updated(force);
    }

    fn target_updated(&mut self, force: bool) {
        self.synced_this_frame |= self.camera.target_updated(force);
    }

    fn reset_shadows(&mut self) {
        self.renderer.reset_shadows();
    }

    fn set_dirty(&mut self) {
        self.renderer.set_dirty();
    }
}

/// Outcome of one [`HeadlessViewer::render_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame counter, starting at 1.
    pub frame: u64,
    /// Whether a pre-frame listener pushed a pose into the camera.
    pub camera_synced: bool,
    /// Whether the scene was rendered (dirty or still accumulating).
    pub rendered: bool,
}

type PreFrameListener = Box<dyn FnMut(&mut ViewerContext)>;

/// In-process render-on-demand viewer.
pub struct HeadlessViewer {
    canvas: String,
    context: ViewerContext,
    listeners: Vec<PreFrameListener>,
    frame: u64,
}

impl HeadlessViewer {
    /// Create a viewer with an active camera at `pose`. No plugins are
    /// registered.
    #[must_use]
    pub fn new(options: &ViewerOptions, pose: CameraPose) -> Self {
        Self {
            canvas: options.canvas.clone(),
            context: ViewerContext {
                camera: Camera::new(pose),
                renderer: Renderer::new(options.antialias, options.use_rgbm),
                plugins: PluginRegistry::default(),
                assets: AssetManager::default(),
                synced_this_frame: false,
            },
            listeners: Vec::new(),
            frame: 0,
        }
    }

    /// Id of the canvas this viewer draws into.
    #[must_use]
    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    /// Register a plugin; fails if its dependencies are unmet.
    pub fn add_plugin(&mut self, plugin: Plugin) -> Result<PluginHandle, ScrollError> {
        self.context.plugins.add(plugin)
    }

    /// Rebuild the render pipeline after plugin registration.
    pub fn refresh_pipeline(&mut self) {
        self.context.renderer.refresh_pipeline(&self.context.plugins);
    }

    /// The asset manager; requires the asset manager plugin.
    pub fn asset_manager(&mut self) -> Result<&mut AssetManager, ScrollError> {
        if !self.context.plugins.contains(PluginKind::AssetManager) {
            return Err(ScrollError::Plugin(
                "AssetManager plugin is not registered".to_owned(),
            ));
        }
        Ok(&mut self.context.assets)
    }

    /// Register a listener run once per frame, before the scene is
    /// composed. Listeners live as long as the viewer.
    pub fn add_pre_frame_listener(&mut self, listener: impl FnMut(&mut ViewerContext) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Run pre-frame listeners, then render if needed.
    pub fn render_frame(&mut self) -> FrameStats {
        self.frame += 1;
        self.context.synced_this_frame = false;
        for listener in &mut self.listeners {
            listener(&mut self.context);
        }
        let rendered = self.context.renderer.render();
        FrameStats {
            frame: self.frame,
            camera_synced: self.context.synced_this_frame,
            rendered,
        }
    }

    /// Viewer state.
    #[must_use]
    pub fn context(&self) -> &ViewerContext {
        &self.context
    }

    /// Viewer state, mutable.
    pub fn context_mut(&mut self) -> &mut ViewerContext {
        &mut self.context
    }
}

impl std::fmt::Debug for HeadlessViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessViewer")
            .field("canvas", &self.canvas)
            .field("context", &self.context)
            .field("listeners", &self.listeners.len())
            .field("frame", &self.frame)
            .finish()
    }
}
