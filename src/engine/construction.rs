//! Scene setup: viewer, plugins, asset, timeline and bridge.

use super::ScrollEngine;
use crate::{
    animation::{ElementStyles, StepId, Targets, Timeline},
    bridge::RenderInvalidationBridge,
    error::ScrollError,
    options::{Options, StepOptions},
    scroll::PageLayout,
    viewer::{HeadlessViewer, ViewerRuntime},
};

impl ScrollEngine {
    /// Engine for the page described by `options.page`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrollError::Plugin`] if the plugin list is inconsistent
    /// and [`ScrollError::Configuration`] if a step's trigger or position
    /// is invalid. Asset failures are logged and recorded instead, see
    /// [`asset_error`](Self::asset_error).
    pub fn new(options: &Options) -> Result<Self, ScrollError> {
        Self::with_layout(options, options.page.to_layout())
    }

    /// Engine for a page whose geometry was measured elsewhere.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_layout(options: &Options, layout: PageLayout) -> Result<Self, ScrollError> {
        let mut viewer = HeadlessViewer::new(&options.viewer, options.camera.pose());
        for plugin in &options.viewer.plugins {
            let handle = viewer.add_plugin(plugin.clone())?;
            log::debug!("plugin {} registered at {}", handle.kind, handle.index);
        }
        viewer.refresh_pipeline();

        let asset_error = options
            .viewer
            .asset
            .as_deref()
            .and_then(|path| load_asset(&mut viewer, path).err())
            .map(|e| {
                log::error!("scene asset failed to load: {e}");
                e.to_string()
            });

        let bridge = RenderInvalidationBridge::new();
        let mut styles = ElementStyles::default();
        let mut timeline = Timeline::new();
        let step_ids = define_steps(
            &mut timeline,
            &options.timeline,
            &layout,
            &bridge,
            &mut Targets::new(viewer.context_mut().pose_mut(), &mut styles),
        )?;
        bridge.install(&mut viewer);

        log::info!(
            "scroll engine ready on '{}': {} steps, {} buttons, document {:.0}px",
            viewer.canvas(),
            timeline.len(),
            options.buttons.len(),
            layout.document_height()
        );

        Ok(Self {
            viewer,
            timeline,
            bridge,
            layout,
            styles,
            step_ids,
            buttons: options.buttons.clone(),
            scroll_options: options.scroll.clone(),
            smooth: None,
            asset_error,
        })
    }
}

fn load_asset(viewer: &mut HeadlessViewer, path: &str) -> Result<(), ScrollError> {
    let info = viewer.asset_manager()?.add_from_path(path)?;
    log::info!("loaded {} ({:?}, {} bytes)", info.path, info.format, info.byte_len);
    Ok(())
}

/// Register every configured step, attaching the bridge to the ones that
/// move the camera.
pub(crate) fn define_steps(
    timeline: &mut Timeline,
    steps: &[StepOptions],
    layout: &PageLayout,
    bridge: &RenderInvalidationBridge,
    targets: &mut Targets<'_>,
) -> Result<Vec<StepId>, ScrollError> {
    steps
        .iter()
        .map(|options| {
            let mut step = options.to_step()?;
            if options.notify {
                step = step.on_applied(bridge.step_observer());
            }
            timeline.define_step(step, layout, targets)
        })
        .collect()
}
