//! Read-only views of engine state.

use super::ScrollEngine;
use crate::{
    animation::{ElementStyles, StepId, Timeline},
    bridge::RenderInvalidationBridge,
    camera::CameraPose,
    scroll::PageLayout,
    viewer::{HeadlessViewer, ViewerRuntime},
};

impl ScrollEngine {
    /// Current animated pose (what the camera will show after the next
    /// sync).
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        *self.viewer.context().pose()
    }

    /// Scroll offset the timeline was last moved to.
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        self.timeline.scroll_y()
    }

    /// Whether a button-triggered smooth scroll is running.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.smooth.is_some()
    }

    /// Animated element styles.
    #[must_use]
    pub fn styles(&self) -> &ElementStyles {
        &self.styles
    }

    /// Page layout the scroll windows are resolved against.
    #[must_use]
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// The keyframe timeline.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Ids of the configured steps, in configuration order.
    #[must_use]
    pub fn step_ids(&self) -> &[StepId] {
        &self.step_ids
    }

    /// The render invalidation bridge.
    #[must_use]
    pub fn bridge(&self) -> &RenderInvalidationBridge {
        &self.bridge
    }

    /// The viewer.
    #[must_use]
    pub fn viewer(&self) -> &HeadlessViewer {
        &self.viewer
    }

    /// Why the scene asset failed to load, if it did.
    #[must_use]
    pub fn asset_error(&self) -> Option<&str> {
        self.asset_error.as_deref()
    }
}
