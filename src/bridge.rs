//! Render invalidation bridge.
//!
//! Decouples "the camera pose changed" from "a frame was rendered". Any
//! number of pose mutations between two frames set one [`DirtyFlag`]; the
//! viewer's pre-frame hook consumes it once, pushes the pose into the camera
//! transform and requests a render.
//!
//! Flag states: `Dirty` initially (forces one sync on the first frame),
//! `Clean -> Dirty` on any pose mutation, `Dirty -> Clean` only inside
//! [`RenderInvalidationBridge::on_pre_frame`].

use std::{cell::Cell, rc::Rc};

use crate::{
    animation::StepUpdate,
    viewer::{HeadlessViewer, ViewerRuntime},
};

/// Shared "pose changed since the last consumed frame" flag.
///
/// Cloning yields another handle to the same flag. Single-threaded by
/// construction; scroll handlers and the frame callback never overlap.
#[derive(Debug, Clone)]
pub struct DirtyFlag(Rc<Cell<bool>>);

impl DirtyFlag {
    /// A flag in the given state.
    #[must_use]
    pub fn new(dirty: bool) -> Self {
        Self(Rc::new(Cell::new(dirty)))
    }

    /// Set the flag. Idempotent.
    #[inline]
    pub fn mark(&self) {
        self.0.set(true);
    }

    /// Whether the flag is set.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.0.get()
    }

    /// Clear the flag, returning whether it was set.
    #[inline]
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// Coalesces pose mutations into at most one camera sync per frame.
#[derive(Debug, Clone)]
pub struct RenderInvalidationBridge {
    dirty: DirtyFlag,
}

impl Default for RenderInvalidationBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderInvalidationBridge {
    /// New bridge, initially dirty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty: DirtyFlag::new(true),
        }
    }

    /// Handle to the bridge's flag.
    #[must_use]
    pub fn flag(&self) -> DirtyFlag {
        self.dirty.clone()
    }

    /// Observer for [`crate::animation::KeyframeStep::on_applied`] that
    /// marks this bridge dirty.
    #[must_use]
    pub fn step_observer(&self) -> impl FnMut(&StepUpdate<'_>) + 'static {
        let flag = self.flag();
        move |_: &StepUpdate<'_>| flag.mark()
    }

    /// Record that the pose changed. Never renders by itself.
    #[inline]
    pub fn mark_dirty(&self) {
        self.dirty.mark();
    }

    /// Whether a pose change is pending.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Per-frame hook, run by the viewer before composing the scene.
    ///
    /// If dirty: re-derives the camera from the current pose, drops
    /// view-dependent shadow caches, marks the scene for re-render and
    /// clears the flag. Returns whether anything was pushed.
    pub fn on_pre_frame<V: ViewerRuntime + ?Sized>(&self, viewer: &mut V) -> bool {
        if !self.dirty.take() {
            return false;
        }
        viewer.position_updated(true);
        viewer.target_updated(true);
        viewer.reset_shadows();
        viewer.set_dirty();
        true
    }

    /// Register [`on_pre_frame`](Self::on_pre_frame) as a pre-frame
    /// listener of `viewer`. The listener lives as long as the viewer.
    pub fn install(&self, viewer: &mut HeadlessViewer) {
        let bridge = self.clone();
        viewer.add_pre_frame_listener(move |runtime| {
            let _ = bridge.on_pre_frame(runtime);
        });
    }
}
