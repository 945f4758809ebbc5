//! Page events: scroll, button clicks and layout changes.

use super::ScrollEngine;
use crate::{
    animation::Targets,
    error::ScrollError,
    scroll::{PageLayout, SmoothScroll},
    viewer::ViewerRuntime,
};

impl ScrollEngine {
    /// A scroll event at document offset `y`.
    ///
    /// Updates the animated pose immediately but never renders; the camera
    /// picks the new pose up on the next [`frame`](Self::frame). A user
    /// scroll cancels a running smooth scroll.
    pub fn handle_scroll(&mut self, y: f32) {
        if self.smooth.take().is_some() {
            log::debug!("smooth scroll interrupted at {y:.1}");
        }
        self.apply_scroll(y);
    }

    /// A click on the element matching `selector`.
    ///
    /// Starts a smooth scroll to the bound action's destination and returns
    /// that destination offset.
    ///
    /// # Errors
    ///
    /// Returns [`ScrollError::Configuration`] if no button is bound to
    /// `selector` or its target section is missing from the layout.
    pub fn click(&mut self, selector: &str) -> Result<f32, ScrollError> {
        let button = self
            .buttons
            .iter()
            .find(|b| b.selector == selector)
            .ok_or_else(|| {
                ScrollError::config(format!("no button bound to '{selector}'"))
            })?;
        let to = button.action.destination(&self.layout)?;
        let from = self.timeline.scroll_y();
        log::debug!("{selector}: scrolling {from:.1} -> {to:.1}");

        let duration = self.scroll_options.smooth_duration();
        if duration.is_zero() {
            self.smooth = None;
            self.apply_scroll(to);
        } else {
            self.smooth = Some(SmoothScroll::new(
                from,
                to,
                duration,
                self.scroll_options.easing,
            ));
        }
        Ok(to)
    }

    /// The viewport height changed; re-resolve every scroll window.
    ///
    /// # Errors
    ///
    /// See [`set_layout`](Self::set_layout).
    pub fn resize(&mut self, viewport_height: f32) -> Result<(), ScrollError> {
        let mut layout = self.layout.clone();
        layout.set_viewport_height(viewport_height);
        self.set_layout(layout)
    }

    /// Replace the page layout and re-resolve every scroll window.
    ///
    /// # Errors
    ///
    /// Returns [`ScrollError::Configuration`] if a step's trigger is missing
    /// from `layout`; the previous layout stays in effect.
    pub fn set_layout(&mut self, layout: PageLayout) -> Result<(), ScrollError> {
        let mut targets =
            Targets::new(self.viewer.context_mut().pose_mut(), &mut self.styles);
        self.timeline.refresh(&layout, &mut targets)?;
        self.layout = layout;
        Ok(())
    }
}
