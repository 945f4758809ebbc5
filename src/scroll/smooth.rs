//! Smooth scroll-to, as triggered by the page's buttons.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use super::layout::PageLayout;
use crate::{error::ScrollError, util::easing::EasingFunction};

/// What a button click scrolls to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAction {
    /// Align the top of the named element with the viewport top.
    ToSection(String),
    /// Scroll back to the document top.
    ToTop,
}

impl ScrollAction {
    /// End-state scroll offset, clamped to the reachable range.
    pub fn destination(&self, layout: &PageLayout) -> Result<f32, ScrollError> {
        match self {
            Self::ToTop => Ok(0.0),
            Self::ToSection(selector) => {
                let rect = layout.query(selector).ok_or_else(|| {
                    ScrollError::config(format!(
                        "scroll target '{selector}' does not match any element"
                    ))
                })?;
                Ok(layout.clamp_scroll(rect.top))
            }
        }
    }
}

/// Time-based animation of the scroll offset from one value to another.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFunction,
}

impl SmoothScroll {
    /// Start animating from `from` to `to`.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration, easing: EasingFunction) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// Destination offset.
    #[must_use]
    pub fn destination(&self) -> f32 {
        self.to
    }

    /// Whether the animation has reached its destination.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` and return the new scroll offset.
    pub fn tick(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.duration.is_zero() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = self.easing.evaluate(t);
        if t >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * eased
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::layout::ElementRect;

    fn layout() -> PageLayout {
        PageLayout::new(1000.0)
            .with_element(".second", ElementRect::new(1000.0, 1000.0))
            .with_element(".third", ElementRect::new(2000.0, 1000.0))
            .with_element(".tail", ElementRect::new(2900.0, 100.0))
    }

    #[test]
    fn section_destination_is_element_top() {
        let action = ScrollAction::ToSection(".second".into());
        assert_eq!(action.destination(&layout()).unwrap(), 1000.0);
        assert_eq!(ScrollAction::ToTop.destination(&layout()).unwrap(), 0.0);
    }

    #[test]
    fn destination_is_clamped_to_max_scroll() {
        let action = ScrollAction::ToSection(".tail".into());
        assert_eq!(action.destination(&layout()).unwrap(), 2000.0);
    }

    #[test]
    fn unknown_section_is_configuration_error() {
        let action = ScrollAction::ToSection(".nope".into());
        assert!(matches!(
            action.destination(&layout()),
            Err(ScrollError::Configuration(_))
        ));
    }

    #[test]
    fn smooth_scroll_reaches_destination_exactly() {
        let mut scroll = SmoothScroll::new(
            0.0,
            1000.0,
            Duration::from_millis(500),
            EasingFunction::DEFAULT,
        );
        let mut last = 0.0;
        for _ in 0..40 {
            let y = scroll.tick(Duration::from_millis(16));
            assert!(y >= last);
            last = y;
        }
        assert!(scroll.is_done());
        assert_eq!(last, 1000.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let mut scroll =
            SmoothScroll::new(500.0, 0.0, Duration::ZERO, EasingFunction::Linear);
        assert_eq!(scroll.tick(Duration::ZERO), 0.0);
        assert!(scroll.is_done());
    }
}
