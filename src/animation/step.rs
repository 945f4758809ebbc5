//! Keyframe step declarations.

use std::fmt;

use glam::Vec3;

use super::interpolation::{Channel, StepValue};
use super::style::StyleProperty;
use crate::{camera::PoseField, scroll::Section, util::easing::EasingFunction};

/// Index of a registered step, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub usize);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step#{}", self.0)
    }
}

/// What a step animates, and to which value.
#[derive(Debug, Clone, PartialEq)]
pub enum StepTarget {
    /// Move a camera pose sub-vector to `to`.
    Pose {
        /// Animated sub-vector.
        field: PoseField,
        /// End value.
        to: Vec3,
    },
    /// Move an element style property to `to`.
    Style {
        /// Element selector.
        selector: String,
        /// Animated property.
        property: StyleProperty,
        /// End value.
        to: f32,
    },
}

impl StepTarget {
    /// The channel this target writes.
    #[must_use]
    pub fn channel(&self) -> Channel {
        match self {
            Self::Pose { field, .. } => Channel::Pose(*field),
            Self::Style {
                selector, property, ..
            } => Channel::Style {
                selector: selector.clone(),
                property: *property,
            },
        }
    }

    /// Value at progress 1.
    #[must_use]
    pub fn end_value(&self) -> StepValue {
        match self {
            Self::Pose { to, .. } => StepValue::Vector(*to),
            Self::Style { to, .. } => StepValue::Scalar(*to),
        }
    }
}

/// How a step's progress follows the scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrubMode {
    /// Recompute on every scroll event.
    Continuous,
    /// Chase the scroll progress, catching up over this many seconds.
    Smoothed(f32),
}

/// Scrub behavior of a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubConfig {
    /// Progress tracking mode.
    pub mode: ScrubMode,
    /// Apply the start value at registration instead of waiting for the
    /// window to be entered.
    pub immediate_render: bool,
}

impl ScrubConfig {
    /// Continuous scrub, rendered lazily.
    pub const CONTINUOUS: Self = Self {
        mode: ScrubMode::Continuous,
        immediate_render: false,
    };

    /// Smoothed scrub with a catch-up time in seconds, rendered lazily.
    #[must_use]
    pub const fn smoothed(factor: f32) -> Self {
        Self {
            mode: ScrubMode::Smoothed(factor),
            immediate_render: false,
        }
    }
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self::CONTINUOUS
    }
}

/// Notification passed to a step's `on_applied` observer.
#[derive(Debug, Clone, Copy)]
pub struct StepUpdate<'a> {
    /// The step whose output changed.
    pub step: StepId,
    /// Channel it writes.
    pub channel: &'a Channel,
    /// Progress the output was computed at.
    pub progress: f32,
    /// New output, or `None` if the step went back to passing its channel
    /// through.
    pub value: Option<StepValue>,
}

/// Observer invoked synchronously whenever a step's output changes.
pub type OnApplied = Box<dyn FnMut(&StepUpdate<'_>)>;

/// Declaration of one scroll-driven interpolation.
///
/// ```
/// # use glam::Vec3;
/// # use scrollcam::animation::{KeyframeStep, ScrubConfig};
/// # use scrollcam::camera::PoseField;
/// # use scrollcam::scroll::Section;
/// let step = KeyframeStep::pose(
///     PoseField::Position,
///     Vec3::new(4.0, 2.0, 7.0),
///     Section::parse(".third", "top bottom", "top top")?,
/// )
/// .with_scrub(ScrubConfig::CONTINUOUS);
/// # Ok::<(), scrollcam::ScrollError>(())
/// ```
pub struct KeyframeStep {
    pub(crate) target: StepTarget,
    pub(crate) section: Section,
    pub(crate) scrub: ScrubConfig,
    pub(crate) ease: EasingFunction,
    pub(crate) on_applied: Option<OnApplied>,
}

impl KeyframeStep {
    /// Step with continuous scrub, linear easing and no observer.
    #[must_use]
    pub fn new(target: StepTarget, section: Section) -> Self {
        Self {
            target,
            section,
            scrub: ScrubConfig::CONTINUOUS,
            ease: EasingFunction::Linear,
            on_applied: None,
        }
    }

    /// Step moving a pose sub-vector.
    #[must_use]
    pub fn pose(field: PoseField, to: Vec3, section: Section) -> Self {
        Self::new(StepTarget::Pose { field, to }, section)
    }

    /// Step moving an element style property.
    #[must_use]
    pub fn style(
        selector: impl Into<String>,
        property: StyleProperty,
        to: f32,
        section: Section,
    ) -> Self {
        Self::new(
            StepTarget::Style {
                selector: selector.into(),
                property,
                to,
            },
            section,
        )
    }

    /// Set the scrub behavior.
    #[must_use]
    pub fn with_scrub(mut self, scrub: ScrubConfig) -> Self {
        self.scrub = scrub;
        self
    }

    /// Set the easing applied to scroll progress.
    #[must_use]
    pub fn with_ease(mut self, ease: EasingFunction) -> Self {
        self.ease = ease;
        self
    }

    /// Attach an observer called whenever this step's output changes.
    #[must_use]
    pub fn on_applied(mut self, observer: impl FnMut(&StepUpdate<'_>) + 'static) -> Self {
        self.on_applied = Some(Box::new(observer));
        self
    }

    /// What this step animates.
    #[must_use]
    pub fn target(&self) -> &StepTarget {
        &self.target
    }

    /// Section bounding this step's window.
    #[must_use]
    pub fn section(&self) -> &Section {
        &self.section
    }
}

impl fmt::Debug for KeyframeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyframeStep")
            .field("target", &self.target)
            .field("section", &self.section)
            .field("scrub", &self.scrub)
            .field("ease", &self.ease)
            .field("on_applied", &self.on_applied.is_some())
            .finish()
    }
}
