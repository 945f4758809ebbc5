use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    animation::{KeyframeStep, ScrubConfig, ScrubMode, StepTarget, StyleProperty},
    camera::PoseField,
    error::ScrollError,
    scroll::Section,
    util::easing::EasingFunction,
};

/// What a configured step animates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnimateOptions {
    /// Move the camera position to this point.
    Position([f32; 3]),
    /// Move the camera target to this point.
    Target([f32; 3]),
    /// Move an element style property to this value.
    Style {
        /// Element selector.
        selector: String,
        /// Property to animate.
        property: StyleProperty,
        /// End value.
        to: f32,
    },
}

/// How a configured step follows the scroll position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScrubOptions {
    /// Follow every scroll event.
    #[default]
    Continuous,
    /// Catch up with the scroll position over this many seconds.
    Smoothed(f32),
}

fn default_start() -> String {
    "top bottom".to_owned()
}

fn default_end() -> String {
    "top top".to_owned()
}

const fn default_notify() -> bool {
    true
}

const fn default_ease() -> EasingFunction {
    EasingFunction::Linear
}

/// One keyframe step of the page timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct StepOptions {
    /// Selector of the section bounding the step's window.
    pub trigger: String,
    /// Window start, as `"<element> <viewport>"`.
    #[serde(default = "default_start")]
    pub start: String,
    /// Window end, as `"<element> <viewport>"`.
    #[serde(default = "default_end")]
    pub end: String,
    /// Animated value.
    pub animate: AnimateOptions,
    /// Scrub behavior.
    #[serde(default)]
    pub scrub: ScrubOptions,
    /// Apply the start value at registration.
    #[serde(default)]
    pub immediate_render: bool,
    /// Easing applied to scroll progress.
    #[serde(default = "default_ease")]
    pub ease: EasingFunction,
    /// Mark the render bridge dirty when this step's output changes.
    #[serde(default = "default_notify")]
    pub notify: bool,
}

impl StepOptions {
    fn pose(trigger: &str, animate: AnimateOptions) -> Self {
        Self {
            trigger: trigger.to_owned(),
            start: default_start(),
            end: default_end(),
            animate,
            scrub: ScrubOptions::Continuous,
            immediate_render: false,
            ease: default_ease(),
            notify: true,
        }
    }

    fn fade(property: StyleProperty, to: f32) -> Self {
        Self {
            end: "top 80%".to_owned(),
            scrub: ScrubOptions::Smoothed(1.0),
            notify: false,
            ..Self::pose(
                ".second",
                AnimateOptions::Style {
                    selector: ".section--one--container".to_owned(),
                    property,
                    to,
                },
            )
        }
    }

    /// Build the keyframe step (without observer). Fails on malformed
    /// trigger positions.
    pub fn to_step(&self) -> Result<KeyframeStep, ScrollError> {
        let section = Section::parse(self.trigger.clone(), &self.start, &self.end)?;
        let target = match &self.animate {
            AnimateOptions::Position(to) => StepTarget::Pose {
                field: PoseField::Position,
                to: (*to).into(),
            },
            AnimateOptions::Target(to) => StepTarget::Pose {
                field: PoseField::Target,
                to: (*to).into(),
            },
            AnimateOptions::Style {
                selector,
                property,
                to,
            } => StepTarget::Style {
                selector: selector.clone(),
                property: *property,
                to: *to,
            },
        };
        let mode = match self.scrub {
            ScrubOptions::Continuous => ScrubMode::Continuous,
            ScrubOptions::Smoothed(secs) => ScrubMode::Smoothed(secs),
        };
        Ok(KeyframeStep::new(target, section)
            .with_scrub(ScrubConfig {
                mode,
                immediate_render: self.immediate_render,
            })
            .with_ease(self.ease))
    }
}

/// The landing page timeline: the camera swings round over `.second` while
/// the hero copy slides out, then climbs over `.third`.
#[must_use]
pub fn default_timeline() -> Vec<StepOptions> {
    vec![
        StepOptions::pose(".second", AnimateOptions::Position([-3.83, -2.32, -5.71])),
        StepOptions::fade(StyleProperty::XPercent, -150.0),
        StepOptions::fade(StyleProperty::Opacity, 0.0),
        StepOptions::pose(".second", AnimateOptions::Target([-0.72, -0.32, -0.74])),
        StepOptions::pose(".third", AnimateOptions::Position([4.0, 2.0, 7.0])),
        StepOptions::pose(".third", AnimateOptions::Target([-1.0, -9.5, -0.5])),
    ]
}
