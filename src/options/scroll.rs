use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::{scroll::ScrollAction, util::easing::EasingFunction};

/// Binds clicks on every element matching `selector` to a scroll action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ButtonOptions {
    /// Button selector.
    pub selector: String,
    /// Where the click scrolls to.
    pub action: ScrollAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scrolling", inline)]
#[serde(default)]
/// Smooth scroll-to behavior.
pub struct ScrollOptions {
    /// Duration of a smooth scroll in milliseconds (0 jumps).
    #[schemars(title = "Smooth Scroll Duration", range(min = 0, max = 5000))]
    pub smooth_duration_ms: u64,
    /// Easing of a smooth scroll.
    pub easing: EasingFunction,
}

impl ScrollOptions {
    /// Smooth scroll duration.
    #[must_use]
    pub fn smooth_duration(&self) -> Duration {
        Duration::from_millis(self.smooth_duration_ms)
    }
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            smooth_duration_ms: 800,
            easing: EasingFunction::QuadraticInOut,
        }
    }
}

/// The landing page's two buttons.
#[must_use]
pub fn default_buttons() -> Vec<ButtonOptions> {
    vec![
        ButtonOptions {
            selector: ".button--hero".to_owned(),
            action: ScrollAction::ToSection(".second".to_owned()),
        },
        ButtonOptions {
            selector: ".button--footer".to_owned(),
            action: ScrollAction::ToTop,
        },
    ]
}
