//! Page, timeline and viewer configuration with TOML preset support.
//!
//! Every section uses `#[serde(default)]`, so a partial TOML file (e.g. only
//! overriding `[page]`) keeps the landing-page defaults for the rest.

mod camera;
mod page;
mod scroll;
mod timeline;
mod viewer;

use std::path::Path;

pub use camera::CameraOptions;
pub use page::{ElementOptions, PageOptions};
use schemars::JsonSchema;
pub use scroll::{default_buttons, ButtonOptions, ScrollOptions};
use serde::{Deserialize, Serialize};
pub use timeline::{default_timeline, AnimateOptions, ScrubOptions, StepOptions};
pub use viewer::ViewerOptions;

use crate::error::ScrollError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Viewer construction, plugins and asset.
    pub viewer: ViewerOptions,
    /// Initial camera pose.
    pub camera: CameraOptions,
    /// Static page geometry.
    pub page: PageOptions,
    /// Keyframe steps, in registration order.
    pub timeline: Vec<StepOptions>,
    /// Scroll-to buttons.
    pub buttons: Vec<ButtonOptions>,
    /// Smooth scroll behavior.
    pub scroll: ScrollOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            viewer: ViewerOptions::default(),
            camera: CameraOptions::default(),
            page: PageOptions::default(),
            timeline: default_timeline(),
            buttons: default_buttons(),
            scroll: ScrollOptions::default(),
        }
    }
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ScrollError> {
        toml::from_str(content).map_err(|e| ScrollError::OptionsParse(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ScrollError> {
        toml::to_string_pretty(self).map_err(|e| ScrollError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ScrollError> {
        let content = std::fs::read_to_string(path).map_err(ScrollError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ScrollError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ScrollError::Io)?;
        }
        std::fs::write(path, content).map_err(ScrollError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        animation::{StepTarget, StyleProperty},
        scroll::ScrollAction,
        util::easing::EasingFunction,
        viewer::Plugin,
    };

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = opts.to_toml().unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let opts = Options::from_toml(
            r"
[page]
viewport_height = 800.0
",
        )
        .unwrap();
        assert_eq!(opts.page.viewport_height, 800.0);
        assert_eq!(opts.page.elements, PageOptions::default().elements);
        assert_eq!(opts.timeline.len(), 6);
        assert_eq!(opts.viewer.plugins.len(), 7);
    }

    #[test]
    fn timeline_entries_parse_with_defaults() {
        let opts = Options::from_toml(
            r#"
[[timeline]]
trigger = ".intro"
animate = { position = [1.0, 2.0, 3.0] }

[[timeline]]
trigger = ".intro"
end = "top 80%"
animate = { style = { selector = ".copy", property = "opacity", to = 0.0 } }
scrub = { smoothed = 0.5 }
ease = "quadratic_out"
notify = false

[[buttons]]
selector = ".go"
action = { to_section = ".intro" }
"#,
        )
        .unwrap();
        assert_eq!(opts.timeline.len(), 2);
        let first = &opts.timeline[0];
        assert_eq!(first.start, "top bottom");
        assert_eq!(first.end, "top top");
        assert_eq!(first.scrub, ScrubOptions::Continuous);
        assert_eq!(first.ease, EasingFunction::Linear);
        assert!(first.notify);

        let second = &opts.timeline[1];
        assert_eq!(second.scrub, ScrubOptions::Smoothed(0.5));
        assert!(!second.notify);
        assert_eq!(
            opts.buttons,
            vec![ButtonOptions {
                selector: ".go".into(),
                action: ScrollAction::ToSection(".intro".into()),
            }]
        );
    }

    #[test]
    fn step_options_build_steps() {
        let steps = default_timeline();
        let step = steps[1].to_step().unwrap();
        assert_eq!(
            step.target(),
            &StepTarget::Style {
                selector: ".section--one--container".into(),
                property: StyleProperty::XPercent,
                to: -150.0,
            }
        );
        assert_eq!(step.section().end.to_string(), "top 80%");

        let mut broken = steps[0].clone();
        broken.start = "sideways".into();
        assert!(matches!(broken.to_step(), Err(ScrollError::Configuration(_))));
    }

    #[test]
    fn default_viewer_matches_landing_page() {
        let viewer = ViewerOptions::default();
        assert_eq!(viewer.canvas, "webgi-canvas");
        assert_eq!(viewer.plugins[2], Plugin::Progressive { frames: 32 });
        assert_eq!(viewer.plugins[3], Plugin::Tonemap { enabled: true });
        assert_eq!(viewer.asset.as_deref(), Some("./assets/scene.glb"));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value = serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        for key in ["viewer", "camera", "page", "timeline", "buttons", "scroll"] {
            assert!(props.contains_key(key), "missing {key}");
        }
        let camera = &props["camera"]["properties"];
        assert!(camera.get("position").is_some());
        assert!(camera.get("target").is_some());
    }

    #[test]
    fn presets_are_listed_sorted() {
        let dir = std::env::temp_dir().join(format!("scrollcam-presets-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        Options::default().save(&dir.join("zeta.toml")).unwrap();
        Options::default().save(&dir.join("alpha.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "x").unwrap();
        assert_eq!(Options::list_presets(&dir), vec!["alpha", "zeta"]);
        assert_eq!(Options::load(&dir.join("alpha.toml")).unwrap(), Options::default());
    }
}
