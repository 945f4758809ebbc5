//! Animated element styles (the hero copy that slides and fades out).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A style property a step can animate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StyleProperty {
    /// Horizontal translation as a percentage of the element's own width.
    XPercent,
    /// Opacity in `[0, 1]`.
    Opacity,
}

/// Current animated style of one element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementStyle {
    /// Horizontal translation in percent of the element width.
    pub x_percent: f32,
    /// Opacity.
    pub opacity: f32,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            x_percent: 0.0,
            opacity: 1.0,
        }
    }
}

impl ElementStyle {
    /// Read one property.
    #[must_use]
    pub fn get(&self, property: StyleProperty) -> f32 {
        match property {
            StyleProperty::XPercent => self.x_percent,
            StyleProperty::Opacity => self.opacity,
        }
    }

    /// Write one property. Opacity is clamped to `[0, 1]`.
    pub fn set(&mut self, property: StyleProperty, value: f32) {
        match property {
            StyleProperty::XPercent => self.x_percent = value,
            StyleProperty::Opacity => self.opacity = value.clamp(0.0, 1.0),
        }
    }

    /// CSS `transform` value for this style.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("translate({}%, 0%)", self.x_percent)
    }
}

/// Styles of every animated element, keyed by selector.
#[derive(Debug, Clone, Default)]
pub struct ElementStyles {
    styles: FxHashMap<String, ElementStyle>,
}

impl ElementStyles {
    /// Style of an element, or the default if it was never animated.
    #[must_use]
    pub fn get(&self, selector: &str) -> ElementStyle {
        self.styles.get(selector).copied().unwrap_or_default()
    }

    /// Write one property of one element.
    pub fn set(&mut self, selector: &str, property: StyleProperty, value: f32) {
        if let Some(style) = self.styles.get_mut(selector) {
            style.set(property, value);
            return;
        }
        let mut style = ElementStyle::default();
        style.set(property, value);
        let _ = self.styles.insert(selector.to_owned(), style);
    }

    /// Iterate over animated elements.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementStyle)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_elements_read_as_default() {
        let styles = ElementStyles::default();
        assert_eq!(styles.get(".hero"), ElementStyle::default());
    }

    #[test]
    fn set_creates_and_updates() {
        let mut styles = ElementStyles::default();
        styles.set(".hero", StyleProperty::XPercent, -75.0);
        styles.set(".hero", StyleProperty::Opacity, 1.5);
        let style = styles.get(".hero");
        assert_eq!(style.x_percent, -75.0);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.css_transform(), "translate(-75%, 0%)");
        assert_eq!(styles.iter().count(), 1);
    }
}
