use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scroll::{ElementRect, PageLayout};

/// One element of the page, in document coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ElementOptions {
    /// Selector the element is found by.
    pub selector: String,
    /// Offset of the element top from the document top.
    pub top: f32,
    /// Element height.
    pub height: f32,
}

impl ElementOptions {
    fn new(selector: &str, top: f32, height: f32) -> Self {
        Self {
            selector: selector.to_owned(),
            top,
            height,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Page", inline)]
#[serde(default)]
/// Static page geometry, used when no live DOM is available.
pub struct PageOptions {
    /// Viewport height in pixels.
    #[schemars(range(min = 1.0))]
    pub viewport_height: f32,
    /// Document height; derived from the elements when absent.
    pub document_height: Option<f32>,
    /// Page elements.
    pub elements: Vec<ElementOptions>,
}

impl PageOptions {
    /// Build the layout these options describe.
    #[must_use]
    pub fn to_layout(&self) -> PageLayout {
        let mut layout = PageLayout::new(self.viewport_height);
        for element in &self.elements {
            layout.insert(
                element.selector.clone(),
                ElementRect::new(element.top, element.height),
            );
        }
        if let Some(height) = self.document_height {
            layout.set_document_height(height);
        }
        layout
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            viewport_height: 1000.0,
            document_height: None,
            elements: vec![
                ElementOptions::new(".first", 0.0, 1000.0),
                ElementOptions::new(".section--one--container", 250.0, 500.0),
                ElementOptions::new(".button--hero", 700.0, 56.0),
                ElementOptions::new(".second", 1000.0, 1000.0),
                ElementOptions::new(".third", 2000.0, 1000.0),
                ElementOptions::new(".button--footer", 2850.0, 56.0),
            ],
        }
    }
}
