//! Live document access: measuring the page and writing element styles.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::{
    animation::ElementStyles,
    error::ScrollError,
    scroll::{ElementRect, PageLayout},
};

pub(super) fn js_error(context: &str, err: &wasm_bindgen::JsValue) -> ScrollError {
    ScrollError::Web(format!("{context}: {err:?}"))
}

pub(super) fn window() -> Result<Window, ScrollError> {
    web_sys::window().ok_or_else(|| ScrollError::Web("no global window".to_owned()))
}

pub(super) fn document(window: &Window) -> Result<Document, ScrollError> {
    window
        .document()
        .ok_or_else(|| ScrollError::Web("window has no document".to_owned()))
}

pub(super) fn scroll_y(window: &Window) -> f32 {
    window.scroll_y().unwrap_or_default() as f32
}

/// Measure every element in `selectors` (first match each) in document
/// coordinates. Selectors that match nothing are left out; step
/// registration reports them.
pub(super) fn measure<'a>(
    window: &Window,
    selectors: impl IntoIterator<Item = &'a str>,
) -> Result<PageLayout, ScrollError> {
    let document = document(window)?;
    let viewport = window
        .inner_height()
        .map_err(|e| js_error("innerHeight", &e))?
        .as_f64()
        .unwrap_or_default() as f32;
    let offset = scroll_y(window);

    let mut layout = PageLayout::new(viewport);
    for selector in selectors {
        let element = document
            .query_selector(selector)
            .map_err(|e| js_error(selector, &e))?;
        if let Some(element) = element {
            let rect = element.get_bounding_client_rect();
            layout.insert(
                selector,
                ElementRect::new(rect.top() as f32 + offset, rect.height() as f32),
            );
        }
    }
    if let Some(root) = document.document_element() {
        layout.set_document_height(root.scroll_height() as f32);
    }
    log::debug!(
        "measured page: viewport {viewport:.0}px, document {:.0}px",
        layout.document_height()
    );
    Ok(layout)
}

/// Write every animated style into the elements its selector matches.
pub(super) fn apply_styles(document: &Document, styles: &ElementStyles) {
    for (selector, style) in styles.iter() {
        let Ok(nodes) = document.query_selector_all(selector) else {
            log::warn!("invalid selector '{selector}'");
            continue;
        };
        for idx in 0..nodes.length() {
            let Some(element) = nodes.get(idx).and_then(|n| n.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let css = element.style();
            let _ = css.set_property("transform", &style.css_transform());
            let _ = css.set_property("opacity", &style.opacity.to_string());
        }
    }
}

/// Native smooth scroll to document offset `top`.
pub(super) fn smooth_scroll_to(window: &Window, top: f32) {
    let options = ScrollToOptions::new();
    options.set_top(f64::from(top));
    options.set_left(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}
