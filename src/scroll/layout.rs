//! Page geometry: element rects, viewport, and scroll windows.

use rustc_hash::FxHashMap;

use super::trigger::TriggerPosition;
use crate::error::ScrollError;

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    /// Distance from the document top to the element top.
    pub top: f32,
    /// Element height.
    pub height: f32,
}

impl ElementRect {
    /// Create a rect.
    #[must_use]
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Document offset of the element's bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Snapshot of the page's scroll geometry.
///
/// Selectors are matched verbatim; the first element registered under a
/// selector is the one `query` returns, mirroring `querySelector`.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    viewport_height: f32,
    document_height: Option<f32>,
    elements: FxHashMap<String, ElementRect>,
}

impl PageLayout {
    /// Empty page with the given viewport height.
    #[must_use]
    pub fn new(viewport_height: f32) -> Self {
        Self {
            viewport_height: viewport_height.max(0.0),
            document_height: None,
            elements: FxHashMap::default(),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_element(mut self, selector: impl Into<String>, rect: ElementRect) -> Self {
        self.insert(selector, rect);
        self
    }

    /// Register an element. Later registrations under an existing selector
    /// are ignored.
    pub fn insert(&mut self, selector: impl Into<String>, rect: ElementRect) {
        let _ = self.elements.entry(selector.into()).or_insert(rect);
    }

    /// Pin the document height instead of deriving it from element rects.
    pub fn set_document_height(&mut self, height: f32) {
        self.document_height = Some(height.max(0.0));
    }

    /// Change the viewport height (window resize).
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
    }

    /// Look up an element by selector.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<ElementRect> {
        self.elements.get(selector).copied()
    }

    /// Viewport height.
    #[must_use]
    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Document height: pinned, or the lowest element bottom (at least one
    /// viewport).
    #[must_use]
    pub fn document_height(&self) -> f32 {
        self.document_height.unwrap_or_else(|| {
            self.elements
                .values()
                .map(ElementRect::bottom)
                .fold(self.viewport_height, f32::max)
        })
    }

    /// Largest reachable scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    /// Clamp a scroll offset to the reachable range.
    #[must_use]
    pub fn clamp_scroll(&self, y: f32) -> f32 {
        y.clamp(0.0, self.max_scroll())
    }
}

/// A page region plus the start/end trigger positions that bound one step's
/// scroll window. Start and end are per step, so two steps on the same
/// trigger may use different windows.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Selector of the trigger element.
    pub trigger: String,
    /// Where the window starts.
    pub start: TriggerPosition,
    /// Where the window ends.
    pub end: TriggerPosition,
}

impl Section {
    /// Create a section from parsed positions.
    #[must_use]
    pub fn new(trigger: impl Into<String>, start: TriggerPosition, end: TriggerPosition) -> Self {
        Self {
            trigger: trigger.into(),
            start,
            end,
        }
    }

    /// Create a section from trigger-position strings, e.g.
    /// `Section::parse(".second", "top bottom", "top top")`.
    pub fn parse(trigger: impl Into<String>, start: &str, end: &str) -> Result<Self, ScrollError> {
        Ok(Self::new(trigger, start.parse()?, end.parse()?))
    }

    /// Compute this section's scroll window against a layout.
    ///
    /// Fails if the trigger element is not on the page.
    pub fn resolve(&self, layout: &PageLayout) -> Result<ScrollWindow, ScrollError> {
        let rect = layout.query(&self.trigger).ok_or_else(|| {
            ScrollError::config(format!(
                "trigger '{}' does not match any element",
                self.trigger
            ))
        })?;
        let vh = layout.viewport_height();
        let window = ScrollWindow {
            start: self.start.scroll_offset(rect.top, rect.height, vh),
            end: self.end.scroll_offset(rect.top, rect.height, vh),
        };
        log::debug!(
            "section {} [{} -> {}] resolved to {:.1}..{:.1}",
            self.trigger,
            self.start,
            self.end,
            window.start,
            window.end
        );
        Ok(window)
    }
}

/// Scroll-offset window `[start, end)` over which a step progresses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollWindow {
    /// Offset at which progress leaves 0.
    pub start: f32,
    /// Offset at which progress reaches 1.
    pub end: f32,
}

impl ScrollWindow {
    /// Progress in `[0, 1]` at scroll offset `y`. A window with
    /// `end <= start` jumps from 0 to 1 at `end`.
    #[must_use]
    pub fn progress(&self, y: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if y >= self.end { 1.0 } else { 0.0 };
        }
        ((y - self.start) / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageLayout {
        PageLayout::new(1000.0)
            .with_element(".first", ElementRect::new(0.0, 1000.0))
            .with_element(".second", ElementRect::new(1000.0, 1000.0))
            .with_element(".third", ElementRect::new(2000.0, 1000.0))
    }

    #[test]
    fn document_height_follows_elements() {
        let layout = page();
        assert_eq!(layout.document_height(), 3000.0);
        assert_eq!(layout.max_scroll(), 2000.0);
        assert_eq!(layout.clamp_scroll(5000.0), 2000.0);
        assert_eq!(layout.clamp_scroll(-3.0), 0.0);
    }

    #[test]
    fn pinned_document_height_wins() {
        let mut layout = page();
        layout.set_document_height(4000.0);
        assert_eq!(layout.max_scroll(), 3000.0);
    }

    #[test]
    fn first_registration_wins() {
        let layout = page().with_element(".second", ElementRect::new(0.0, 1.0));
        assert_eq!(layout.query(".second"), Some(ElementRect::new(1000.0, 1000.0)));
    }

    #[test]
    fn resolves_entering_window() {
        let section = Section::parse(".second", "top bottom", "top top").unwrap();
        let window = section.resolve(&page()).unwrap();
        assert_eq!(window, ScrollWindow { start: 0.0, end: 1000.0 });

        let fade = Section::parse(".second", "top bottom", "top 80%").unwrap();
        assert_eq!(fade.resolve(&page()).unwrap().end, 200.0);
    }

    #[test]
    fn missing_trigger_is_configuration_error() {
        let section = Section::parse(".fourth", "top bottom", "top top").unwrap();
        assert!(matches!(
            section.resolve(&page()),
            Err(ScrollError::Configuration(_))
        ));
    }

    #[test]
    fn progress_clamps_outside_window() {
        let w = ScrollWindow { start: 100.0, end: 300.0 };
        assert_eq!(w.progress(0.0), 0.0);
        assert_eq!(w.progress(100.0), 0.0);
        assert_eq!(w.progress(200.0), 0.5);
        assert_eq!(w.progress(300.0), 1.0);
        assert_eq!(w.progress(1000.0), 1.0);
    }

    #[test]
    fn degenerate_window_is_a_step() {
        let w = ScrollWindow { start: 300.0, end: 300.0 };
        assert_eq!(w.progress(299.0), 0.0);
        assert_eq!(w.progress(300.0), 1.0);
    }
}
