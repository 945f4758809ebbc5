//! Trigger-position grammar.
//!
//! A trigger position names the moment a point on an element meets a point
//! on the viewport, written as two anchors: `"<element> <viewport>"`, e.g.
//! `"top bottom"` (element top meets viewport bottom) or `"top 80%"`.
//!
//! Each anchor is a keyword (`top`, `center`, `bottom`), a percentage of the
//! extent (`80%`), or a pixel distance (`120px`, `120`), optionally followed
//! by a relative offset (`top+=100`, `bottom-=10%`).

use std::{fmt, str::FromStr};

use crate::error::ScrollError;

/// A distance along an element or viewport, measured from its top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute pixels.
    Pixels(f32),
    /// Percentage of the extent (0 = top, 100 = bottom).
    Percent(f32),
}

impl Length {
    /// Resolve to pixels against an extent (element or viewport height).
    #[inline]
    #[must_use]
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Self::Pixels(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }

    fn negate(self) -> Self {
        match self {
            Self::Pixels(px) => Self::Pixels(-px),
            Self::Percent(pct) => Self::Percent(-pct),
        }
    }
}

impl FromStr for Length {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |num: &str| {
            num.trim().parse::<f32>().ok().filter(|v| v.is_finite()).ok_or_else(
                || ScrollError::config(format!("invalid length '{s}'")),
            )
        };
        match s {
            "top" => Ok(Self::Percent(0.0)),
            "center" => Ok(Self::Percent(50.0)),
            "bottom" => Ok(Self::Percent(100.0)),
            _ => {
                if let Some(num) = s.strip_suffix('%') {
                    parse(num).map(Self::Percent)
                } else if let Some(num) = s.strip_suffix("px") {
                    parse(num).map(Self::Pixels)
                } else {
                    parse(s).map(Self::Pixels)
                }
            }
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Percent(p) if p == 0.0 => f.write_str("top"),
            Self::Percent(p) if p == 50.0 => f.write_str("center"),
            Self::Percent(p) if p == 100.0 => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// One side of a trigger position: a base point plus an optional relative
/// offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Base point.
    pub base: Length,
    /// Signed offset added to the base point.
    pub offset: Option<Length>,
}

impl Anchor {
    /// Anchor at a base point with no offset.
    #[must_use]
    pub const fn at(base: Length) -> Self {
        Self { base, offset: None }
    }

    /// Resolve to pixels from the top of an extent.
    #[must_use]
    pub fn resolve(&self, extent: f32) -> f32 {
        self.base.resolve(extent)
            + self.offset.map_or(0.0, |o| o.resolve(extent))
    }
}

impl FromStr for Anchor {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((base, off)) = s.split_once("+=") {
            return Ok(Self {
                base: base.parse()?,
                offset: Some(off.parse()?),
            });
        }
        if let Some((base, off)) = s.split_once("-=") {
            return Ok(Self {
                base: base.parse()?,
                offset: Some(off.parse::<Length>()?.negate()),
            });
        }
        Ok(Self::at(s.parse()?))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        match self.offset {
            Some(Length::Pixels(px)) if px < 0.0 => write!(f, "-={}px", -px),
            Some(Length::Percent(p)) if p < 0.0 => write!(f, "-={}%", -p),
            Some(Length::Pixels(px)) => write!(f, "+={px}px"),
            Some(Length::Percent(p)) => write!(f, "+={p}%"),
            None => Ok(()),
        }
    }
}

/// Where on the page a scroll window starts or ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerPosition {
    /// Point on the trigger element.
    pub element: Anchor,
    /// Point on the viewport the element point must meet.
    pub viewport: Anchor,
}

impl TriggerPosition {
    /// `"top bottom"`: element top meets viewport bottom.
    pub const TOP_BOTTOM: Self = Self {
        element: Anchor::at(Length::Percent(0.0)),
        viewport: Anchor::at(Length::Percent(100.0)),
    };

    /// `"top top"`: element top meets viewport top.
    pub const TOP_TOP: Self = Self {
        element: Anchor::at(Length::Percent(0.0)),
        viewport: Anchor::at(Length::Percent(0.0)),
    };

    /// Document scroll offset at which this position is reached, for an
    /// element at `element_top` with height `element_height` in a viewport
    /// of `viewport_height`.
    #[must_use]
    pub fn scroll_offset(
        &self,
        element_top: f32,
        element_height: f32,
        viewport_height: f32,
    ) -> f32 {
        element_top + self.element.resolve(element_height)
            - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for TriggerPosition {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(element), Some(viewport), None) => Ok(Self {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(ScrollError::config(format!(
                "trigger position '{s}' must be '<element> <viewport>'"
            ))),
        }
    }
}

impl fmt::Display for TriggerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keyword_pairs() {
        let p: TriggerPosition = "top bottom".parse().unwrap();
        assert_eq!(p, TriggerPosition::TOP_BOTTOM);
        let p: TriggerPosition = "top top".parse().unwrap();
        assert_eq!(p, TriggerPosition::TOP_TOP);
    }

    #[test]
    fn parses_percent_and_pixels() {
        let p: TriggerPosition = "top 80%".parse().unwrap();
        assert_eq!(p.viewport.base, Length::Percent(80.0));
        let p: TriggerPosition = "120px 40".parse().unwrap();
        assert_eq!(p.element.base, Length::Pixels(120.0));
        assert_eq!(p.viewport.base, Length::Pixels(40.0));
    }

    #[test]
    fn parses_relative_offsets() {
        let a: Anchor = "top+=100".parse().unwrap();
        assert_eq!(a.resolve(500.0), 100.0);
        let a: Anchor = "bottom-=10%".parse().unwrap();
        assert_eq!(a.resolve(500.0), 450.0);
    }

    #[test]
    fn rejects_malformed_positions() {
        assert!("top".parse::<TriggerPosition>().is_err());
        assert!("top bottom center".parse::<TriggerPosition>().is_err());
        assert!("middle top".parse::<TriggerPosition>().is_err());
        assert!("top abc%".parse::<TriggerPosition>().is_err());
        assert!(matches!(
            "nope".parse::<TriggerPosition>(),
            Err(ScrollError::Configuration(_))
        ));
    }

    #[test]
    fn display_is_parseable() {
        for s in ["top bottom", "top 80%", "center+=40px top", "bottom-=5% 120px"] {
            let p: TriggerPosition = s.parse().unwrap();
            let again: TriggerPosition = p.to_string().parse().unwrap();
            assert_eq!(p, again, "{s}");
        }
    }

    #[test]
    fn scroll_offset_for_section_entering_viewport() {
        // Element at 1000px, viewport 800px tall
        let start = TriggerPosition::TOP_BOTTOM.scroll_offset(1000.0, 600.0, 800.0);
        let end = TriggerPosition::TOP_TOP.scroll_offset(1000.0, 600.0, 800.0);
        assert_eq!(start, 200.0);
        assert_eq!(end, 1000.0);
        let p: TriggerPosition = "top 80%".parse().unwrap();
        assert_eq!(p.scroll_offset(1000.0, 600.0, 800.0), 360.0);
    }
}
