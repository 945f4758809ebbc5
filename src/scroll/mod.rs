//! Scroll geometry: where each step's window lies on the page, and how the
//! page scrolls when a button is clicked.

pub mod layout;
pub mod smooth;
pub mod trigger;

pub use layout::{ElementRect, PageLayout, ScrollWindow, Section};
pub use smooth::{ScrollAction, SmoothScroll};
pub use trigger::{Anchor, Length, TriggerPosition};
