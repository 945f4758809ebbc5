//! Scroll-driven keyframe animation: the timeline builder and the steps it
//! sequences.

pub mod interpolation;
pub mod step;
pub mod style;
pub mod timeline;

pub use interpolation::{Channel, StepValue, Targets};
pub use step::{
    KeyframeStep, OnApplied, ScrubConfig, ScrubMode, StepId, StepTarget,
    StepUpdate,
};
pub use style::{ElementStyle, ElementStyles, StyleProperty};
pub use timeline::Timeline;
