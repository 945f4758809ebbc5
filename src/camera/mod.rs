//! Camera state shared between the viewer and the scroll timeline.
//!
//! The pose (position + target) is the only part scroll steps touch; the
//! [`core::Camera`] derives its view matrix from the pose when the viewer is
//! told the pose changed.

/// Perspective camera with an explicitly re-derived view matrix.
pub mod core;
/// Position/target pose vectors.
pub mod pose;

pub use self::core::Camera;
pub use pose::{CameraPose, PoseField};
