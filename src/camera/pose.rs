//! Camera pose: the position/target vector pair scroll steps animate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Names one sub-vector of a [`CameraPose`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PoseField {
    /// Eye position in world space.
    Position,
    /// Look-at target in world space.
    Target,
}

/// A camera's position and look-at target.
///
/// Owned by the viewer's camera. The timeline borrows it mutably for the
/// duration of one scroll pass; nothing else holds on to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Look-at target in world space.
    pub target: Vec3,
}

impl CameraPose {
    /// Create a pose from a position and target.
    #[must_use]
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Read one sub-vector.
    #[inline]
    #[must_use]
    pub fn get(&self, field: PoseField) -> Vec3 {
        match field {
            PoseField::Position => self.position,
            PoseField::Target => self.target,
        }
    }

    /// Overwrite one sub-vector in place.
    #[inline]
    pub fn set(&mut self, field: PoseField, value: Vec3) {
        match field {
            PoseField::Position => self.position = value,
            PoseField::Target => self.target = value,
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_address_the_right_field() {
        let mut pose = CameraPose::default();
        pose.set(PoseField::Target, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.get(PoseField::Target), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.get(PoseField::Position), Vec3::new(0.0, 0.0, 5.0));
    }
}
