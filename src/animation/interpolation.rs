//! Animated channels, their values, and where those values are written.

use glam::Vec3;

use super::style::{ElementStyles, StyleProperty};
use crate::camera::{CameraPose, PoseField};

/// One independently animated quantity. Steps on different channels never
/// interact; steps on the same channel are folded in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// A camera pose sub-vector.
    Pose(PoseField),
    /// A style property of a page element.
    Style {
        /// Element selector.
        selector: String,
        /// Animated property.
        property: StyleProperty,
    },
}

/// Value carried by a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepValue {
    /// Pose sub-vector.
    Vector(Vec3),
    /// Style property.
    Scalar(f32),
}

impl StepValue {
    /// Blend toward `to` by `t`. Values of different kinds never share a
    /// channel; if they do, the result snaps to `to` once `t` reaches 1.
    #[inline]
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        match (self, to) {
            (Self::Vector(a), Self::Vector(b)) => Self::Vector(lerp_position(a, b, t)),
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(lerp_f32(a, b, t)),
            _ if t >= 1.0 => to,
            _ => self,
        }
    }

    /// The vector, if this is a pose value.
    #[must_use]
    pub fn as_vector(self) -> Option<Vec3> {
        match self {
            Self::Vector(v) => Some(v),
            Self::Scalar(_) => None,
        }
    }

    /// The scalar, if this is a style value.
    #[must_use]
    pub fn as_scalar(self) -> Option<f32> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Vector(_) => None,
        }
    }
}

/// Lerp two positions.
#[inline]
#[must_use]
pub fn lerp_position(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    start + (end - start) * t
}

/// Lerp two f32 values.
#[inline]
#[must_use]
pub fn lerp_f32(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Mutable borrows of everything a timeline pass may write.
#[derive(Debug)]
pub struct Targets<'a> {
    /// Camera pose, owned by the viewer.
    pub pose: &'a mut CameraPose,
    /// Element styles, owned by the page.
    pub styles: &'a mut ElementStyles,
}

impl<'a> Targets<'a> {
    /// Borrow a pose and a style table.
    pub fn new(pose: &'a mut CameraPose, styles: &'a mut ElementStyles) -> Self {
        Self { pose, styles }
    }

    /// Current value of a channel.
    #[must_use]
    pub fn read(&self, channel: &Channel) -> StepValue {
        match channel {
            Channel::Pose(field) => StepValue::Vector(self.pose.get(*field)),
            Channel::Style { selector, property } => {
                StepValue::Scalar(self.styles.get(selector).get(*property))
            }
        }
    }

    /// Overwrite a channel. Values of the wrong kind are ignored.
    pub fn write(&mut self, channel: &Channel, value: StepValue) {
        match (channel, value) {
            (Channel::Pose(field), StepValue::Vector(v)) => self.pose.set(*field, v),
            (Channel::Style { selector, property }, StepValue::Scalar(v)) => {
                self.styles.set(selector, *property, v);
            }
            _ => log::warn!("ignoring {value:?} written to {channel:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_position() {
        let result = lerp_position(Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0), 0.5);
        assert!((result - Vec3::new(5.0, 10.0, 15.0)).length() < 0.001);
    }

    #[test]
    fn test_lerp_f32() {
        assert!((lerp_f32(0.0, 100.0, 0.25) - 25.0).abs() < 0.001);
    }

    #[test]
    fn step_value_lerp_keeps_kind() {
        let v = StepValue::Vector(Vec3::ZERO).lerp(StepValue::Vector(Vec3::ONE), 1.0);
        assert_eq!(v.as_vector(), Some(Vec3::ONE));
        let s = StepValue::Scalar(1.0).lerp(StepValue::Scalar(0.0), 0.5);
        assert_eq!(s.as_scalar(), Some(0.5));
    }

    #[test]
    fn targets_route_channels() {
        let mut pose = CameraPose::default();
        let mut styles = ElementStyles::default();
        let mut targets = Targets::new(&mut pose, &mut styles);

        let target = Channel::Pose(PoseField::Target);
        targets.write(&target, StepValue::Vector(Vec3::X));
        assert_eq!(targets.read(&target), StepValue::Vector(Vec3::X));

        let opacity = Channel::Style {
            selector: ".hero".into(),
            property: StyleProperty::Opacity,
        };
        assert_eq!(targets.read(&opacity), StepValue::Scalar(1.0));
        targets.write(&opacity, StepValue::Scalar(0.25));
        assert_eq!(styles.get(".hero").opacity, 0.25);
        assert_eq!(pose.target, Vec3::X);
    }
}
