use glam::{Mat4, Vec3};

use super::pose::CameraPose;

/// Camera whose pose is mutated externally.
///
/// Pose writes do not touch the view matrix. The owner must call
/// [`position_updated`](Self::position_updated) /
/// [`target_updated`](Self::target_updated) afterwards, mirroring how
/// render-on-demand viewers expect external camera edits to be announced.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Position and look-at target. Mutated in place by scroll steps.
    pub pose: CameraPose,
    /// Up direction vector.
    pub up: Vec3,
    view: Mat4,
    derived_from: CameraPose,
    revision: u64,
}

impl Camera {
    /// Create a camera at `pose` with a derived view matrix.
    #[must_use]
    pub fn new(pose: CameraPose) -> Self {
        let mut camera = Self {
            pose,
            up: Vec3::Y,
            view: Mat4::IDENTITY,
            derived_from: pose,
            revision: 0,
        };
        camera.rederive();
        camera
    }

    /// Announce that `pose.position` was mutated externally.
    ///
    /// Re-derives the view matrix when the position differs from the one
    /// the matrix was built from, or unconditionally when `force` is set.
    /// Returns whether the matrix was rebuilt.
    pub fn position_updated(&mut self, force: bool) -> bool {
        if !force && self.pose.position == self.derived_from.position {
            return false;
        }
        self.rederive();
        true
    }

    /// Announce that `pose.target` was mutated externally. See
    /// [`position_updated`](Self::position_updated).
    pub fn target_updated(&mut self, force: bool) -> bool {
        if !force && self.pose.target == self.derived_from.target {
            return false;
        }
        self.rederive();
        true
    }

    /// View matrix as of the last `*_updated` call.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Pose the current view matrix was derived from.
    #[must_use]
    pub fn derived_pose(&self) -> CameraPose {
        self.derived_from
    }

    /// Number of times the view matrix has been re-derived.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn rederive(&mut self) {
        // look_at_rh degenerates when eye == target
        let eye = self.pose.position;
        let target = if (self.pose.target - eye).length_squared() > 0.0 {
            self.pose.target
        } else {
            eye - Vec3::Z
        };
        self.view = Mat4::look_at_rh(eye, target, self.up);
        self.derived_from = self.pose;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO))
    }

    #[test]
    fn pose_writes_are_invisible_until_announced() {
        let mut cam = camera();
        let before = cam.view_matrix();
        cam.pose.position = Vec3::new(5.0, 0.0, 5.0);
        assert_eq!(cam.view_matrix(), before);

        assert!(cam.position_updated(false));
        assert_ne!(cam.view_matrix(), before);
        assert_eq!(cam.derived_pose().position, Vec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn unforced_update_without_change_is_noop() {
        let mut cam = camera();
        let rev = cam.revision();
        assert!(!cam.position_updated(false));
        assert!(!cam.target_updated(false));
        assert_eq!(cam.revision(), rev);

        assert!(cam.target_updated(true));
        assert_eq!(cam.revision(), rev + 1);
    }

    #[test]
    fn view_matrix_maps_target_in_front_of_eye() {
        let cam = camera();
        let p = cam.view_matrix().transform_point3(Vec3::ZERO);
        // Right-handed view space looks down -Z
        assert!((p.z + 10.0).abs() < 1e-4);
    }

    #[test]
    fn coincident_eye_and_target_stay_finite() {
        let cam = Camera::new(CameraPose::new(Vec3::ONE, Vec3::ONE));
        assert!(cam.view_matrix().is_finite());
    }
}
