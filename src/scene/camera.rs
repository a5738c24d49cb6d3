use glam::{Mat4, Quat, Vec3};
use serde::Serialize;

use crate::scene::transform::look_rotation;
use crate::settings::CameraSettings;

/// Perspective camera with an explicit look-at target.
///
/// The camera never owns a rotation of its own: orientation is derived from
/// `position` and `target` on demand, so animators only ever move points.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// Serializable camera pose reported in every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    /// `fov` is given in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: fov.to_radians(),
            aspect,
            near,
            far,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new_perspective(settings.fov_degrees, settings.aspect, settings.near, settings.far)
    }

    /// Moves the camera and aims it in one go.
    pub fn place(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// World-space orientation, or identity when the view direction is
    /// degenerate.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        look_rotation(self.position, self.target, self.up).unwrap_or(Quat::IDENTITY)
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            target: self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_lies_on_view_axis() {
        let mut camera = Camera::new_perspective(50.0, 1.0, 0.1, 100.0);
        camera.place(Vec3::new(0.0, 3.0, 8.0), Vec3::new(0.0, 0.6, 0.0));

        let in_view = camera.view_matrix().transform_point3(camera.target);
        assert!(in_view.x.abs() < 1e-5 && in_view.y.abs() < 1e-5);
        assert!(in_view.z < 0.0);

        let forward = camera.rotation() * Vec3::NEG_Z;
        let expected = (camera.target - camera.position).normalize();
        assert!((forward - expected).length() < 1e-5);
    }

    #[test]
    fn degenerate_view_falls_back_to_identity() {
        let mut camera = Camera::new_perspective(50.0, 1.0, 0.1, 100.0);
        camera.place(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        assert_eq!(camera.rotation(), Quat::IDENTITY);
        assert!(camera.view_projection_matrix().is_finite());
    }
}
