//! Camera description and screen-space projection shared with the shell.
//!
//! These types avoid any platform API; the native frontend consumes them to
//! build view/projection matrices and the auto-framer projects through them.

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{CAMERA_FOV_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Default view: straight down the z axis from distance 10.
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Project a world point to pixel coordinates, origin top-left and y
    /// growing downward.
    pub fn world_to_screen(&self, point: Vec3, viewport: Vec2) -> Vec2 {
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let cx = viewport.x / 2.0;
        let cy = viewport.y / 2.0;
        Vec2::new(ndc.x * cx + cx, -(ndc.y * cy) + cy)
    }
}
