//! Damped orbit interaction: drag to orbit, wheel to dolly.
//!
//! Keyboard navigation is deliberately not wired up; keys are reserved for
//! the parameter command surface in `main`.

use flower_core::{CAMERA_Z, ORBIT_DAMPING};
use glam::Vec3;

const DRAG_SENSITIVITY: f32 = 0.005;
const PITCH_LIMIT: f32 = 1.5;
const DISTANCE_MIN: f32 = 1.0;
const DISTANCE_MAX: f32 = 100.0;

pub struct OrbitController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_Z,
            target_yaw: 0.0,
            target_pitch: 0.0,
            target_distance: CAMERA_Z,
            dragging: false,
            last_cursor: None,
        }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        if self.dragging {
            if let Some((last_x, last_y)) = self.last_cursor {
                self.target_yaw += (x - last_x) as f32 * DRAG_SENSITIVITY;
                self.target_pitch = (self.target_pitch + (y - last_y) as f32 * DRAG_SENSITIVITY)
                    .clamp(-PITCH_LIMIT, PITCH_LIMIT);
            }
        }
        self.last_cursor = Some((x, y));
    }

    pub fn on_scroll(&mut self, delta: f32) {
        self.target_distance = (self.target_distance - delta).clamp(DISTANCE_MIN, DISTANCE_MAX);
    }

    /// Ease the current orientation toward its target. Called once per
    /// frame.
    pub fn update(&mut self) {
        self.yaw += (self.target_yaw - self.yaw) * ORBIT_DAMPING;
        self.pitch += (self.target_pitch - self.pitch) * ORBIT_DAMPING;
        self.distance += (self.target_distance - self.distance) * ORBIT_DAMPING;
    }

    /// Camera eye on the orbit sphere, looking at the origin.
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            self.distance * cos_pitch * sin_yaw,
            self.distance * sin_pitch,
            self.distance * cos_pitch * cos_yaw,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_position_matches_default_camera() {
        let orbit = OrbitController::new();
        let eye = orbit.eye();
        assert!((eye - Vec3::new(0.0, 0.0, CAMERA_Z)).length() < 1e-6);
    }

    #[test]
    fn damping_converges_toward_target() {
        let mut orbit = OrbitController::new();
        orbit.set_dragging(true);
        orbit.on_cursor_moved(0.0, 0.0);
        orbit.on_cursor_moved(100.0, 0.0);
        let mut last_gap = f32::MAX;
        for _ in 0..60 {
            orbit.update();
            let gap = (orbit.target_yaw - orbit.yaw).abs();
            assert!(gap <= last_gap);
            last_gap = gap;
        }
        assert!(last_gap < 1e-3);
    }

    #[test]
    fn cursor_moves_without_drag_do_not_orbit() {
        let mut orbit = OrbitController::new();
        orbit.on_cursor_moved(0.0, 0.0);
        orbit.on_cursor_moved(500.0, 500.0);
        orbit.update();
        assert_eq!(orbit.yaw, 0.0);
        assert_eq!(orbit.pitch, 0.0);
    }
}
