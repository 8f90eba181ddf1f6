//! Auto-framing: shrink the flower until its silhouette fits on screen.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::constants::{FIT_MAX_ATTEMPTS, FIT_SCALE_STEP, FIT_TOP_MARGIN};

/// Find a uniform group scale that brings the silhouette point
/// `(0, edge, 0)` below the top margin of the viewport.
///
/// Starts at 1.0 and steps down by 0.05 while the projected point sits
/// above 20% of viewport height, capped at 50 attempts so a degenerate
/// `edge` (0, negative, or enormous) can never loop forever. The caller
/// decides when to run this; it should happen after the camera reflects
/// the latest viewport size.
pub fn fit_scale(edge: f32, camera: &Camera, viewport: Vec2) -> f32 {
    let mut scale = 1.0_f32;
    let mut attempts = 0;
    let mut screen = camera.world_to_screen(Vec3::new(0.0, edge * scale, 0.0), viewport);
    while screen.y < viewport.y * FIT_TOP_MARGIN && attempts <= FIT_MAX_ATTEMPTS {
        scale -= FIT_SCALE_STEP;
        screen = camera.world_to_screen(Vec3::new(0.0, edge * scale, 0.0), viewport);
        attempts += 1;
    }
    scale
}
