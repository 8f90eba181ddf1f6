//! The path walker: one noise-driven strand centerline.

use glam::{DVec2, Vec3};

use crate::constants::{MAX_STEP_SPEED, SPEED_NOISE_CHANNEL};
use crate::math::map64;
use crate::noise::NoiseSource;

/// Whether the strand grows toward the camera (z rising) or away from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthDirection {
    Toward,
    Away,
}

#[derive(Clone, Copy, Debug)]
pub struct WalkerConfig {
    /// Planar starting position.
    pub start: DVec2,
    /// Initial heading, radians.
    pub heading: f64,
    /// Noise-time advance per step.
    pub step_delta: f64,
    /// Maximum heading perturbation per step, radians.
    pub angle_range: f64,
    /// Total z span of the strand.
    pub depth: f64,
    pub direction: GrowthDirection,
    /// Starting noise time; decorrelates strands sharing one field.
    pub time_offset: f64,
    /// Number of points to produce.
    pub steps: usize,
}

/// Integrate one strand through the noise field.
///
/// Heading perturbations come from the field at channel 0, step speed from
/// channel 1000 remapped to [0, 0.01]. The z coordinate is purely a linear
/// function of normalized progress, so a zero `angle_range` and a constant
/// field yield a straight line. `steps == 0` produces an empty path.
pub fn build_path(config: &WalkerConfig, noise: &dyn NoiseSource) -> Vec<Vec3> {
    let mut path = Vec::with_capacity(config.steps);
    let mut position = config.start;
    let mut heading = config.heading;
    let mut time = config.time_offset;

    for i in 0..config.steps {
        let progress = i as f64 / config.steps as f64;
        time += config.step_delta;

        let turn = map64(
            noise.sample(time, 0.0),
            -1.0,
            1.0,
            -config.angle_range,
            config.angle_range,
        );
        heading += turn;

        let speed = map64(
            noise.sample(time, SPEED_NOISE_CHANNEL),
            -1.0,
            1.0,
            0.0,
            MAX_STEP_SPEED,
        );
        position.x += heading.cos() * speed;
        position.y += heading.sin() * speed;

        let half_depth = config.depth / 2.0;
        let z = match config.direction {
            GrowthDirection::Away => map64(progress, 0.0, 1.0, half_depth, -half_depth),
            GrowthDirection::Toward => map64(progress, 0.0, 1.0, -half_depth, half_depth),
        };

        path.push(Vec3::new(position.x as f32, position.y as f32, z as f32));
    }

    path
}
