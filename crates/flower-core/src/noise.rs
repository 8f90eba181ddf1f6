//! Deterministic 2D noise behind the path walker.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::Rng;

/// A smooth, deterministic 2D field returning values in [-1, 1].
///
/// The trait seam exists so tests can substitute a fixed-valued source and
/// verify the walker's range mapping exactly.
pub trait NoiseSource {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// OpenSimplex2 field over a random permutation, re-seeded once per
/// generation cycle. Coordinates are sampled raw (frequency 1.0); the
/// caller controls the effective rate through its time delta.
pub struct SimplexField {
    noise: FastNoiseLite,
}

impl SimplexField {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }

    /// Fresh field for a new generation cycle.
    pub fn from_rng(rng: &mut impl Rng) -> Self {
        Self::new(rng.gen())
    }
}

impl NoiseSource for SimplexField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise.get_noise_2d(x, y) as f64
    }
}
