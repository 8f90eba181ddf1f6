//! Parameter set consumed by the flower assembler.
//!
//! A `FlowerParams` is an immutable snapshot: the shell merges a
//! `ParamUpdate` into a copy and regenerates the whole flower. There is no
//! partial-update path into an existing generation.

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowerParams {
    /// Strands per stem.
    pub lines: u32,
    /// Angular replicas; S stems means S-fold rotational symmetry.
    pub stems: u32,
    /// Maximum heading change per step, radians.
    pub angle_range: f64,
    /// Z extent of the flower.
    pub depth: f64,
    /// Noise-time advance per walker step.
    pub noise_speed: f64,
    /// Steps per strand.
    pub iterations: u32,
    /// Base hue, degrees.
    pub hue: f32,
    /// Hue variance from the base hue across lines, degrees.
    pub hue_range: f32,
    /// Strand lightness, percent.
    pub lightness: f32,
    /// Light background with normal blending instead of dark + additive.
    pub invert: bool,
}

impl Default for FlowerParams {
    fn default() -> Self {
        Self {
            lines: 3,
            stems: 5,
            angle_range: 0.01,
            depth: 5.0,
            noise_speed: 0.0003,
            iterations: 3000,
            hue: 300.0,
            hue_range: 90.0,
            lightness: 60.0,
            invert: false,
        }
    }
}

/// Partial update merged into a snapshot before regeneration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParamUpdate {
    pub lines: Option<u32>,
    pub stems: Option<u32>,
    pub angle_range: Option<f64>,
    pub depth: Option<f64>,
    pub noise_speed: Option<f64>,
    pub iterations: Option<u32>,
    pub hue: Option<f32>,
    pub hue_range: Option<f32>,
    pub lightness: Option<f32>,
    pub invert: Option<bool>,
}

impl FlowerParams {
    /// Merge `update` into a copy of `self`.
    pub fn merged(&self, update: &ParamUpdate) -> Self {
        let mut out = *self;
        if let Some(v) = update.lines {
            out.lines = v;
        }
        if let Some(v) = update.stems {
            out.stems = v.max(1);
        }
        if let Some(v) = update.angle_range {
            out.angle_range = v;
        }
        if let Some(v) = update.depth {
            out.depth = v.max(0.0);
        }
        if let Some(v) = update.noise_speed {
            out.noise_speed = v;
        }
        if let Some(v) = update.iterations {
            out.iterations = v;
        }
        if let Some(v) = update.hue {
            out.hue = v;
        }
        if let Some(v) = update.hue_range {
            out.hue_range = v;
        }
        if let Some(v) = update.lightness {
            out.lightness = v;
        }
        if let Some(v) = update.invert {
            out.invert = v;
        }
        out
    }

    /// Random parameter set over the same ranges the original control panel
    /// offered.
    pub fn randomized(rng: &mut impl Rng) -> Self {
        Self {
            lines: rng.gen_range(1..7),
            stems: rng.gen_range(1..11),
            angle_range: rng.gen_range(0.002..0.018),
            depth: rng.gen_range(0.0..10.0),
            noise_speed: rng.gen_range(0.000_001..0.000_5),
            iterations: rng.gen_range(500..8001),
            hue: rng.gen_range(0..361) as f32,
            hue_range: rng.gen_range(0..91) as f32,
            lightness: rng.gen_range(0..101) as f32,
            invert: rng.gen_bool(0.5),
        }
    }
}
