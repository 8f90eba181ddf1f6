//! Flower assembly: spawn walkers, color their strands, replicate per stem.

use std::f32::consts::TAU as TAU32;
use std::f64::consts::TAU;

use glam::{DVec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;

use crate::constants::{BACKGROUND_DARK, BACKGROUND_LIGHT, STRAND_TIME_OFFSET, WIDTH_FLOOR};
use crate::math::{hsl_to_rgb, map};
use crate::noise::NoiseSource;
use crate::params::FlowerParams;
use crate::walker::{build_path, GrowthDirection, WalkerConfig};

/// How strand colors combine with the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Additive,
    Normal,
}

/// One angular replica of a strand. Replicas carry only a rotation; the
/// geometry and animatable uniforms live on the owning [`StrandVisual`], so
/// mutating those per frame affects every replica at once.
#[derive(Clone, Copy, Debug)]
pub struct StemInstance {
    pub rotation_z: f32,
}

/// One generated strand and its shared visual state.
#[derive(Clone, Debug)]
pub struct StrandVisual {
    /// Centerline, `iterations` points long.
    pub path: Vec<Vec3>,
    /// Assigned hue in degrees, before wrap normalization.
    pub hue: f32,
    /// Resolved strand color.
    pub color: [f32; 3],
    pub stems: SmallVec<[StemInstance; 8]>,
}

/// A full generation: every strand plus the silhouette radius the
/// auto-framer fits against.
#[derive(Clone, Debug)]
pub struct Flower {
    pub strands: Vec<StrandVisual>,
    /// Maximum |x| or |y| over every strand point.
    pub edge: f32,
    pub background: [f32; 3],
    pub blend: BlendMode,
}

impl Flower {
    /// Total renderable ribbon instances (lines x stems).
    pub fn instance_count(&self) -> usize {
        self.strands.iter().map(|s| s.stems.len()).sum()
    }
}

/// Ribbon width profile along the strand: widest at the midpoint, tapering
/// to a small but non-zero width at both ends.
pub fn ribbon_width(p: f32) -> f32 {
    1.0 - map(p, 0.0, 1.0, -1.0, 1.0).abs() + WIDTH_FLOOR
}

/// Build one full flower from a parameter snapshot.
///
/// `noise` is expected to be freshly seeded for this generation; `rng`
/// drives only the per-line centered/offset start choice. Assumes
/// `stems >= 1`; `lines == 0` or `iterations == 0` produce an empty but
/// valid flower with edge 0.
pub fn build_flower(params: &FlowerParams, noise: &dyn NoiseSource, rng: &mut impl Rng) -> Flower {
    let lines = params.lines;
    let stems = params.stems.max(1);
    let mut edge = 0.0_f32;
    let mut strands = Vec::with_capacity(lines as usize);

    for i in 0..lines {
        let centered = rng.gen_bool(0.5);
        let start = if centered {
            DVec2::ZERO
        } else {
            DVec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
        };

        // Base rotation slot: lines spread evenly within one stem's wedge,
        // stem replication below fills the rest of the circle.
        let heading = (i as f64 / lines as f64) * (TAU / stems as f64);

        let path = build_path(
            &WalkerConfig {
                start,
                heading,
                step_delta: params.noise_speed,
                angle_range: params.angle_range,
                depth: params.depth,
                direction: GrowthDirection::Toward,
                time_offset: i as f64 * STRAND_TIME_OFFSET,
                steps: params.iterations as usize,
            },
            noise,
        );

        for point in &path {
            edge = edge.max(point.x.abs()).max(point.y.abs());
        }

        let hue = 360.0
            + params.hue
            + map(
                i as f32,
                0.0,
                lines as f32,
                -params.hue_range,
                params.hue_range,
            );
        let color = hsl_to_rgb(hue, 100.0, params.lightness);

        let instances = (0..stems)
            .map(|k| StemInstance {
                rotation_z: map(k as f32, 0.0, stems as f32, 0.0, TAU32),
            })
            .collect();

        strands.push(StrandVisual {
            path,
            hue,
            color,
            stems: instances,
        });
    }

    log::debug!(
        "assembled flower: {} lines x {} stems, edge {:.3}",
        lines,
        stems,
        edge
    );

    Flower {
        strands,
        edge,
        background: if params.invert {
            BACKGROUND_LIGHT
        } else {
            BACKGROUND_DARK
        },
        blend: if params.invert {
            BlendMode::Normal
        } else {
            BlendMode::Additive
        },
    }
}
