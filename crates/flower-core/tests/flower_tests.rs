use rand::rngs::StdRng;
use rand::SeedableRng;

use flower_core::math::hsl_to_rgb;
use flower_core::noise::NoiseSource;
use flower_core::{
    build_flower, ribbon_width, BlendMode, FlowerParams, ParamUpdate, SimplexField,
    BACKGROUND_DARK, BACKGROUND_LIGHT,
};

struct ConstNoise(f64);

impl NoiseSource for ConstNoise {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

fn small_params() -> FlowerParams {
    FlowerParams {
        lines: 3,
        stems: 4,
        iterations: 50,
        ..FlowerParams::default()
    }
}

#[test]
fn instance_count_is_lines_times_stems() {
    let mut rng = StdRng::seed_from_u64(1);
    let flower = build_flower(&small_params(), &ConstNoise(0.0), &mut rng);
    assert_eq!(flower.strands.len(), 3);
    assert_eq!(flower.instance_count(), 12);
    for strand in &flower.strands {
        assert_eq!(strand.path.len(), 50);
        assert_eq!(strand.stems.len(), 4);
    }
}

#[test]
fn generation_is_deterministic_for_a_fixed_seed() {
    let noise = SimplexField::new(99);
    let a = build_flower(&small_params(), &noise, &mut StdRng::seed_from_u64(5));
    let b = build_flower(&small_params(), &noise, &mut StdRng::seed_from_u64(5));
    assert_eq!(a.edge, b.edge);
    for (sa, sb) in a.strands.iter().zip(&b.strands) {
        assert_eq!(sa.path, sb.path);
        assert_eq!(sa.color, sb.color);
    }
}

#[test]
fn zero_lines_yield_an_empty_flower() {
    let params = FlowerParams {
        lines: 0,
        ..small_params()
    };
    let mut rng = StdRng::seed_from_u64(1);
    let flower = build_flower(&params, &ConstNoise(0.0), &mut rng);
    assert!(flower.strands.is_empty());
    assert_eq!(flower.instance_count(), 0);
    assert_eq!(flower.edge, 0.0);
}

#[test]
fn edge_covers_every_strand_point() {
    let mut rng = StdRng::seed_from_u64(11);
    let noise = SimplexField::new(11);
    let flower = build_flower(&small_params(), &noise, &mut rng);
    for strand in &flower.strands {
        for point in &strand.path {
            assert!(point.x.abs() <= flower.edge + 1e-6);
            assert!(point.y.abs() <= flower.edge + 1e-6);
        }
    }
}

#[test]
fn stem_rotations_cover_the_circle_without_closing_it() {
    let mut rng = StdRng::seed_from_u64(2);
    let flower = build_flower(&small_params(), &ConstNoise(0.0), &mut rng);
    let rotations: Vec<f32> = flower.strands[0]
        .stems
        .iter()
        .map(|s| s.rotation_z)
        .collect();
    let step = std::f32::consts::TAU / 4.0;
    for (k, rotation) in rotations.iter().enumerate() {
        assert!((rotation - k as f32 * step).abs() < 1e-6);
    }
    // The last replica sits one step short of a full turn.
    assert!(rotations.last().unwrap() < &std::f32::consts::TAU);
}

#[test]
fn hue_spreads_across_lines() {
    let mut rng = StdRng::seed_from_u64(3);
    let flower = build_flower(&small_params(), &ConstNoise(0.0), &mut rng);
    let hues: Vec<f32> = flower.strands.iter().map(|s| s.hue).collect();
    // Default hue 300, range 90: 360 + 300 - 90 + i * 60.
    for (hue, expected) in hues.iter().zip([570.0, 630.0, 690.0]) {
        assert!((hue - expected).abs() < 1e-3, "{hues:?}");
    }
}

#[test]
fn invert_swaps_background_and_blend() {
    let mut rng = StdRng::seed_from_u64(4);
    let dark = build_flower(&small_params(), &ConstNoise(0.0), &mut rng);
    assert_eq!(dark.background, BACKGROUND_DARK);
    assert_eq!(dark.blend, BlendMode::Additive);

    let params = FlowerParams {
        invert: true,
        ..small_params()
    };
    let light = build_flower(&params, &ConstNoise(0.0), &mut rng);
    assert_eq!(light.background, BACKGROUND_LIGHT);
    assert_eq!(light.blend, BlendMode::Normal);
}

#[test]
fn ribbon_width_tapers_symmetrically() {
    assert!((ribbon_width(0.0) - 0.1).abs() < 1e-6);
    assert!((ribbon_width(1.0) - 0.1).abs() < 1e-6);
    assert!((ribbon_width(0.5) - 1.1).abs() < 1e-6);
    for p in [0.1, 0.25, 0.4] {
        assert!((ribbon_width(p) - ribbon_width(1.0 - p)).abs() < 1e-6);
    }
}

#[test]
fn out_of_range_hues_wrap() {
    assert_eq!(hsl_to_rgb(-30.0, 100.0, 60.0), hsl_to_rgb(330.0, 100.0, 60.0));
    assert_eq!(hsl_to_rgb(690.0, 100.0, 60.0), hsl_to_rgb(330.0, 100.0, 60.0));
}

#[test]
fn merged_updates_clamp_degenerate_values() {
    let base = FlowerParams::default();
    let merged = base.merged(&ParamUpdate {
        stems: Some(0),
        depth: Some(-3.0),
        lines: Some(6),
        ..ParamUpdate::default()
    });
    assert_eq!(merged.stems, 1);
    assert_eq!(merged.depth, 0.0);
    assert_eq!(merged.lines, 6);
    // Untouched fields carry over.
    assert_eq!(merged.hue, base.hue);
    assert_eq!(merged.invert, base.invert);
}

#[test]
fn randomized_params_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..100 {
        let p = FlowerParams::randomized(&mut rng);
        assert!((1..7).contains(&p.lines));
        assert!((1..11).contains(&p.stems));
        assert!(p.angle_range >= 0.002 && p.angle_range < 0.018);
        assert!(p.depth >= 0.0 && p.depth < 10.0);
        assert!(p.noise_speed >= 0.000_001 && p.noise_speed < 0.000_5);
        assert!((500..8001).contains(&p.iterations));
        assert!(p.hue >= 0.0 && p.hue <= 360.0);
        assert!(p.hue_range >= 0.0 && p.hue_range <= 90.0);
        assert!(p.lightness >= 0.0 && p.lightness <= 100.0);
    }
}
