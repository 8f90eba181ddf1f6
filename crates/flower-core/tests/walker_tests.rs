use glam::DVec2;

use flower_core::noise::NoiseSource;
use flower_core::walker::{build_path, GrowthDirection, WalkerConfig};

/// Fixed-valued field; lets the range mapping be checked exactly.
struct ConstNoise(f64);

impl NoiseSource for ConstNoise {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

fn config(steps: usize) -> WalkerConfig {
    WalkerConfig {
        start: DVec2::ZERO,
        heading: 0.0,
        step_delta: 0.0003,
        angle_range: 0.01,
        depth: 4.0,
        direction: GrowthDirection::Toward,
        time_offset: 0.0,
        steps,
    }
}

#[test]
fn path_length_matches_step_count() {
    let noise = ConstNoise(0.3);
    for steps in [0, 1, 2, 100] {
        let path = build_path(&config(steps), &noise);
        assert_eq!(path.len(), steps);
    }
}

#[test]
fn zero_field_walks_a_straight_line() {
    // Noise value 0 maps to zero turn and speed (0 + 0.01) / 2 per step.
    let noise = ConstNoise(0.0);
    let mut cfg = config(5);
    cfg.depth = 0.0;
    let path = build_path(&cfg, &noise);

    for (i, point) in path.iter().enumerate() {
        let expected_x = (i + 1) as f32 * 0.005;
        assert!((point.x - expected_x).abs() < 1e-6, "point {i}: {point:?}");
        assert!(point.y.abs() < 1e-9);
        assert!(point.z.abs() < 1e-9);
    }
}

#[test]
fn extreme_field_values_pin_turn_and_speed() {
    // Field at +1 gives the full positive turn and the maximum step speed.
    let noise = ConstNoise(1.0);
    let mut cfg = config(1);
    cfg.depth = 0.0;
    let path = build_path(&cfg, &noise);
    let point = path[0];
    let heading = 0.01_f64;
    assert!((point.x as f64 - heading.cos() * 0.01).abs() < 1e-6);
    assert!((point.y as f64 - heading.sin() * 0.01).abs() < 1e-6);

    // Field at -1 stalls the walker entirely.
    let noise = ConstNoise(-1.0);
    let path = build_path(&cfg, &noise);
    assert!(path[0].x.abs() < 1e-9);
    assert!(path[0].y.abs() < 1e-9);
}

#[test]
fn depth_interpolates_toward_camera() {
    let noise = ConstNoise(0.0);
    let path = build_path(&config(4), &noise);
    let z: Vec<f32> = path.iter().map(|p| p.z).collect();
    assert_eq!(z, vec![-2.0, -1.0, 0.0, 1.0]);
}

#[test]
fn depth_interpolates_away_from_camera() {
    let noise = ConstNoise(0.0);
    let mut cfg = config(4);
    cfg.direction = GrowthDirection::Away;
    let path = build_path(&cfg, &noise);
    let z: Vec<f32> = path.iter().map(|p| p.z).collect();
    assert_eq!(z, vec![2.0, 1.0, 0.0, -1.0]);
}

#[test]
fn time_offset_decorrelates_strands() {
    let noise = flower_core::SimplexField::new(42);
    let a = build_path(&config(200), &noise);
    let mut cfg = config(200);
    cfg.time_offset = 1000.0;
    let b = build_path(&cfg, &noise);
    assert!(a.iter().zip(&b).any(|(p, q)| (*p - *q).length() > 1e-6));
}

#[test]
fn same_config_and_seed_reproduce_the_path() {
    let cfg = config(500);
    let a = build_path(&cfg, &flower_core::SimplexField::new(7));
    let b = build_path(&cfg, &flower_core::SimplexField::new(7));
    assert_eq!(a, b);
}
