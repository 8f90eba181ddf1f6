use flower_core::anim::{effective_progress, AnimationState};
use flower_core::ease;
use flower_core::IDEAL_FRAME_MS;

#[test]
fn triangle_wave_ramps_up_then_down() {
    assert_eq!(effective_progress(0.0), 0.0);
    assert_eq!(effective_progress(0.5), 0.5);
    assert_eq!(effective_progress(1.0), 1.0);
    assert_eq!(effective_progress(1.5), 0.5);
    assert_eq!(effective_progress(2.0), 0.0);
    // Period two.
    assert!((effective_progress(2.75) - effective_progress(0.75)).abs() < 1e-6);
    assert!((effective_progress(4.5) - effective_progress(0.5)).abs() < 1e-6);
}

#[test]
fn ease_curves_hit_exact_endpoints() {
    assert_eq!(ease::out_expo(0.0), 0.0);
    assert_eq!(ease::out_expo(1.0), 1.0);
    assert_eq!(ease::in_out_expo(0.0), 0.0);
    assert_eq!(ease::in_out_expo(1.0), 1.0);
}

#[test]
fn ease_curves_are_monotonic() {
    let mut last_out = 0.0;
    let mut last_in_out = 0.0;
    for i in 1..=100 {
        let t = i as f32 / 100.0;
        let out = ease::out_expo(t);
        let in_out = ease::in_out_expo(t);
        assert!(out >= last_out);
        assert!(in_out >= last_in_out);
        last_out = out;
        last_in_out = in_out;
    }
}

#[test]
fn opacity_saturates_at_half_progress() {
    let mut state = AnimationState {
        progress: 0.2,
        cycled: false,
    };
    let visuals = state.advance(0.0, 0.0, 1.0);
    assert!((visuals.opacity - 0.4).abs() < 1e-6);

    state.progress = 0.5;
    let visuals = state.advance(0.0, 0.0, 1.0);
    assert_eq!(visuals.opacity, 1.0);

    state.progress = 0.75;
    let visuals = state.advance(0.0, 0.0, 1.0);
    assert_eq!(visuals.opacity, 1.0);
}

#[test]
fn reveal_uses_out_expo_until_the_first_cycle_completes() {
    let mut state = AnimationState {
        progress: 0.5,
        cycled: false,
    };
    let visuals = state.advance(0.0, 0.0, 1.0);
    assert!((visuals.visibility - ease::out_expo(0.5)).abs() < 1e-6);
    assert!(!state.cycled);

    let mut state = AnimationState {
        progress: 2.5,
        cycled: true,
    };
    let visuals = state.advance(0.0, 0.0, 1.0);
    assert!((visuals.visibility - ease::in_out_expo(0.5)).abs() < 1e-6);
}

#[test]
fn cycled_flag_sets_once_and_survives_later_frames() {
    let mut state = AnimationState::default();
    state.progress = 0.999;
    state.advance(IDEAL_FRAME_MS, 0.0, 1.0);
    assert!(state.cycled);
    state.advance(IDEAL_FRAME_MS, 0.0, 1.0);
    assert!(state.cycled);
}

#[test]
fn progress_rate_is_frame_rate_independent() {
    let mut one_long = AnimationState::default();
    one_long.advance(2.0 * IDEAL_FRAME_MS, 0.0, 1.0);

    let mut two_short = AnimationState::default();
    two_short.advance(IDEAL_FRAME_MS, 0.0, 1.0);
    two_short.advance(IDEAL_FRAME_MS, 0.0, 1.0);

    assert!((one_long.progress - two_short.progress).abs() < 1e-6);
    assert!((one_long.progress - 0.01).abs() < 1e-6);
}

#[test]
fn sway_starts_tilted_on_x_only() {
    let mut state = AnimationState::default();
    let visuals = state.advance(0.0, 0.0, 1.0);
    assert!((visuals.rotation_x - 0.1).abs() < 1e-6);
    assert_eq!(visuals.rotation_y, 0.0);
}

#[test]
fn scale_snaps_to_the_fit_target() {
    let mut state = AnimationState::default();
    assert_eq!(state.advance(0.0, 0.0, 0.45).scale, 0.45);
    assert_eq!(state.advance(0.0, 0.0, 1.0).scale, 1.0);
}

#[test]
fn reset_restarts_the_reveal() {
    let mut state = AnimationState {
        progress: 3.2,
        cycled: true,
    };
    state.reset();
    assert_eq!(state, AnimationState::default());
}
