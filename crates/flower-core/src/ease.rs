//! Exponential easing curves driving the reveal and breathing animation.
//!
//! Both functions take and return values in [0, 1]. The endpoints are exact
//! (not merely asymptotic) so a fully-revealed strand has visibility 1.0.

/// Ease-out exponential: fast start, long settle. Used for the one-shot
/// reveal on the first progress cycle.
pub fn out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

/// Ease-in-out exponential: slow, fast, slow. Used for the breathing loop
/// after the first cycle has completed.
pub fn in_out_expo(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * 2.0_f32.powf(10.0 * (t - 1.0))
    } else {
        0.5 * (2.0 - 2.0_f32.powf(-10.0 * (t - 1.0)))
    }
}
