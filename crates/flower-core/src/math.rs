//! Small numeric helpers shared across the generation core.

/// Linearly remap `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Values outside the input range extrapolate; callers clamp when they need
/// to.
#[inline]
pub fn map(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + ((value - in_min) / (in_max - in_min)) * (out_max - out_min)
}

/// `f64` variant of [`map`] for the walker's time-domain math.
#[inline]
pub fn map64(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + ((value - in_min) / (in_max - in_min)) * (out_max - out_min)
}

/// Convert HSL to linear-ish RGB in [0, 1].
///
/// `hue` is in degrees and may be any value; it is wrapped with
/// `rem_euclid(360)` so negative degrees (possible with large hue ranges)
/// land on the equivalent positive hue. `saturation` and `lightness` are
/// percentages in [0, 100].
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
