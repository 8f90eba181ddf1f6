//! Per-frame animation state: the cyclic progress value and its derived
//! reveal/breathing outputs.
//!
//! The state transition is pure apart from the accumulator itself: the
//! shell feeds in elapsed time and receives render instructions, keeping
//! the math independent of the rendering loop.

use crate::constants::{IDEAL_FRAME_MS, PROGRESS_PER_FRAME, SWAY_AMPLITUDE, SWAY_RATE};
use crate::ease;

/// Process-wide animation accumulator, reset on every regeneration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationState {
    /// Monotonic progress; advances unbounded between regenerations.
    pub progress: f32,
    /// Set permanently once progress first exceeds 1.0; switches the eased
    /// output from the reveal curve to the breathing curve.
    pub cycled: bool,
}

/// Instructions the render shell applies to the scene each frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameVisuals {
    /// Shared ribbon opacity; saturates at effective progress 0.5.
    pub opacity: f32,
    /// Eased reveal fraction; ribbons discard beyond this path coordinate.
    pub visibility: f32,
    /// Idle sway, radians around x.
    pub rotation_x: f32,
    /// Idle sway, radians around y.
    pub rotation_y: f32,
    /// Uniform group scale. Snaps straight to the auto-fit target; the
    /// original assigned target to current every frame with no
    /// interpolation, and that behavior is kept.
    pub scale: f32,
}

impl AnimationState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by one frame and derive the visual outputs.
    ///
    /// `elapsed_ms` is the wall time since the previous frame (rate is
    /// normalized to 0.005 progress per ideal 60 Hz frame), `now_ms` is
    /// absolute time for the sway phase, `scale_target` the auto-framer's
    /// current answer.
    pub fn advance(&mut self, elapsed_ms: f32, now_ms: f64, scale_target: f32) -> FrameVisuals {
        self.progress += PROGRESS_PER_FRAME * (elapsed_ms / IDEAL_FRAME_MS);
        if self.progress > 1.0 {
            self.cycled = true;
        }

        let modulo = self.progress % 2.0;
        let effective = if modulo < 1.0 { modulo } else { 2.0 - modulo };
        let eased = if self.cycled {
            ease::in_out_expo(effective)
        } else {
            ease::out_expo(effective)
        };

        let phase = now_ms * SWAY_RATE;
        FrameVisuals {
            opacity: (effective * 2.0).clamp(0.0, 1.0),
            visibility: eased,
            rotation_x: phase.cos() as f32 * SWAY_AMPLITUDE,
            rotation_y: phase.sin() as f32 * -SWAY_AMPLITUDE,
            scale: scale_target,
        }
    }
}

/// Triangle-wave transform of raw progress: ramps 0 -> 1 -> 0 with period 2.
///
/// Exposed separately so the wave shape is testable without stepping a
/// state machine.
pub fn effective_progress(progress: f32) -> f32 {
    let modulo = progress.rem_euclid(2.0);
    if modulo < 1.0 {
        modulo
    } else {
        2.0 - modulo
    }
}
