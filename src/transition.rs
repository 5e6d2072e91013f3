//! Transition engine for animated zoom scalars.
//!
//! Every animated value (overlay alpha, FOV multiplier) is advanced once per
//! tick by [`step`]. The mode is resolved once at configuration time into a
//! [`TransitionConfig`], so the per-tick path is a single match.

use crate::constants::*;

/// How an animated scalar approaches its target each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionConfig {
    /// Exponential easing: closes `smoothing_factor` of the remaining distance per tick.
    /// Converges asymptotically and never overshoots for factors in (0, 1].
    Smooth { smoothing_factor: f64 },
    /// Constant-rate stepping: `1 / divisor` clamped to `[min_step, max_step]` per tick.
    Linear { min_step: f64, max_step: f64 },
    /// No animation, values jump straight to their target
    Instant,
}

impl TransitionConfig {
    pub fn smooth(smoothing_factor: f64) -> Self {
        Self::Smooth { smoothing_factor }
    }

    pub fn linear(min_step: f64, max_step: f64) -> Self {
        Self::Linear { min_step, max_step }
    }

    /// Per-tick linear step for the given divisor.
    ///
    /// A non-positive or non-finite divisor has no meaningful reciprocal, so
    /// the fastest allowed step is used instead.
    pub fn linear_step(min_step: f64, max_step: f64, divisor: f64) -> f64 {
        if divisor <= 0.0 || !divisor.is_finite() {
            return max_step;
        }
        (1.0 / divisor).clamp(min_step, max_step)
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::Smooth {
            smoothing_factor: DEFAULT_SMOOTH_MULTIPLIER,
        }
    }
}

/// Advance `current` one tick toward `target`.
pub fn step(current: f64, target: f64, cfg: TransitionConfig, divisor: f64) -> f64 {
    match cfg {
        TransitionConfig::Smooth { smoothing_factor } => {
            current + (target - current) * smoothing_factor
        }
        TransitionConfig::Linear { min_step, max_step } => {
            let step = TransitionConfig::linear_step(min_step, max_step, divisor);
            move_towards(current, target, step)
        }
        TransitionConfig::Instant => target,
    }
}

/// Move `current` toward `target` by at most `max_delta`, landing exactly on
/// `target` when it is closer than one step.
pub fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(delta)
    }
}

/// Whether an alpha value counts as fully faded out
pub fn is_faded_out(alpha: f64) -> bool {
    alpha.abs() < ALPHA_EPSILON
}
