//! Transition constants.

/// Fraction of the remaining distance closed per tick in smooth mode
pub const DEFAULT_SMOOTH_MULTIPLIER: f64 = 0.75;
/// Lower clamp on the per-tick linear step
pub const DEFAULT_MINIMUM_LINEAR_STEP: f64 = 0.125;
/// Upper clamp on the per-tick linear step
pub const DEFAULT_MAXIMUM_LINEAR_STEP: f64 = 0.25;
/// Alpha magnitudes below this count as fully faded out
pub const ALPHA_EPSILON: f64 = 1e-6;
