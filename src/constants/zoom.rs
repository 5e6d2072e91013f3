//! Zoom divisor constants.

/// Default zoom divisor (4x magnification)
pub const DEFAULT_ZOOM_DIVISOR: f64 = 4.0;
/// Lowest divisor the user config allows by default
pub const DEFAULT_MINIMUM_ZOOM_DIVISOR: f64 = 1.0;
/// Highest divisor the user config allows by default
pub const DEFAULT_MAXIMUM_ZOOM_DIVISOR: f64 = 50.0;
/// Divisor change per scroll notch
pub const DEFAULT_SCROLL_STEP: f64 = 1.0;
/// Finer divisor change used near the default divisor
pub const DEFAULT_LESSER_SCROLL_STEP: f64 = 0.5;
/// FOV multiplier when not zoomed
pub const UNZOOMED_FOV_MULTIPLIER: f64 = 1.0;
