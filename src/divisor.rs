//! Zoom divisor scrolling.

use crate::constants::*;
use crate::policy::PolicyFlags;

/// Limits and step sizes for user-driven divisor changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivisorBounds {
    pub minimum: f64,
    pub maximum: f64,
    pub scroll_step: f64,
    pub lesser_scroll_step: f64,
    pub default_divisor: f64,
}

impl Default for DivisorBounds {
    fn default() -> Self {
        Self {
            minimum: DEFAULT_MINIMUM_ZOOM_DIVISOR,
            maximum: DEFAULT_MAXIMUM_ZOOM_DIVISOR,
            scroll_step: DEFAULT_SCROLL_STEP,
            lesser_scroll_step: DEFAULT_LESSER_SCROLL_STEP,
            default_divisor: DEFAULT_ZOOM_DIVISOR,
        }
    }
}

impl DivisorBounds {
    pub fn contains(&self, divisor: f64) -> bool {
        divisor >= self.minimum && divisor <= self.maximum
    }

    /// Clamp into the bounds. Unusable bounds leave the divisor as is.
    pub fn clamp(&self, divisor: f64) -> f64 {
        if self.minimum.is_nan() || self.maximum.is_nan() || self.minimum > self.maximum {
            return divisor;
        }
        divisor.clamp(self.minimum, self.maximum)
    }
}

/// Whether the server lets the user scroll or reset the divisor
pub fn can_adjust(flags: &PolicyFlags) -> bool {
    flags.allows_divisor_changes()
}

/// Next divisor after one scroll notch, or `None` if it would leave the bounds.
///
/// At or below the default divisor the finer `lesser_scroll_step` is used.
pub fn adjust_divisor(increase: bool, current: f64, bounds: &DivisorBounds) -> Option<f64> {
    let sign = if increase { 1.0 } else { -1.0 };
    let mut changed = current + sign * bounds.scroll_step;
    let lesser_changed = current + sign * bounds.lesser_scroll_step;

    if lesser_changed <= bounds.default_divisor {
        changed = lesser_changed;
    }

    bounds.contains(changed).then_some(changed)
}
