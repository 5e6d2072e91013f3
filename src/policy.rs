//! Server-imposed zoom policy.
//!
//! Flags are written only from the tick thread (network packets are queued and
//! applied there), so a [`PolicyFlags`] value is always a consistent snapshot.
//! The forced divisor bounds are stored as one [`DivisorRange`] and replaced
//! together.

use crate::network::PolicyMessage;

/// Divisor bounds forced by the server
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DivisorRange {
    pub min: f64,
    pub max: f64,
}

impl DivisorRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range pinned to a single divisor
    pub fn single(divisor: f64) -> Self {
        Self {
            min: divisor,
            max: divisor,
        }
    }

    pub fn contains(&self, divisor: f64) -> bool {
        divisor >= self.min && divisor <= self.max
    }

    /// Finite, positive and ordered
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }
}

/// Whether the zoom configuration has to be recomputed after a policy change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reapply {
    None,
    Required,
}

impl Reapply {
    pub fn is_required(self) -> bool {
        self == Reapply::Required
    }
}

/// Policy flags for the current connection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolicyFlags {
    zoom_disabled: bool,
    scrolling_disabled: bool,
    classic_mode_forced: bool,
    divisor_override_forced: bool,
    forced_range: DivisorRange,
}

impl PolicyFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom_disabled(&self) -> bool {
        self.zoom_disabled
    }

    pub fn scrolling_disabled(&self) -> bool {
        self.scrolling_disabled
    }

    pub fn classic_mode_forced(&self) -> bool {
        self.classic_mode_forced
    }

    pub fn divisor_override_forced(&self) -> bool {
        self.divisor_override_forced
    }

    /// Forced divisor bounds, if the server sent any
    pub fn forced_range(&self) -> Option<DivisorRange> {
        self.divisor_override_forced.then_some(self.forced_range)
    }

    pub fn forced_min_divisor(&self) -> f64 {
        self.forced_range.min
    }

    pub fn forced_max_divisor(&self) -> f64 {
        self.forced_range.max
    }

    pub fn set_zoom_disabled(&mut self) {
        self.zoom_disabled = true;
    }

    pub fn set_scrolling_disabled(&mut self) {
        self.scrolling_disabled = true;
    }

    /// Classic mode implies no scrolling. The caller reapplies the config.
    pub fn set_classic_mode_forced(&mut self) {
        self.scrolling_disabled = true;
        self.classic_mode_forced = true;
    }

    pub fn set_forced_divisor_range(&mut self, range: DivisorRange) {
        self.forced_range = range;
        self.divisor_override_forced = true;
    }

    /// User-driven divisor changes (scroll, extra keys, reset) are allowed
    pub fn allows_divisor_changes(&self) -> bool {
        !(self.zoom_disabled || self.scrolling_disabled || self.classic_mode_forced)
    }

    pub fn any_set(&self) -> bool {
        self.zoom_disabled
            || self.scrolling_disabled
            || self.classic_mode_forced
            || self.divisor_override_forced
    }

    /// Apply a decoded server message
    pub fn apply(&mut self, message: PolicyMessage) -> Reapply {
        match message {
            PolicyMessage::DisableZoom => {
                self.set_zoom_disabled();
                Reapply::None
            }
            PolicyMessage::DisableZoomScrolling => {
                self.set_scrolling_disabled();
                Reapply::None
            }
            PolicyMessage::ForceClassicMode => {
                self.set_classic_mode_forced();
                Reapply::Required
            }
            PolicyMessage::ForceZoomDivisor(range) => {
                self.set_forced_divisor_range(range);
                Reapply::Required
            }
        }
    }

    /// Restore defaults after leaving a server.
    ///
    /// Reports `Required` when the classic preset or a forced divisor range was
    /// feeding the active configuration.
    pub fn reset_on_disconnect(&mut self) -> Reapply {
        let reapply = if self.classic_mode_forced || self.divisor_override_forced {
            Reapply::Required
        } else {
            Reapply::None
        };
        *self = Self::default();
        reapply
    }
}
