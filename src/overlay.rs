//! Zoom overlay session state.
//!
//! Tracks the overlay alpha across ticks. The overlay stays `active` while it
//! fades out so it never disappears mid-fade; `active` only drops once alpha
//! has decayed to zero and zoom is no longer requested.

use crate::transition::{self, TransitionConfig};
use glam::FloatExt;

/// Derived lifecycle phase of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Inactive,
    Activating,
    Active,
    Deactivating,
}

/// Per-tick overlay state machine
#[derive(Debug, Clone)]
pub struct ZoomOverlayState {
    active: bool,
    zoom_requested: bool,
    divisor: f64,
    alpha: f64,
    previous_alpha: f64,
    transition: TransitionConfig,
}

impl ZoomOverlayState {
    pub fn new(transition: TransitionConfig) -> Self {
        Self {
            active: false,
            zoom_requested: false,
            divisor: 1.0,
            alpha: 0.0,
            previous_alpha: 0.0,
            transition,
        }
    }

    /// Swap the transition model, e.g. after the config was reapplied
    pub fn set_transition(&mut self, transition: TransitionConfig) {
        self.transition = transition;
    }

    pub fn transition(&self) -> TransitionConfig {
        self.transition
    }

    /// Advance the overlay by one simulation tick.
    pub fn tick(&mut self, requested: bool, divisor: f64) {
        self.divisor = divisor;
        self.zoom_requested = requested;
        self.previous_alpha = self.alpha;

        if requested || transition::is_faded_out(self.alpha) {
            self.active = requested;
        }

        let target = if requested { 1.0 } else { 0.0 };
        let next = transition::step(self.alpha, target, self.transition, divisor);
        // Smooth easing only approaches zero asymptotically
        self.alpha = if !requested && transition::is_faded_out(next) {
            0.0
        } else {
            next
        };
    }

    /// Alpha interpolated between the last two ticks for a sub-tick render pass
    pub fn render_blend(&self, partial_tick: f32) -> f64 {
        FloatExt::lerp(
            self.previous_alpha,
            self.alpha,
            f64::from(partial_tick.clamp(0.0, 1.0)),
        )
    }

    pub fn phase(&self) -> OverlayPhase {
        if !self.active {
            return OverlayPhase::Inactive;
        }
        if !self.zoom_requested {
            return OverlayPhase::Deactivating;
        }
        if self.alpha >= 1.0 - crate::constants::ALPHA_EPSILON {
            OverlayPhase::Active
        } else {
            OverlayPhase::Activating
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn zoom_requested(&self) -> bool {
        self.zoom_requested
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn previous_alpha(&self) -> f64 {
        self.previous_alpha
    }
}

impl Default for ZoomOverlayState {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}
