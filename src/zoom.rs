//! Zoom divisor and the eased FOV multiplier.

use crate::constants::*;
use crate::transition::{self, TransitionConfig};
use glam::{DVec2, FloatExt};

/// The zoom itself: current divisor and the eased FOV multiplier derived from it
#[derive(Debug, Clone)]
pub struct ZoomInstance {
    divisor: f64,
    default_divisor: f64,
    fov_multiplier: f64,
    previous_fov_multiplier: f64,
    transition: TransitionConfig,
    reduce_sensitivity: bool,
}

impl ZoomInstance {
    pub fn new(default_divisor: f64, transition: TransitionConfig) -> Self {
        Self {
            divisor: default_divisor,
            default_divisor,
            fov_multiplier: UNZOOMED_FOV_MULTIPLIER,
            previous_fov_multiplier: UNZOOMED_FOV_MULTIPLIER,
            transition,
            reduce_sensitivity: true,
        }
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    pub fn default_divisor(&self) -> f64 {
        self.default_divisor
    }

    pub fn set_divisor(&mut self, divisor: f64) {
        self.divisor = divisor;
    }

    pub fn set_default_divisor(&mut self, divisor: f64) {
        self.default_divisor = divisor;
    }

    pub fn reset_divisor(&mut self) {
        self.divisor = self.default_divisor;
    }

    pub fn set_transition(&mut self, transition: TransitionConfig) {
        self.transition = transition;
    }

    pub fn set_reduce_sensitivity(&mut self, reduce: bool) {
        self.reduce_sensitivity = reduce;
    }

    pub fn fov_multiplier(&self) -> f64 {
        self.fov_multiplier
    }

    pub fn previous_fov_multiplier(&self) -> f64 {
        self.previous_fov_multiplier
    }

    /// Ease the FOV multiplier toward `1 / divisor` while zooming, or back to 1.
    pub fn tick(&mut self, requested: bool) {
        self.previous_fov_multiplier = self.fov_multiplier;
        let target = if requested && self.divisor > 0.0 {
            1.0 / self.divisor
        } else {
            UNZOOMED_FOV_MULTIPLIER
        };
        self.fov_multiplier =
            transition::step(self.fov_multiplier, target, self.transition, self.divisor);
    }

    /// Whether the FOV is still away from its unzoomed value
    pub fn is_transitioning(&self) -> bool {
        (self.fov_multiplier - UNZOOMED_FOV_MULTIPLIER).abs() >= ALPHA_EPSILON
    }

    /// Zoomed FOV for a render pass `partial_tick` of the way into the next tick
    pub fn fov(&self, base_fov: f64, partial_tick: f32) -> f64 {
        let t = f64::from(partial_tick.clamp(0.0, 1.0));
        base_fov * FloatExt::lerp(self.previous_fov_multiplier, self.fov_multiplier, t)
    }

    /// Scale mouse look so aiming stays steady while magnified
    pub fn mouse_delta(&self, delta: DVec2, zooming: bool) -> DVec2 {
        if zooming && self.reduce_sensitivity && self.divisor > 0.0 {
            delta / self.divisor
        } else {
            delta
        }
    }
}

impl Default for ZoomInstance {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_DIVISOR, TransitionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fov_eases_toward_reciprocal() {
        let mut zoom = ZoomInstance::new(4.0, TransitionConfig::smooth(0.5));
        zoom.tick(true);
        // 1.0 + (0.25 - 1.0) * 0.5
        assert_eq!(zoom.fov_multiplier(), 0.625);
        assert_eq!(zoom.previous_fov_multiplier(), 1.0);
    }

    #[test]
    fn test_fov_returns_to_unzoomed() {
        let mut zoom = ZoomInstance::new(4.0, TransitionConfig::Instant);
        zoom.tick(true);
        assert_eq!(zoom.fov_multiplier(), 0.25);
        zoom.tick(false);
        assert_eq!(zoom.fov_multiplier(), 1.0);
        assert!(!zoom.is_transitioning());
    }

    #[test]
    fn test_fov_blend() {
        let mut zoom = ZoomInstance::new(4.0, TransitionConfig::Instant);
        zoom.tick(true);
        assert_eq!(zoom.fov(70.0, 0.0), 70.0);
        assert_eq!(zoom.fov(70.0, 1.0), 17.5);
    }

    #[test]
    fn test_reset_divisor() {
        let mut zoom = ZoomInstance::default();
        zoom.set_divisor(9.0);
        zoom.reset_divisor();
        assert_eq!(zoom.divisor(), DEFAULT_ZOOM_DIVISOR);
    }

    #[test]
    fn test_mouse_delta_reduced_only_while_zooming() {
        let zoom = ZoomInstance::default();
        let delta = DVec2::new(8.0, -4.0);
        assert_eq!(zoom.mouse_delta(delta, true), DVec2::new(2.0, -1.0));
        assert_eq!(zoom.mouse_delta(delta, false), delta);
    }

    #[test]
    fn test_mouse_delta_unchanged_without_reduction() {
        let mut zoom = ZoomInstance::default();
        zoom.set_reduce_sensitivity(false);
        let delta = DVec2::new(8.0, -4.0);
        assert_eq!(zoom.mouse_delta(delta, true), delta);
    }
}
