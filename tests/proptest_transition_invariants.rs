//! Property-based invariant tests for the zoom transition and policy state.
//!
//! 1. Linear stepping never moves away from the target and snaps exactly
//! 2. Smooth stepping never overshoots
//! 3. The overlay is never deactivated while alpha is above zero
//! 4. Disconnect always restores default policy
//! 5. Divisor adjustments never leave the bounds
//! 6. Arbitrary divisor payloads never panic and never force an unusable range

use proptest::prelude::*;
use zoomer::divisor::{adjust_divisor, DivisorBounds};
use zoomer::transition::{step, TransitionConfig};
use zoomer::{
    DivisorRange, PolicyFlags, PolicyMessage, ZoomController, ZoomHooks, ZoomOverlayState,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn linear_strategy() -> impl Strategy<Value = TransitionConfig> {
    (0.01f64..0.5, 0.0f64..0.5).prop_map(|(min, extra)| TransitionConfig::linear(min, min + extra))
}

fn message_strategy() -> impl Strategy<Value = PolicyMessage> {
    prop_oneof![
        Just(PolicyMessage::DisableZoom),
        Just(PolicyMessage::DisableZoomScrolling),
        Just(PolicyMessage::ForceClassicMode),
        (0.5f64..20.0, 0.0f64..20.0).prop_map(|(min, extra)| {
            PolicyMessage::ForceZoomDivisor(DivisorRange::new(min, min + extra))
        }),
    ]
}

fn divisor_value_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(0.0),
        -20.0f64..20.0,
        any::<f64>(),
    ]
}

fn divisor_payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 8),
        prop::collection::vec(any::<u8>(), 16),
        divisor_value_strategy().prop_map(|value| value.to_be_bytes().to_vec()),
        (divisor_value_strategy(), divisor_value_strategy()).prop_map(|(max, min)| {
            let mut payload = max.to_be_bytes().to_vec();
            payload.extend_from_slice(&min.to_be_bytes());
            payload
        }),
    ]
}

proptest! {
    #[test]
    fn linear_converges_without_overshoot(
        cfg in linear_strategy(),
        start in 0.0f64..1.0,
        target in prop_oneof![Just(0.0f64), Just(1.0f64)],
        divisor in 0.5f64..60.0,
    ) {
        let mut current = start;
        let mut ticks = 0;
        while current != target {
            let next = step(current, target, cfg, divisor);
            prop_assert!((next - target).abs() <= (current - target).abs());
            current = next;
            ticks += 1;
            prop_assert!(ticks <= 200, "did not converge");
        }
        prop_assert_eq!(current, target);
    }

    #[test]
    fn smooth_never_overshoots(
        factor in 0.01f64..=1.0,
        start in 0.0f64..1.0,
        ticks in 1usize..100,
    ) {
        let cfg = TransitionConfig::smooth(factor);
        let mut current = start;
        for _ in 0..ticks {
            current = step(current, 1.0, cfg, 4.0);
            prop_assert!(current <= 1.0);
        }
    }

    #[test]
    fn overlay_never_clears_while_visible(
        requests in prop::collection::vec(any::<bool>(), 1..120),
        factor in 0.05f64..=1.0,
    ) {
        let mut overlay = ZoomOverlayState::new(TransitionConfig::smooth(factor));
        for requested in requests {
            let alpha_before = overlay.alpha();
            overlay.tick(requested, 4.0);
            if !overlay.is_active() {
                prop_assert!(!requested);
                prop_assert!(alpha_before.abs() < 1e-6);
            }
        }
    }

    #[test]
    fn disconnect_restores_defaults(
        messages in prop::collection::vec(message_strategy(), 0..10),
    ) {
        let mut flags = PolicyFlags::new();
        let mut config_flag_set = false;
        for message in messages {
            config_flag_set |= matches!(
                message,
                PolicyMessage::ForceClassicMode | PolicyMessage::ForceZoomDivisor(_)
            );
            flags.apply(message);
        }
        let reapply = flags.reset_on_disconnect();
        prop_assert_eq!(flags, PolicyFlags::default());
        prop_assert_eq!(reapply.is_required(), config_flag_set);
    }

    #[test]
    fn adjustments_stay_in_bounds(
        start in 1.0f64..50.0,
        moves in prop::collection::vec(any::<bool>(), 0..60),
    ) {
        let bounds = DivisorBounds::default();
        let mut divisor = start;
        for increase in moves {
            if let Some(next) = adjust_divisor(increase, divisor, &bounds) {
                prop_assert!(bounds.contains(next));
                divisor = next;
            }
        }
        prop_assert!(bounds.contains(divisor));
    }

    #[test]
    fn divisor_payloads_never_force_unusable_range(
        payloads in prop::collection::vec(divisor_payload_strategy(), 1..6),
    ) {
        let mut controller = ZoomController::default();
        for payload in payloads {
            controller.on_message("okzoomer:force_zoom_divisor", &payload);
            let flags = controller.policy();
            match flags.forced_range() {
                Some(range) => prop_assert!(range.is_valid()),
                None => prop_assert_eq!(flags, PolicyFlags::default()),
            }
            let bounds = controller.settings().bounds;
            prop_assert!(bounds.minimum <= bounds.maximum);
            prop_assert!(controller.zoom().divisor().is_finite());
        }
    }
}
