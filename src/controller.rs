//! Zoom controller: the per-tick and per-packet entry points a host calls.
//!
//! The controller owns all zoom state (no globals). A host drives it once per
//! simulation tick with [`ZoomHooks::on_tick`], forwards control packets with
//! [`ZoomHooks::on_message`] (or through a [`PolicySender`] from another
//! thread), and calls [`ZoomHooks::on_disconnect`] when leaving a server.

use crate::config::{self, ZoomConfig, ZoomSettings};
use crate::divisor;
use crate::events::{EventQueue, PolicyNotice, ZoomEvent};
use crate::input::{self, DivisorAction, InputState, ZoomInput, ZoomKeyMode};
use crate::network::{self, NetworkError, NetworkSignal, PolicyInbox, PolicyMessage, PolicySender};
use crate::overlay::ZoomOverlayState;
use crate::policy::{PolicyFlags, Reapply};
use crate::zoom::ZoomInstance;
use glam::DVec2;

/// Host-facing callbacks
pub trait ZoomHooks {
    /// Advance one simulation tick
    fn on_tick(&mut self, input: &ZoomInput);
    /// Handle a control packet received from the server
    fn on_message(&mut self, channel: &str, payload: &[u8]);
    /// The client left the server
    fn on_disconnect(&mut self);
}

/// Owns the zoom, overlay, policy and input state for one client
#[derive(Debug)]
pub struct ZoomController {
    user_config: ZoomConfig,
    settings: ZoomSettings,
    policy: PolicyFlags,
    zoom: ZoomInstance,
    overlay: ZoomOverlayState,
    input: InputState,
    events: EventQueue,
    inbox: Option<PolicyInbox>,
    zooming: bool,
    ticks: u64,
}

impl ZoomController {
    pub fn new(user_config: ZoomConfig) -> Self {
        let policy = PolicyFlags::default();
        let settings = config::configure(&user_config, &policy);
        let mut zoom = ZoomInstance::new(settings.bounds.default_divisor, settings.transition);
        zoom.set_reduce_sensitivity(settings.reduce_sensitivity);

        Self {
            user_config,
            settings,
            policy,
            zoom,
            overlay: ZoomOverlayState::new(settings.transition),
            input: InputState::new(),
            events: EventQueue::new(),
            inbox: None,
            zooming: false,
            ticks: 0,
        }
    }

    /// Create a controller together with the sender a network thread uses
    pub fn with_network(user_config: ZoomConfig) -> (Self, PolicySender) {
        let mut controller = Self::new(user_config);
        let sender = controller.attach_network();
        (controller, sender)
    }

    /// Open a new network bridge, replacing any previous one
    pub fn attach_network(&mut self) -> PolicySender {
        let (sender, inbox) = network::policy_channel();
        self.inbox = Some(inbox);
        sender
    }

    pub fn user_config(&self) -> &ZoomConfig {
        &self.user_config
    }

    /// Replace the user config (e.g. after the settings screen saved it)
    pub fn set_user_config(&mut self, user_config: ZoomConfig) {
        self.user_config = user_config;
        self.reapply_config();
    }

    pub fn settings(&self) -> &ZoomSettings {
        &self.settings
    }

    pub fn policy(&self) -> PolicyFlags {
        self.policy
    }

    pub fn zoom(&self) -> &ZoomInstance {
        &self.zoom
    }

    pub fn overlay(&self) -> &ZoomOverlayState {
        &self.overlay
    }

    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Drain events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<ZoomEvent> {
        self.events.drain().collect()
    }

    /// Recompute settings from the user config and current policy.
    pub fn reapply_config(&mut self) {
        self.settings = config::configure(&self.user_config, &self.policy);
        let settings = self.settings;

        self.zoom.set_default_divisor(settings.bounds.default_divisor);
        self.zoom.set_transition(settings.transition);
        self.zoom.set_reduce_sensitivity(settings.reduce_sensitivity);
        self.overlay.set_transition(settings.transition);

        let current = self.zoom.divisor();
        if !settings.bounds.contains(current) {
            let clamped = settings.bounds.clamp(current);
            self.zoom.set_divisor(clamped);
            self.events.push(ZoomEvent::DivisorChanged { divisor: clamped });
        }

        tracing::debug!(
            "Zoom config reapplied: bounds [{}, {}], default divisor {}, transition {:?}",
            settings.bounds.minimum,
            settings.bounds.maximum,
            settings.bounds.default_divisor,
            settings.transition
        );
        self.events.push(ZoomEvent::ConfigReapplied);
    }

    /// Decode and apply a control packet. Malformed or unknown packets change nothing.
    pub fn handle_message(
        &mut self,
        channel: &str,
        payload: &[u8],
    ) -> Result<PolicyMessage, NetworkError> {
        let message = match PolicyMessage::decode(channel, payload) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!("Ignoring zoom control packet: {err}");
                return Err(err);
            }
        };

        tracing::debug!("Applying server zoom policy {message:?}");
        self.events.push(ZoomEvent::PolicyNotice(PolicyNotice::from(&message)));
        if message == PolicyMessage::DisableZoom {
            self.input.clear();
        }
        if self.policy.apply(message).is_required() {
            self.reapply_config();
        }
        Ok(message)
    }

    /// Lift server restrictions. Returns whether the config had to be reapplied.
    pub fn disconnect(&mut self) -> Reapply {
        if !self.policy.any_set() {
            return Reapply::None;
        }
        let reapply = self.policy.reset_on_disconnect();
        tracing::debug!("Server zoom policies cleared");
        self.events.push(ZoomEvent::PoliciesCleared);
        if reapply.is_required() {
            self.reapply_config();
        }
        reapply
    }

    /// Apply everything the network thread queued since the last tick
    pub fn drain_network(&mut self) {
        let Some(inbox) = self.inbox.take() else {
            return;
        };
        let signals: Vec<NetworkSignal> = inbox.drain().collect();
        self.inbox = Some(inbox);

        for signal in signals {
            match signal {
                NetworkSignal::Packet { channel, payload } => {
                    // Already logged; a bad packet must not stop the rest
                    let _ = self.handle_message(&channel, &payload);
                }
                NetworkSignal::Disconnected => {
                    self.disconnect();
                }
            }
        }
    }

    /// Scroll the divisor one notch. Returns whether it changed.
    pub fn change_divisor(&mut self, increase: bool) -> bool {
        if !divisor::can_adjust(&self.policy) {
            return false;
        }
        match divisor::adjust_divisor(increase, self.zoom.divisor(), &self.settings.bounds) {
            Some(next) => {
                self.zoom.set_divisor(next);
                self.events.push(ZoomEvent::DivisorChanged { divisor: next });
                true
            }
            None => false,
        }
    }

    /// Reset the divisor to its default. Returns whether it was allowed.
    pub fn reset_divisor(&mut self) -> bool {
        if !divisor::can_adjust(&self.policy) {
            return false;
        }
        self.reset_divisor_unchecked();
        true
    }

    fn reset_divisor_unchecked(&mut self) {
        if self.zoom.divisor() != self.zoom.default_divisor() {
            self.zoom.reset_divisor();
            self.events.push(ZoomEvent::DivisorChanged {
                divisor: self.zoom.divisor(),
            });
        }
    }

    /// Advance one tick with the given host input.
    pub fn tick(&mut self, input: &ZoomInput) {
        puffin::profile_function!();
        self.drain_network();

        let mode = self.settings.zoom_mode;
        let requested = !self.policy.zoom_disabled() && self.input.resolve(input.zoom_key, mode);

        if self.zooming && !requested && mode != ZoomKeyMode::Persistent {
            self.reset_divisor_unchecked();
        }
        self.zooming = requested;

        let actions = input::divisor_actions(
            input,
            requested,
            self.settings.zoom_scrolling,
            self.settings.extra_keybinds,
        );
        for action in actions {
            match action {
                DivisorAction::Increase => {
                    self.change_divisor(true);
                }
                DivisorAction::Decrease => {
                    self.change_divisor(false);
                }
                DivisorAction::Reset => {
                    self.reset_divisor();
                }
            }
        }

        self.zoom.tick(requested);
        self.overlay
            .tick(requested && self.settings.zoom_overlay, self.zoom.divisor());
        self.ticks += 1;
    }

    /// Overlay alpha for a render pass `partial_tick` into the next tick
    pub fn render_blend(&self, partial_tick: f32) -> f64 {
        self.overlay.render_blend(partial_tick)
    }

    /// Zoomed FOV for a render pass
    pub fn fov(&self, base_fov: f64, partial_tick: f32) -> f64 {
        self.zoom.fov(base_fov, partial_tick)
    }

    pub fn mouse_delta(&self, delta: DVec2) -> DVec2 {
        self.zoom.mouse_delta(delta, self.zooming)
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomHooks for ZoomController {
    fn on_tick(&mut self, input: &ZoomInput) {
        self.tick(input);
    }

    fn on_message(&mut self, channel: &str, payload: &[u8]) {
        let _ = self.handle_message(channel, payload);
    }

    fn on_disconnect(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::overlay::OverlayPhase;

    fn held() -> ZoomInput {
        ZoomInput {
            zoom_key: true,
            ..Default::default()
        }
    }

    fn overlay_config() -> ZoomConfig {
        let mut config = ZoomConfig::default();
        config.features.zoom_overlay = true;
        config
    }

    #[test]
    fn test_hold_zooms_and_releases() {
        let mut controller = ZoomController::default();
        controller.tick(&held());
        assert!(controller.is_zooming());
        assert!(controller.zoom().fov_multiplier() < 1.0);
        controller.tick(&ZoomInput::default());
        assert!(!controller.is_zooming());
    }

    #[test]
    fn test_overlay_follows_zoom_when_enabled() {
        let mut controller = ZoomController::new(overlay_config());
        controller.tick(&held());
        assert_eq!(controller.overlay().alpha(), 0.75);
        assert_eq!(controller.render_blend(0.0), 0.0);
        assert_eq!(controller.overlay().phase(), OverlayPhase::Activating);
    }

    #[test]
    fn test_overlay_stays_hidden_when_disabled() {
        let mut controller = ZoomController::default();
        controller.tick(&held());
        assert_eq!(controller.overlay().alpha(), 0.0);
        assert!(!controller.overlay().is_active());
    }

    #[test]
    fn test_disable_zoom_blocks_requests() {
        let mut controller = ZoomController::default();
        controller.on_message("okzoomer:disable_zoom", &[]);
        controller.tick(&held());
        assert!(!controller.is_zooming());
        assert_eq!(controller.zoom().fov_multiplier(), 1.0);
    }

    #[test]
    fn test_scroll_changes_divisor_while_zooming() {
        let mut controller = ZoomController::default();
        let input = ZoomInput {
            zoom_key: true,
            scroll: 1.0,
            ..Default::default()
        };
        controller.tick(&input);
        assert_eq!(controller.zoom().divisor(), 5.0);
    }

    #[test]
    fn test_release_resets_divisor() {
        let mut controller = ZoomController::default();
        controller.tick(&held());
        assert!(controller.change_divisor(true));
        controller.tick(&ZoomInput::default());
        assert_eq!(controller.zoom().divisor(), 4.0);
    }

    #[test]
    fn test_scrolling_disabled_blocks_changes() {
        let mut controller = ZoomController::default();
        controller.on_message("okzoomer:disable_zoom_scrolling", &[]);
        assert!(!controller.change_divisor(true));
        assert!(!controller.reset_divisor());
        assert_eq!(controller.zoom().divisor(), 4.0);
    }

    #[test]
    fn test_classic_mode_reapplies_config() {
        let mut controller = ZoomController::default();
        controller.drain_events();
        controller.on_message("okzoomer:force_classic_mode", &[]);
        let events = controller.drain_events();
        assert_eq!(
            events,
            vec![
                ZoomEvent::PolicyNotice(PolicyNotice::ForceClassicMode),
                ZoomEvent::ConfigReapplied,
            ]
        );
        assert_eq!(
            controller.settings().transition,
            crate::transition::TransitionConfig::Instant
        );
    }

    #[test]
    fn test_forced_divisor_clamps_current() {
        let mut controller = ZoomController::default();
        controller.tick(&held());
        controller.change_divisor(true);
        controller.change_divisor(true);
        assert_eq!(controller.zoom().divisor(), 6.0);
        controller.on_message("okzoomer:force_zoom_divisor", &4.0f64.to_be_bytes());
        assert_eq!(controller.zoom().divisor(), 4.0);
        assert_eq!(controller.settings().bounds.maximum, 4.0);
    }

    #[test]
    fn test_malformed_divisor_packet_ignored() {
        let mut controller = ZoomController::default();
        controller.drain_events();
        let result = controller.handle_message("okzoomer:force_zoom_divisor", &[0u8; 5]);
        assert!(result.is_err());
        assert_eq!(controller.policy(), PolicyFlags::default());
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_disconnect_without_flags_is_noop() {
        let mut controller = ZoomController::default();
        controller.drain_events();
        assert_eq!(controller.disconnect(), Reapply::None);
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_persistent_preset_zooms_without_key() {
        let mut controller = ZoomController::new(ZoomConfig::preset(Preset::Persistent));
        controller.tick(&ZoomInput::default());
        assert!(controller.is_zooming());
    }

    #[test]
    fn test_network_bridge_applies_on_tick() {
        let (mut controller, sender) = ZoomController::with_network(ZoomConfig::default());
        sender.send_packet("okzoomer:disable_zoom", Vec::new()).unwrap();
        assert!(!controller.policy().zoom_disabled());
        controller.tick(&ZoomInput::default());
        assert!(controller.policy().zoom_disabled());
        sender.send_disconnect().unwrap();
        controller.tick(&ZoomInput::default());
        assert!(!controller.policy().any_set());
    }

    #[test]
    fn test_mouse_delta_scaled_while_zooming() {
        let mut controller = ZoomController::default();
        let delta = DVec2::new(4.0, 4.0);
        assert_eq!(controller.mouse_delta(delta), delta);
        controller.tick(&held());
        assert_eq!(controller.mouse_delta(delta), DVec2::new(1.0, 1.0));
    }
}
