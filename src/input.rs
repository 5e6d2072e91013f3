//! Zoom input handling.
//!
//! Turns the raw per-tick key and scroll state reported by the host into
//! zoom requests and divisor actions.

use serde::{Deserialize, Serialize};

/// How the zoom key maps to a zoom request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomKeyMode {
    /// Zoom while the key is held
    #[default]
    Hold,
    /// Each press flips zoom on or off
    Toggle,
    /// Always zoomed; the key does nothing
    Persistent,
}

/// Raw input for one tick, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomInput {
    pub zoom_key: bool,
    /// Scroll wheel delta since the last tick (positive zooms in)
    pub scroll: f64,
    pub increase_key: bool,
    pub decrease_key: bool,
    pub reset_key: bool,
}

/// Divisor action requested by input this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisorAction {
    Increase,
    Decrease,
    Reset,
}

/// Input state tracking across ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    zoom_key_was_down: bool,
    toggled_on: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve whether zoom is requested this tick
    pub fn resolve(&mut self, zoom_key: bool, mode: ZoomKeyMode) -> bool {
        let pressed = zoom_key && !self.zoom_key_was_down;
        self.zoom_key_was_down = zoom_key;

        match mode {
            ZoomKeyMode::Hold => zoom_key,
            ZoomKeyMode::Toggle => {
                if pressed {
                    self.toggled_on = !self.toggled_on;
                }
                self.toggled_on
            }
            ZoomKeyMode::Persistent => true,
        }
    }

    /// Forget toggle state, e.g. when the server disables zoom
    pub fn clear(&mut self) {
        self.toggled_on = false;
    }
}

/// Collect the divisor actions for a tick.
///
/// Scrolling only counts while zooming with scrolling enabled; the extra keys
/// only when extra keybinds are enabled.
pub fn divisor_actions(
    input: &ZoomInput,
    zooming: bool,
    zoom_scrolling: bool,
    extra_keybinds: bool,
) -> Vec<DivisorAction> {
    let mut actions = Vec::new();

    if zooming && zoom_scrolling {
        if input.scroll > 0.0 {
            actions.push(DivisorAction::Increase);
        } else if input.scroll < 0.0 {
            actions.push(DivisorAction::Decrease);
        }
    }

    if extra_keybinds {
        if input.increase_key {
            actions.push(DivisorAction::Increase);
        }
        if input.decrease_key {
            actions.push(DivisorAction::Decrease);
        }
        if input.reset_key {
            actions.push(DivisorAction::Reset);
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_follows_key() {
        let mut state = InputState::new();
        assert!(state.resolve(true, ZoomKeyMode::Hold));
        assert!(state.resolve(true, ZoomKeyMode::Hold));
        assert!(!state.resolve(false, ZoomKeyMode::Hold));
    }

    #[test]
    fn test_toggle_flips_on_press() {
        let mut state = InputState::new();
        assert!(state.resolve(true, ZoomKeyMode::Toggle));
        // Still held, no new press
        assert!(state.resolve(true, ZoomKeyMode::Toggle));
        assert!(state.resolve(false, ZoomKeyMode::Toggle));
        assert!(!state.resolve(true, ZoomKeyMode::Toggle));
    }

    #[test]
    fn test_persistent_ignores_key() {
        let mut state = InputState::new();
        assert!(state.resolve(false, ZoomKeyMode::Persistent));
        assert!(state.resolve(true, ZoomKeyMode::Persistent));
    }

    #[test]
    fn test_scroll_requires_zoom() {
        let input = ZoomInput {
            scroll: 1.0,
            ..Default::default()
        };
        assert!(divisor_actions(&input, false, true, true).is_empty());
        assert_eq!(
            divisor_actions(&input, true, true, true),
            vec![DivisorAction::Increase]
        );
        assert!(divisor_actions(&input, true, false, true).is_empty());
    }

    #[test]
    fn test_extra_keys_gated() {
        let input = ZoomInput {
            decrease_key: true,
            reset_key: true,
            ..Default::default()
        };
        assert!(divisor_actions(&input, false, true, false).is_empty());
        assert_eq!(
            divisor_actions(&input, false, true, true),
            vec![DivisorAction::Decrease, DivisorAction::Reset]
        );
    }
}
