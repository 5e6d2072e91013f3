//! Zoom event system for decoupled communication with the host.
//!
//! The controller emits events, the host consumes them.
//! This allows toasts, sounds, config writes, etc. to react without tight coupling.

use crate::network::PolicyMessage;

/// Which server restriction a notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyNotice {
    DisableZoom,
    DisableZoomScrolling,
    ForceClassicMode,
    ForceZoomDivisor,
}

impl From<&PolicyMessage> for PolicyNotice {
    fn from(message: &PolicyMessage) -> Self {
        match message {
            PolicyMessage::DisableZoom => Self::DisableZoom,
            PolicyMessage::DisableZoomScrolling => Self::DisableZoomScrolling,
            PolicyMessage::ForceClassicMode => Self::ForceClassicMode,
            PolicyMessage::ForceZoomDivisor(_) => Self::ForceZoomDivisor,
        }
    }
}

impl PolicyNotice {
    /// Translation key for the host's toast
    pub fn translation_key(&self) -> &'static str {
        match self {
            Self::DisableZoom => "toast.okzoomer.disable_zoom",
            Self::DisableZoomScrolling => "toast.okzoomer.disable_zoom_scrolling",
            Self::ForceClassicMode => "toast.okzoomer.force_classic_mode",
            Self::ForceZoomDivisor => "toast.okzoomer.force_zoom_divisor",
        }
    }
}

/// Events the zoom controller emits
#[derive(Debug, Clone, PartialEq)]
pub enum ZoomEvent {
    /// The server imposed a restriction
    PolicyNotice(PolicyNotice),
    /// Settings were recomputed from the config and current policy
    ConfigReapplied,
    /// The zoom divisor changed through scrolling, keys or a reset
    DivisorChanged { divisor: f64 },
    /// Server restrictions were lifted on disconnect
    PoliciesCleared,
}

/// Simple event queue - events are pushed during a tick, drained by the host
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<ZoomEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: ZoomEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = ZoomEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
