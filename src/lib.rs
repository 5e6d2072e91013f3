//! Client-side zoom core.
//!
//! Eases the zoom FOV and overlay between ticks, applies server zoom policy
//! packets and resolves zoom input. A host calls into [`ZoomController`] once
//! per simulation tick and once per network event; drawing, key registration
//! and networking stay on the host side.

pub mod clock;
pub mod config;
pub mod constants;
pub mod controller;
pub mod divisor;
pub mod events;
pub mod input;
pub mod logging;
pub mod network;
pub mod overlay;
pub mod policy;
pub mod replay;
pub mod transition;
pub mod zoom;

pub use config::{ConfigError, Preset, ZoomConfig, ZoomSettings};
pub use controller::{ZoomController, ZoomHooks};
pub use divisor::DivisorBounds;
pub use events::{PolicyNotice, ZoomEvent};
pub use input::{ZoomInput, ZoomKeyMode};
pub use network::{NetworkError, PolicyMessage, PolicySender};
pub use overlay::{OverlayPhase, ZoomOverlayState};
pub use policy::{DivisorRange, PolicyFlags, Reapply};
pub use transition::TransitionConfig;
