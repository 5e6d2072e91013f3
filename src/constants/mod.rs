//! Zoom constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod network;
mod time;
mod transition;
mod zoom;

pub use network::*;
pub use time::*;
pub use transition::*;
pub use zoom::*;
