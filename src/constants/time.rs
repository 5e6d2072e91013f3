//! Tick clock constants.

/// Simulation rate of the host game
pub const DEFAULT_TICKS_PER_SECOND: u32 = 20;
/// Maximum ticks run for a single frame (prevents catch-up spirals after stalls)
pub const MAX_TICKS_PER_FRAME: u32 = 10;
