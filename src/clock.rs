//! Fixed-rate tick clock.
//!
//! Converts variable frame times into whole simulation ticks plus the
//! fraction of the next tick used for render blending.

use crate::constants::*;

/// Accumulates frame time into fixed ticks
#[derive(Debug, Clone)]
pub struct TickClock {
    tick_length: f64,
    accumulator: f64,
    /// Ticks run since creation
    pub ticks: u64,
}

impl TickClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            tick_length: 1.0 / f64::from(ticks_per_second.max(1)),
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Add `dt` seconds of frame time and return how many ticks are due
    pub fn advance(&mut self, dt: f64) -> u32 {
        debug_assert!(dt >= 0.0, "Cannot go backwards in time: {dt}");
        self.accumulator += dt.max(0.0);

        let mut due = 0;
        while self.accumulator >= self.tick_length && due < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.tick_length;
            due += 1;
        }
        if due == MAX_TICKS_PER_FRAME {
            // Drop the backlog instead of fast-forwarding the zoom
            self.accumulator = self.accumulator.min(self.tick_length);
        }
        self.ticks += u64::from(due);
        due
    }

    /// Fraction of the next tick already elapsed, in [0, 1)
    pub fn partial_tick(&self) -> f32 {
        ((self.accumulator / self.tick_length) as f32).clamp(0.0, 1.0 - f32::EPSILON)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks() {
        let mut clock = TickClock::new(20);
        assert_eq!(clock.advance(0.1), 2);
        assert_eq!(clock.ticks, 2);
    }

    #[test]
    fn test_partial_tick() {
        let mut clock = TickClock::new(20);
        assert_eq!(clock.advance(0.025), 0);
        assert!((clock.partial_tick() - 0.5).abs() < 1e-4);
        assert_eq!(clock.advance(0.025), 1);
        assert!(clock.partial_tick() < 1e-4);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut clock = TickClock::new(20);
        assert_eq!(clock.advance(60.0), MAX_TICKS_PER_FRAME);
        assert!(clock.partial_tick() < 1.0);
        assert!(clock.advance(0.0) <= 1);
    }
}
