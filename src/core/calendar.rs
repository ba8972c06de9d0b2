//! Day/night clock
//!
//! The phase is derived from the tick counter, never stored.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Calendar tracks simulation time and the day/night phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    tick: Tick,
    ticks_per_day: u64,
}

impl Calendar {
    pub fn new(ticks_per_day: u64) -> Self {
        Self {
            tick: 0,
            ticks_per_day: ticks_per_day.max(1),
        }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn current_day(&self) -> u64 {
        self.tick / self.ticks_per_day
    }

    pub fn ticks_per_day(&self) -> u64 {
        self.ticks_per_day
    }

    /// Fraction of the current day elapsed, in [0, 1)
    pub fn day_progress(&self) -> f32 {
        (self.tick % self.ticks_per_day) as f32 / self.ticks_per_day as f32
    }

    /// Second half of every day is night
    pub fn is_night(&self) -> bool {
        self.tick % self.ticks_per_day > self.ticks_per_day / 2
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(480)
    }
}
