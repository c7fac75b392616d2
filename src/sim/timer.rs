//! Tick-count timers shared by every timed effect

use serde::{Deserialize, Serialize};

/// Countdown in simulation ticks. Active while `remaining > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    remaining: u32,
}

impl Timer {
    pub fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    /// (Re)start with a fresh duration; an active timer is overwritten
    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    /// Advance one tick. Returns true on the tick the timer runs out.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn clear(&mut self) {
        self.remaining = 0;
    }
}
