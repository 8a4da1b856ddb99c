//! Irrigation indicator blink pacing.
//!
//! The main loop polls much faster than the blink cadence, so the scheduler
//! keeps its own toggle timestamp: the phase flips only when a full blink
//! interval has elapsed, regardless of how often `tick()` is called. The
//! instant irrigation deactivates the indicator is forced off and the phase
//! reset — no stale "on" flash may outlive the OFF edge.

/// Paces the irrigation indicator LED.
#[derive(Debug, Clone, Copy)]
pub struct BlinkScheduler {
    interval_ms: u32,
    on: bool,
    last_toggle_ms: u32,
}

impl BlinkScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            on: false,
            last_toggle_ms: 0,
        }
    }

    /// Advance the blink phase and return the desired indicator level.
    ///
    /// While irrigation is off this returns `false` and re-arms the toggle
    /// timestamp, so a fresh activation always starts a full interval into
    /// the dark phase.
    pub fn tick(&mut self, irrigation_on: bool, now_ms: u32) -> bool {
        if !irrigation_on {
            self.on = false;
            self.last_toggle_ms = now_ms;
            return false;
        }

        if now_ms.wrapping_sub(self.last_toggle_ms) >= self.interval_ms {
            self.on = !self.on;
            self.last_toggle_ms = now_ms;
        }
        self.on
    }

    /// Current phase without advancing it.
    pub fn is_on(&self) -> bool {
        self.on
    }
}
