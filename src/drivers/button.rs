//! Polled, debounced menu button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up. The main loop samples
//! the raw pin level every iteration and feeds it to `poll()`, which runs
//! the debounce state machine: a raw change re-arms the settle timer, and
//! only a level that stays put for the full debounce window is committed.
//! One [`ButtonEvent::Activated`] fires per physical press, however long the
//! contacts bounce, as long as they settle within the window.
//!
//! A short quiet period after construction swallows the power-on glitches
//! some boards produce while the pull-up charges the line.

use log::debug;

/// Raw pin level of a pressed button (active-low).
const PRESSED_LEVEL: bool = false;

/// Events emitted after debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// One clean press (falling edge committed through the debounce filter).
    Activated,
}

pub struct DebouncedButton {
    debounce_ms: u32,
    /// Most recent raw sample.
    raw_last: bool,
    /// Committed (debounced) level.
    stable: bool,
    /// Timestamp of the last raw transition.
    last_change_ms: u32,
    /// All input is ignored until this instant (startup settle guard).
    ignore_until_ms: u32,
}

impl DebouncedButton {
    /// Initialise from the pin level sampled at startup. `now_ms` arms the
    /// quiet window; no event can fire before it expires.
    pub fn new(initial_raw: bool, now_ms: u32, debounce_ms: u32, startup_guard_ms: u32) -> Self {
        Self {
            debounce_ms,
            raw_last: initial_raw,
            stable: initial_raw,
            last_change_ms: now_ms,
            ignore_until_ms: now_ms.wrapping_add(startup_guard_ms),
        }
    }

    /// Feed one raw sample. Returns an event when a clean press commits.
    pub fn poll(&mut self, raw: bool, now_ms: u32) -> Option<ButtonEvent> {
        // Startup guard: wrapping-safe "now < ignore_until".
        if (self.ignore_until_ms.wrapping_sub(now_ms) as i32) > 0 {
            return None;
        }

        if raw != self.raw_last {
            self.last_change_ms = now_ms;
            self.raw_last = raw;
        }

        if now_ms.wrapping_sub(self.last_change_ms) > self.debounce_ms && raw != self.stable {
            self.stable = raw;
            if self.stable == PRESSED_LEVEL {
                debug!("button: press committed at t={now_ms}ms");
                return Some(ButtonEvent::Activated);
            }
        }
        None
    }

    /// Committed level (true = released on an active-low switch).
    pub fn stable_level(&self) -> bool {
        self.stable
    }
}
