//! Hardware drivers — button debouncing, indicator LEDs, peripheral init.
//!
//! Each driver is dual-target: on ESP-IDF it talks to the peripherals via
//! [`hw_init`]; on the host the hardware calls are no-ops (or simulated),
//! keeping the logic testable.

pub mod button;
pub mod hw_init;
pub mod leds;
