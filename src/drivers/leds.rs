//! Ventilation and irrigation indicator LED drivers.
//!
//! Plain on/off GPIO outputs. The drivers cache the commanded level and
//! skip redundant writes, so the main loop can set them every tick.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct IndicatorLed {
    gpio: i32,
    on: bool,
}

impl IndicatorLed {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) {
        if on != self.on {
            hw_init::gpio_write(self.gpio, on);
            self.on = on;
        }
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_commanded_level() {
        let mut led = IndicatorLed::new(2);
        assert!(!led.is_on());
        led.set(true);
        assert!(led.is_on());
        led.set(true); // redundant write is a no-op
        led.off();
        assert!(!led.is_on());
    }
}
