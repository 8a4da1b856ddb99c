//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and both indicator LEDs, exposing them through
//! [`SensorPort`] and [`ActuatorPort`]. This is the only module in the
//! system that touches actual hardware. On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::climate::ClimateReading;
use crate::drivers::hw_init;
use crate::drivers::leds::IndicatorLed;
use crate::pins;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    vent_led: IndicatorLed,
    irrigation_led: IndicatorLed,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub) -> Self {
        Self {
            sensor_hub,
            vent_led: IndicatorLed::new(pins::LED_VENT_GPIO),
            irrigation_led: IndicatorLed::new(pins::LED_RIEGO_GPIO),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn sample(&mut self, now_ms: u32) -> Option<ClimateReading> {
        self.sensor_hub.sample(now_ms)
    }

    fn override_setpoint(&mut self, lo: f32, hi: f32) -> Option<f32> {
        self.sensor_hub.pot_setpoint(lo, hi)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_ventilation(&mut self, on: bool) {
        self.vent_led.set(on);
    }

    fn set_irrigation_indicator(&mut self, on: bool) {
        self.irrigation_led.set(on);
    }

    fn button_level(&mut self) -> bool {
        hw_init::gpio_read(pins::BUTTON_GPIO)
    }
}
