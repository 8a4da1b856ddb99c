//! Pin assignments for the greenhouse board.
//!
//! Single source of truth — hw_init and the drivers reference these
//! constants rather than hard-coding GPIO numbers.

#![allow(dead_code)]

/// DHT22 data line (single-wire, external 10k pull-up).
pub const DHT_GPIO: i32 = 4;

/// Ventilation indicator LED (drives the fan relay on the full build).
pub const LED_VENT_GPIO: i32 = 2;

/// Irrigation indicator LED (blinks while watering).
pub const LED_RIEGO_GPIO: i32 = 5;

/// Setpoint potentiometer wiper (ADC1).
pub const POT_ADC_GPIO: i32 = 32;

/// Menu button — active-low momentary switch with internal pull-up.
pub const BUTTON_GPIO: i32 = 33;

/// I2C bus for the SSD1306 status display.
pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
