//! Setpoint potentiometer on ADC1.
//!
//! The wiper voltage maps linearly onto the valid temperature-reference
//! range, so turning the knob sweeps the setpoint end to end.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the pot channel via the oneshot API (initialised by
//! hw_init). On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

static SIM_POT_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pot_adc(raw: u16) {
    SIM_POT_ADC.store(raw, Ordering::Relaxed);
}

const ADC_MAX: f32 = 4095.0;

pub struct Potentiometer {
    _adc_gpio: i32,
}

impl Potentiometer {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    /// Raw 12-bit ADC sample, clamped to the converter's range.
    pub fn read_raw(&self) -> Result<u16, SensorError> {
        Ok(self.read_adc()?.min(ADC_MAX as u16))
    }

    /// Mapped onto `[lo, hi]` for direct use as a setpoint.
    pub fn read_mapped(&self, lo: f32, hi: f32) -> Result<f32, SensorError> {
        Ok(map_to_range(self.read_raw()?, lo, hi))
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(hw_init::ADC1_CH_POT)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        Ok(SIM_POT_ADC.load(Ordering::Relaxed))
    }
}

/// Linear map of a 12-bit raw sample onto `[lo, hi]`.
pub fn map_to_range(raw: u16, lo: f32, hi: f32) -> f32 {
    let frac = f32::from(raw.min(ADC_MAX as u16)) / ADC_MAX;
    lo + frac * (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_endpoints() {
        assert!((map_to_range(0, 10.0, 50.0) - 10.0).abs() < 1e-3);
        assert!((map_to_range(4095, 10.0, 50.0) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn map_midpoint() {
        let mid = map_to_range(2048, 10.0, 50.0);
        assert!((mid - 30.0).abs() < 0.05);
    }

    #[test]
    fn raw_above_converter_range_clamps() {
        assert!((map_to_range(u16::MAX, 0.0, 1.0) - 1.0).abs() < 1e-6);
    }
}
