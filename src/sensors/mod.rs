//! Sensor drivers and the sampling hub.
//!
//! `SensorHub` owns the individual drivers and enforces the DHT22's
//! minimum sample interval; the control layer only ever sees
//! `ClimateReading` values.

pub mod dht22;
pub mod potentiometer;

use log::warn;

use crate::config::SystemConfig;
use crate::control::climate::ClimateReading;
use crate::pins;

use dht22::Dht22;
use potentiometer::Potentiometer;

pub struct SensorHub {
    dht: Dht22,
    pot: Potentiometer,
    sample_interval_ms: u32,
    last_sample_ms: Option<u32>,
}

impl SensorHub {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            dht: Dht22::new(pins::DHT_GPIO),
            pot: Potentiometer::new(pins::POT_ADC_GPIO),
            sample_interval_ms: config.sensor_sample_interval_ms,
            last_sample_ms: None,
        }
    }

    /// Samples the DHT22 if the minimum interval has elapsed.
    ///
    /// `None` means "not due yet". A failed wire transaction still
    /// returns `Some` with both fields empty so the controller can apply
    /// its stale-value policy.
    pub fn sample(&mut self, now_ms: u32) -> Option<ClimateReading> {
        if let Some(last) = self.last_sample_ms {
            if now_ms.wrapping_sub(last) < self.sample_interval_ms {
                return None;
            }
        }
        self.last_sample_ms = Some(now_ms);

        match self.dht.read() {
            Ok(r) => Some(ClimateReading {
                temperature_c: Some(r.temperature_c),
                humidity_pct: Some(r.humidity_pct),
            }),
            Err(e) => {
                warn!("DHT22 read failed: {}", e);
                Some(ClimateReading {
                    temperature_c: None,
                    humidity_pct: None,
                })
            }
        }
    }

    /// Current pot position mapped onto `[lo, hi]`, or `None` when the
    /// ADC read fails.
    pub fn pot_setpoint(&self, lo: f32, hi: f32) -> Option<f32> {
        match self.pot.read_mapped(lo, hi) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("pot read failed: {}", e);
                None
            }
        }
    }
}
