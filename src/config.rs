//! System configuration parameters
//!
//! All tunable parameters for the greenhouse controller. Values are either
//! compiled-in defaults or overridden at runtime through the command surface.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Setpoints (initial values; mutable at runtime) ---
    /// Ventilation temperature reference (Celsius)
    pub temp_reference_c: f32,
    /// Irrigation humidity threshold (percent relative humidity)
    pub humidity_threshold_pct: u8,

    // --- Setpoint validation bounds ---
    /// Lowest accepted temperature reference (Celsius)
    pub temp_reference_min_c: f32,
    /// Highest accepted temperature reference (Celsius)
    pub temp_reference_max_c: f32,
    /// Lowest accepted humidity threshold (percent)
    pub humidity_threshold_min_pct: u8,
    /// Highest accepted humidity threshold (percent)
    pub humidity_threshold_max_pct: u8,

    // --- Control ---
    /// Ventilation hysteresis half-band (Celsius)
    pub vent_hysteresis_c: f32,

    // --- Timing ---
    /// DHT22 sampling interval (milliseconds) — the sensor needs >= 2s
    pub sensor_sample_interval_ms: u32,
    /// Irrigation indicator blink half-period (milliseconds)
    pub blink_interval_ms: u32,
    /// Display refresh interval (milliseconds)
    pub display_refresh_interval_ms: u32,
    /// Idle delay at the tail of each polling loop iteration (milliseconds)
    pub loop_idle_delay_ms: u32,

    // --- Button ---
    /// Debounce settle window (milliseconds)
    pub debounce_delay_ms: u32,
    /// Startup quiet period during which button input is ignored (milliseconds)
    pub button_startup_guard_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Setpoints
            temp_reference_c: 25.0,
            humidity_threshold_pct: 50,

            // Bounds — widest of the deployed variants (see DESIGN.md)
            temp_reference_min_c: 10.0,
            temp_reference_max_c: 50.0,
            humidity_threshold_min_pct: 20,
            humidity_threshold_max_pct: 80,

            // Control
            vent_hysteresis_c: 0.5,

            // Timing
            sensor_sample_interval_ms: 2000,
            blink_interval_ms: 500,
            display_refresh_interval_ms: 700,
            loop_idle_delay_ms: 10,

            // Button
            debounce_delay_ms: 50,
            button_startup_guard_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.temp_reference_min_c < c.temp_reference_max_c);
        assert!(c.humidity_threshold_min_pct < c.humidity_threshold_max_pct);
        assert!(c.temp_reference_c >= c.temp_reference_min_c);
        assert!(c.temp_reference_c <= c.temp_reference_max_c);
        assert!(c.humidity_threshold_pct >= c.humidity_threshold_min_pct);
        assert!(c.humidity_threshold_pct <= c.humidity_threshold_max_pct);
        assert!(c.vent_hysteresis_c > 0.0);
        assert!(c.blink_interval_ms > 0);
        assert!(c.debounce_delay_ms > 0);
    }

    #[test]
    fn dht_interval_respects_sensor_minimum() {
        let c = SystemConfig::default();
        assert!(
            c.sensor_sample_interval_ms >= 2000,
            "DHT22 cannot be read faster than every 2 seconds"
        );
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = SystemConfig::default();
        assert!(
            c.loop_idle_delay_ms < c.blink_interval_ms,
            "the loop must poll faster than the blink cadence"
        );
        assert!(
            c.display_refresh_interval_ms < c.sensor_sample_interval_ms,
            "the display should refresh at least once per sample"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert!((c.temp_reference_c - c2.temp_reference_c).abs() < 0.001);
        assert_eq!(c.humidity_threshold_pct, c2.humidity_threshold_pct);
        assert_eq!(c.blink_interval_ms, c2.blink_interval_ms);
    }
}
