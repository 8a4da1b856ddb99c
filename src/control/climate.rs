//! Climate controller — ventilation hysteresis + irrigation threshold.
//!
//! ```text
//!                 ref-0.5      ref      ref+0.5
//!  vent OFF  ◀──────┤···· dead band ····├──────▶  vent ON
//! ```
//!
//! Ventilation uses a ±0.5 °C hysteresis band around the temperature
//! reference: inside the band the previous state holds, which stops the fan
//! from chattering at the boundary. Irrigation is a plain threshold with no
//! hysteresis — the two rules are deliberately asymmetric.
//!
//! The controller retains the last valid reading when a sample comes back
//! absent (failed DHT read): ventilation holds its previous state, and
//! irrigation stays off until humidity has been valid at least once.

use heapless::Vec;
use log::info;

use crate::config::SystemConfig;
use crate::control::arbiter::ActuatorMode;
use crate::error::CommandError;

/// One sample from the climate sensor. `None` means the read failed at the
/// sampling instant; the controller falls back to the last valid value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
}

/// Current actuation decision for both actuators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuationState {
    pub ventilation_on: bool,
    pub irrigation_on: bool,
}

/// Edge-triggered notifications — emitted exactly on a state change,
/// never on repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateEvent {
    VentilationOn,
    VentilationOff,
    IrrigationStarted,
    IrrigationStopped,
}

/// At most one edge per actuator per tick.
pub type ClimateEvents = Vec<ClimateEvent, 2>;

/// Runtime-mutable control setpoints. Owned exclusively by the controller;
/// mutation goes through the validated setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoints {
    pub temp_reference_c: f32,
    pub humidity_threshold_pct: u8,
}

/// The climate-control decision core.
pub struct ClimateController {
    setpoints: Setpoints,
    hysteresis_c: f32,
    temp_min_c: f32,
    temp_max_c: f32,
    hum_min_pct: u8,
    hum_max_pct: u8,
    /// Last valid readings (stale-value policy).
    temperature_c: Option<f32>,
    humidity_pct: Option<f32>,
    state: ActuationState,
}

impl ClimateController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            setpoints: Setpoints {
                temp_reference_c: config.temp_reference_c,
                humidity_threshold_pct: config.humidity_threshold_pct,
            },
            hysteresis_c: config.vent_hysteresis_c,
            temp_min_c: config.temp_reference_min_c,
            temp_max_c: config.temp_reference_max_c,
            hum_min_pct: config.humidity_threshold_min_pct,
            hum_max_pct: config.humidity_threshold_max_pct,
            temperature_c: None,
            humidity_pct: None,
            state: ActuationState::default(),
        }
    }

    // ── Per-tick decision ─────────────────────────────────────

    /// Run one control decision: absorb the reading (retaining previous
    /// valid values for absent fields), resolve each actuator against its
    /// mode, and report edges relative to the previous tick.
    pub fn tick(
        &mut self,
        reading: &ClimateReading,
        vent_mode: ActuatorMode,
        irrigation_mode: ActuatorMode,
    ) -> (ActuationState, ClimateEvents) {
        if let Some(t) = reading.temperature_c {
            self.temperature_c = Some(t);
        }
        if let Some(h) = reading.humidity_pct {
            self.humidity_pct = Some(h);
        }

        let vent_on = match vent_mode {
            ActuatorMode::Manual(on) => on,
            ActuatorMode::Automatic => self.vent_rule(),
        };

        let irrigation_on = match irrigation_mode {
            ActuatorMode::Manual(on) => on,
            // Plain threshold; humidity never valid → do not water.
            ActuatorMode::Automatic => self
                .humidity_pct
                .is_some_and(|h| h < f32::from(self.setpoints.humidity_threshold_pct)),
        };

        let mut events = ClimateEvents::new();
        if vent_on != self.state.ventilation_on {
            let ev = if vent_on {
                ClimateEvent::VentilationOn
            } else {
                ClimateEvent::VentilationOff
            };
            info!("event: ventilation {}", if vent_on { "ON" } else { "OFF" });
            let _ = events.push(ev);
        }
        if irrigation_on != self.state.irrigation_on {
            let ev = if irrigation_on {
                ClimateEvent::IrrigationStarted
            } else {
                ClimateEvent::IrrigationStopped
            };
            info!(
                "event: irrigation {}",
                if irrigation_on { "started (humidity below threshold)" } else { "stopped" }
            );
            let _ = events.push(ev);
        }

        self.state = ActuationState {
            ventilation_on: vent_on,
            irrigation_on,
        };
        (self.state, events)
    }

    /// Hysteresis rule: ON above `ref + band`, OFF below `ref - band`,
    /// hold inside the dead band or while temperature has never been valid.
    fn vent_rule(&self) -> bool {
        match self.temperature_c {
            Some(t) if t > self.setpoints.temp_reference_c + self.hysteresis_c => true,
            Some(t) if t < self.setpoints.temp_reference_c - self.hysteresis_c => false,
            _ => self.state.ventilation_on,
        }
    }

    // ── Setpoint updates (validated, never clamped) ───────────

    pub fn set_temperature_reference(&mut self, value: f32) -> Result<(), CommandError> {
        if !value.is_finite() || value < self.temp_min_c || value > self.temp_max_c {
            return Err(CommandError::TemperatureOutOfRange {
                min: self.temp_min_c,
                max: self.temp_max_c,
            });
        }
        self.setpoints.temp_reference_c = value;
        info!("setpoint: temperature reference = {value:.1} C");
        Ok(())
    }

    pub fn set_humidity_threshold(&mut self, value: u8) -> Result<(), CommandError> {
        if value < self.hum_min_pct || value > self.hum_max_pct {
            return Err(CommandError::HumidityOutOfRange {
                min: self.hum_min_pct,
                max: self.hum_max_pct,
            });
        }
        self.setpoints.humidity_threshold_pct = value;
        info!("setpoint: humidity threshold = {value}%");
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn setpoints(&self) -> Setpoints {
        self.setpoints
    }

    pub fn actuation(&self) -> ActuationState {
        self.state
    }

    /// Last valid temperature, if any sample has ever succeeded.
    pub fn temperature_c(&self) -> Option<f32> {
        self.temperature_c
    }

    /// Last valid humidity, if any sample has ever succeeded.
    pub fn humidity_pct(&self) -> Option<f32> {
        self.humidity_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTO: ActuatorMode = ActuatorMode::Automatic;

    fn controller() -> ClimateController {
        ClimateController::new(&SystemConfig::default())
    }

    fn temp(t: f32) -> ClimateReading {
        ClimateReading {
            temperature_c: Some(t),
            humidity_pct: Some(60.0),
        }
    }

    fn hum(h: f32) -> ClimateReading {
        ClimateReading {
            temperature_c: Some(20.0),
            humidity_pct: Some(h),
        }
    }

    // Worked example from the bench log: ref=25.0, 24.0 → 26.0 → 25.2
    // gives OFF → ON → ON (25.2 sits inside the dead band, holds ON).
    #[test]
    fn vent_hysteresis_holds_inside_dead_band() {
        let mut c = controller();
        let (s, _) = c.tick(&temp(24.0), AUTO, AUTO);
        assert!(!s.ventilation_on);
        let (s, _) = c.tick(&temp(26.0), AUTO, AUTO);
        assert!(s.ventilation_on);
        let (s, ev) = c.tick(&temp(25.2), AUTO, AUTO);
        assert!(s.ventilation_on, "dead band must hold the prior state");
        assert!(ev.is_empty(), "no edge inside the dead band");
    }

    #[test]
    fn vent_edges_emit_exactly_once() {
        let mut c = controller();
        let (_, ev) = c.tick(&temp(26.0), AUTO, AUTO);
        assert!(ev.contains(&ClimateEvent::VentilationOn));
        let (_, ev) = c.tick(&temp(26.0), AUTO, AUTO);
        assert!(!ev.contains(&ClimateEvent::VentilationOn), "no repeat events");
        let (_, ev) = c.tick(&temp(24.0), AUTO, AUTO);
        assert!(ev.contains(&ClimateEvent::VentilationOff));
    }

    #[test]
    fn vent_holds_state_when_temperature_absent() {
        let mut c = controller();
        c.tick(&temp(26.0), AUTO, AUTO);
        let absent = ClimateReading {
            temperature_c: None,
            humidity_pct: None,
        };
        let (s, ev) = c.tick(&absent, AUTO, AUTO);
        assert!(s.ventilation_on, "failed read must not drop the fan");
        assert!(ev.is_empty());
    }

    #[test]
    fn irrigation_is_plain_threshold() {
        let mut c = controller(); // threshold 50
        let (s, _) = c.tick(&hum(49.9), AUTO, AUTO);
        assert!(s.irrigation_on);
        let (s, _) = c.tick(&hum(50.0), AUTO, AUTO);
        assert!(!s.irrigation_on, "threshold is strict less-than");
        let (s, _) = c.tick(&hum(50.1), AUTO, AUTO);
        assert!(!s.irrigation_on);
    }

    #[test]
    fn irrigation_off_while_humidity_never_valid() {
        let mut c = controller();
        let absent = ClimateReading::default();
        let (s, ev) = c.tick(&absent, AUTO, AUTO);
        assert!(!s.irrigation_on, "never water blind");
        assert!(ev.is_empty());
    }

    #[test]
    fn irrigation_retains_last_valid_humidity() {
        let mut c = controller();
        c.tick(&hum(40.0), AUTO, AUTO);
        let absent = ClimateReading::default();
        let (s, _) = c.tick(&absent, AUTO, AUTO);
        assert!(s.irrigation_on, "stale value keeps watering decision");
    }

    #[test]
    fn manual_mode_bypasses_rules() {
        let mut c = controller();
        // Hot enough that the automatic rule would say ON.
        let (s, _) = c.tick(&temp(30.0), ActuatorMode::Manual(false), AUTO);
        assert!(!s.ventilation_on);
        // Dry enough that the automatic rule would say ON.
        let (s, _) = c.tick(&hum(10.0), AUTO, ActuatorMode::Manual(false));
        assert!(!s.irrigation_on);
    }

    #[test]
    fn manual_on_then_off_is_two_edges() {
        let mut c = controller();
        let (_, ev) = c.tick(&hum(60.0), AUTO, ActuatorMode::Manual(true));
        assert_eq!(ev.as_slice(), &[ClimateEvent::IrrigationStarted]);
        let (_, ev) = c.tick(&hum(60.0), AUTO, ActuatorMode::Manual(true));
        assert!(ev.is_empty());
        let (_, ev) = c.tick(&hum(60.0), AUTO, ActuatorMode::Manual(false));
        assert_eq!(ev.as_slice(), &[ClimateEvent::IrrigationStopped]);
    }

    // Worked example: MANUAL irrigation ON, then AUTO with humidity=60 over
    // threshold 50 — the edge fires on the AUTO-triggered tick.
    #[test]
    fn auto_resumes_from_fresh_decision() {
        let mut c = controller();
        let (s, _) = c.tick(&hum(60.0), AUTO, ActuatorMode::Manual(true));
        assert!(s.irrigation_on);
        let (s, ev) = c.tick(&hum(60.0), AUTO, AUTO);
        assert!(!s.irrigation_on);
        assert_eq!(ev.as_slice(), &[ClimateEvent::IrrigationStopped]);
    }

    #[test]
    fn setpoint_rejection_leaves_value_unchanged() {
        let mut c = controller();
        assert!(c.set_temperature_reference(5.0).is_err());
        assert!((c.setpoints().temp_reference_c - 25.0).abs() < f32::EPSILON);
        assert!(c.set_temperature_reference(f32::NAN).is_err());
        assert!(c.set_humidity_threshold(81).is_err());
        assert_eq!(c.setpoints().humidity_threshold_pct, 50);
    }

    #[test]
    fn setpoint_bounds_are_inclusive() {
        let mut c = controller();
        assert!(c.set_temperature_reference(10.0).is_ok());
        assert!(c.set_temperature_reference(50.0).is_ok());
        assert!(c.set_humidity_threshold(20).is_ok());
        assert!(c.set_humidity_threshold(80).is_ok());
    }
}
