//! Per-actuator automatic/manual mode arbitration.
//!
//! A manual command implicitly switches that actuator to `Manual` carrying
//! the commanded state; `AUTO` returns both actuators to `Automatic` without
//! touching the last actuation values, so automatic control simply resumes
//! from whatever decision the next tick produces.

/// Control mode for one actuator.
///
/// The commanded state rides inside the `Manual` variant — there is no
/// separate override flag, so "manual but no commanded state" cannot be
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorMode {
    /// Derive the actuation state from sensor readings.
    Automatic,
    /// Freeze the actuation state at the commanded value.
    Manual(bool),
}

impl ActuatorMode {
    /// True when this actuator is under manual control.
    pub fn is_manual(self) -> bool {
        matches!(self, Self::Manual(_))
    }
}

/// Resolves the control mode for both actuators.
#[derive(Debug, Clone, Copy)]
pub struct ModeArbiter {
    vent: ActuatorMode,
    irrigation: ActuatorMode,
}

impl Default for ModeArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeArbiter {
    pub fn new() -> Self {
        Self {
            vent: ActuatorMode::Automatic,
            irrigation: ActuatorMode::Automatic,
        }
    }

    /// Force ventilation to manual with the given state.
    pub fn set_vent_manual(&mut self, on: bool) {
        self.vent = ActuatorMode::Manual(on);
    }

    /// Force irrigation to manual with the given state.
    pub fn set_irrigation_manual(&mut self, on: bool) {
        self.irrigation = ActuatorMode::Manual(on);
    }

    /// Return both actuators to automatic control and clear any pending
    /// manual command.
    pub fn set_auto(&mut self) {
        self.vent = ActuatorMode::Automatic;
        self.irrigation = ActuatorMode::Automatic;
    }

    pub fn vent_mode(&self) -> ActuatorMode {
        self.vent
    }

    pub fn irrigation_mode(&self) -> ActuatorMode {
        self.irrigation
    }

    /// True when either actuator is under manual control (display hint).
    pub fn any_manual(&self) -> bool {
        self.vent.is_manual() || self.irrigation.is_manual()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_automatic() {
        let arb = ModeArbiter::new();
        assert_eq!(arb.vent_mode(), ActuatorMode::Automatic);
        assert_eq!(arb.irrigation_mode(), ActuatorMode::Automatic);
        assert!(!arb.any_manual());
    }

    #[test]
    fn manual_command_switches_one_actuator_only() {
        let mut arb = ModeArbiter::new();
        arb.set_vent_manual(true);
        assert_eq!(arb.vent_mode(), ActuatorMode::Manual(true));
        assert_eq!(arb.irrigation_mode(), ActuatorMode::Automatic);
        assert!(arb.any_manual());
    }

    #[test]
    fn auto_clears_both_manual_modes() {
        let mut arb = ModeArbiter::new();
        arb.set_vent_manual(false);
        arb.set_irrigation_manual(true);
        arb.set_auto();
        assert_eq!(arb.vent_mode(), ActuatorMode::Automatic);
        assert_eq!(arb.irrigation_mode(), ActuatorMode::Automatic);
    }

    #[test]
    fn manual_recommand_replaces_state() {
        let mut arb = ModeArbiter::new();
        arb.set_irrigation_manual(true);
        arb.set_irrigation_manual(false);
        assert_eq!(arb.irrigation_mode(), ActuatorMode::Manual(false));
    }
}
