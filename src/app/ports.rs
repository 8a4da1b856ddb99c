//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, display, event sinks) implement
//! these traits. The [`AppService`](super::service::AppService) consumes
//! them via generics, so the domain core never touches hardware directly
//! and the whole service runs under test with mock adapters.

use crate::control::climate::ClimateReading;

use super::events::{AppEvent, StatusSnapshot};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain climate samples.
pub trait SensorPort {
    /// Sample the climate sensor if its minimum interval has elapsed.
    ///
    /// `None` means "not due this tick". `Some` with absent fields means
    /// the read was attempted and failed.
    fn sample(&mut self, now_ms: u32) -> Option<ClimateReading>;

    /// Current setpoint-override knob position, mapped onto `[lo, hi]`.
    ///
    /// `None` means the knob could not be read; the caller leaves the
    /// setpoint untouched.
    fn override_setpoint(&mut self, lo: f32, hi: f32) -> Option<f32>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Drive the ventilation output (fan relay / indicator).
    fn set_ventilation(&mut self, on: bool);

    /// Drive the irrigation indicator at its current blink phase.
    fn set_irrigation_indicator(&mut self, on: bool);

    /// Raw menu-button level (active-low: `false` while pressed).
    fn button_level(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → status display)
// ───────────────────────────────────────────────────────────────

/// Menu pages cycled by the button, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuPage {
    #[default]
    Overview,
    Temperature,
    Humidity,
    ConfigTemp,
    ConfigHum,
    Ventilation,
    Irrigation,
    Mode,
}

impl MenuPage {
    /// Next page in the cycle, wrapping back to [`MenuPage::Overview`].
    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Temperature,
            Self::Temperature => Self::Humidity,
            Self::Humidity => Self::ConfigTemp,
            Self::ConfigTemp => Self::ConfigHum,
            Self::ConfigHum => Self::Ventilation,
            Self::Ventilation => Self::Irrigation,
            Self::Irrigation => Self::Mode,
            Self::Mode => Self::Overview,
        }
    }
}

/// Rendering is an adapter concern; the core only says what to show.
pub trait DisplayPort {
    fn refresh(&mut self, page: MenuPage, status: &StatusSnapshot);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_cycle_visits_every_page_once() {
        let mut page = MenuPage::default();
        let mut seen = 0u32;
        for _ in 0..8 {
            seen += 1;
            page = page.next();
        }
        assert_eq!(page, MenuPage::Overview, "cycle wraps after all pages");
        assert_eq!(seen, 8);
    }
}
