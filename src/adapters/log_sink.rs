//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A remote-telemetry adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::climate::ClimateEvent;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | control loop up");
            }
            AppEvent::Climate(ev) => {
                let label = match ev {
                    ClimateEvent::VentilationOn => "ventilation ON",
                    ClimateEvent::VentilationOff => "ventilation OFF",
                    ClimateEvent::IrrigationStarted => "irrigation started",
                    ClimateEvent::IrrigationStopped => "irrigation stopped",
                };
                info!("EDGE | {}", label);
            }
            AppEvent::SensorReadFailed => {
                warn!("SENSOR | read failed, holding last valid values");
            }
            AppEvent::SetpointChanged(sp) => {
                info!(
                    "SETPOINT | ref={:.1}C threshold={}%",
                    sp.temp_reference_c, sp.humidity_threshold_pct,
                );
            }
        }
    }
}
