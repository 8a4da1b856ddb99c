//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — log to serial, drive a display, forward to
//! a remote channel.

use crate::control::arbiter::ActuatorMode;
use crate::control::climate::{ActuationState, ClimateEvent, Setpoints};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The application service has started.
    Started,

    /// An actuator changed state (edge, never repeated).
    Climate(ClimateEvent),

    /// A scheduled sensor sample failed; the stale-value policy applies.
    SensorReadFailed,

    /// A setpoint was changed through a validated path.
    SetpointChanged(Setpoints),
}

/// A point-in-time view of the whole control state, for `STATUS` replies
/// and display refreshes. Building one never mutates the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    /// Last valid temperature; `None` until the first successful sample.
    pub temperature_c: Option<f32>,
    /// Last valid humidity; `None` until the first successful sample.
    pub humidity_pct: Option<f32>,
    pub setpoints: Setpoints,
    pub actuation: ActuationState,
    pub vent_mode: ActuatorMode,
    pub irrigation_mode: ActuatorMode,
}
