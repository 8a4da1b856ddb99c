//! Climate-control decision core — pure logic, zero I/O.
//!
//! [`climate::ClimateController`] turns sensor readings into actuation
//! decisions, [`arbiter::ModeArbiter`] resolves automatic vs. manual control
//! per actuator, and [`blink::BlinkScheduler`] paces the irrigation
//! indicator. None of these touch hardware; the app service wires their
//! outputs to the actuator port.

pub mod arbiter;
pub mod blink;
pub mod climate;
