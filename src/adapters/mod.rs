//! Adapters — concrete implementations of the app-layer port traits.
//!
//! Everything that touches a real peripheral, the logger, or the serial
//! console lives here; the domain core in [`crate::app`] only ever sees
//! the traits.

pub mod console;
pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
