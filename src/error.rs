//! Unified error types for the greenhouse firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! control loop's error handling uniform. All variants are `Copy` so they can
//! be cheaply passed around without allocation. No condition here is fatal:
//! the control loop logs and continues.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
/// `CommandError` carries `f32` bounds, so only `PartialEq` is derivable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A sensor could not be read or returned implausible data.
    Sensor(SensorError),
    /// A textual command was rejected.
    Command(CommandError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// DHT22 did not answer the start signal in time.
    Timeout,
    /// DHT22 frame checksum did not match.
    ChecksumMismatch,
    /// ADC read returned an error.
    AdcReadFailed,
    /// Reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "DHT22 timeout"),
            Self::ChecksumMismatch => write!(f, "DHT22 checksum mismatch"),
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Rejections raised by the command surface. Setpoint range violations are
/// reported, never silently clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandError {
    /// `TEMP` argument outside the accepted reference range.
    TemperatureOutOfRange { min: f32, max: f32 },
    /// `HUM` argument outside the accepted threshold range.
    HumidityOutOfRange { min: u8, max: u8 },
    /// Command verb recognised but the argument did not parse.
    Malformed,
    /// Command text matched no known verb.
    Unrecognized,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemperatureOutOfRange { min, max } => {
                write!(f, "temperature must be between {min:.0}-{max:.0} C")
            }
            Self::HumidityOutOfRange { min, max } => {
                write!(f, "humidity must be between {min}-{max}%")
            }
            Self::Malformed => write!(f, "malformed argument"),
            Self::Unrecognized => write!(f, "unrecognized command"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_human_readable() {
        let e = Error::from(CommandError::TemperatureOutOfRange { min: 10.0, max: 50.0 });
        assert_eq!(e.to_string(), "command: temperature must be between 10-50 C");
        let e = Error::from(SensorError::ChecksumMismatch);
        assert_eq!(e.to_string(), "sensor: DHT22 checksum mismatch");
    }

    #[test]
    fn range_variants_compare_by_bounds() {
        let a = CommandError::TemperatureOutOfRange { min: 10.0, max: 50.0 };
        let b = CommandError::TemperatureOutOfRange { min: 10.0, max: 50.0 };
        assert_eq!(a, b);
        assert_ne!(a, CommandError::TemperatureOutOfRange { min: 10.0, max: 40.0 });
        assert_eq!(Error::from(a), Error::from(b));
    }
}
