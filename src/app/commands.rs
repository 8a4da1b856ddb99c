//! Inbound commands to the application service.
//!
//! The textual command surface is transport-agnostic: the serial console
//! and any remote channel feed the same verbs through [`parse`] and get the
//! same acknowledgment strings back. Verbs are case-insensitive.

use heapless::Deque;
use heapless::String;

use crate::error::CommandError;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `TEMP <float>` — set the ventilation temperature reference.
    SetTemperature(f32),

    /// `HUM <int>` — set the irrigation humidity threshold.
    SetHumidityThreshold(u8),

    /// `VENT ON|OFF` — force ventilation to manual with the given state.
    VentManual(bool),

    /// `IRRIGATION ON|OFF` (alias `RIEGO`) — force irrigation to manual.
    IrrigationManual(bool),

    /// `AUTO` — both actuators back to automatic control.
    Auto,

    /// `STATUS` — read-only snapshot, no mutation.
    Status,
}

/// Parse one command line. Whitespace-separated, verbs and `ON`/`OFF`
/// arguments matched case-insensitively.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().ok_or(CommandError::Malformed)?;

    let cmd = if verb.eq_ignore_ascii_case("TEMP") {
        let arg = tokens.next().ok_or(CommandError::Malformed)?;
        let value: f32 = arg.parse().map_err(|_| CommandError::Malformed)?;
        Command::SetTemperature(value)
    } else if verb.eq_ignore_ascii_case("HUM") {
        let arg = tokens.next().ok_or(CommandError::Malformed)?;
        let value: u8 = arg.parse().map_err(|_| CommandError::Malformed)?;
        Command::SetHumidityThreshold(value)
    } else if verb.eq_ignore_ascii_case("VENT") {
        Command::VentManual(parse_on_off(tokens.next())?)
    } else if verb.eq_ignore_ascii_case("IRRIGATION") || verb.eq_ignore_ascii_case("RIEGO") {
        Command::IrrigationManual(parse_on_off(tokens.next())?)
    } else if verb.eq_ignore_ascii_case("AUTO") {
        Command::Auto
    } else if verb.eq_ignore_ascii_case("STATUS") {
        Command::Status
    } else {
        return Err(CommandError::Unrecognized);
    };

    // Trailing junk after a complete command is rejected, not ignored.
    if tokens.next().is_some() {
        return Err(CommandError::Malformed);
    }
    Ok(cmd)
}

fn parse_on_off(arg: Option<&str>) -> Result<bool, CommandError> {
    match arg {
        Some(a) if a.eq_ignore_ascii_case("ON") => Ok(true),
        Some(a) if a.eq_ignore_ascii_case("OFF") => Ok(false),
        _ => Err(CommandError::Malformed),
    }
}

// ── Command queue ─────────────────────────────────────────────

/// Maximum raw line length accepted from a transport.
pub const MAX_LINE_LEN: usize = 64;

/// Bounded FIFO of raw command lines, drained once per control tick.
///
/// Transports enqueue here instead of calling into the service directly,
/// so commands are applied at a single point in the loop and the
/// single-owner state model holds even if a second input channel appears.
#[derive(Default)]
pub struct CommandQueue {
    lines: Deque<String<MAX_LINE_LEN>, 4>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a raw line. Returns `false` (dropping the line) when the
    /// queue is full or the line exceeds [`MAX_LINE_LEN`].
    pub fn push(&mut self, line: &str) -> bool {
        let Ok(owned) = String::try_from(line) else {
            return false;
        };
        self.lines.push_back(owned).is_ok()
    }

    pub fn pop(&mut self) -> Option<String<MAX_LINE_LEN>> {
        self.lines.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(parse("temp 23.5"), Ok(Command::SetTemperature(23.5)));
        assert_eq!(parse("Vent on"), Ok(Command::VentManual(true)));
        assert_eq!(parse("IRRIGATION OFF"), Ok(Command::IrrigationManual(false)));
        assert_eq!(parse("riego on"), Ok(Command::IrrigationManual(true)));
        assert_eq!(parse("auto"), Ok(Command::Auto));
        assert_eq!(parse("STATUS"), Ok(Command::Status));
    }

    #[test]
    fn bad_arguments_are_malformed() {
        assert_eq!(parse("TEMP"), Err(CommandError::Malformed));
        assert_eq!(parse("TEMP abc"), Err(CommandError::Malformed));
        assert_eq!(parse("HUM 50.5"), Err(CommandError::Malformed));
        assert_eq!(parse("VENT maybe"), Err(CommandError::Malformed));
        assert_eq!(parse("AUTO now"), Err(CommandError::Malformed));
        assert_eq!(parse(""), Err(CommandError::Malformed));
    }

    #[test]
    fn unknown_verb_is_unrecognized() {
        assert_eq!(parse("REBOOT"), Err(CommandError::Unrecognized));
    }

    #[test]
    fn queue_is_bounded_and_fifo() {
        let mut q = CommandQueue::new();
        assert!(q.push("TEMP 20"));
        assert!(q.push("STATUS"));
        assert!(q.push("AUTO"));
        assert!(q.push("HUM 55"));
        assert!(!q.push("VENT ON"), "fifth line must be dropped");
        assert_eq!(q.pop().unwrap().as_str(), "TEMP 20");
        assert_eq!(q.pop().unwrap().as_str(), "STATUS");
    }

    #[test]
    fn overlong_line_is_dropped() {
        let mut q = CommandQueue::new();
        let long = "X".repeat(MAX_LINE_LEN + 1);
        assert!(!q.push(&long));
        assert!(q.is_empty());
    }
}
