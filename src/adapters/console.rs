//! Serial console command transport.
//!
//! Polls UART0 for complete command lines without ever blocking the
//! control loop: bytes are accumulated across iterations and a line is
//! handed out only once a terminator arrives. Echoing and prompt
//! niceties are deliberately absent — this is a machine-friendly surface
//! that a chat-bot bridge could drive with the same verbs.
//!
//! On non-espidf targets the console never produces input; host tests
//! feed command lines to the service directly.

use heapless::String;

use crate::app::commands::MAX_LINE_LEN;
#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::Result;

#[cfg(target_os = "espidf")]
const UART_PORT: i32 = 0;

pub struct SerialConsole {
    #[cfg(target_os = "espidf")]
    buf: String<MAX_LINE_LEN>,
    /// Set while skipping the tail of an oversized line.
    #[cfg(target_os = "espidf")]
    discarding: bool,
}

impl SerialConsole {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self> {
        // SAFETY: driver install happens once at boot, before the loop.
        let ret = unsafe {
            esp_idf_svc::sys::uart_driver_install(UART_PORT, 256, 0, 0, core::ptr::null_mut(), 0)
        };
        if ret != esp_idf_svc::sys::ESP_OK as i32 {
            return Err(Error::Init("uart driver install failed"));
        }
        Ok(Self {
            buf: String::new(),
            discarding: false,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self> {
        Ok(Self {})
    }

    /// Drain any pending bytes; returns a complete line when one is ready.
    ///
    /// Oversized lines are discarded up to the next terminator rather
    /// than truncated into a different (possibly valid) command.
    #[cfg(target_os = "espidf")]
    pub fn poll_line(&mut self) -> Option<String<MAX_LINE_LEN>> {
        let mut byte = 0u8;
        loop {
            // SAFETY: reading a single byte with zero timeout; the driver
            // was installed in new().
            let n = unsafe {
                esp_idf_svc::sys::uart_read_bytes(
                    UART_PORT,
                    core::ptr::from_mut(&mut byte).cast(),
                    1,
                    0,
                )
            };
            if n <= 0 {
                return None;
            }
            match byte {
                b'\r' | b'\n' => {
                    let was_discarding = self.discarding;
                    self.discarding = false;
                    if was_discarding || self.buf.is_empty() {
                        continue;
                    }
                    let line = self.buf.clone();
                    self.buf.clear();
                    return Some(line);
                }
                _ if self.discarding => {}
                _ => {
                    if self.buf.push(byte as char).is_err() {
                        self.buf.clear();
                        self.discarding = true;
                    }
                }
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn poll_line(&mut self) -> Option<String<MAX_LINE_LEN>> {
        None
    }

    /// Write a command reply back to the transport.
    pub fn write_reply(&mut self, reply: &str) {
        // The logger already owns the UART; replies go through it so the
        // two output streams do not interleave mid-line.
        log::info!("REPLY | {}", reply);
    }
}
