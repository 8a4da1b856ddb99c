//! Serial status display adapter.
//!
//! Rendering proper (OLED layout, fonts) is out of scope for the control
//! core; this adapter implements [`DisplayPort`] by printing the current
//! menu page to the log, which is enough to exercise the page cycle and
//! the end-of-iteration refresh ordering. An SSD1306 adapter would
//! implement the same trait against the I2C bus.
//!
//! Refreshes are rate-limited here rather than in the core: the adapter
//! owns the notion of "how often is re-rendering worth it".

use core::fmt::Write as _;

use heapless::String;
use log::info;

use crate::app::events::StatusSnapshot;
use crate::app::ports::{DisplayPort, MenuPage};

pub struct SerialDisplay {
    refresh_interval_ms: u32,
    last_refresh_ms: Option<u32>,
    now_ms: u32,
}

impl SerialDisplay {
    pub fn new(refresh_interval_ms: u32) -> Self {
        Self {
            refresh_interval_ms,
            last_refresh_ms: None,
            now_ms: 0,
        }
    }

    /// Advance the adapter's clock; `refresh()` draws only when the
    /// configured interval has elapsed since the last draw.
    pub fn set_now(&mut self, now_ms: u32) {
        self.now_ms = now_ms;
    }

    fn due(&self) -> bool {
        match self.last_refresh_ms {
            None => true,
            Some(last) => self.now_ms.wrapping_sub(last) >= self.refresh_interval_ms,
        }
    }
}

fn fmt_opt(value: Option<f32>, unit: &str, out: &mut String<96>) {
    match value {
        Some(v) => {
            let _ = write!(out, "{v:.1}{unit}");
        }
        None => {
            let _ = write!(out, "--");
        }
    }
}

impl DisplayPort for SerialDisplay {
    fn refresh(&mut self, page: MenuPage, status: &StatusSnapshot) {
        if !self.due() {
            return;
        }
        self.last_refresh_ms = Some(self.now_ms);

        let mut line: String<96> = String::new();
        match page {
            MenuPage::Overview => {
                let _ = write!(line, "T=");
                fmt_opt(status.temperature_c, "C", &mut line);
                let _ = write!(line, " H=");
                fmt_opt(status.humidity_pct, "%", &mut line);
            }
            MenuPage::Temperature => {
                let _ = write!(line, "Temperatura: ");
                fmt_opt(status.temperature_c, "C", &mut line);
            }
            MenuPage::Humidity => {
                let _ = write!(line, "Humedad: ");
                fmt_opt(status.humidity_pct, "%", &mut line);
            }
            MenuPage::ConfigTemp => {
                let _ = write!(line, "Ref temp: {:.1}C", status.setpoints.temp_reference_c);
            }
            MenuPage::ConfigHum => {
                let _ = write!(
                    line,
                    "Umbral hum: {}%",
                    status.setpoints.humidity_threshold_pct
                );
            }
            MenuPage::Ventilation => {
                let _ = write!(
                    line,
                    "Ventilacion: {}",
                    if status.actuation.ventilation_on { "ON" } else { "OFF" }
                );
            }
            MenuPage::Irrigation => {
                let _ = write!(
                    line,
                    "Riego: {}",
                    if status.actuation.irrigation_on { "ON" } else { "OFF" }
                );
            }
            MenuPage::Mode => {
                let manual =
                    status.vent_mode.is_manual() || status.irrigation_mode.is_manual();
                let _ = write!(line, "Modo: {}", if manual { "MANUAL" } else { "AUTO" });
            }
        }
        info!("DISPLAY | {}", line);
    }
}
