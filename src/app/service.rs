//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the climate controller, mode arbiter, blink
//! scheduler, menu state, and the debounced button filter. All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │          AppService           │
//! ActuatorPort ◀──│  Climate · Arbiter · Blink    │
//!                 └──────────────────────────────┘
//! ```

use core::fmt::Write as _;

use heapless::String;
use log::info;

use crate::config::SystemConfig;
use crate::control::arbiter::{ActuatorMode, ModeArbiter};
use crate::control::blink::BlinkScheduler;
use crate::control::climate::ClimateController;
use crate::drivers::button::DebouncedButton;
use crate::error::CommandError;

use super::commands::{self, Command};
use super::events::{AppEvent, StatusSnapshot};
use super::ports::{ActuatorPort, EventSink, MenuPage, SensorPort};

/// Human-readable command acknowledgment, bounded for heapless transports.
pub type Reply = String<160>;

/// Pot movement below this is treated as quantization noise, not a turn.
const POT_DEADBAND_C: f32 = 0.25;

/// The application service orchestrates all domain logic.
pub struct AppService {
    controller: ClimateController,
    arbiter: ModeArbiter,
    blink: BlinkScheduler,
    button: DebouncedButton,
    menu: MenuPage,
    /// Pot-override mapping range (the valid temperature-reference span).
    pot_range: (f32, f32),
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// `initial_button_level` seeds the debounce filter from the real pin
    /// so a button held at power-on does not register as a press.
    pub fn new(config: &SystemConfig, initial_button_level: bool, now_ms: u32) -> Self {
        Self {
            controller: ClimateController::new(config),
            arbiter: ModeArbiter::new(),
            blink: BlinkScheduler::new(config.blink_interval_ms),
            button: DebouncedButton::new(
                initial_button_level,
                now_ms,
                config.debounce_delay_ms,
                config.button_startup_guard_ms,
            ),
            menu: MenuPage::default(),
            pot_range: (config.temp_reference_min_c, config.temp_reference_max_c),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("AppService started");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: sample sensors → climate decision →
    /// actuators → button/menu.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit. The caller drains the command
    /// queue after this and refreshes the display last, so the display
    /// always shows this iteration's decisions.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
        now_ms: u32,
    ) {
        self.tick_count += 1;

        // 1. Sensor sample, if due. A failed read arrives as a reading
        //    with absent fields; the controller retains stale values.
        let reading = hw.sample(now_ms);
        if reading.is_some_and(|r| r.temperature_c.is_none() && r.humidity_pct.is_none()) {
            sink.emit(&AppEvent::SensorReadFailed);
        }

        // 2. Pot override: while the config page is showing, the knob
        //    drives the temperature reference directly.
        if self.menu == MenuPage::ConfigTemp {
            self.apply_pot_override(hw, sink);
        }

        // 3. Climate decision. Runs even when no sample is due so that
        //    mode changes take effect on the very next tick.
        let (state, events) = self.controller.tick(
            &reading.unwrap_or_default(),
            self.arbiter.vent_mode(),
            self.arbiter.irrigation_mode(),
        );
        for ev in &events {
            sink.emit(&AppEvent::Climate(*ev));
        }

        // 4. Actuators. The irrigation indicator follows the blink phase,
        //    which the scheduler forces off on the irrigation OFF edge.
        hw.set_ventilation(state.ventilation_on);
        let indicator = self.blink.tick(state.irrigation_on, now_ms);
        hw.set_irrigation_indicator(indicator);

        // 5. Button → menu cycling.
        let raw = hw.button_level();
        if self.button.poll(raw, now_ms).is_some() {
            self.menu = self.menu.next();
            info!("menu page -> {:?}", self.menu);
        }
    }

    /// Map the knob into the reference range and adopt it when it has
    /// actually moved. The mapped value is in range by construction, but
    /// the validated setter stays the only mutation path.
    fn apply_pot_override(
        &mut self,
        hw: &mut impl SensorPort,
        sink: &mut impl EventSink,
    ) {
        let (lo, hi) = self.pot_range;
        let Some(value) = hw.override_setpoint(lo, hi) else {
            return;
        };
        if (value - self.controller.setpoints().temp_reference_c).abs() < POT_DEADBAND_C {
            return;
        }
        if self.controller.set_temperature_reference(value).is_ok() {
            sink.emit(&AppEvent::SetpointChanged(self.controller.setpoints()));
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Parse and apply one command line, returning the acknowledgment
    /// string the transport should send back.
    pub fn handle_command(&mut self, line: &str, sink: &mut impl EventSink) -> Reply {
        match commands::parse(line) {
            Ok(cmd) => self.apply_command(cmd, sink),
            Err(e) => error_reply(e),
        }
    }

    fn apply_command(&mut self, cmd: Command, sink: &mut impl EventSink) -> Reply {
        let mut out = Reply::new();
        match cmd {
            Command::SetTemperature(value) => match self.controller.set_temperature_reference(value) {
                Ok(()) => {
                    sink.emit(&AppEvent::SetpointChanged(self.controller.setpoints()));
                    let _ = write!(out, "OK: temperature reference = {value:.1} C");
                }
                Err(e) => return error_reply(e),
            },
            Command::SetHumidityThreshold(value) => match self.controller.set_humidity_threshold(value) {
                Ok(()) => {
                    sink.emit(&AppEvent::SetpointChanged(self.controller.setpoints()));
                    let _ = write!(out, "OK: humidity threshold = {value}%");
                }
                Err(e) => return error_reply(e),
            },
            Command::VentManual(on) => {
                self.arbiter.set_vent_manual(on);
                let _ = write!(out, "OK: ventilation MANUAL {}", on_off(on));
            }
            Command::IrrigationManual(on) => {
                self.arbiter.set_irrigation_manual(on);
                let _ = write!(out, "OK: irrigation MANUAL {}", on_off(on));
            }
            Command::Auto => {
                let was_manual = self.arbiter.any_manual();
                self.arbiter.set_auto();
                let _ = if was_manual {
                    write!(out, "OK: automatic control resumed")
                } else {
                    write!(out, "OK: automatic control already active")
                };
            }
            Command::Status => return status_reply(&self.status()),
        }
        out
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the full control state. Never mutates.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            temperature_c: self.controller.temperature_c(),
            humidity_pct: self.controller.humidity_pct(),
            setpoints: self.controller.setpoints(),
            actuation: self.controller.actuation(),
            vent_mode: self.arbiter.vent_mode(),
            irrigation_mode: self.arbiter.irrigation_mode(),
        }
    }

    /// Currently-showing menu page (the display adapter renders it).
    pub fn menu_page(&self) -> MenuPage {
        self.menu
    }

    /// Irrigation indicator level as of the last tick.
    pub fn indicator_on(&self) -> bool {
        self.blink.is_on()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

// ── Reply formatting ──────────────────────────────────────────

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

fn mode_tag(mode: ActuatorMode) -> &'static str {
    if mode.is_manual() { "MANUAL" } else { "AUTO" }
}

fn error_reply(e: CommandError) -> Reply {
    let mut out = Reply::new();
    let _ = write!(out, "ERR: {e}");
    out
}

fn status_reply(s: &StatusSnapshot) -> Reply {
    let mut out = Reply::new();
    match s.temperature_c {
        Some(t) => {
            let _ = write!(out, "temp={t:.1}C ");
        }
        None => {
            let _ = write!(out, "temp=-- ");
        }
    }
    match s.humidity_pct {
        Some(h) => {
            let _ = write!(out, "hum={h:.1}% ");
        }
        None => {
            let _ = write!(out, "hum=-- ");
        }
    }
    let _ = write!(
        out,
        "ref={:.1}C thr={}% vent={}/{} irrigation={}/{}",
        s.setpoints.temp_reference_c,
        s.setpoints.humidity_threshold_pct,
        on_off(s.actuation.ventilation_on),
        mode_tag(s.vent_mode),
        on_off(s.actuation.irrigation_on),
        mode_tag(s.irrigation_mode),
    );
    out
}
