//! Invernadero firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter   LogEventSink   SerialConsole          │
//! │  (Sensor+Actuator) (EventSink)    (command transport)    │
//! │  SerialDisplay     MonotonicClock                        │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  Climate · ModeArbiter · Blink · Debounce      │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! One cooperative polling loop: sensor/climate tick, then queued
//! commands, then the display refresh last so the screen always shows
//! this iteration's decisions. The only suspension point is the idle
//! delay at the bottom of the loop.
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use invernadero::adapters::console::SerialConsole;
use invernadero::adapters::display::SerialDisplay;
use invernadero::adapters::hardware::HardwareAdapter;
use invernadero::adapters::log_sink::LogEventSink;
use invernadero::adapters::time::MonotonicClock;
use invernadero::app::commands::CommandQueue;
use invernadero::app::ports::{ActuatorPort, DisplayPort};
use invernadero::app::service::AppService;
use invernadero::config::SystemConfig;
use invernadero::drivers::hw_init;
use invernadero::sensors::SensorHub;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Invernadero v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let config = SystemConfig::default();
    let clock = MonotonicClock::new();

    // ── 3. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(SensorHub::new(&config));
    let mut sink = LogEventSink::new();
    let mut console = SerialConsole::new().map_err(|e| anyhow::anyhow!("{e}"))?;
    let mut display = SerialDisplay::new(config.display_refresh_interval_ms);
    let mut queue = CommandQueue::new();

    // ── 4. App service ────────────────────────────────────────
    // The debounce filter is seeded from the real pin so a button held
    // at power-on does not register as a press.
    let initial_button = hw.button_level();
    let mut app = AppService::new(&config, initial_button, clock.now_ms());
    app.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        let now_ms = clock.now_ms();

        // Climate decision, actuators, button/menu.
        app.tick(&mut hw, &mut sink, now_ms);

        // Enqueue any complete console line, then drain the queue so
        // every command is applied at this single point in the loop.
        while let Some(line) = console.poll_line() {
            if !queue.push(&line) {
                console.write_reply("ERR: command queue full");
            }
        }
        while let Some(line) = queue.pop() {
            let reply = app.handle_command(&line, &mut sink);
            console.write_reply(&reply);
        }

        // Display refresh is deliberately last: it must reflect this
        // iteration's decisions and menu state.
        display.set_now(now_ms);
        display.refresh(app.menu_page(), &app.status());

        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.loop_idle_delay_ms,
        )));
    }
}
