//! Property tests for the control core invariants.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets. On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use invernadero::config::SystemConfig;
use invernadero::control::arbiter::ActuatorMode;
use invernadero::control::blink::BlinkScheduler;
use invernadero::control::climate::{ClimateController, ClimateReading};
use invernadero::drivers::button::DebouncedButton;
use proptest::prelude::*;

const AUTO: ActuatorMode = ActuatorMode::Automatic;

fn reading(temperature_c: f32, humidity_pct: f32) -> ClimateReading {
    ClimateReading {
        temperature_c: Some(temperature_c),
        humidity_pct: Some(humidity_pct),
    }
}

// ── Hysteresis invariants ─────────────────────────────────────

proptest! {
    /// Ventilation only changes state when the temperature crosses
    /// `reference ± hysteresis`; inside the dead band it always equals
    /// its prior value.
    #[test]
    fn vent_changes_only_outside_dead_band(
        temps in proptest::collection::vec(0.0f32..=60.0, 1..=50),
    ) {
        let config = SystemConfig::default();
        let mut c = ClimateController::new(&config);
        let hi = config.temp_reference_c + config.vent_hysteresis_c;
        let lo = config.temp_reference_c - config.vent_hysteresis_c;

        let mut prev = false;
        for t in temps {
            let (state, _) = c.tick(&reading(t, 55.0), AUTO, AUTO);
            if t > hi {
                prop_assert!(state.ventilation_on, "above band at {t}");
            } else if t < lo {
                prop_assert!(!state.ventilation_on, "below band at {t}");
            } else {
                prop_assert_eq!(
                    state.ventilation_on, prev,
                    "dead band must hold prior state at {}", t
                );
            }
            prev = state.ventilation_on;
        }
    }

    /// Under automatic control, irrigation is exactly
    /// `humidity < threshold` — no hysteresis, no history.
    #[test]
    fn irrigation_equals_threshold_comparison(
        hums in proptest::collection::vec(0.0f32..=100.0, 1..=50),
    ) {
        let config = SystemConfig::default();
        let mut c = ClimateController::new(&config);
        let threshold = f32::from(config.humidity_threshold_pct);

        for h in hums {
            let (state, _) = c.tick(&reading(20.0, h), AUTO, AUTO);
            prop_assert_eq!(state.irrigation_on, h < threshold);
        }
    }

    /// Edge events and actuation state never disagree: an event is
    /// emitted exactly when the corresponding output changed.
    #[test]
    fn events_fire_exactly_on_edges(
        samples in proptest::collection::vec((0.0f32..=60.0, 0.0f32..=100.0), 1..=50),
    ) {
        let mut c = ClimateController::new(&SystemConfig::default());
        let mut prev = c.actuation();
        for (t, h) in samples {
            let (state, events) = c.tick(&reading(t, h), AUTO, AUTO);
            let expected =
                usize::from(state.ventilation_on != prev.ventilation_on)
                    + usize::from(state.irrigation_on != prev.irrigation_on);
            prop_assert_eq!(events.len(), expected);
            prev = state;
        }
    }
}

// ── Manual mode invariants ────────────────────────────────────

proptest! {
    /// While an actuator is manual, arbitrary readings never influence
    /// it; ON then OFF is exactly two state changes.
    #[test]
    fn manual_is_immune_to_readings(
        samples in proptest::collection::vec((0.0f32..=60.0, 0.0f32..=100.0), 2..=30),
    ) {
        let mut c = ClimateController::new(&SystemConfig::default());
        let mut changes = 0;
        let mut prev = c.actuation().irrigation_on;

        let half = samples.len() / 2;
        for (i, (t, h)) in samples.iter().enumerate() {
            let mode = if i < half {
                ActuatorMode::Manual(true)
            } else {
                ActuatorMode::Manual(false)
            };
            let (state, _) = c.tick(&reading(*t, *h), AUTO, mode);
            prop_assert_eq!(state.irrigation_on, i < half);
            if state.irrigation_on != prev {
                changes += 1;
            }
            prev = state.irrigation_on;
        }
        prop_assert_eq!(changes, 2, "exactly ON then OFF");
    }
}

// ── Blink invariants ──────────────────────────────────────────

proptest! {
    /// Whenever irrigation is off, the indicator is off — regardless of
    /// the on/off pattern or poll timing that came before.
    #[test]
    fn indicator_never_outlives_irrigation(
        pattern in proptest::collection::vec((any::<bool>(), 1u32..=200), 1..=100),
    ) {
        let mut blink = BlinkScheduler::new(500);
        let mut now: u32 = 0;
        for (irrigation_on, dt) in pattern {
            now = now.wrapping_add(dt);
            let level = blink.tick(irrigation_on, now);
            if !irrigation_on {
                prop_assert!(!level);
                prop_assert!(!blink.is_on());
            }
        }
    }
}

// ── Debounce invariants ───────────────────────────────────────

proptest! {
    /// A burst of chatter inside the debounce window followed by a
    /// settled press yields exactly one activation event.
    #[test]
    fn chatter_then_press_is_one_event(
        dts in proptest::collection::vec(1u32..=10, 0..=20),
    ) {
        let mut btn = DebouncedButton::new(true, 0, 50, 300);
        let mut now: u32 = 400; // past the startup guard
        let mut events = 0;

        // Alternating contact chatter: every sample flips the raw level,
        // so the settle timer re-arms each poll and nothing commits.
        let mut level = false;
        for dt in dts {
            now += dt;
            if btn.poll(level, now).is_some() {
                events += 1;
            }
            level = !level;
        }
        prop_assert_eq!(events, 0, "chatter must not commit");

        // Settle pressed for well over the window.
        now += 1;
        let _ = btn.poll(false, now);
        for _ in 0..10 {
            now += 20;
            if btn.poll(false, now).is_some() {
                events += 1;
            }
        }
        prop_assert_eq!(events, 1, "one settled press, one event");
    }
}
