//! DHT22 (AM2302) combined temperature/humidity sensor.
//!
//! Single-wire protocol: the host pulls the data line low for >1 ms to
//! request a reading, then the sensor clocks out 40 bits (16-bit humidity,
//! 16-bit temperature, 8-bit checksum) using pulse-width encoding. The
//! datasheet caps the sample rate at one reading every 2 s; SensorHub
//! enforces that interval, this driver just performs one transaction.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the open-drain line configured by hw_init, with
//! interrupts left enabled — the timing margins tolerate the occasional
//! tick. On host/test: reads injected values from statics, including a
//! forced-failure flag for stale-value tests.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhtReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0x41C8_0000); // 25.0
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_BITS: AtomicU32 = AtomicU32::new(0x4248_0000); // 50.0
#[cfg(not(target_os = "espidf"))]
static SIM_FAIL: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_reading(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_BITS.store(temperature_c.to_bits(), Ordering::Relaxed);
    SIM_HUM_BITS.store(humidity_pct.to_bits(), Ordering::Relaxed);
    SIM_FAIL.store(false, Ordering::Relaxed);
}

/// Make every subsequent read fail with a timeout, until the next
/// `sim_set_reading` call.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_failing() {
    SIM_FAIL.store(true, Ordering::Relaxed);
}

pub struct Dht22 {
    gpio: i32,
}

impl Dht22 {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> Result<DhtReading, SensorError> {
        let _ = self.gpio;
        if SIM_FAIL.load(Ordering::Relaxed) {
            return Err(SensorError::Timeout);
        }
        Ok(DhtReading {
            temperature_c: f32::from_bits(SIM_TEMP_BITS.load(Ordering::Relaxed)),
            humidity_pct: f32::from_bits(SIM_HUM_BITS.load(Ordering::Relaxed)),
        })
    }

    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> Result<DhtReading, SensorError> {
        let bytes = self.transact()?;

        let sum = bytes[0]
            .wrapping_add(bytes[1])
            .wrapping_add(bytes[2])
            .wrapping_add(bytes[3]);
        if sum != bytes[4] {
            return Err(SensorError::ChecksumMismatch);
        }

        let hum_raw = u16::from_be_bytes([bytes[0], bytes[1]]);
        let temp_raw = u16::from_be_bytes([bytes[2], bytes[3]]);

        let humidity_pct = f32::from(hum_raw) / 10.0;
        // Bit 15 of the temperature word is the sign flag.
        let temperature_c = if temp_raw & 0x8000 != 0 {
            -f32::from(temp_raw & 0x7FFF) / 10.0
        } else {
            f32::from(temp_raw) / 10.0
        };

        if !(0.0..=100.0).contains(&humidity_pct) || !(-40.0..=80.0).contains(&temperature_c) {
            return Err(SensorError::OutOfRange);
        }

        Ok(DhtReading {
            temperature_c,
            humidity_pct,
        })
    }

    /// Runs one wire transaction and returns the 5 raw payload bytes.
    #[cfg(target_os = "espidf")]
    fn transact(&mut self) -> Result<[u8; 5], SensorError> {
        use esp_idf_svc::sys::ets_delay_us;

        // Start signal: pull low >1 ms, release, sensor answers with an
        // 80 us low + 80 us high presence pulse.
        hw_init::gpio_write(self.gpio, false);
        // SAFETY: busy-wait delay, no memory access.
        unsafe { ets_delay_us(1100) };
        hw_init::gpio_write(self.gpio, true);

        self.wait_level(false, 60)?;
        self.wait_level(true, 100)?;
        self.wait_level(false, 100)?;

        let mut bytes = [0u8; 5];
        for byte in &mut bytes {
            for _ in 0..8 {
                // Each bit: ~50 us low preamble, then a high whose width
                // encodes the value (26-28 us = 0, ~70 us = 1).
                self.wait_level(true, 80)?;
                let high_us = self.measure_high(100)?;
                *byte = (*byte << 1) | u8::from(high_us > 45);
            }
        }
        Ok(bytes)
    }

    /// Busy-waits until the line reaches `level`, erroring after `timeout_us`.
    #[cfg(target_os = "espidf")]
    fn wait_level(&self, level: bool, timeout_us: u32) -> Result<(), SensorError> {
        use esp_idf_svc::sys::ets_delay_us;

        for _ in 0..timeout_us {
            if hw_init::gpio_read(self.gpio) == level {
                return Ok(());
            }
            // SAFETY: busy-wait delay, no memory access.
            unsafe { ets_delay_us(1) };
        }
        Err(SensorError::Timeout)
    }

    /// Measures how long the line stays high, in microseconds.
    #[cfg(target_os = "espidf")]
    fn measure_high(&self, timeout_us: u32) -> Result<u32, SensorError> {
        use esp_idf_svc::sys::ets_delay_us;

        for elapsed in 0..timeout_us {
            if !hw_init::gpio_read(self.gpio) {
                return Ok(elapsed);
            }
            // SAFETY: busy-wait delay, no memory access.
            unsafe { ets_delay_us(1) };
        }
        Err(SensorError::Timeout)
    }
}
