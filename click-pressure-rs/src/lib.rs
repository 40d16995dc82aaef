//! Async drivers for the pressure Click boards.
//!
//! Three sensors are supported, each in its own module:
//!
//! - [`bmp183`]: Bosch BMP183 over SPI, integer compensation.
//! - [`dps422`]: Infineon DPS422 over I2C, PTAT-corrected floating point.
//! - [`icp10100`]: TDK ICP-10100 over I2C, three-point calibration.
//!
//! Every driver owns its calibration data and must be initialised with an
//! explicit `init()` call before measuring.
//!
//! # Quick Start
//!
//! ```ignore
//! use click_pressure::dps422::{Config, Dps422, DEFAULT_ADDRESS};
//!
//! let mut sensor = Dps422::new(i2c, DEFAULT_ADDRESS, Delay, Config::default());
//! sensor.init().await?;
//! let m = sensor.measure().await?;
//! defmt::info!("{} Pa at {} °C", m.pressure_pa, m.temperature_c);
//! ```
//!
//! `examples/barometer` is a complete RP2350 program built on this crate.
//!
//! Several drivers can share one bus through
//! `embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice`; each
//! register access is a single bus transaction.
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging and `defmt::Format` for the public
//!   types.

#![cfg_attr(not(test), no_std)]

pub mod bmp183;
pub mod dps422;
mod error;
pub mod icp10100;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use bmp183::Bmp183;
pub use dps422::Dps422;
pub use error::PressureError;
pub use icp10100::Icp10100;
