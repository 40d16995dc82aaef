//! Async drivers for the thermocouple and One-Wire thermometer Clicks.
//!
//! - [`Max31855`]: K-type thermocouple converter on the Thermo Click.
//!   Read-only SPI; every read returns the thermocouple and cold-junction
//!   temperatures, or the fault the converter detected.
//! - [`Ds1825`]: 9 to 12 bit One-Wire thermometer on the Thermo 2 Click,
//!   talked to through the [`OneWire`] trait. [`BitBangOneWire`] provides
//!   that trait on a single open-drain GPIO.
//!
//! # Quick start
//!
//! ```ignore
//! use click_thermo::{BitBangOneWire, Ds1825, ds1825::{Config, Resolution}};
//!
//! let wire = BitBangOneWire::new(dq_pin, Delay);
//! let mut sensor = Ds1825::new(wire, Delay, Config { resolution: Resolution::Bits11 });
//! sensor.init().await?;
//! let celsius = sensor.read_temperature().await?;
//! ```
//!
//! `examples/thermocouple-log` is a complete RP2350 program built on this crate.
//!
//! # Features
//!
//! - **`defmt`**: enable [`defmt::Format`] implementations and driver
//!   logging.

#![cfg_attr(not(test), no_std)]

pub use ds1825::Ds1825;
pub use error::{Fault, ThermoError};
pub use max31855::{Max31855, Reading};
pub use onewire::{crc8, BitBangOneWire, OneWire};

pub mod ds1825;
mod error;
pub mod max31855;
pub mod onewire;
mod registers;
