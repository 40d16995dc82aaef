//! Async driver for the FM Click (Silicon Labs Si4703 FM tuner).
//!
//! The Si4703 is controlled over I2C in 2-wire mode. It has no register
//! pointer, so the driver keeps a shadow copy of all sixteen registers:
//! reads refresh it starting at `0x0A`, writes push `0x02..=0x07` from it.
//!
//! # Quick start
//!
//! ```ignore
//! use click_fm::{Si4703, SeekDirection};
//!
//! let mut radio = Si4703::new(i2c_device, rst_pin, Delay, Default::default());
//! radio.init().await?;
//! radio.tune(10110).await?; // 101.1 MHz
//! if let Some(freq) = radio.seek(SeekDirection::Up).await? {
//!     defmt::info!("station at {}0 kHz, RSSI {}", freq, radio.rssi().await?);
//! }
//! ```
//!
//! `examples/station-scan` is a complete RP2350 program built on this crate.
//!
//! # Features
//!
//! - **`defmt`**: enable [`defmt::Format`] implementations and driver
//!   logging.

#![cfg_attr(not(test), no_std)]

pub use error::FmError;
pub use si4703::{
    channel_to_frequency, frequency_to_channel, Band, Config, DeEmphasis, SeekDirection, Si4703,
    Spacing,
};

mod driver;
mod error;
mod registers;
pub mod si4703;
