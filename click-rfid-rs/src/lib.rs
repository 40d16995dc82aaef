//! Async driver for the RFID Click (ST CR95HF 13.56 MHz transceiver).
//!
//! The chip is used in SPI mode: every SPI transaction starts with a
//! control byte (send, reset, read or poll) and the chip is woken by a low
//! pulse on IRQ_IN.
//!
//! - [`Cr95hf`]: identification, protocol selection, RF field control and
//!   ISO 14443-A tag detection (REQA + cascade level 1 anticollision).
//! - [`TagPoller`]: a cancellable polling loop that reports each tag once
//!   while it stays in the field.
//!
//! # Quick start
//!
//! ```ignore
//! use click_rfid::{Cr95hf, TagPoller};
//! use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
//!
//! static STOP: Signal<CriticalSectionRawMutex, ()> = Signal::new();
//!
//! let mut reader = Cr95hf::new(spi_device, irq_in, Delay, Default::default());
//! let idn = reader.init().await?;
//!
//! let mut poller = TagPoller::new(reader, Default::default());
//! poller.run(&STOP, |uid| defmt::info!("tag {}", uid)).await?;
//! ```
//!
//! `examples/tag-logger` is a complete RP2350 program built on this crate.
//!
//! # Features
//!
//! - **`defmt`**: enable [`defmt::Format`] implementations and driver
//!   logging.

#![cfg_attr(not(test), no_std)]

pub use cr95hf::{Config, Cr95hf, Idn, Protocol, Uid};
pub use error::RfidError;
pub use poller::TagPoller;

pub mod cr95hf;
mod driver;
mod error;
pub mod poller;
mod registers;
