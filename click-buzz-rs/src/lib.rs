//! Piezo buzzer driver for the BUZZ Click.
//!
//! The buzzer is a plain piezo transducer on one PWM output: the PWM
//! frequency sets the pitch and the duty cycle sets the loudness.
//!
//! - [`Buzzer`]: single tones with a volume in percent.
//! - [`MelodyPlayer`]: plays a `&[Note]` sequence and can be cancelled at
//!   any point through an [`embassy_sync::signal::Signal`].
//! - [`notes`]: equal-tempered note frequencies.
//!
//! # Quick start
//!
//! ```ignore
//! use click_buzz::{notes::*, Buzzer, MelodyPlayer, Note, PlaybackEnd};
//! use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
//! use embassy_time::Duration;
//!
//! static STOP: Signal<CriticalSectionRawMutex, ()> = Signal::new();
//!
//! const BEEP: [Note; 2] = [
//!     Note::new(C5, Duration::from_millis(150)),
//!     Note::new(G5, Duration::from_millis(300)),
//! ];
//!
//! #[embassy_executor::task]
//! async fn buzz_task(mut buzzer: Buzzer<BoardPwm, Delay>) {
//!     let player = MelodyPlayer::new(Default::default());
//!     match player.run(&mut buzzer, &BEEP, &STOP).await {
//!         Ok(PlaybackEnd::Finished) => {}
//!         Ok(PlaybackEnd::Stopped) => defmt::info!("cut short"),
//!         Err(e) => defmt::error!("buzzer: {}", e),
//!     }
//! }
//! ```
//!
//! `examples/doorbell` is a complete RP2350 program built on this crate.
//!
//! # Features
//!
//! - **`defmt`**: enable [`defmt::Format`] implementations and driver
//!   logging.

#![cfg_attr(not(test), no_std)]

pub use buzzer::{Buzzer, PwmTone, MAX_VOLUME};
pub use error::BuzzError;
pub use melody::{Config, MelodyPlayer, Note, PlaybackEnd};

mod buzzer;
mod error;
pub mod melody;
pub mod notes;
