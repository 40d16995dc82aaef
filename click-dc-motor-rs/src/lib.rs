//! Async driver for the DC Motor Click (TI DRV8833 H-bridge).
//!
//! One brushed DC motor is driven from a PWM output, two select lines that
//! route the PWM to the bridge inputs, an active-low sleep line and the
//! active-low fault output.
//!
//! # Quick start
//!
//! ```ignore
//! use click_dc_motor::{DcMotor, Direction};
//!
//! let mut motor = DcMotor::new(pwm, sel1, sel2, nsleep, nfault, Delay);
//! motor.init().await?;
//! motor.drive(Direction::Clockwise, 60)?;
//! Timer::after_secs(2).await;
//! motor.brake()?;
//! motor.sleep()?;
//! ```
//!
//! `examples/ramp` is a complete RP2350 program built on this crate.
//!
//! # Features
//!
//! - **`defmt`**: enable [`defmt::Format`] implementations and driver
//!   logging.

#![cfg_attr(not(test), no_std)]

pub use dc_motor::{DcMotor, Direction, State, MAX_SPEED};
pub use error::MotorError;

mod dc_motor;
mod error;
