//! Error type for the buzzer driver.

use core::fmt;

/// Errors that can occur when driving the buzzer.
#[derive(Debug, PartialEq, Eq)]
pub enum BuzzError<E> {
    /// The PWM peripheral rejected a duty cycle or frequency.
    Pwm(E),
    /// Volume above 100 %.
    InvalidVolume(u8),
}

impl<E> From<E> for BuzzError<E> {
    fn from(error: E) -> Self {
        BuzzError::Pwm(error)
    }
}

impl<E: fmt::Debug> fmt::Display for BuzzError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuzzError::Pwm(e) => write!(f, "PWM error: {:?}", e),
            BuzzError::InvalidVolume(v) => write!(f, "volume {}% out of range (0-100)", v),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for BuzzError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            BuzzError::Pwm(e) => defmt::write!(f, "PWM error: {}", e),
            BuzzError::InvalidVolume(v) => defmt::write!(f, "Invalid volume {}%", v),
        }
    }
}
