//! Error type for the DC motor driver.

use core::fmt;

/// Errors that can occur when driving the motor.
#[derive(Debug, PartialEq, Eq)]
pub enum MotorError<PwmE, PinE> {
    /// The PWM peripheral rejected a duty cycle.
    Pwm(PwmE),
    /// A select, sleep or fault pin failed.
    Pin(PinE),
    /// Speed above 100 %.
    InvalidSpeed(u8),
}

impl<PwmE: fmt::Debug, PinE: fmt::Debug> fmt::Display for MotorError<PwmE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MotorError::Pwm(e) => write!(f, "PWM error: {:?}", e),
            MotorError::Pin(e) => write!(f, "pin error: {:?}", e),
            MotorError::InvalidSpeed(s) => write!(f, "speed {}% out of range (0-100)", s),
        }
    }
}

#[cfg(feature = "defmt")]
impl<PwmE: defmt::Format, PinE: defmt::Format> defmt::Format for MotorError<PwmE, PinE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            MotorError::Pwm(e) => defmt::write!(f, "PWM error: {}", e),
            MotorError::Pin(e) => defmt::write!(f, "Pin error: {}", e),
            MotorError::InvalidSpeed(s) => defmt::write!(f, "Invalid speed {}%", s),
        }
    }
}
