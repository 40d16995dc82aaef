//! Error type for the FM tuner driver.

use core::fmt;

/// Errors that can occur when talking to the Si4703.
#[derive(Debug, PartialEq, Eq)]
pub enum FmError<I2cE, PinE> {
    /// I2C bus error.
    I2c(I2cE),
    /// Reset pin error.
    Pin(PinE),
    /// The manufacturer id in `DEVICEID` was not `0x242`.
    InvalidDeviceId(u16),
    /// Volume above 15.
    InvalidVolume(u8),
    /// Frequency (in 10 kHz units) outside the band or off the channel
    /// grid.
    InvalidFrequency(u16),
    /// Seek/tune complete never came up.
    Timeout,
    /// A tuner operation was requested before [`init()`] completed.
    ///
    /// [`init()`]: crate::Si4703::init
    NotInitialized,
}

impl<I2cE: fmt::Debug, PinE: fmt::Debug> fmt::Display for FmError<I2cE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FmError::I2c(e) => write!(f, "I2C error: {:?}", e),
            FmError::Pin(e) => write!(f, "pin error: {:?}", e),
            FmError::InvalidDeviceId(id) => write!(f, "unexpected device id 0x{:04X}", id),
            FmError::InvalidVolume(v) => write!(f, "volume {} out of range (0-15)", v),
            FmError::InvalidFrequency(freq) => write!(f, "frequency {}0 kHz not on the band", freq),
            FmError::Timeout => write!(f, "tune or seek did not complete"),
            FmError::NotInitialized => write!(f, "tuner not initialised"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<I2cE: defmt::Format, PinE: defmt::Format> defmt::Format for FmError<I2cE, PinE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            FmError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            FmError::Pin(e) => defmt::write!(f, "Pin error: {}", e),
            FmError::InvalidDeviceId(id) => defmt::write!(f, "Invalid device id 0x{:04X}", id),
            FmError::InvalidVolume(v) => defmt::write!(f, "Invalid volume {}", v),
            FmError::InvalidFrequency(freq) => defmt::write!(f, "Invalid frequency {}0 kHz", freq),
            FmError::Timeout => defmt::write!(f, "Timeout"),
            FmError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}
