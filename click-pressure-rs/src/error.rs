//! Error types shared by the pressure sensor drivers.

use core::fmt;

/// Errors that can occur when talking to one of the pressure sensors.
#[derive(Debug, PartialEq, Eq)]
pub enum PressureError<E> {
    /// Underlying SPI or I2C bus error.
    Bus(E),

    /// The identity register did not hold the expected value.
    InvalidChipId(u8),

    /// Factory calibration data is unusable (all zeros, all ones, or a
    /// coefficient that would divide by zero).
    InvalidCalibration,

    /// A CRC-protected word failed its checksum.
    Crc,

    /// A ready flag never came up within the polling budget.
    Timeout,

    /// A measurement was requested before [`init()`] completed.
    ///
    /// [`init()`]: crate::Bmp183::init
    NotInitialized,
}

// Allow ergonomic `?` propagation from raw bus errors.
impl<E> From<E> for PressureError<E> {
    fn from(error: E) -> Self {
        PressureError::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for PressureError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PressureError::Bus(e) => write!(f, "bus error: {:?}", e),
            PressureError::InvalidChipId(id) => write!(f, "unexpected chip id 0x{:02X}", id),
            PressureError::InvalidCalibration => write!(f, "invalid calibration data"),
            PressureError::Crc => write!(f, "CRC mismatch"),
            PressureError::Timeout => write!(f, "measurement not ready in time"),
            PressureError::NotInitialized => write!(f, "sensor not initialised"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for PressureError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            PressureError::Bus(e) => defmt::write!(f, "Bus error: {}", e),
            PressureError::InvalidChipId(id) => defmt::write!(f, "Invalid chip id 0x{:02X}", id),
            PressureError::InvalidCalibration => defmt::write!(f, "Invalid calibration"),
            PressureError::Crc => defmt::write!(f, "CRC mismatch"),
            PressureError::Timeout => defmt::write!(f, "Timeout"),
            PressureError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}
