//! Error types for the thermocouple and One-Wire temperature drivers.

use core::fmt;

/// Thermocouple fault reported by the MAX31855.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// No thermocouple connected.
    OpenCircuit,
    /// Thermocouple shorted to GND.
    ShortToGround,
    /// Thermocouple shorted to VCC.
    ShortToVcc,
}

/// Errors that can occur when reading one of the temperature sensors.
#[derive(Debug, PartialEq, Eq)]
pub enum ThermoError<E> {
    /// Underlying SPI or One-Wire bus error.
    Bus(E),
    /// The MAX31855 flagged a thermocouple fault.
    Fault(Fault),
    /// No presence pulse after a One-Wire reset.
    NoDevice,
    /// The ROM family code is not the DS1825's `0x3B`.
    WrongFamily(u8),
    /// ROM or scratchpad CRC mismatch.
    Crc,
}

impl<E> From<E> for ThermoError<E> {
    fn from(error: E) -> Self {
        ThermoError::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for ThermoError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ThermoError::Bus(e) => write!(f, "bus error: {:?}", e),
            ThermoError::Fault(fault) => write!(f, "thermocouple fault: {:?}", fault),
            ThermoError::NoDevice => write!(f, "no One-Wire device present"),
            ThermoError::WrongFamily(code) => write!(f, "unexpected family code 0x{:02X}", code),
            ThermoError::Crc => write!(f, "CRC mismatch"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for ThermoError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ThermoError::Bus(e) => defmt::write!(f, "Bus error: {}", e),
            ThermoError::Fault(fault) => defmt::write!(f, "Thermocouple fault: {}", fault),
            ThermoError::NoDevice => defmt::write!(f, "No device"),
            ThermoError::WrongFamily(code) => defmt::write!(f, "Wrong family 0x{:02X}", code),
            ThermoError::Crc => defmt::write!(f, "CRC mismatch"),
        }
    }
}
