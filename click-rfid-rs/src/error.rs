//! Error type for the CR95HF driver.

use core::fmt;

/// Errors that can occur when talking to the CR95HF.
#[derive(Debug, PartialEq, Eq)]
pub enum RfidError<SpiE, PinE> {
    /// SPI bus error.
    Spi(SpiE),
    /// IRQ_IN pin error.
    Pin(PinE),
    /// The echo command came back as something other than `0x55`.
    EchoMismatch(u8),
    /// The chip answered a command with an error result code.
    Command(u8),
    /// A reply was shorter or longer than its command allows.
    Frame,
    /// The UID check byte did not match the XOR of the UID.
    Bcc,
    /// No reply within the polling budget.
    Timeout,
    /// A tag operation was requested before [`init()`] completed.
    ///
    /// [`init()`]: crate::Cr95hf::init
    NotInitialized,
}

impl<SpiE, PinE> RfidError<SpiE, PinE> {
    /// `true` for bus and pin failures, `false` for protocol-level errors
    /// that a retry can clear.
    pub fn is_transport(&self) -> bool {
        matches!(self, RfidError::Spi(_) | RfidError::Pin(_))
    }
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for RfidError<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RfidError::Spi(e) => write!(f, "SPI error: {:?}", e),
            RfidError::Pin(e) => write!(f, "pin error: {:?}", e),
            RfidError::EchoMismatch(b) => write!(f, "echo returned 0x{:02X}", b),
            RfidError::Command(code) => write!(f, "command failed with code 0x{:02X}", code),
            RfidError::Frame => write!(f, "malformed reply"),
            RfidError::Bcc => write!(f, "UID check byte mismatch"),
            RfidError::Timeout => write!(f, "no reply in time"),
            RfidError::NotInitialized => write!(f, "reader not initialised"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<SpiE: defmt::Format, PinE: defmt::Format> defmt::Format for RfidError<SpiE, PinE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RfidError::Spi(e) => defmt::write!(f, "SPI error: {}", e),
            RfidError::Pin(e) => defmt::write!(f, "Pin error: {}", e),
            RfidError::EchoMismatch(b) => defmt::write!(f, "Echo mismatch 0x{:02X}", b),
            RfidError::Command(code) => defmt::write!(f, "Command error 0x{:02X}", code),
            RfidError::Frame => defmt::write!(f, "Malformed reply"),
            RfidError::Bcc => defmt::write!(f, "BCC mismatch"),
            RfidError::Timeout => defmt::write!(f, "Timeout"),
            RfidError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}
