//! MAX31855 cold-junction compensated thermocouple converter (read-only SPI).

use embedded_hal_async::spi::SpiDevice;

use crate::error::{Fault, ThermoError};
use crate::registers::*;

/// One decoded conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Compensated thermocouple temperature.
    pub thermocouple_c: f32,
    /// Cold-junction (die) temperature.
    pub internal_c: f32,
}

fn sign_extend(value: u32, bits: u32) -> i32 {
    ((value << (32 - bits)) as i32) >> (32 - bits)
}

/// Decode a raw 32-bit frame.
pub fn decode(frame: u32) -> Result<Reading, Fault> {
    if frame & FAULT != 0 {
        let fault = if frame & FAULT_SCG != 0 {
            Fault::ShortToGround
        } else if frame & FAULT_SCV != 0 {
            Fault::ShortToVcc
        } else {
            Fault::OpenCircuit
        };
        return Err(fault);
    }

    let tc = sign_extend(frame >> TC_SHIFT, TC_BITS);
    let internal = sign_extend((frame >> INTERNAL_SHIFT) & ((1 << INTERNAL_BITS) - 1), INTERNAL_BITS);
    Ok(Reading {
        thermocouple_c: tc as f32 * TC_LSB_C,
        internal_c: internal as f32 * INTERNAL_LSB_C,
    })
}

/// Driver for the MAX31855 on the Thermo Click.
pub struct Max31855<SPI> {
    spi: SPI,
}

impl<SPI> Max31855<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Clock out the 32-bit frame as-is.
    pub async fn read_raw(&mut self) -> Result<u32, ThermoError<SPI::Error>> {
        let mut buf = [0u8; 4];
        self.spi.read(&mut buf).await?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Read and decode one conversion.
    ///
    /// # Errors
    ///
    /// [`ThermoError::Fault`] if the converter reports an open or shorted
    /// thermocouple.
    pub async fn read(&mut self) -> Result<Reading, ThermoError<SPI::Error>> {
        let frame = self.read_raw().await?;
        decode(frame).map_err(|fault| {
            #[cfg(feature = "defmt")]
            defmt::warn!("MAX31855 fault: {}", fault);
            ThermoError::Fault(fault)
        })
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}
