//! Low-level SPI register access for the BMP183.
//!
//! This module is crate-private; consumers use [`Bmp183`](super::Bmp183).

use embedded_hal_async::spi::{Operation, SpiDevice};

use super::registers::{READ_BIT, WRITE_MASK};

/// Register-level SPI access.
///
/// Each method is exactly one `SpiDevice` transaction, so on a shared bus
/// the bus lock is held for one register access at a time.
pub(crate) struct Bmp183Bus<SPI> {
    spi: SPI,
}

impl<SPI> Bmp183Bus<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Burst-read consecutive registers starting at `register`.
    pub async fn read_registers(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), SPI::Error> {
        self.spi
            .transaction(&mut [
                Operation::Write(&[register | READ_BIT]),
                Operation::Read(buffer),
            ])
            .await
    }

    /// Read a single register.
    pub async fn read_register(&mut self, register: u8) -> Result<u8, SPI::Error> {
        let mut buf = [0u8; 1];
        self.read_registers(register, &mut buf).await?;
        Ok(buf[0])
    }

    /// Write a single register.
    pub async fn write_register(&mut self, register: u8, value: u8) -> Result<(), SPI::Error> {
        self.spi.write(&[register & WRITE_MASK, value]).await
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}
