//! Low-level SSD1351 command/data framing.
//!
//! The D/C pin selects whether the bytes of the next SPI transaction are
//! a command (low) or data (high). Each write is its own transaction.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::SpiDevice;

use crate::error::OledError;

pub(crate) struct Interface<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> Interface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    pub(crate) fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Send `cmd`, then `args` as data if there are any.
    pub(crate) async fn command(
        &mut self,
        cmd: u8,
        args: &[u8],
    ) -> Result<(), OledError<SPI::Error, DC::Error>> {
        self.dc.set_low().map_err(OledError::Pin)?;
        self.spi.write(&[cmd]).await.map_err(OledError::Spi)?;
        if !args.is_empty() {
            self.data(args).await?;
        }
        Ok(())
    }

    pub(crate) async fn data(&mut self, bytes: &[u8]) -> Result<(), OledError<SPI::Error, DC::Error>> {
        self.dc.set_high().map_err(OledError::Pin)?;
        self.spi.write(bytes).await.map_err(OledError::Spi)
    }

    pub(crate) fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}
