//! Low-level command transport for the ICP-10100.
//!
//! This module is crate-private.

use embedded_hal_async::i2c::I2c;

use super::commands::ADDRESS;

/// Command-oriented I2C access. Writes and reads are separate
/// transactions because conversions must complete between them.
pub(crate) struct CommandBus<I2C> {
    i2c: I2C,
}

impl<I2C> CommandBus<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub async fn command(&mut self, command: &[u8]) -> Result<(), I2C::Error> {
        self.i2c.write(ADDRESS, command).await
    }

    /// Command immediately followed by a read (repeated start).
    pub async fn command_read(&mut self, command: &[u8], buffer: &mut [u8]) -> Result<(), I2C::Error> {
        self.i2c.write_read(ADDRESS, command, buffer).await
    }

    pub async fn read(&mut self, buffer: &mut [u8]) -> Result<(), I2C::Error> {
        self.i2c.read(ADDRESS, buffer).await
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}
