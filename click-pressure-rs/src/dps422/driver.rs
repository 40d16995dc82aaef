//! Low-level I2C register access for the DPS422.
//!
//! This module is crate-private.

use embedded_hal_async::i2c::I2c;

/// Register-addressed I2C device: one register pointer byte followed by
/// data. Every call is a single bus transaction.
pub(crate) struct RegisterBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterBus<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Read `buffer.len()` bytes starting at `register`
    /// (write register pointer, repeated start, read).
    pub async fn read_registers(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), I2C::Error> {
        self.i2c.write_read(self.address, &[register], buffer).await
    }

    pub async fn read_register(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.read_registers(register, &mut buf).await?;
        Ok(buf[0])
    }

    pub async fn write_register(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[register, value]).await
    }

    /// Read a 24-bit two's complement result, MSB first.
    pub async fn read_i24(&mut self, register: u8) -> Result<i32, I2C::Error> {
        let mut buf = [0u8; 3];
        self.read_registers(register, &mut buf).await?;
        // Place the 24 bits in the top of an i32 and shift back to
        // sign-extend.
        Ok(i32::from_be_bytes([buf[0], buf[1], buf[2], 0]) >> 8)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}
