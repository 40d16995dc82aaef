//! Shadowed register file over I2C.
//!
//! This module is crate-private. The Si4703 has no register pointer: a
//! read returns registers from `0x0A` onwards and a write fills registers
//! from `0x02` onwards, so the driver keeps a copy of all sixteen.

use embedded_hal_async::i2c::I2c;

use crate::registers::*;

pub(crate) struct RegisterFile<I2C> {
    i2c: I2C,
    regs: [u16; REGISTER_COUNT],
}

impl<I2C> RegisterFile<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c, regs: [0; REGISTER_COUNT] }
    }

    pub fn get(&self, reg: usize) -> u16 {
        self.regs[reg]
    }

    pub fn set(&mut self, reg: usize, value: u16) {
        self.regs[reg] = value;
    }

    pub fn update(&mut self, reg: usize, clear: u16, set: u16) {
        self.regs[reg] = (self.regs[reg] & !clear) | set;
    }

    /// Refresh the whole shadow copy.
    pub async fn read_all(&mut self) -> Result<(), I2C::Error> {
        let mut buf = [0u8; REGISTER_COUNT * 2];
        self.i2c.read(ADDRESS, &mut buf).await?;
        for (i, word) in buf.chunks_exact(2).enumerate() {
            let reg = (READ_START + i) % REGISTER_COUNT;
            self.regs[reg] = u16::from_be_bytes([word[0], word[1]]);
        }
        Ok(())
    }

    /// Write the control registers `POWERCFG..=TEST1` from the shadow copy.
    pub async fn write_control(&mut self) -> Result<(), I2C::Error> {
        let mut buf = [0u8; (WRITE_END - WRITE_START + 1) * 2];
        for (i, word) in buf.chunks_exact_mut(2).enumerate() {
            word.copy_from_slice(&self.regs[WRITE_START + i].to_be_bytes());
        }
        self.i2c.write(ADDRESS, &buf).await
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    fn read_wraps_from_status_register() {
        // Bytes arrive as 0x0A..=0x0F, then 0x00..=0x09.
        let bytes: Vec<u8> = (0..16u16)
            .flat_map(|i| (((0x0A + i) % 16) * 0x0101).to_be_bytes())
            .collect();
        let mut file = RegisterFile::new(I2cMock::new(&[Transaction::read(ADDRESS, bytes)]));

        block_on(file.read_all()).unwrap();
        assert_eq!(file.get(STATUSRSSI), 0x0A0A);
        assert_eq!(file.get(0x0F), 0x0F0F);
        assert_eq!(file.get(DEVICEID), 0x0000);
        assert_eq!(file.get(TEST1), 0x0707);

        file.release().done();
    }

    #[test]
    fn write_starts_at_powercfg() {
        let mut file = RegisterFile::new(I2cMock::new(&[Transaction::write(
            ADDRESS,
            vec![0x40, 0x01, 0x80, 0x88, 0, 0, 0, 0, 0, 0, 0x81, 0x00],
        )]));
        file.set(POWERCFG, 0x4001);
        file.set(CHANNEL, 0x0088);
        file.update(CHANNEL, 0, TUNE);
        file.set(TEST1, XOSC_ENABLE);
        file.set(STATUSRSSI, 0xFFFF);

        block_on(file.write_control()).unwrap();

        file.release().done();
    }
}
