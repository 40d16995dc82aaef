//! Minimal async One-Wire bus abstraction.
//!
//! [`OneWire`] is the seam the DS1825 driver talks through. Boards with a
//! bridge chip implement it on top of that chip; [`BitBangOneWire`]
//! implements it on a single open-drain GPIO.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

/// Byte-level One-Wire master.
#[allow(async_fn_in_trait)]
pub trait OneWire {
    type Error;

    /// Reset pulse. Returns `true` if any device answered with a presence
    /// pulse.
    async fn reset(&mut self) -> Result<bool, Self::Error>;

    /// Write one byte, LSB first.
    async fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Read one byte, LSB first.
    async fn read_byte(&mut self) -> Result<u8, Self::Error>;

    async fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.write_byte(byte).await?;
        }
        Ok(())
    }

    async fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        for byte in buf.iter_mut() {
            *byte = self.read_byte().await?;
        }
        Ok(())
    }
}

/// Dallas/Maxim CRC-8 (polynomial x^8 + x^5 + x^4 + 1, reflected).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}

// Standard-speed slot timings in microseconds.
const RESET_LOW_US: u32 = 480;
const PRESENCE_SAMPLE_US: u32 = 70;
const RESET_RECOVERY_US: u32 = 410;
const WRITE_ONE_LOW_US: u32 = 6;
const WRITE_ONE_HIGH_US: u32 = 64;
const WRITE_ZERO_LOW_US: u32 = 60;
const WRITE_ZERO_HIGH_US: u32 = 10;
const READ_LOW_US: u32 = 6;
const READ_SAMPLE_US: u32 = 9;
const READ_RECOVERY_US: u32 = 55;

/// One-Wire master on an open-drain GPIO with an external pull-up.
///
/// Driving the pin high releases the line.
pub struct BitBangOneWire<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> BitBangOneWire<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    async fn write_bit(&mut self, bit: bool) -> Result<(), P::Error> {
        let (low, high) = if bit {
            (WRITE_ONE_LOW_US, WRITE_ONE_HIGH_US)
        } else {
            (WRITE_ZERO_LOW_US, WRITE_ZERO_HIGH_US)
        };
        self.pin.set_low()?;
        self.delay.delay_us(low).await;
        self.pin.set_high()?;
        self.delay.delay_us(high).await;
        Ok(())
    }

    async fn read_bit(&mut self) -> Result<bool, P::Error> {
        self.pin.set_low()?;
        self.delay.delay_us(READ_LOW_US).await;
        self.pin.set_high()?;
        self.delay.delay_us(READ_SAMPLE_US).await;
        let bit = self.pin.is_high()?;
        self.delay.delay_us(READ_RECOVERY_US).await;
        Ok(bit)
    }

    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> OneWire for BitBangOneWire<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    type Error = P::Error;

    async fn reset(&mut self) -> Result<bool, Self::Error> {
        self.pin.set_low()?;
        self.delay.delay_us(RESET_LOW_US).await;
        self.pin.set_high()?;
        self.delay.delay_us(PRESENCE_SAMPLE_US).await;
        let present = self.pin.is_low()?;
        self.delay.delay_us(RESET_RECOVERY_US).await;
        Ok(present)
    }

    async fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0).await?;
        }
        Ok(())
    }

    async fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut byte = 0;
        for i in 0..8 {
            if self.read_bit().await? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    #[test]
    fn crc_matches_application_note_rom() {
        // Family 0x02, serial 0x0001B81C, CRC 0xA2.
        assert_eq!(crc8(&[0x02, 0x1C, 0xB8, 0x01, 0x00, 0x00, 0x00]), 0xA2);
        assert_eq!(crc8(&[0x02, 0x1C, 0xB8, 0x01, 0x00, 0x00, 0x00, 0xA2]), 0);
        assert_eq!(crc8(&[]), 0);
    }

    #[test]
    fn reset_samples_presence_pulse() {
        let expectations = [
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::get(State::Low),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::get(State::High),
        ];
        let mut bus = BitBangOneWire::new(PinMock::new(&expectations), NoopDelay::new());

        assert!(block_on(bus.reset()).unwrap());
        assert!(!block_on(bus.reset()).unwrap());

        let (mut pin, _) = bus.release();
        pin.done();
    }

    #[test]
    fn bytes_go_out_lsb_first() {
        let mut expectations = Vec::new();
        // 0x01 written: one 1-slot then seven 0-slots, each low then high.
        for _ in 0..8 {
            expectations.push(Transaction::set(State::Low));
            expectations.push(Transaction::set(State::High));
        }
        // 0x80 read back: seven zeros then a one.
        for i in 0..8 {
            expectations.push(Transaction::set(State::Low));
            expectations.push(Transaction::set(State::High));
            expectations.push(Transaction::get(if i == 7 { State::High } else { State::Low }));
        }
        let mut bus = BitBangOneWire::new(PinMock::new(&expectations), NoopDelay::new());

        block_on(bus.write_byte(0x01)).unwrap();
        assert_eq!(block_on(bus.read_byte()).unwrap(), 0x80);

        let (mut pin, _) = bus.release();
        pin.done();
    }
}
