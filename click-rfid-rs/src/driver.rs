//! Low-level CR95HF SPI framing.
//!
//! This module is crate-private. Every call is one SPI transaction that
//! starts with a control byte.

use embedded_hal_async::spi::{Operation, SpiDevice};

use crate::registers::*;

pub(crate) struct Interface<SPI> {
    spi: SPI,
}

/// Build `[CTRL_SEND, cmd, len, data..]`. Returns the frame length, or
/// `None` if `data` is longer than a frame holds.
pub(crate) fn command_frame(cmd: u8, data: &[u8], frame: &mut [u8; 3 + MAX_COMMAND_DATA]) -> Option<usize> {
    if data.len() > MAX_COMMAND_DATA {
        return None;
    }
    frame[0] = CTRL_SEND;
    frame[1] = cmd;
    frame[2] = data.len() as u8;
    frame[3..3 + data.len()].copy_from_slice(data);
    Some(3 + data.len())
}

impl<SPI> Interface<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub async fn write(&mut self, frame: &[u8]) -> Result<(), SPI::Error> {
        self.spi.write(frame).await
    }

    /// One poll: returns `true` once a reply is waiting.
    pub async fn poll(&mut self) -> Result<bool, SPI::Error> {
        let mut flags = [0u8; 1];
        self.spi
            .transaction(&mut [Operation::Write(&[CTRL_POLL]), Operation::Read(&mut flags)])
            .await?;
        Ok(flags[0] & FLAG_READY != 0)
    }

    /// Read a `[code, len, data..]` reply, clocking out `buf.len()` data
    /// bytes. Returns `(code, len)`.
    pub async fn read_reply(&mut self, buf: &mut [u8]) -> Result<(u8, usize), SPI::Error> {
        let mut header = [0u8; 2];
        self.spi
            .transaction(&mut [
                Operation::Write(&[CTRL_READ]),
                Operation::Read(&mut header),
                Operation::Read(buf),
            ])
            .await?;
        Ok((header[0], header[1] as usize))
    }

    /// The echo reply is a single byte with no header.
    pub async fn read_echo(&mut self) -> Result<u8, SPI::Error> {
        let mut byte = [0u8; 1];
        self.spi
            .transaction(&mut [Operation::Write(&[CTRL_READ]), Operation::Read(&mut byte)])
            .await?;
        Ok(byte[0])
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_command_with_length() {
        let mut frame = [0u8; 3 + MAX_COMMAND_DATA];
        let len = command_frame(CMD_PROTOCOL_SELECT, &[0x02, 0x00], &mut frame).unwrap();
        assert_eq!(&frame[..len], &[0x00, 0x02, 0x02, 0x02, 0x00]);

        let len = command_frame(CMD_IDN, &[], &mut frame).unwrap();
        assert_eq!(&frame[..len], &[0x00, 0x01, 0x00]);

        assert_eq!(command_frame(CMD_SEND_RECV, &[0; 9], &mut frame), None);
    }
}
