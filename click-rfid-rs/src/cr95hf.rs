//! CR95HF multi-protocol NFC transceiver as fitted to the RFID Click.

use core::fmt;

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;
use heapless::String;

use crate::driver::{command_frame, Interface};
use crate::error::RfidError;
use crate::registers::*;

/// RF protocol selected with `ProtocolSelect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    /// RF field off.
    FieldOff,
    Iso15693,
    /// ISO 14443-A at 106 kbps (MIFARE, NTAG).
    #[default]
    Iso14443A,
    Iso14443B,
    FeliCa,
}

impl Protocol {
    /// `[protocol, parameters]` for the `ProtocolSelect` command.
    pub fn select_bytes(self) -> [u8; 2] {
        match self {
            Protocol::FieldOff => [0x00, 0x00],
            // 26 kbps, 312 µs wait, append CRC.
            Protocol::Iso15693 => [0x01, 0x0D],
            // 106 kbps both ways.
            Protocol::Iso14443A => [0x02, 0x00],
            // 106 kbps, append CRC.
            Protocol::Iso14443B => [0x03, 0x01],
            // 212 kbps, append CRC.
            Protocol::FeliCa => [0x04, 0x51],
        }
    }
}

/// Identification reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idn {
    /// Device name, e.g. `"NFC FS2JAST2"`.
    pub name: String<IDN_NAME_LEN>,
    pub rom_crc: u16,
}

/// Cascade level 1 UID of an ISO 14443-A tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uid(pub [u8; 4]);

impl Uid {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// XOR check byte sent after the UID during anticollision.
    pub fn bcc(&self) -> u8 {
        self.0.iter().fold(0, |acc, b| acc ^ b)
    }

    /// `0x88` in the first byte means the tag has a longer UID and only
    /// its first three bytes are here.
    pub fn is_cascaded(&self) -> bool {
        self.0[0] == 0x88
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02X}:{:02X}:{:02X}:{:02X}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

/// Protocol `init()` leaves selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub protocol: Protocol,
}

type RfidResult<T, SPI, IRQ> = Result<
    T,
    RfidError<<SPI as embedded_hal_async::spi::ErrorType>::Error, <IRQ as embedded_hal::digital::ErrorType>::Error>,
>;

/// Driver for the CR95HF on the RFID Click (SPI mode, IRQ_IN wake line).
pub struct Cr95hf<SPI, IRQ, D> {
    iface: Interface<SPI>,
    irq_in: IRQ,
    pub(crate) delay: D,
    config: Config,
    initialized: bool,
}

impl<SPI, IRQ, D> Cr95hf<SPI, IRQ, D>
where
    SPI: SpiDevice,
    IRQ: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, irq_in: IRQ, delay: D, config: Config) -> Self {
        Self {
            iface: Interface::new(spi),
            irq_in,
            delay,
            config,
            initialized: false,
        }
    }

    /// Wake the chip, check it answers, read its identity and select the
    /// configured protocol.
    pub async fn init(&mut self) -> RfidResult<Idn, SPI, IRQ> {
        self.wake_up().await?;
        self.echo().await?;
        let idn = self.idn().await?;
        #[cfg(feature = "defmt")]
        defmt::info!("CR95HF: {}", idn.name.as_str());
        self.select_protocol(self.config.protocol).await?;
        self.initialized = true;
        Ok(idn)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Low pulse on IRQ_IN, then wait for the oscillator.
    pub async fn wake_up(&mut self) -> RfidResult<(), SPI, IRQ> {
        self.irq_in.set_low().map_err(RfidError::Pin)?;
        self.delay.delay_us(WAKE_PULSE_US).await;
        self.irq_in.set_high().map_err(RfidError::Pin)?;
        self.delay.delay_ms(STARTUP_MS).await;
        Ok(())
    }

    /// Return to the power-up state. [`init()`](Self::init) must run again.
    pub async fn reset(&mut self) -> RfidResult<(), SPI, IRQ> {
        self.iface.write(&[CTRL_RESET]).await.map_err(RfidError::Spi)?;
        self.initialized = false;
        self.wake_up().await
    }

    /// Send `0x55` and expect it back.
    pub async fn echo(&mut self) -> RfidResult<(), SPI, IRQ> {
        self.iface.write(&[CTRL_SEND, CMD_ECHO]).await.map_err(RfidError::Spi)?;
        self.wait_ready().await?;
        let byte = self.iface.read_echo().await.map_err(RfidError::Spi)?;
        if byte != CMD_ECHO {
            #[cfg(feature = "defmt")]
            defmt::error!("CR95HF echo returned 0x{:02X}", byte);
            return Err(RfidError::EchoMismatch(byte));
        }
        Ok(())
    }

    pub async fn idn(&mut self) -> RfidResult<Idn, SPI, IRQ> {
        let mut reply = [0u8; IDN_LEN];
        let (_, len) = self.command(CMD_IDN, &[], &mut reply).await?;
        if len != IDN_LEN {
            return Err(RfidError::Frame);
        }

        let name_bytes = &reply[..IDN_NAME_LEN];
        let end = name_bytes.iter().position(|&b| b == 0).unwrap_or(IDN_NAME_LEN);
        let text = core::str::from_utf8(&name_bytes[..end]).map_err(|_| RfidError::Frame)?;
        let mut name = String::new();
        name.push_str(text).map_err(|_| RfidError::Frame)?;

        Ok(Idn {
            name,
            rom_crc: u16::from_be_bytes([reply[IDN_NAME_LEN], reply[IDN_NAME_LEN + 1]]),
        })
    }

    pub async fn select_protocol(&mut self, protocol: Protocol) -> RfidResult<(), SPI, IRQ> {
        let mut reply = [0u8; 0];
        self.command(CMD_PROTOCOL_SELECT, &protocol.select_bytes(), &mut reply)
            .await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("CR95HF protocol {}", protocol);
        Ok(())
    }

    /// Switch the RF field off. Call [`field_on()`](Self::field_on) before
    /// the next [`detect_tag()`](Self::detect_tag).
    pub async fn field_off(&mut self) -> RfidResult<(), SPI, IRQ> {
        self.select_protocol(Protocol::FieldOff).await
    }

    /// Select the configured protocol again, powering the RF field.
    pub async fn field_on(&mut self) -> RfidResult<(), SPI, IRQ> {
        if !self.initialized {
            return Err(RfidError::NotInitialized);
        }
        self.select_protocol(self.config.protocol).await
    }

    /// Look for one ISO 14443-A tag: REQA, then anticollision at cascade
    /// level 1.
    ///
    /// Returns `Ok(None)` when no tag answers.
    ///
    /// # Errors
    ///
    /// [`RfidError::Bcc`] if the UID check byte is wrong.
    pub async fn detect_tag(&mut self) -> RfidResult<Option<Uid>, SPI, IRQ> {
        if !self.initialized {
            return Err(RfidError::NotInitialized);
        }

        let mut atqa = [0u8; ATQA_LEN + FRAME_TRAILER];
        match self.command(CMD_SEND_RECV, &REQA, &mut atqa).await {
            Ok((_, len)) if len >= ATQA_LEN => {}
            Ok(_) | Err(RfidError::Command(RESULT_NO_TAG)) => return Ok(None),
            Err(e) => return Err(e),
        }

        let mut reply = [0u8; UID_CL1_LEN + FRAME_TRAILER];
        let len = match self.command(CMD_SEND_RECV, &ANTICOLLISION_CL1, &mut reply).await {
            Ok((_, len)) => len,
            Err(RfidError::Command(RESULT_NO_TAG)) => return Ok(None),
            Err(e) => return Err(e),
        };
        if len < UID_CL1_LEN {
            return Err(RfidError::Frame);
        }

        let uid = Uid([reply[0], reply[1], reply[2], reply[3]]);
        if uid.bcc() != reply[4] {
            #[cfg(feature = "defmt")]
            defmt::warn!("CR95HF BCC mismatch for {}", uid);
            return Err(RfidError::Bcc);
        }
        Ok(Some(uid))
    }

    pub fn release(self) -> (SPI, IRQ, D) {
        (self.iface.release(), self.irq_in, self.delay)
    }

    /// Send, wait for the reply and read it into `reply`.
    ///
    /// Result codes other than `0x00` and `0x80` become
    /// [`RfidError::Command`].
    async fn command(
        &mut self,
        cmd: u8,
        data: &[u8],
        reply: &mut [u8],
    ) -> RfidResult<(u8, usize), SPI, IRQ> {
        let mut frame = [0u8; 3 + MAX_COMMAND_DATA];
        let frame_len = command_frame(cmd, data, &mut frame).ok_or(RfidError::Frame)?;
        self.iface.write(&frame[..frame_len]).await.map_err(RfidError::Spi)?;
        self.wait_ready().await?;

        let (code, len) = self.iface.read_reply(reply).await.map_err(RfidError::Spi)?;
        if code != RESULT_OK && code != RESULT_FRAME {
            return Err(RfidError::Command(code));
        }
        if len > reply.len() {
            return Err(RfidError::Frame);
        }
        Ok((code, len))
    }

    async fn wait_ready(&mut self) -> RfidResult<(), SPI, IRQ> {
        for _ in 0..POLL_ATTEMPTS {
            if self.iface.poll().await.map_err(RfidError::Spi)? {
                return Ok(());
            }
            self.delay.delay_us(POLL_INTERVAL_US).await;
        }
        Err(RfidError::Timeout)
    }
}
