//! DS1825 programmable-resolution One-Wire thermometer (Thermo 2 Click).
//!
//! The Click carries a single device, so every transaction addresses it
//! with Skip ROM.

use embedded_hal_async::delay::DelayNs;

use crate::error::ThermoError;
use crate::onewire::{crc8, OneWire};
use crate::registers::*;

/// Conversion resolution. Each extra bit doubles the conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.5 °C, 93.75 ms.
    Bits9,
    /// 0.25 °C, 187.5 ms.
    Bits10,
    /// 0.125 °C, 375 ms.
    Bits11,
    /// 0.0625 °C, 750 ms.
    #[default]
    Bits12,
}

impl Resolution {
    fn bits(self) -> u8 {
        self as u8
    }

    fn from_config(config: u8) -> Self {
        match (config >> RESOLUTION_SHIFT) & 0b11 {
            0 => Resolution::Bits9,
            1 => Resolution::Bits10,
            2 => Resolution::Bits11,
            _ => Resolution::Bits12,
        }
    }

    /// Maximum conversion time in microseconds.
    pub fn conversion_time_us(self) -> u32 {
        93_750 << self.bits()
    }

    /// Low bits that are undefined at this resolution are cleared.
    fn mask(self) -> i16 {
        !((1 << (3 - self.bits())) - 1)
    }
}

/// Decoded scratchpad contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scratchpad {
    /// Temperature in 1/16 °C.
    pub raw: i16,
    /// High alarm threshold, °C.
    pub th: i8,
    /// Low alarm threshold, °C.
    pub tl: i8,
    pub config: u8,
}

impl Scratchpad {
    pub fn resolution(&self) -> Resolution {
        Resolution::from_config(self.config)
    }

    /// Location code strapped on the AD3:AD0 pins.
    pub fn address(&self) -> u8 {
        self.config & ADDRESS_MASK
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub resolution: Resolution,
}

/// Driver for the DS1825.
pub struct Ds1825<W, D> {
    bus: W,
    delay: D,
    config: Config,
    rom: Option<[u8; ROM_LEN]>,
}

impl<W, D> Ds1825<W, D>
where
    W: OneWire,
    D: DelayNs,
{
    pub fn new(bus: W, delay: D, config: Config) -> Self {
        Self {
            bus,
            delay,
            config,
            rom: None,
        }
    }

    /// Read and validate the ROM code, then apply the configured
    /// resolution.
    ///
    /// # Errors
    ///
    /// * [`ThermoError::NoDevice`] if nothing answers the reset.
    /// * [`ThermoError::Crc`] if the ROM CRC does not match.
    /// * [`ThermoError::WrongFamily`] if the device is not a DS1825.
    pub async fn init(&mut self) -> Result<(), ThermoError<W::Error>> {
        if !self.bus.reset().await? {
            return Err(ThermoError::NoDevice);
        }
        self.bus.write_byte(READ_ROM).await?;
        let mut rom = [0u8; ROM_LEN];
        self.bus.read_bytes(&mut rom).await?;

        if crc8(&rom[..ROM_LEN - 1]) != rom[ROM_LEN - 1] {
            return Err(ThermoError::Crc);
        }
        if rom[0] != FAMILY_CODE {
            #[cfg(feature = "defmt")]
            defmt::error!("DS1825: unexpected family code 0x{:02X}", rom[0]);
            return Err(ThermoError::WrongFamily(rom[0]));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("DS1825 ROM: {:02X}", rom);

        self.rom = Some(rom);
        self.set_resolution(self.config.resolution).await
    }

    /// ROM code read by [`init()`](Self::init).
    pub fn rom(&self) -> Option<[u8; ROM_LEN]> {
        self.rom
    }

    pub fn resolution(&self) -> Resolution {
        self.config.resolution
    }

    /// Reset and address the single device on the bus.
    async fn select(&mut self) -> Result<(), ThermoError<W::Error>> {
        if !self.bus.reset().await? {
            return Err(ThermoError::NoDevice);
        }
        self.bus.write_byte(SKIP_ROM).await?;
        Ok(())
    }

    pub async fn read_scratchpad(&mut self) -> Result<Scratchpad, ThermoError<W::Error>> {
        self.select().await?;
        self.bus.write_byte(READ_SCRATCHPAD).await?;
        let mut buf = [0u8; SCRATCHPAD_LEN];
        self.bus.read_bytes(&mut buf).await?;

        if crc8(&buf[..SCRATCHPAD_LEN - 1]) != buf[SCRATCHPAD_LEN - 1] {
            return Err(ThermoError::Crc);
        }
        Ok(Scratchpad {
            raw: i16::from_le_bytes([buf[0], buf[1]]),
            th: buf[2] as i8,
            tl: buf[3] as i8,
            config: buf[4],
        })
    }

    /// Write the resolution, keeping the alarm thresholds.
    pub async fn set_resolution(&mut self, resolution: Resolution) -> Result<(), ThermoError<W::Error>> {
        let scratchpad = self.read_scratchpad().await?;
        let config = (resolution.bits() << RESOLUTION_SHIFT) | CONFIG_RESERVED;

        self.select().await?;
        self.bus
            .write_bytes(&[WRITE_SCRATCHPAD, scratchpad.th as u8, scratchpad.tl as u8, config])
            .await?;
        self.config.resolution = resolution;
        Ok(())
    }

    /// Copy thresholds and configuration to EEPROM.
    pub async fn save(&mut self) -> Result<(), ThermoError<W::Error>> {
        self.select().await?;
        self.bus.write_byte(COPY_SCRATCHPAD).await?;
        self.delay.delay_ms(COPY_WAIT_MS).await;
        Ok(())
    }

    /// Start a conversion, wait for it, and return the result in 1/16 °C.
    pub async fn read_raw(&mut self) -> Result<i16, ThermoError<W::Error>> {
        let resolution = self.config.resolution;
        self.select().await?;
        self.bus.write_byte(CONVERT_T).await?;
        self.delay.delay_us(resolution.conversion_time_us()).await;

        let scratchpad = self.read_scratchpad().await?;
        Ok(scratchpad.raw & resolution.mask())
    }

    pub async fn read_temperature(&mut self) -> Result<f32, ThermoError<W::Error>> {
        Ok(self.read_raw().await? as f32 / 16.0)
    }

    pub fn release(self) -> (W, D) {
        (self.bus, self.delay)
    }
}
