//! Bosch BMP183 digital pressure sensor (Pressure click, SPI).
//!
//! [`Bmp183`] owns the SPI device and a delay provider. Calibration words
//! are read once during [`init()`](Bmp183::init) and stored in the
//! instance, never in shared statics.

mod calibration;
mod driver;
mod registers;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;

pub use calibration::{altitude_m, Calibration};

use crate::error::PressureError;
use driver::Bmp183Bus;
use registers::*;

/// Pressure oversampling setting (OSS).
///
/// Higher settings average more internal samples, trading conversion time
/// and current for lower noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// 1 sample, 4.5 ms.
    UltraLowPower,
    /// 2 samples, 7.5 ms.
    #[default]
    Standard,
    /// 4 samples, 13.5 ms.
    HighResolution,
    /// 8 samples, 25.5 ms.
    UltraHighResolution,
}

impl Oversampling {
    /// The two-bit OSS value written to `CTRL_MEAS[7:6]`.
    pub fn oss(self) -> u8 {
        match self {
            Oversampling::UltraLowPower => 0,
            Oversampling::Standard => 1,
            Oversampling::HighResolution => 2,
            Oversampling::UltraHighResolution => 3,
        }
    }

    /// Maximum pressure conversion time in microseconds.
    pub fn conversion_time_us(self) -> u32 {
        match self {
            Oversampling::UltraLowPower => 4_500,
            Oversampling::Standard => 7_500,
            Oversampling::HighResolution => 13_500,
            Oversampling::UltraHighResolution => 25_500,
        }
    }
}

/// BMP183 configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Oversampling used for pressure conversions. Default: `Standard`.
    pub oversampling: Oversampling,
}

/// A temperature and pressure pair taken back to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Temperature in 0.1 °C.
    pub temperature_dc: i32,
    /// Pressure in Pa.
    pub pressure_pa: i32,
}

impl Measurement {
    /// Temperature in °C.
    pub fn temperature_c(&self) -> f32 {
        self.temperature_dc as f32 / 10.0
    }
}

/// Driver for the BMP183.
///
/// # Example
///
/// ```no_run
/// # async fn example<S, D>(spi: S, delay: D)
/// # where S: embedded_hal_async::spi::SpiDevice, D: embedded_hal_async::delay::DelayNs {
/// use click_pressure::bmp183::{Bmp183, Config};
///
/// let mut sensor = Bmp183::new(spi, delay, Config::default());
/// sensor.init().await.ok();
/// let reading = sensor.read_measurement().await.ok();
/// # }
/// ```
pub struct Bmp183<SPI, D> {
    bus: Bmp183Bus<SPI>,
    delay: D,
    config: Config,
    calibration: Option<Calibration>,
}

impl<SPI, D> Bmp183<SPI, D>
where
    SPI: SpiDevice,
    D: DelayNs,
{
    /// Construct the driver without touching the bus.
    pub fn new(spi: SPI, delay: D, config: Config) -> Self {
        Self {
            bus: Bmp183Bus::new(spi),
            delay,
            config,
            calibration: None,
        }
    }

    /// Verify the chip id and load the calibration block.
    ///
    /// # Errors
    ///
    /// * [`PressureError::InvalidChipId`] if `0xD0` does not read `0x55`.
    /// * [`PressureError::InvalidCalibration`] if any calibration word is
    ///   `0x0000` or `0xFFFF`.
    pub async fn init(&mut self) -> Result<(), PressureError<SPI::Error>> {
        let id = self.bus.read_register(CHIP_ID).await?;
        if id != CHIP_ID_VALUE {
            #[cfg(feature = "defmt")]
            defmt::error!("BMP183: unexpected chip id 0x{:02X}", id);
            return Err(PressureError::InvalidChipId(id));
        }

        let mut raw = [0u8; CALIBRATION_LEN];
        self.bus.read_registers(CALIBRATION_START, &mut raw).await?;
        let calibration =
            Calibration::from_bytes(&raw).ok_or(PressureError::InvalidCalibration)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("BMP183 calibration: {}", calibration);

        self.calibration = Some(calibration);
        Ok(())
    }

    /// Trigger a power-on reset. Calibration must be reloaded with
    /// [`init()`](Self::init) afterwards.
    pub async fn soft_reset(&mut self) -> Result<(), PressureError<SPI::Error>> {
        self.bus.write_register(SOFT_RESET, SOFT_RESET_VALUE).await?;
        self.calibration = None;
        Ok(())
    }

    /// Calibration loaded by [`init()`](Self::init), if any.
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    pub fn oversampling(&self) -> Oversampling {
        self.config.oversampling
    }

    pub fn set_oversampling(&mut self, oversampling: Oversampling) {
        self.config.oversampling = oversampling;
    }

    /// Run a temperature conversion and return the raw 16-bit result.
    pub async fn read_raw_temperature(&mut self) -> Result<i32, PressureError<SPI::Error>> {
        self.bus.write_register(CTRL_MEAS, CMD_TEMPERATURE).await?;
        self.delay.delay_us(TEMPERATURE_WAIT_US).await;

        let mut buf = [0u8; 2];
        self.bus.read_registers(OUT_MSB, &mut buf).await?;
        Ok(u16::from_be_bytes(buf) as i32)
    }

    /// Run a pressure conversion and return the raw result, already
    /// right-aligned for the configured oversampling.
    pub async fn read_raw_pressure(&mut self) -> Result<i32, PressureError<SPI::Error>> {
        let oversampling = self.config.oversampling;
        let oss = oversampling.oss();

        self.bus
            .write_register(CTRL_MEAS, CMD_PRESSURE | (oss << 6))
            .await?;
        self.delay.delay_us(oversampling.conversion_time_us()).await;

        let mut buf = [0u8; 3];
        self.bus.read_registers(OUT_MSB, &mut buf).await?;
        let raw = ((buf[0] as i32) << 16) | ((buf[1] as i32) << 8) | buf[2] as i32;
        Ok(raw >> (8 - oss))
    }

    /// Temperature in 0.1 °C.
    pub async fn read_temperature(&mut self) -> Result<i32, PressureError<SPI::Error>> {
        let calibration = self.calibration.ok_or(PressureError::NotInitialized)?;
        let ut = self.read_raw_temperature().await?;
        calibration
            .temperature(ut)
            .ok_or(PressureError::InvalidCalibration)
    }

    /// Pressure in Pa. A temperature conversion runs first because the
    /// compensation depends on it.
    pub async fn read_pressure(&mut self) -> Result<i32, PressureError<SPI::Error>> {
        Ok(self.read_measurement().await?.pressure_pa)
    }

    /// Temperature followed by pressure, compensated together.
    pub async fn read_measurement(&mut self) -> Result<Measurement, PressureError<SPI::Error>> {
        let calibration = self.calibration.ok_or(PressureError::NotInitialized)?;
        let ut = self.read_raw_temperature().await?;
        let up = self.read_raw_pressure().await?;

        let temperature_dc = calibration
            .temperature(ut)
            .ok_or(PressureError::InvalidCalibration)?;
        let pressure_pa = calibration
            .pressure(ut, up, self.config.oversampling)
            .ok_or(PressureError::InvalidCalibration)?;

        Ok(Measurement {
            temperature_dc,
            pressure_pa,
        })
    }

    /// Release the bus and delay provider.
    pub fn release(self) -> (SPI, D) {
        (self.bus.release(), self.delay)
    }
}
