//! Infineon DPS422 barometric pressure and temperature sensor (I2C).
//!
//! [`Dps422`] runs command-mode (one-shot) conversions by default and can
//! also be switched into background mode, where the sensor converts
//! continuously at the configured rates.

mod coefficients;
mod driver;
mod registers;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

pub use coefficients::Coefficients;
pub use registers::{ALTERNATE_ADDRESS, DEFAULT_ADDRESS};

use crate::error::PressureError;
use driver::RegisterBus;
use registers::*;

/// Measurement rate in background mode (samples per second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rate {
    #[default]
    Hz1,
    Hz2,
    Hz4,
    Hz8,
    Hz16,
    Hz32,
    Hz64,
    Hz128,
}

impl Rate {
    fn bits(self) -> u8 {
        self as u8
    }
}

/// Internal oversampling (precision) of one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Precision {
    #[default]
    X1,
    X2,
    X4,
    X8,
    X16,
    X32,
    X64,
    X128,
}

impl Precision {
    fn bits(self) -> u8 {
        self as u8
    }
}

/// `MEAS_CFG.MEAS_CTRL` operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementMode {
    /// Standby, no conversions.
    #[default]
    Idle,
    /// One pressure conversion, then back to idle.
    Pressure,
    /// One temperature conversion, then back to idle.
    Temperature,
    /// Continuous pressure conversions.
    BackgroundPressure,
    /// Continuous temperature conversions.
    BackgroundTemperature,
    /// Continuous pressure and temperature conversions.
    Background,
}

impl MeasurementMode {
    fn bits(self) -> u8 {
        match self {
            MeasurementMode::Idle => 0b000,
            MeasurementMode::Pressure => 0b001,
            MeasurementMode::Temperature => 0b010,
            MeasurementMode::BackgroundPressure => 0b101,
            MeasurementMode::BackgroundTemperature => 0b110,
            MeasurementMode::Background => 0b111,
        }
    }
}

/// DPS422 configuration, written to `PRS_CFG` and `TMP_CFG` by
/// [`Dps422::init`] and [`Dps422::configure`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub pressure_rate: Rate,
    pub pressure_precision: Precision,
    pub temperature_rate: Rate,
    pub temperature_precision: Precision,
}

impl Config {
    fn prs_cfg(&self) -> u8 {
        self.pressure_rate.bits() << 4 | self.pressure_precision.bits()
    }

    fn tmp_cfg(&self) -> u8 {
        self.temperature_rate.bits() << 4 | self.temperature_precision.bits()
    }
}

/// Compensated temperature and pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Temperature in °C.
    pub temperature_c: f32,
    /// Pressure in Pa.
    pub pressure_pa: f32,
}

/// Driver for the DPS422.
pub struct Dps422<I2C, D> {
    bus: RegisterBus<I2C>,
    delay: D,
    config: Config,
    coefficients: Option<Coefficients>,
    /// Scaled raw temperature of the last conversion, needed by the
    /// pressure polynomial.
    last_temp_scaled: Option<f32>,
}

impl<I2C, D> Dps422<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Construct the driver without any I2C traffic.
    pub fn new(i2c: I2C, address: u8, delay: D, config: Config) -> Self {
        Self {
            bus: RegisterBus::new(i2c, address),
            delay,
            config,
            coefficients: None,
            last_temp_scaled: None,
        }
    }

    /// Check the product id, soft-reset the sensor, load the calibration
    /// coefficients and apply the configuration.
    ///
    /// # Errors
    ///
    /// * [`PressureError::InvalidChipId`] if `PROD_ID` is not `0x0A`.
    /// * [`PressureError::Timeout`] if the coefficients never become ready.
    pub async fn init(&mut self) -> Result<(), PressureError<I2C::Error>> {
        let id = self.bus.read_register(PROD_ID).await?;
        if id != PRODUCT_ID {
            #[cfg(feature = "defmt")]
            defmt::error!("DPS422: unexpected product id 0x{:02X}", id);
            return Err(PressureError::InvalidChipId(id));
        }

        self.bus.write_register(RESET, SOFT_RESET).await?;
        self.delay.delay_us(RESET_WAIT_US).await;
        self.wait_for(COEF_RDY | SENSOR_RDY).await?;

        let mut temp = [0u8; COEF_TEMP_LEN];
        let mut prs = [0u8; COEF_PRS_LEN];
        self.bus.read_registers(COEF_TEMP, &mut temp).await?;
        self.bus.read_registers(COEF_PRS, &mut prs).await?;
        let coefficients = Coefficients::from_bytes(&temp, &prs);

        #[cfg(feature = "defmt")]
        defmt::debug!("DPS422 coefficients: {}", coefficients);

        self.coefficients = Some(coefficients);
        self.last_temp_scaled = None;
        self.configure(self.config).await
    }

    /// Write rate and precision for both channels.
    pub async fn configure(&mut self, config: Config) -> Result<(), PressureError<I2C::Error>> {
        self.bus.write_register(PRS_CFG, config.prs_cfg()).await?;
        self.bus.write_register(TMP_CFG, config.tmp_cfg()).await?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn coefficients(&self) -> Option<&Coefficients> {
        self.coefficients.as_ref()
    }

    /// Change the operating mode, preserving the status bits.
    pub async fn set_mode(&mut self, mode: MeasurementMode) -> Result<(), PressureError<I2C::Error>> {
        let meas_cfg = self.bus.read_register(MEAS_CFG).await?;
        let value = (meas_cfg & !MEAS_CTRL_MASK) | mode.bits();
        self.bus.write_register(MEAS_CFG, value).await?;
        Ok(())
    }

    /// Run a one-shot temperature conversion. Returns °C.
    pub async fn measure_temperature(&mut self) -> Result<f32, PressureError<I2C::Error>> {
        let coefficients = self.coefficients.ok_or(PressureError::NotInitialized)?;

        self.set_mode(MeasurementMode::Temperature).await?;
        self.wait_for(TMP_RDY).await?;
        let raw = self.bus.read_i24(TMP_B2).await?;

        self.last_temp_scaled = Some(Coefficients::scale_temperature(raw));
        Ok(coefficients.temperature(raw))
    }

    /// Run a one-shot pressure conversion. Returns Pa.
    ///
    /// A temperature conversion runs first if none has been made since
    /// [`init()`](Self::init).
    pub async fn measure_pressure(&mut self) -> Result<f32, PressureError<I2C::Error>> {
        let coefficients = self.coefficients.ok_or(PressureError::NotInitialized)?;
        let t_sc = match self.last_temp_scaled {
            Some(t_sc) => t_sc,
            None => {
                self.measure_temperature().await?;
                self.last_temp_scaled.unwrap_or(0.0)
            }
        };

        self.set_mode(MeasurementMode::Pressure).await?;
        self.wait_for(PRS_RDY).await?;
        let raw = self.bus.read_i24(PSR_B2).await?;

        Ok(coefficients.pressure(raw, t_sc))
    }

    /// Fresh temperature then pressure.
    pub async fn measure(&mut self) -> Result<Measurement, PressureError<I2C::Error>> {
        let temperature_c = self.measure_temperature().await?;
        let pressure_pa = self.measure_pressure().await?;
        Ok(Measurement {
            temperature_c,
            pressure_pa,
        })
    }

    /// Read the latest results while in [`MeasurementMode::Background`].
    ///
    /// Returns `Ok(None)` until both channels have produced a result.
    pub async fn read_background(&mut self) -> Result<Option<Measurement>, PressureError<I2C::Error>> {
        let coefficients = self.coefficients.ok_or(PressureError::NotInitialized)?;

        let status = self.bus.read_register(MEAS_CFG).await?;
        if status & (TMP_RDY | PRS_RDY) != (TMP_RDY | PRS_RDY) {
            return Ok(None);
        }

        let raw_t = self.bus.read_i24(TMP_B2).await?;
        let raw_p = self.bus.read_i24(PSR_B2).await?;
        let t_sc = Coefficients::scale_temperature(raw_t);
        self.last_temp_scaled = Some(t_sc);

        Ok(Some(Measurement {
            temperature_c: coefficients.temperature(raw_t),
            pressure_pa: coefficients.pressure(raw_p, t_sc),
        }))
    }

    /// Poll `MEAS_CFG` until every bit in `mask` is set.
    async fn wait_for(&mut self, mask: u8) -> Result<(), PressureError<I2C::Error>> {
        for _ in 0..POLL_ATTEMPTS {
            let status = self.bus.read_register(MEAS_CFG).await?;
            if status & mask == mask {
                return Ok(());
            }
            self.delay.delay_us(POLL_INTERVAL_US).await;
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("DPS422: timeout waiting for status 0x{:02X}", mask);
        Err(PressureError::Timeout)
    }

    pub fn release(self) -> (I2C, D) {
        (self.bus.release(), self.delay)
    }
}
