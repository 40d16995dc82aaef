//! TDK InvenSense ICP-10100 barometric pressure sensor (I2C).

mod calibration;
mod commands;
mod crc;
mod driver;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

pub use calibration::{temperature_c, Calibration, ConversionConstants};
pub use commands::ADDRESS;

use crate::error::PressureError;
use commands::*;
use crc::checked_word;
use driver::CommandBus;

/// Measurement mode. Each mode trades conversion time for noise.
/// All commands here return temperature first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementMode {
    /// 1.8 ms, 3.2 Pa noise.
    LowPower,
    /// 6.3 ms, 1.6 Pa noise.
    #[default]
    Normal,
    /// 23.8 ms, 0.8 Pa noise.
    LowNoise,
    /// 94.5 ms, 0.4 Pa noise.
    UltraLowNoise,
}

impl MeasurementMode {
    fn command(self) -> [u8; 2] {
        match self {
            MeasurementMode::LowPower => [0x60, 0x9C],
            MeasurementMode::Normal => [0x68, 0x25],
            MeasurementMode::LowNoise => [0x70, 0xDF],
            MeasurementMode::UltraLowNoise => [0x78, 0x66],
        }
    }

    /// Maximum conversion time in microseconds.
    pub fn conversion_time_us(self) -> u32 {
        match self {
            MeasurementMode::LowPower => 1_800,
            MeasurementMode::Normal => 6_300,
            MeasurementMode::LowNoise => 23_800,
            MeasurementMode::UltraLowNoise => 94_500,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub mode: MeasurementMode,
}

/// Compensated result of one conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub temperature_c: f32,
    pub pressure_pa: f32,
}

/// Driver for the ICP-10100.
pub struct Icp10100<I2C, D> {
    bus: CommandBus<I2C>,
    delay: D,
    config: Config,
    calibration: Option<Calibration>,
}

impl<I2C, D> Icp10100<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, config: Config) -> Self {
        Self {
            bus: CommandBus::new(i2c),
            delay,
            config,
            calibration: None,
        }
    }

    /// Verify the product id and read the four OTP calibration constants.
    ///
    /// # Errors
    ///
    /// * [`PressureError::Crc`] if any returned word fails its checksum.
    /// * [`PressureError::InvalidChipId`] if the id does not match.
    pub async fn init(&mut self) -> Result<(), PressureError<I2C::Error>> {
        let mut id = [0u8; 3];
        self.bus.command_read(&READ_ID, &mut id).await?;
        let id = checked_word(&id).ok_or(PressureError::Crc)?;
        if id & PRODUCT_ID_MASK != PRODUCT_ID {
            #[cfg(feature = "defmt")]
            defmt::error!("ICP-10100: unexpected id 0x{:04X}", id);
            return Err(PressureError::InvalidChipId(id as u8));
        }

        self.bus.command(&OTP_SET_ADDRESS).await?;
        let mut constants = [0i16; OTP_WORDS];
        for constant in constants.iter_mut() {
            let mut word = [0u8; 3];
            self.bus.command_read(&OTP_READ_NEXT, &mut word).await?;
            *constant = checked_word(&word).ok_or(PressureError::Crc)? as i16;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ICP-10100 OTP constants: {}", constants);

        self.calibration = Some(Calibration { constants });
        Ok(())
    }

    pub async fn soft_reset(&mut self) -> Result<(), PressureError<I2C::Error>> {
        self.bus.command(&SOFT_RESET).await?;
        self.delay.delay_us(RESET_WAIT_US).await;
        Ok(())
    }

    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    pub fn set_mode(&mut self, mode: MeasurementMode) {
        self.config.mode = mode;
    }

    /// Start a conversion, wait for it, and return the raw
    /// `(pressure, temperature)` words.
    pub async fn measure_raw(&mut self) -> Result<(u32, u16), PressureError<I2C::Error>> {
        let mode = self.config.mode;
        self.bus.command(&mode.command()).await?;
        self.delay.delay_us(mode.conversion_time_us()).await;

        let mut data = [0u8; 9];
        self.bus.read(&mut data).await?;

        let t_raw = checked_word(&data[0..3]).ok_or(PressureError::Crc)?;
        checked_word(&data[3..6]).ok_or(PressureError::Crc)?;
        checked_word(&data[6..9]).ok_or(PressureError::Crc)?;

        // The last pressure byte (data[7]) is always zero and is dropped.
        let p_raw = (data[3] as u32) << 16 | (data[4] as u32) << 8 | data[6] as u32;
        Ok((p_raw, t_raw))
    }

    /// One compensated conversion in the configured mode.
    pub async fn measure(&mut self) -> Result<Measurement, PressureError<I2C::Error>> {
        let calibration = self.calibration.ok_or(PressureError::NotInitialized)?;
        let (p_raw, t_raw) = self.measure_raw().await?;

        Ok(Measurement {
            temperature_c: temperature_c(t_raw),
            pressure_pa: calibration.pressure(p_raw, t_raw),
        })
    }

    pub fn release(self) -> (I2C, D) {
        (self.bus.release(), self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icp10100::crc::crc8;
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    fn triplet(word: u16) -> [u8; 3] {
        let [msb, lsb] = word.to_be_bytes();
        [msb, lsb, crc8(&[msb, lsb])]
    }

    fn init_transactions(constants: [i16; 4]) -> Vec<Transaction> {
        let mut t = vec![
            Transaction::write_read(ADDRESS, READ_ID.to_vec(), triplet(0x0048).to_vec()),
            Transaction::write(ADDRESS, OTP_SET_ADDRESS.to_vec()),
        ];
        for c in constants {
            t.push(Transaction::write_read(
                ADDRESS,
                OTP_READ_NEXT.to_vec(),
                triplet(c as u16).to_vec(),
            ));
        }
        t
    }

    #[test]
    fn init_reads_signed_otp_constants() {
        let constants = [-700, -500, 1800, 2900];
        let mut sensor = Icp10100::new(
            I2cMock::new(&init_transactions(constants)),
            NoopDelay::new(),
            Config::default(),
        );

        block_on(sensor.init()).unwrap();
        assert_eq!(sensor.calibration().unwrap().constants, constants);

        let (mut i2c, _) = sensor.release();
        i2c.done();
    }

    #[test]
    fn init_rejects_bad_crc() {
        let t = [Transaction::write_read(
            ADDRESS,
            READ_ID.to_vec(),
            vec![0x00, 0x48, 0x00],
        )];
        let mut sensor = Icp10100::new(I2cMock::new(&t), NoopDelay::new(), Config::default());

        assert_eq!(block_on(sensor.init()), Err(PressureError::Crc));

        let (mut i2c, _) = sensor.release();
        i2c.done();
    }

    #[test]
    fn init_rejects_unknown_product() {
        let t = [Transaction::write_read(
            ADDRESS,
            READ_ID.to_vec(),
            triplet(0x0041).to_vec(),
        )];
        let mut sensor = Icp10100::new(I2cMock::new(&t), NoopDelay::new(), Config::default());

        assert_eq!(
            block_on(sensor.init()),
            Err(PressureError::InvalidChipId(0x41))
        );

        let (mut i2c, _) = sensor.release();
        i2c.done();
    }

    #[test]
    fn measure_decodes_temperature_first_frame() {
        let constants = [-700, -500, 1800, 2900];
        let mut t = init_transactions(constants);
        t.push(Transaction::write(ADDRESS, vec![0x70, 0xDF]));

        let mut frame = Vec::new();
        frame.extend(triplet(0x8000));
        frame.extend(triplet(0x5B8D));
        frame.extend(triplet(0x8000));
        t.push(Transaction::read(ADDRESS, frame));

        let config = Config {
            mode: MeasurementMode::LowNoise,
        };
        let mut sensor = Icp10100::new(I2cMock::new(&t), NoopDelay::new(), config);
        block_on(sensor.init()).unwrap();

        let m = block_on(sensor.measure()).unwrap();
        assert_eq!(m.temperature_c, 42.5);

        let expected = Calibration { constants }.pressure(0x5B8D80, 0x8000);
        assert_eq!(m.pressure_pa, expected);

        let (mut i2c, _) = sensor.release();
        i2c.done();
    }

    #[test]
    fn measure_without_calibration_is_rejected() {
        let none: [Transaction; 0] = [];
        let mut sensor = Icp10100::new(I2cMock::new(&none), NoopDelay::new(), Config::default());

        assert_eq!(
            block_on(sensor.measure()),
            Err(PressureError::NotInitialized)
        );

        let (mut i2c, _) = sensor.release();
        i2c.done();
    }
}
