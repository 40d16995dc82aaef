//! Si4703 broadcast FM receiver.
//!
//! Frequencies are in units of 10 kHz: 101.1 MHz is `10110`.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::driver::RegisterFile;
use crate::error::FmError;
use crate::registers::*;

/// Band limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    /// 87.5 to 108 MHz.
    #[default]
    UsEurope,
    /// 76 to 108 MHz.
    JapanWide,
    /// 76 to 90 MHz.
    Japan,
}

impl Band {
    pub fn bits(self) -> u16 {
        match self {
            Band::UsEurope => 0b00,
            Band::JapanWide => 0b01,
            Band::Japan => 0b10,
        }
    }

    /// Lowest frequency, 10 kHz units.
    pub fn bottom(self) -> u16 {
        match self {
            Band::UsEurope => 8750,
            Band::JapanWide | Band::Japan => 7600,
        }
    }

    /// Highest frequency, 10 kHz units.
    pub fn top(self) -> u16 {
        match self {
            Band::UsEurope | Band::JapanWide => 10800,
            Band::Japan => 9000,
        }
    }
}

/// Channel spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Spacing {
    /// Americas, Korea.
    Khz200,
    /// Europe, Japan.
    #[default]
    Khz100,
    Khz50,
}

impl Spacing {
    pub fn bits(self) -> u16 {
        match self {
            Spacing::Khz200 => 0b00,
            Spacing::Khz100 => 0b01,
            Spacing::Khz50 => 0b10,
        }
    }

    /// Step in 10 kHz units.
    pub fn step(self) -> u16 {
        match self {
            Spacing::Khz200 => 20,
            Spacing::Khz100 => 10,
            Spacing::Khz50 => 5,
        }
    }
}

/// De-emphasis time constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeEmphasis {
    /// USA.
    Us75,
    /// Europe, Australia, Japan.
    #[default]
    Us50,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeekDirection {
    Up,
    Down,
}

/// Tuner configuration applied by [`Si4703::init`].
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub band: Band,
    pub spacing: Spacing,
    pub de_emphasis: DeEmphasis,
    /// 0..=15.
    pub volume: u8,
    /// Minimum RSSI for a seek to stop on a channel.
    pub seek_threshold: u8,
    /// Minimum SNR for a seek to stop, 0 (off) to 15.
    pub seek_snr: u8,
    /// FM impulse count a seek tolerates, 0 (off) to 15.
    pub seek_impulse_count: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            band: Band::UsEurope,
            spacing: Spacing::Khz100,
            de_emphasis: DeEmphasis::Us50,
            volume: 8,
            seek_threshold: 0x19,
            seek_snr: 0x4,
            seek_impulse_count: 0x8,
        }
    }
}

/// Frequency to channel number, or `None` if the frequency is outside
/// `band` or not on the `spacing` grid.
pub fn frequency_to_channel(freq: u16, band: Band, spacing: Spacing) -> Option<u16> {
    if freq < band.bottom() || freq > band.top() {
        return None;
    }
    let offset = freq - band.bottom();
    if offset % spacing.step() != 0 {
        return None;
    }
    Some(offset / spacing.step())
}

/// Channel number to frequency.
pub fn channel_to_frequency(channel: u16, band: Band, spacing: Spacing) -> u16 {
    band.bottom() + (channel & CHAN_MASK) * spacing.step()
}

type FmResult<T, I2C, RST> = Result<
    T,
    FmError<<I2C as embedded_hal_async::i2c::ErrorType>::Error, <RST as embedded_hal::digital::ErrorType>::Error>,
>;

/// Driver for the Si4703 on the FM Click.
///
/// The board ties SDIO low during reset so the chip comes up in 2-wire
/// (I2C) mode; only RST is driven here.
pub struct Si4703<I2C, RST, D> {
    regs: RegisterFile<I2C>,
    rst: RST,
    delay: D,
    config: Config,
    initialized: bool,
}

impl<I2C, RST, D> Si4703<I2C, RST, D>
where
    I2C: I2c,
    RST: OutputPin,
    D: DelayNs,
{
    pub fn new(i2c: I2C, rst: RST, delay: D, config: Config) -> Self {
        Self {
            regs: RegisterFile::new(i2c),
            rst,
            delay,
            config,
            initialized: false,
        }
    }

    /// Reset, start the oscillator, power up, check the device id and
    /// apply the configuration. Audio is unmuted afterwards.
    ///
    /// # Errors
    ///
    /// [`FmError::InvalidVolume`] for a configured volume above 15, and
    /// [`FmError::InvalidDeviceId`] if the manufacturer id is wrong.
    pub async fn init(&mut self) -> FmResult<(), I2C, RST> {
        if self.config.volume > 15 {
            return Err(FmError::InvalidVolume(self.config.volume));
        }

        self.rst.set_low().map_err(FmError::Pin)?;
        self.delay.delay_ms(RESET_PULSE_MS).await;
        self.rst.set_high().map_err(FmError::Pin)?;
        self.delay.delay_ms(RESET_PULSE_MS).await;

        self.regs.read_all().await.map_err(FmError::I2c)?;
        self.regs.set(TEST1, XOSC_ENABLE);
        self.regs.write_control().await.map_err(FmError::I2c)?;
        self.delay.delay_ms(OSCILLATOR_SETTLE_MS).await;

        self.regs.set(POWERCFG, DMUTE | ENABLE);
        self.regs.write_control().await.map_err(FmError::I2c)?;
        self.delay.delay_ms(POWER_UP_MS).await;

        self.regs.read_all().await.map_err(FmError::I2c)?;
        let id = self.regs.get(DEVICEID);
        if id & MANUFACTURER_MASK != MANUFACTURER_ID {
            #[cfg(feature = "defmt")]
            defmt::error!("Si4703 device id 0x{:04X}", id);
            return Err(FmError::InvalidDeviceId(id));
        }

        let c = self.config;
        let de = match c.de_emphasis {
            DeEmphasis::Us75 => 0,
            DeEmphasis::Us50 => DE,
        };
        self.regs.update(SYSCONFIG1, DE, de);
        self.regs.set(
            SYSCONFIG2,
            u16::from(c.seek_threshold) << SEEKTH_SHIFT
                | c.band.bits() << BAND_SHIFT
                | c.spacing.bits() << SPACE_SHIFT
                | u16::from(c.volume),
        );
        self.regs.set(
            SYSCONFIG3,
            u16::from(c.seek_snr & 0x0F) << SKSNR_SHIFT | u16::from(c.seek_impulse_count & 0x0F),
        );
        self.regs.write_control().await.map_err(FmError::I2c)?;

        #[cfg(feature = "defmt")]
        defmt::info!("Si4703 ready (chip 0x{:04X})", self.regs.get(CHIPID));
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the output volume, 0 (silent) to 15.
    pub async fn set_volume(&mut self, volume: u8) -> FmResult<(), I2C, RST> {
        self.ensure_init()?;
        if volume > 15 {
            return Err(FmError::InvalidVolume(volume));
        }
        self.regs.update(SYSCONFIG2, VOLUME_MASK, u16::from(volume));
        self.regs.write_control().await.map_err(FmError::I2c)?;
        self.config.volume = volume;
        Ok(())
    }

    pub async fn mute(&mut self, muted: bool) -> FmResult<(), I2C, RST> {
        self.ensure_init()?;
        // DMUTE is "disable mute".
        let (clear, set) = if muted { (DMUTE, 0) } else { (0, DMUTE) };
        self.regs.update(POWERCFG, clear, set);
        self.regs.write_control().await.map_err(FmError::I2c)
    }

    /// Force mono output.
    pub async fn set_mono(&mut self, mono: bool) -> FmResult<(), I2C, RST> {
        self.ensure_init()?;
        let (clear, set) = if mono { (0, MONO) } else { (MONO, 0) };
        self.regs.update(POWERCFG, clear, set);
        self.regs.write_control().await.map_err(FmError::I2c)
    }

    /// Tune to `freq` (10 kHz units) and wait for the tune to complete.
    ///
    /// # Errors
    ///
    /// [`FmError::InvalidFrequency`] if `freq` is outside the band or off
    /// the channel grid.
    pub async fn tune(&mut self, freq: u16) -> FmResult<(), I2C, RST> {
        self.ensure_init()?;
        let channel = frequency_to_channel(freq, self.config.band, self.config.spacing)
            .ok_or(FmError::InvalidFrequency(freq))?;

        self.regs.set(CHANNEL, TUNE | channel);
        self.regs.write_control().await.map_err(FmError::I2c)?;
        self.wait_stc(TUNE_POLL_ATTEMPTS).await?;

        self.regs.update(CHANNEL, TUNE, 0);
        self.finish_stc().await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("Tuned to {}0 kHz", freq);
        Ok(())
    }

    /// Seek to the next station in `direction`, wrapping at the band edge.
    ///
    /// Returns the station frequency, or `Ok(None)` if the seek went round
    /// the band without finding one.
    pub async fn seek(&mut self, direction: SeekDirection) -> FmResult<Option<u16>, I2C, RST> {
        self.ensure_init()?;
        let up = match direction {
            SeekDirection::Up => SEEKUP,
            SeekDirection::Down => 0,
        };
        self.regs.update(POWERCFG, SKMODE | SEEKUP, SEEK | up);
        self.regs.write_control().await.map_err(FmError::I2c)?;
        self.wait_stc(SEEK_POLL_ATTEMPTS).await?;
        let failed = self.regs.get(STATUSRSSI) & SF_BL != 0;
        let channel = self.regs.get(READCHAN) & CHAN_MASK;

        self.regs.update(POWERCFG, SEEK, 0);
        self.finish_stc().await?;

        if failed {
            #[cfg(feature = "defmt")]
            defmt::debug!("Seek found no station");
            return Ok(None);
        }
        Ok(Some(channel_to_frequency(channel, self.config.band, self.config.spacing)))
    }

    /// Current frequency, 10 kHz units.
    pub async fn channel(&mut self) -> FmResult<u16, I2C, RST> {
        self.ensure_init()?;
        self.regs.read_all().await.map_err(FmError::I2c)?;
        Ok(channel_to_frequency(
            self.regs.get(READCHAN),
            self.config.band,
            self.config.spacing,
        ))
    }

    /// Received signal strength, dBµV.
    pub async fn rssi(&mut self) -> FmResult<u8, I2C, RST> {
        self.ensure_init()?;
        self.regs.read_all().await.map_err(FmError::I2c)?;
        Ok((self.regs.get(STATUSRSSI) & RSSI_MASK) as u8)
    }

    pub async fn is_stereo(&mut self) -> FmResult<bool, I2C, RST> {
        self.ensure_init()?;
        self.regs.read_all().await.map_err(FmError::I2c)?;
        Ok(self.regs.get(STATUSRSSI) & ST != 0)
    }

    /// Power down. [`init()`](Self::init) must run again afterwards.
    pub async fn power_down(&mut self) -> FmResult<(), I2C, RST> {
        self.ensure_init()?;
        self.regs.update(POWERCFG, DSMUTE | DMUTE, ENABLE | DISABLE);
        self.regs.write_control().await.map_err(FmError::I2c)?;
        self.initialized = false;
        Ok(())
    }

    pub fn release(self) -> (I2C, RST, D) {
        (self.regs.release(), self.rst, self.delay)
    }

    fn ensure_init(&self) -> FmResult<(), I2C, RST> {
        if self.initialized {
            Ok(())
        } else {
            Err(FmError::NotInitialized)
        }
    }

    async fn wait_stc(&mut self, attempts: u32) -> FmResult<(), I2C, RST> {
        for _ in 0..attempts {
            self.regs.read_all().await.map_err(FmError::I2c)?;
            if self.regs.get(STATUSRSSI) & STC != 0 {
                return Ok(());
            }
            self.delay.delay_ms(STC_POLL_MS).await;
        }
        Err(FmError::Timeout)
    }

    /// Write the cleared TUNE/SEEK bit and wait for STC to drop.
    async fn finish_stc(&mut self) -> FmResult<(), I2C, RST> {
        self.regs.write_control().await.map_err(FmError::I2c)?;
        for _ in 0..TUNE_POLL_ATTEMPTS {
            self.regs.read_all().await.map_err(FmError::I2c)?;
            if self.regs.get(STATUSRSSI) & STC == 0 {
                return Ok(());
            }
            self.delay.delay_ms(STC_POLL_MS).await;
        }
        Err(FmError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    type Regs = [u16; REGISTER_COUNT];

    fn read(chip: &Regs) -> Transaction {
        let bytes = (0..REGISTER_COUNT)
            .flat_map(|i| chip[(READ_START + i) % REGISTER_COUNT].to_be_bytes())
            .collect();
        Transaction::read(ADDRESS, bytes)
    }

    fn write(chip: &Regs) -> Transaction {
        let bytes = (WRITE_START..=WRITE_END)
            .flat_map(|reg| chip[reg].to_be_bytes())
            .collect();
        Transaction::write(ADDRESS, bytes)
    }

    /// Power-up with the default config. Leaves `chip` as the tuner's
    /// register state afterwards.
    fn init_transactions(chip: &mut Regs) -> Vec<Transaction> {
        chip[DEVICEID] = 0x1242;
        chip[CHIPID] = 0x1253;
        let mut t = vec![read(chip)];
        chip[TEST1] = 0x8100;
        t.push(write(chip));
        chip[POWERCFG] = 0x4001;
        t.push(write(chip));
        t.push(read(chip));
        chip[SYSCONFIG1] = 0x0800;
        chip[SYSCONFIG2] = 0x1918;
        chip[SYSCONFIG3] = 0x0048;
        t.push(write(chip));
        t
    }

    fn reset_pin() -> PinMock {
        PinMock::new(&[PinTransaction::set(State::Low), PinTransaction::set(State::High)])
    }

    fn tuner(t: &[Transaction]) -> Si4703<I2cMock, PinMock, NoopDelay> {
        let mut radio = Si4703::new(I2cMock::new(t), reset_pin(), NoopDelay::new(), Config::default());
        block_on(radio.init()).unwrap();
        radio
    }

    fn finish(radio: Si4703<I2cMock, PinMock, NoopDelay>) {
        let (mut i2c, mut rst, _) = radio.release();
        i2c.done();
        rst.done();
    }

    #[test]
    fn frequency_channel_math() {
        let (eu, us) = (Band::UsEurope, Spacing::Khz100);
        assert_eq!(frequency_to_channel(10110, eu, us), Some(136));
        assert_eq!(frequency_to_channel(8750, eu, us), Some(0));
        assert_eq!(frequency_to_channel(10800, eu, us), Some(205));
        assert_eq!(frequency_to_channel(8740, eu, us), None);
        assert_eq!(frequency_to_channel(10810, eu, us), None);
        assert_eq!(frequency_to_channel(10115, eu, us), None);
        assert_eq!(frequency_to_channel(10115, eu, Spacing::Khz50), Some(273));
        assert_eq!(frequency_to_channel(10110, eu, Spacing::Khz200), Some(68));
        assert_eq!(frequency_to_channel(9010, Band::Japan, us), None);
        assert_eq!(frequency_to_channel(7600, Band::JapanWide, us), Some(0));

        assert_eq!(channel_to_frequency(136, eu, us), 10110);
        assert_eq!(channel_to_frequency(273, eu, Spacing::Khz50), 10115);
        assert_eq!(channel_to_frequency(0, Band::Japan, us), 7600);
    }

    #[test]
    fn init_powers_up_and_applies_config() {
        let mut chip = [0u16; REGISTER_COUNT];
        let t = init_transactions(&mut chip);
        let radio = tuner(&t);
        assert!(radio.is_initialized());
        finish(radio);
    }

    #[test]
    fn wrong_manufacturer_is_rejected() {
        let chip = [0u16; REGISTER_COUNT];
        let mut powered = chip;
        powered[TEST1] = 0x8100;
        let first_write = write(&powered);
        powered[POWERCFG] = 0x4001;
        let t = [read(&chip), first_write, write(&powered), read(&powered)];
        let mut radio = Si4703::new(I2cMock::new(&t), reset_pin(), NoopDelay::new(), Config::default());

        assert!(matches!(block_on(radio.init()), Err(FmError::InvalidDeviceId(0))));
        assert!(!radio.is_initialized());
        finish(radio);
    }

    #[test]
    fn tune_sets_channel_and_waits_for_stc() {
        let mut chip = [0u16; REGISTER_COUNT];
        let mut t = init_transactions(&mut chip);
        chip[CHANNEL] = 0x8088;
        t.push(write(&chip));
        chip[STATUSRSSI] = STC;
        t.push(read(&chip));
        chip[CHANNEL] = 0x0088;
        t.push(write(&chip));
        chip[STATUSRSSI] = 0;
        chip[READCHAN] = 0x0088;
        t.push(read(&chip));
        t.push(read(&chip));

        let mut radio = tuner(&t);
        block_on(radio.tune(10110)).unwrap();
        assert_eq!(block_on(radio.channel()).unwrap(), 10110);
        finish(radio);
    }

    #[test]
    fn seek_up_without_station_returns_none() {
        let mut chip = [0u16; REGISTER_COUNT];
        let mut t = init_transactions(&mut chip);
        chip[POWERCFG] = 0x4301;
        t.push(write(&chip));
        chip[STATUSRSSI] = STC | SF_BL;
        t.push(read(&chip));
        chip[POWERCFG] = 0x4201;
        t.push(write(&chip));
        chip[STATUSRSSI] = 0;
        t.push(read(&chip));

        let mut radio = tuner(&t);
        assert_eq!(block_on(radio.seek(SeekDirection::Up)).unwrap(), None);
        finish(radio);
    }

    #[test]
    fn seek_down_returns_station() {
        let mut chip = [0u16; REGISTER_COUNT];
        let mut t = init_transactions(&mut chip);
        chip[POWERCFG] = 0x4101;
        t.push(write(&chip));
        // Not complete on the first poll.
        t.push(read(&chip));
        chip[STATUSRSSI] = STC | ST | 0x2A;
        chip[READCHAN] = 136;
        t.push(read(&chip));
        chip[POWERCFG] = 0x4001;
        t.push(write(&chip));
        chip[STATUSRSSI] = ST | 0x2A;
        t.push(read(&chip));
        t.push(read(&chip));
        t.push(read(&chip));

        let mut radio = tuner(&t);
        assert_eq!(block_on(radio.seek(SeekDirection::Down)).unwrap(), Some(10110));
        assert_eq!(block_on(radio.rssi()).unwrap(), 0x2A);
        assert!(block_on(radio.is_stereo()).unwrap());
        finish(radio);
    }

    #[test]
    fn volume_and_mute_update_registers() {
        let mut chip = [0u16; REGISTER_COUNT];
        let mut t = init_transactions(&mut chip);
        chip[SYSCONFIG2] = 0x191F;
        t.push(write(&chip));
        chip[POWERCFG] = 0x0001;
        t.push(write(&chip));

        let mut radio = tuner(&t);
        assert!(matches!(block_on(radio.set_volume(16)), Err(FmError::InvalidVolume(16))));
        block_on(radio.set_volume(15)).unwrap();
        assert_eq!(radio.config().volume, 15);
        block_on(radio.mute(true)).unwrap();
        finish(radio);
    }

    #[test]
    fn operations_need_init() {
        let none: [Transaction; 0] = [];
        let pins: [PinTransaction; 0] = [];
        let mut radio =
            Si4703::new(I2cMock::new(&none), PinMock::new(&pins), NoopDelay::new(), Config::default());

        assert!(matches!(block_on(radio.tune(10110)), Err(FmError::NotInitialized)));
        assert!(matches!(block_on(radio.rssi()), Err(FmError::NotInitialized)));
        finish(radio);
    }
}
