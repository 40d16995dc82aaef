//! Si4703 register map.
//!
//! All registers are 16 bits. A read always starts at `STATUSRSSI` and
//! wraps through `0x0F` to `0x00`; a write always starts at `POWERCFG`.

pub const ADDRESS: u8 = 0x10;

pub const REGISTER_COUNT: usize = 16;
/// First register returned by a read.
pub const READ_START: usize = STATUSRSSI;
/// First register written by a write.
pub const WRITE_START: usize = POWERCFG;
/// Last register this driver writes.
pub const WRITE_END: usize = TEST1;

// ---------------------------------------------------------------------------
// Register indices
// ---------------------------------------------------------------------------

pub const DEVICEID: usize = 0x00;
pub const CHIPID: usize = 0x01;
pub const POWERCFG: usize = 0x02;
pub const CHANNEL: usize = 0x03;
pub const SYSCONFIG1: usize = 0x04;
pub const SYSCONFIG2: usize = 0x05;
pub const SYSCONFIG3: usize = 0x06;
pub const TEST1: usize = 0x07;
pub const STATUSRSSI: usize = 0x0A;
pub const READCHAN: usize = 0x0B;

// ---------------------------------------------------------------------------
// Bits
// ---------------------------------------------------------------------------

pub const MANUFACTURER_MASK: u16 = 0x0FFF;
pub const MANUFACTURER_ID: u16 = 0x0242;

// POWERCFG
pub const DSMUTE: u16 = 1 << 15;
pub const DMUTE: u16 = 1 << 14;
pub const MONO: u16 = 1 << 13;
pub const SKMODE: u16 = 1 << 10;
pub const SEEKUP: u16 = 1 << 9;
pub const SEEK: u16 = 1 << 8;
pub const DISABLE: u16 = 1 << 6;
pub const ENABLE: u16 = 1 << 0;

// CHANNEL
pub const TUNE: u16 = 1 << 15;
pub const CHAN_MASK: u16 = 0x03FF;

// SYSCONFIG1
pub const DE: u16 = 1 << 11;

// SYSCONFIG2
pub const SEEKTH_SHIFT: u16 = 8;
pub const BAND_SHIFT: u16 = 6;
pub const SPACE_SHIFT: u16 = 4;
pub const VOLUME_MASK: u16 = 0x000F;

// SYSCONFIG3
pub const SKSNR_SHIFT: u16 = 4;

// TEST1
/// Crystal oscillator enable plus the reserved bit the power-up
/// sequence sets.
pub const XOSC_ENABLE: u16 = 0x8100;

// STATUSRSSI
pub const STC: u16 = 1 << 14;
pub const SF_BL: u16 = 1 << 13;
pub const ST: u16 = 1 << 8;
pub const RSSI_MASK: u16 = 0x00FF;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

pub const RESET_PULSE_MS: u32 = 1;
/// Crystal oscillator settle time.
pub const OSCILLATOR_SETTLE_MS: u32 = 500;
/// Power-up time after ENABLE.
pub const POWER_UP_MS: u32 = 110;
pub const STC_POLL_MS: u32 = 5;
/// A tune completes in 60 ms.
pub const TUNE_POLL_ATTEMPTS: u32 = 40;
/// A full-band seek can visit every channel.
pub const SEEK_POLL_ATTEMPTS: u32 = 4000;
