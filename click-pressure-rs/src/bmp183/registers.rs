//! BMP183 register map.
//!
//! Every register address has bit 7 set. On the SPI bus bit 7 of the
//! control byte selects the direction: `1` reads, `0` writes, so write
//! accesses clear it with [`WRITE_MASK`].

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

/// First byte of the 22-byte factory calibration block (AC1 MSB).
pub const CALIBRATION_START: u8 = 0xAA;

/// Chip identifier register.
pub const CHIP_ID: u8 = 0xD0;

/// Soft reset register. Writing [`SOFT_RESET_VALUE`] resets the device.
pub const SOFT_RESET: u8 = 0xE0;

/// Measurement control register.
pub const CTRL_MEAS: u8 = 0xF4;

/// Conversion result, MSB first (`0xF6` MSB, `0xF7` LSB, `0xF8` XLSB).
pub const OUT_MSB: u8 = 0xF6;

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Expected content of [`CHIP_ID`].
pub const CHIP_ID_VALUE: u8 = 0x55;

/// Value that triggers a power-on-reset sequence.
pub const SOFT_RESET_VALUE: u8 = 0xB6;

/// `CTRL_MEAS` command starting a temperature conversion.
pub const CMD_TEMPERATURE: u8 = 0x2E;

/// `CTRL_MEAS` command starting a pressure conversion; OSS goes in bits 7:6.
pub const CMD_PRESSURE: u8 = 0x34;

/// Number of bytes in the calibration block.
pub const CALIBRATION_LEN: usize = 22;

/// Temperature conversion time in microseconds.
pub const TEMPERATURE_WAIT_US: u32 = 4_500;

// ---------------------------------------------------------------------------
// SPI framing
// ---------------------------------------------------------------------------

/// Read bit of the SPI control byte.
pub const READ_BIT: u8 = 0x80;

/// Mask clearing the read bit for write accesses.
pub const WRITE_MASK: u8 = 0x7F;
