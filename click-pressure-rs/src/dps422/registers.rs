//! DPS422 register map.

/// Default 7-bit I2C address (SDO high).
pub const DEFAULT_ADDRESS: u8 = 0x77;

/// Alternate 7-bit I2C address (SDO low).
pub const ALTERNATE_ADDRESS: u8 = 0x76;

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

/// Pressure result, 24-bit two's complement, MSB first.
pub const PSR_B2: u8 = 0x00;

/// Temperature result, 24-bit two's complement, MSB first.
pub const TMP_B2: u8 = 0x03;

/// Pressure configuration: rate in bits 6:4, precision in bits 3:0.
pub const PRS_CFG: u8 = 0x06;

/// Temperature configuration: rate in bits 6:4, precision in bits 2:0.
pub const TMP_CFG: u8 = 0x07;

/// Measurement configuration and status.
pub const MEAS_CFG: u8 = 0x08;

/// Soft reset and FIFO flush.
pub const RESET: u8 = 0x0C;

/// Product and revision identifier.
pub const PROD_ID: u8 = 0x1D;

/// Start of the three temperature calibration bytes.
pub const COEF_TEMP: u8 = 0x20;

/// Start of the twenty pressure calibration bytes.
pub const COEF_PRS: u8 = 0x26;

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// Expected `PROD_ID` value.
pub const PRODUCT_ID: u8 = 0x0A;

/// `RESET` value triggering a soft reset.
pub const SOFT_RESET: u8 = 0x09;

/// `MEAS_CFG` bit: calibration coefficients are readable.
pub const COEF_RDY: u8 = 1 << 7;

/// `MEAS_CFG` bit: sensor initialisation complete.
pub const SENSOR_RDY: u8 = 1 << 6;

/// `MEAS_CFG` bit: a new temperature result is available.
pub const TMP_RDY: u8 = 1 << 5;

/// `MEAS_CFG` bit: a new pressure result is available.
pub const PRS_RDY: u8 = 1 << 4;

/// `MEAS_CFG` measurement control field.
pub const MEAS_CTRL_MASK: u8 = 0x07;

/// Number of temperature coefficient bytes.
pub const COEF_TEMP_LEN: usize = 3;

/// Number of pressure coefficient bytes.
pub const COEF_PRS_LEN: usize = 20;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Interval between ready-flag polls.
pub const POLL_INTERVAL_US: u32 = 2_000;

/// Ready-flag polls before giving up (the slowest 128x conversion takes
/// just over 200 ms).
pub const POLL_ATTEMPTS: u32 = 150;

/// Settling time after a soft reset.
pub const RESET_WAIT_US: u32 = 40_000;
