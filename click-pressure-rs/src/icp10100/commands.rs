//! ICP-10100 command words.
//!
//! The sensor has no register map; every access starts with a 16-bit
//! command sent MSB first.

/// Fixed 7-bit I2C address.
pub const ADDRESS: u8 = 0x63;

/// Read the product id word.
pub const READ_ID: [u8; 2] = [0xEF, 0xC8];

/// Soft reset.
pub const SOFT_RESET: [u8; 2] = [0x80, 0x5D];

/// Point the OTP reader at the calibration constants.
pub const OTP_SET_ADDRESS: [u8; 5] = [0xC5, 0x95, 0x00, 0x66, 0x9C];

/// Read the next OTP word (auto-increment).
pub const OTP_READ_NEXT: [u8; 2] = [0xC7, 0xF7];

/// Low six bits of the product id word.
pub const PRODUCT_ID_MASK: u16 = 0x3F;

/// Expected value of `id & PRODUCT_ID_MASK`.
pub const PRODUCT_ID: u16 = 0x08;

/// Number of calibration constants held in OTP.
pub const OTP_WORDS: usize = 4;

/// Time after soft reset before the next command.
pub const RESET_WAIT_US: u32 = 1_000;
