//! MAX31855 frame layout and DS1825 One-Wire commands.

// ---------------------------------------------------------------------------
// MAX31855 32-bit frame
// ---------------------------------------------------------------------------

/// Bits 31:18, signed thermocouple temperature.
pub const TC_SHIFT: u32 = 18;
pub const TC_BITS: u32 = 14;
/// 0.25 °C per LSB.
pub const TC_LSB_C: f32 = 0.25;

/// Bit 16, set when any of the fault bits is set.
pub const FAULT: u32 = 1 << 16;

/// Bits 15:4, signed cold-junction temperature.
pub const INTERNAL_SHIFT: u32 = 4;
pub const INTERNAL_BITS: u32 = 12;
/// 0.0625 °C per LSB.
pub const INTERNAL_LSB_C: f32 = 0.0625;

pub const FAULT_SCV: u32 = 1 << 2;
pub const FAULT_SCG: u32 = 1 << 1;
pub const FAULT_OC: u32 = 1 << 0;

// ---------------------------------------------------------------------------
// DS1825
// ---------------------------------------------------------------------------

pub const READ_ROM: u8 = 0x33;
pub const SKIP_ROM: u8 = 0xCC;
pub const CONVERT_T: u8 = 0x44;
pub const WRITE_SCRATCHPAD: u8 = 0x4E;
pub const READ_SCRATCHPAD: u8 = 0xBE;
pub const COPY_SCRATCHPAD: u8 = 0x48;

pub const FAMILY_CODE: u8 = 0x3B;
pub const ROM_LEN: usize = 8;
pub const SCRATCHPAD_LEN: usize = 9;

/// Resolution bits R1:R0 sit at 6:5 in the configuration register.
pub const RESOLUTION_SHIFT: u8 = 5;
/// Location pins AD3:AD0, read-only.
pub const ADDRESS_MASK: u8 = 0x0F;
/// Bits 3:0 always read back as ones on write.
pub const CONFIG_RESERVED: u8 = 0x0F;

/// Time the EEPROM copy needs.
pub const COPY_WAIT_MS: u32 = 10;
