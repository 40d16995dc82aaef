//! CR95HF SPI control bytes, commands and ISO 14443-A frames.

// ---------------------------------------------------------------------------
// SPI control byte (first byte of every transaction)
// ---------------------------------------------------------------------------

pub const CTRL_SEND: u8 = 0x00;
pub const CTRL_RESET: u8 = 0x01;
pub const CTRL_READ: u8 = 0x02;
pub const CTRL_POLL: u8 = 0x03;

/// Poll flags: bit 3 set when a response can be read.
pub const FLAG_READY: u8 = 0x08;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub const CMD_IDN: u8 = 0x01;
pub const CMD_PROTOCOL_SELECT: u8 = 0x02;
pub const CMD_SEND_RECV: u8 = 0x04;
pub const CMD_ECHO: u8 = 0x55;

/// Longest command payload this driver sends.
pub const MAX_COMMAND_DATA: usize = 8;

// ---------------------------------------------------------------------------
// Result codes
// ---------------------------------------------------------------------------

pub const RESULT_OK: u8 = 0x00;
/// SendRecv answered with a tag frame.
pub const RESULT_FRAME: u8 = 0x80;
/// SendRecv timed out: no tag answered.
pub const RESULT_NO_TAG: u8 = 0x87;

// ---------------------------------------------------------------------------
// IDN reply: 13 byte NUL-terminated name followed by the ROM CRC
// ---------------------------------------------------------------------------

pub const IDN_NAME_LEN: usize = 13;
pub const IDN_LEN: usize = IDN_NAME_LEN + 2;

// ---------------------------------------------------------------------------
// ISO 14443-A
// ---------------------------------------------------------------------------

/// REQA, 7 significant bits.
pub const REQA: [u8; 2] = [0x26, 0x07];
/// Anticollision cascade level 1, 8 significant bits, no CRC.
pub const ANTICOLLISION_CL1: [u8; 3] = [0x93, 0x20, 0x08];

/// Tag frames carry three status bytes after the payload.
pub const FRAME_TRAILER: usize = 3;
pub const ATQA_LEN: usize = 2;
/// UID CL1 plus BCC.
pub const UID_CL1_LEN: usize = 5;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// IRQ_IN low pulse that wakes the chip (min 10 µs).
pub const WAKE_PULSE_US: u32 = 100;
/// Oscillator start-up after wake-up.
pub const STARTUP_MS: u32 = 10;
pub const POLL_INTERVAL_US: u32 = 500;
pub const POLL_ATTEMPTS: u32 = 100;
