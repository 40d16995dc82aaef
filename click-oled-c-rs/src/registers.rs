//! SSD1351 command set and OLED C panel geometry.

/// Visible panel width.
pub const PANEL_WIDTH: u8 = 96;
/// Visible panel height.
pub const PANEL_HEIGHT: u8 = 96;
/// The 96 visible columns sit in the middle of the 128-column RAM.
pub const COLUMN_OFFSET: u8 = 16;
pub const ROW_OFFSET: u8 = 0;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub const SET_COLUMN: u8 = 0x15;
pub const SET_ROW: u8 = 0x75;
pub const WRITE_RAM: u8 = 0x5C;
pub const SET_REMAP: u8 = 0xA0;
pub const START_LINE: u8 = 0xA1;
pub const DISPLAY_OFFSET: u8 = 0xA2;
pub const NORMAL_DISPLAY: u8 = 0xA6;
pub const FUNCTION_SELECT: u8 = 0xAB;
pub const SLEEP_ON: u8 = 0xAE;
pub const SLEEP_OFF: u8 = 0xAF;
pub const PRECHARGE: u8 = 0xB1;
pub const OSC_FREQ: u8 = 0xB3;
pub const VSL: u8 = 0xB4;
pub const GPIO: u8 = 0xB5;
pub const PRECHARGE2: u8 = 0xB6;
pub const VCOMH: u8 = 0xBE;
pub const CONTRAST_ABC: u8 = 0xC1;
pub const MASTER_CURRENT: u8 = 0xC7;
pub const MUX_RATIO: u8 = 0xCA;
pub const COMMAND_LOCK: u8 = 0xFD;

/// Highest accepted master current step.
pub const MASTER_CURRENT_MAX: u8 = 0x0F;

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Unlock the driver IC for commands.
pub const UNLOCK: u8 = 0x12;
/// Make A2, B1, B3, BB, BE and C1 accessible.
pub const UNLOCK_EXTENDED: u8 = 0xB1;
/// Horizontal increment, column 0 mapped to SEG0, colour order C-B-A,
/// COM scan reversed, odd/even split, 65k colours.
pub const REMAP_65K: u8 = 0x74;
/// Fosc divide by 2, highest oscillator frequency.
pub const OSC_DEFAULT: u8 = 0xF1;
/// 96 multiplexed rows.
pub const MUX_96: u8 = PANEL_HEIGHT - 1;
/// Internal VDD regulator enabled.
pub const FUNCTION_INTERNAL_VDD: u8 = 0x01;

/// Power-up command sequence: command byte followed by its arguments.
/// The per-channel contrast and master current entries are written
/// separately from the driver configuration.
pub const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (COMMAND_LOCK, &[UNLOCK]),
    (COMMAND_LOCK, &[UNLOCK_EXTENDED]),
    (SLEEP_ON, &[]),
    (OSC_FREQ, &[OSC_DEFAULT]),
    (MUX_RATIO, &[MUX_96]),
    (SET_REMAP, &[REMAP_65K]),
    (START_LINE, &[0x00]),
    (DISPLAY_OFFSET, &[0x00]),
    (GPIO, &[0x00]),
    (FUNCTION_SELECT, &[FUNCTION_INTERNAL_VDD]),
    (PRECHARGE, &[0x32]),
    (VCOMH, &[0x05]),
    (NORMAL_DISPLAY, &[]),
    (VSL, &[0xA0, 0xB5, 0x55]),
    (PRECHARGE2, &[0x01]),
];

/// Reset pulse and settle time, in milliseconds.
pub const RESET_PULSE_MS: u32 = 1;
pub const RESET_SETTLE_MS: u32 = 10;
