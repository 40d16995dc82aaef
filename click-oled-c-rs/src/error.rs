//! Error types for the OLED C driver and the font/bitmap parsers.

use core::fmt;

/// Errors that can occur when talking to the SSD1351.
#[derive(Debug, PartialEq, Eq)]
pub enum OledError<SpiE, PinE> {
    /// SPI bus error.
    Spi(SpiE),
    /// D/C or reset pin error.
    Pin(PinE),
    /// Contrast or master current value out of range.
    InvalidContrast(u8),
    /// An operation was attempted before [`OledC::init()`](crate::OledC::init)
    /// was called.
    NotInitialized,
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for OledError<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::Spi(e) => write!(f, "SPI error: {:?}", e),
            OledError::Pin(e) => write!(f, "pin error: {:?}", e),
            OledError::InvalidContrast(v) => write!(f, "contrast {} out of range", v),
            OledError::NotInitialized => write!(f, "display not initialised"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<SpiE, PinE> defmt::Format for OledError<SpiE, PinE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Spi(_e) => defmt::write!(f, "SPI error"),
            OledError::Pin(_e) => defmt::write!(f, "Pin error"),
            OledError::InvalidContrast(v) => defmt::write!(f, "Invalid contrast {}", v),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}

/// Reasons a font blob is rejected by [`Font::parse`](crate::Font::parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// The blob does not start with `mFnt`.
    BadMagic,
    /// Glyph height of zero.
    ZeroHeight,
    /// The length table or glyph data ends early.
    Truncated,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FontError::BadMagic => write!(f, "missing mFnt magic"),
            FontError::ZeroHeight => write!(f, "glyph height is zero"),
            FontError::Truncated => write!(f, "font data truncated"),
        }
    }
}

/// Reasons a bitmap blob is rejected by
/// [`Canvas::from_blob`](crate::Canvas::from_blob).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapError {
    /// Width or height exceeds the 96x96 canvas.
    TooLarge,
    /// Fewer pixel bytes than `width * height * 2`.
    Truncated,
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BitmapError::TooLarge => write!(f, "bitmap larger than 96x96"),
            BitmapError::Truncated => write!(f, "bitmap data truncated"),
        }
    }
}
