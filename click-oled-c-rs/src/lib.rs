//! Async driver and software rasterizer for the OLED C Click (SSD1351,
//! 96x96, 16-bit colour).
//!
//! Drawing happens in memory on a [`Canvas`]: clipped pixels, rectangles,
//! gradients, lines, ellipses, image blits, and bitmap-font text with word
//! wrap. [`OledC`] then streams the canvas (or a region of it) to the
//! panel over SPI.
//!
//! [`Canvas`] also implements the `embedded-graphics` [`DrawTarget`], so
//! the wider `embedded-graphics` ecosystem can render into it.
//!
//! # Quick Start
//!
//! ```ignore
//! use click_oled_c::{Canvas, Color, Config, Direction, Font, OledC, Rect, TextOptions};
//!
//! let mut oled = OledC::new(spi, dc, rst, Delay, Config::default());
//! oled.init().await?;
//!
//! let font = Font::parse(FONT_BLOB)?;
//! let mut canvas = Canvas::new(96, 96);
//! canvas.fill_gradient(Rect::new(0, 0, 96, 96), Color::BLUE, Color::BLACK, Direction::Vertical);
//! canvas.draw_text_in_rect(&font, "Hello from the OLED C", Color::WHITE,
//!     Rect::new(4, 4, 88, 88), TextOptions { centered: true, wrap: true });
//! oled.flush(&canvas).await?;
//! ```
//!
//! `examples/gradient-banner` is a complete RP2350 program built on this crate.
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging and `defmt::Format` for the public
//!   types.
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget

#![cfg_attr(not(test), no_std)]

pub mod canvas;
pub mod color;
mod driver;
pub mod error;
pub mod font;
pub mod oled_c;
pub mod rect;
pub mod registers;
pub mod text;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use canvas::{Canvas, Direction, MAX_HEIGHT, MAX_WIDTH};
pub use color::Color;
pub use error::{BitmapError, FontError, OledError};
pub use font::{Font, Glyph};
pub use oled_c::{Config, OledC};
pub use rect::Rect;
pub use text::{Lines, TextOptions};
