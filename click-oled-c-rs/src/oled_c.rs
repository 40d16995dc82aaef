//! High-level OLED C display driver.
//!
//! [`OledC`] drives the SSD1351 controller on the OLED C Click: reset,
//! power-up sequence, contrast, and transfer of a [`Canvas`] (or part of
//! one) into display RAM.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;

use crate::canvas::{Canvas, MAX_WIDTH};
use crate::driver::Interface;
use crate::error::OledError;
use crate::rect::Rect;
use crate::registers::*;

/// Power-up settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Per-channel contrast for colours A, B and C.
    pub contrast: [u8; 3],
    /// Master current step, `0..=15`.
    pub master_current: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contrast: [0xC8, 0x80, 0xC8],
            master_current: MASTER_CURRENT_MAX,
        }
    }
}

/// Async driver for the 96x96 SSD1351 panel.
///
/// # Lifecycle
///
/// 1. [`OledC::new()`]: no bus traffic.
/// 2. [`OledC::init()`]: hardware reset and power-up sequence.
/// 3. Draw into a [`Canvas`], then [`OledC::flush()`] it.
pub struct OledC<SPI, DC, RST, D> {
    iface: Interface<SPI, DC>,
    rst: RST,
    delay: D,
    config: Config,
    initialized: bool,
}

type OledResult<T, SPI, DC> = Result<
    T,
    OledError<<SPI as embedded_hal_async::spi::ErrorType>::Error, <DC as embedded_hal::digital::ErrorType>::Error>,
>;

impl<SPI, DC, RST, D> OledC<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin<Error = DC::Error>,
    D: DelayNs,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: D, config: Config) -> Self {
        Self {
            iface: Interface::new(spi, dc),
            rst,
            delay,
            config,
            initialized: false,
        }
    }

    /// Pulse reset and run the power-up sequence, leaving the display on.
    ///
    /// # Errors
    ///
    /// [`OledError::InvalidContrast`] if the configured master current is
    /// above 15; bus and pin errors otherwise.
    pub async fn init(&mut self) -> OledResult<(), SPI, DC> {
        if self.config.master_current > MASTER_CURRENT_MAX {
            return Err(OledError::InvalidContrast(self.config.master_current));
        }

        self.rst.set_low().map_err(OledError::Pin)?;
        self.delay.delay_ms(RESET_PULSE_MS).await;
        self.rst.set_high().map_err(OledError::Pin)?;
        self.delay.delay_ms(RESET_SETTLE_MS).await;

        for &(cmd, args) in INIT_SEQUENCE {
            self.iface.command(cmd, args).await?;
        }
        self.iface.command(CONTRAST_ABC, &self.config.contrast).await?;
        self.iface
            .command(MASTER_CURRENT, &[self.config.master_current])
            .await?;
        self.iface.command(SLEEP_OFF, &[]).await?;

        #[cfg(feature = "defmt")]
        defmt::info!("OLED C initialised");

        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_initialized(&self) -> OledResult<(), SPI, DC> {
        if self.initialized {
            Ok(())
        } else {
            Err(OledError::NotInitialized)
        }
    }

    /// Set the master current (overall brightness), `0..=15`.
    pub async fn set_contrast(&mut self, level: u8) -> OledResult<(), SPI, DC> {
        self.ensure_initialized()?;
        if level > MASTER_CURRENT_MAX {
            return Err(OledError::InvalidContrast(level));
        }
        self.iface.command(MASTER_CURRENT, &[level]).await?;
        self.config.master_current = level;
        Ok(())
    }

    /// Set the per-channel contrast for colours A, B and C.
    pub async fn set_channel_contrast(&mut self, contrast: [u8; 3]) -> OledResult<(), SPI, DC> {
        self.ensure_initialized()?;
        self.iface.command(CONTRAST_ABC, &contrast).await?;
        self.config.contrast = contrast;
        Ok(())
    }

    pub async fn display_on(&mut self) -> OledResult<(), SPI, DC> {
        self.ensure_initialized()?;
        self.iface.command(SLEEP_OFF, &[]).await
    }

    pub async fn display_off(&mut self) -> OledResult<(), SPI, DC> {
        self.ensure_initialized()?;
        self.iface.command(SLEEP_ON, &[]).await
    }

    /// Restrict the next RAM write to `area` in panel coordinates.
    ///
    /// `area` is clamped to the panel; the clamped window is returned.
    pub async fn set_window(&mut self, area: Rect) -> OledResult<Rect, SPI, DC> {
        self.ensure_initialized()?;
        let area = area.clamp_to(PANEL_WIDTH as u32, PANEL_HEIGHT as u32);
        if area.is_empty() {
            return Ok(area);
        }

        let x0 = area.x as u8 + COLUMN_OFFSET;
        let y0 = area.y as u8 + ROW_OFFSET;
        let x1 = x0 + area.width as u8 - 1;
        let y1 = y0 + area.height as u8 - 1;
        self.iface.command(SET_COLUMN, &[x0, x1]).await?;
        self.iface.command(SET_ROW, &[y0, y1]).await?;
        Ok(area)
    }

    /// Write the whole canvas at the panel origin.
    pub async fn flush(&mut self, canvas: &Canvas) -> OledResult<(), SPI, DC> {
        let whole = Rect::new(0, 0, canvas.width() as u32, canvas.height() as u32);
        self.flush_region(canvas, whole).await
    }

    /// Write the part of `canvas` inside `region` to the same place on the
    /// panel. Pixels go out big-endian, one row per transaction.
    pub async fn flush_region(&mut self, canvas: &Canvas, region: Rect) -> OledResult<(), SPI, DC> {
        self.ensure_initialized()?;
        let region = region.clamp_to(canvas.width() as u32, canvas.height() as u32);
        let area = self.set_window(region).await?;
        if area.is_empty() {
            return Ok(());
        }

        self.iface.command(WRITE_RAM, &[]).await?;

        let mut buf = [0u8; MAX_WIDTH * 2];
        let (x0, x1) = (area.x as usize, area.right() as usize);
        for y in area.y as usize..area.bottom() as usize {
            let row = &canvas.row(y)[x0..x1];
            for (bytes, pixel) in buf.chunks_exact_mut(2).zip(row) {
                bytes.copy_from_slice(&pixel.raw().to_be_bytes());
            }
            self.iface.data(&buf[..row.len() * 2]).await?;
        }
        Ok(())
    }

    pub fn release(self) -> (SPI, DC, RST, D) {
        let (spi, dc) = self.iface.release();
        (spi, dc, self.rst, self.delay)
    }
}
