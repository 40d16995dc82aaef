//! 16-bit packed colour.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// RGB565 colour: red in bits 15:11, green in 10:5, blue in 4:0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const CYAN: Color = Color(0x07FF);
    pub const MAGENTA: Color = Color(0xF81F);

    /// Pack 8-bit channels, dropping the low bits.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3))
    }

    /// Convert a BGR565 word (blue in the high bits), as stored in bitmap
    /// blobs.
    pub const fn from_bgr565(raw: u16) -> Self {
        let b = raw >> 11;
        let g = (raw >> 5) & 0x3F;
        let r = raw & 0x1F;
        Color((r << 11) | (g << 5) | b)
    }

    pub const fn to_bgr565(self) -> u16 {
        // The swap is its own inverse.
        Color::from_bgr565(self.0).0
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Red channel expanded to 8 bits.
    pub const fn r(self) -> u8 {
        let r = (self.0 >> 11) as u8;
        (r << 3) | (r >> 2)
    }

    /// Green channel expanded to 8 bits.
    pub const fn g(self) -> u8 {
        let g = ((self.0 >> 5) & 0x3F) as u8;
        (g << 2) | (g >> 4)
    }

    /// Blue channel expanded to 8 bits.
    pub const fn b(self) -> u8 {
        let b = (self.0 & 0x1F) as u8;
        (b << 3) | (b >> 2)
    }

    /// Linear interpolation of each 8-bit channel, `step` of `steps`.
    ///
    /// `step == 0` yields `from`, `step == steps` yields `to`.
    pub fn lerp(from: Color, to: Color, step: u32, steps: u32) -> Color {
        if steps == 0 {
            return from;
        }
        let mix = |a: u8, b: u8| {
            let (a, b) = (a as i64, b as i64);
            (a + (b - a) * step as i64 / steps as i64) as u8
        };
        Color::from_rgb(mix(from.r(), to.r()), mix(from.g(), to.g()), mix(from.b(), to.b()))
    }
}

impl From<Rgb565> for Color {
    fn from(c: Rgb565) -> Self {
        Color(((c.r() as u16) << 11) | ((c.g() as u16) << 5) | c.b() as u16)
    }
}

impl From<Color> for Rgb565 {
    fn from(c: Color) -> Self {
        Rgb565::new((c.0 >> 11) as u8, ((c.0 >> 5) & 0x3F) as u8, (c.0 & 0x1F) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_expand_to_full_range() {
        assert_eq!((Color::WHITE.r(), Color::WHITE.g(), Color::WHITE.b()), (255, 255, 255));
        assert_eq!((Color::BLACK.r(), Color::BLACK.g(), Color::BLACK.b()), (0, 0, 0));
        assert_eq!(Color::from_rgb(255, 0, 0), Color::RED);
        assert_eq!(Color::from_rgb(0, 255, 0), Color::GREEN);
    }

    #[test]
    fn bgr_swaps_red_and_blue() {
        assert_eq!(Color::from_bgr565(0xF800), Color::BLUE);
        assert_eq!(Color::from_bgr565(0x001F), Color::RED);
        assert_eq!(Color::from_bgr565(0x07E0), Color::GREEN);
        assert_eq!(Color::MAGENTA.to_bgr565(), 0xF81F);
        assert_eq!(Color(0x1234).to_bgr565(), Color::from_bgr565(0x1234).0);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(Color::lerp(Color::BLACK, Color::WHITE, 0, 10), Color::BLACK);
        assert_eq!(Color::lerp(Color::BLACK, Color::WHITE, 10, 10), Color::WHITE);
        assert_eq!(Color::lerp(Color::RED, Color::BLUE, 3, 0), Color::RED);

        let mid = Color::lerp(Color::BLACK, Color::WHITE, 1, 2);
        assert_eq!(mid, Color::from_rgb(127, 127, 127));
    }

    #[test]
    fn lerp_handles_full_u32_range() {
        let end = Color::lerp(Color::BLACK, Color::WHITE, u32::MAX, u32::MAX);
        assert_eq!(end, Color::WHITE);

        let mid = Color::lerp(Color::BLACK, Color::WHITE, 1 << 31, u32::MAX);
        assert_eq!(mid, Color::from_rgb(127, 127, 127));

        let down = Color::lerp(Color::WHITE, Color::BLACK, u32::MAX - 1, u32::MAX);
        assert_eq!(down, Color::BLACK);
    }

    #[test]
    fn embedded_graphics_round_trip() {
        for raw in [0x0000, 0xFFFF, 0xF800, 0x07E0, 0x001F, 0xA5A5] {
            let c = Color(raw);
            assert_eq!(Color::from(Rgb565::from(c)), c);
        }
        assert_eq!(Rgb565::from(Color::RED), Rgb565::RED);
    }
}
