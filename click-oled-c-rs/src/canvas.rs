//! Software rasterizer over a fixed-capacity pixel buffer.
//!
//! [`Canvas`] stores up to 96x96 [`Color`] values row-major and keeps a
//! clipping rectangle that every drawing call honours. The clipping region
//! is clamped to the canvas on every assignment, so it never points
//! outside the buffer.
//!
//! Drawing never fails: coordinates outside the canvas or the clip are
//! silently dropped, and [`Canvas::pixel`] returns black for reads outside
//! the canvas. Use [`Canvas::try_pixel`] to tell the two apart.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;

use crate::color::Color;
use crate::error::BitmapError;
use crate::rect::Rect;

/// Widest canvas the OLED C panel can show.
pub const MAX_WIDTH: usize = 96;
/// Tallest canvas the OLED C panel can show.
pub const MAX_HEIGHT: usize = 96;

const MAX_PIXELS: usize = MAX_WIDTH * MAX_HEIGHT;

/// Axis along which gradients interpolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Colour changes from left to right.
    Horizontal,
    /// Colour changes from top to bottom.
    Vertical,
}

/// Fixed-capacity pixel buffer with a clipping region.
#[derive(Clone)]
pub struct Canvas {
    pixels: [Color; MAX_PIXELS],
    width: usize,
    height: usize,
    clip: Rect,
}

impl Canvas {
    /// Black canvas. Dimensions above 96 are clamped to 96.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.min(MAX_WIDTH);
        let height = height.min(MAX_HEIGHT);
        Self {
            pixels: [Color::BLACK; MAX_PIXELS],
            width,
            height,
            clip: Rect::new(0, 0, width as u32, height as u32),
        }
    }

    /// Build a canvas from row-major pixels.
    ///
    /// Returns `None` if the dimensions exceed 96x96 or `pixels` does not
    /// hold exactly `width * height` values.
    pub fn from_pixels(pixels: &[Color], width: usize, height: usize) -> Option<Self> {
        if width > MAX_WIDTH || height > MAX_HEIGHT || pixels.len() != width * height {
            return None;
        }
        let mut canvas = Canvas::new(width, height);
        canvas.pixels[..pixels.len()].copy_from_slice(pixels);
        Some(canvas)
    }

    /// Parse a bitmap blob: `[width][height]` then `width * height`
    /// little-endian BGR565 words.
    pub fn from_blob(blob: &[u8]) -> Result<Self, BitmapError> {
        let (&width, &height) = match blob {
            [w, h, ..] => (w, h),
            _ => return Err(BitmapError::Truncated),
        };
        let (width, height) = (width as usize, height as usize);
        if width > MAX_WIDTH || height > MAX_HEIGHT {
            return Err(BitmapError::TooLarge);
        }

        let data = &blob[2..];
        let count = width * height;
        if data.len() < count * 2 {
            return Err(BitmapError::Truncated);
        }

        let mut canvas = Canvas::new(width, height);
        for (pixel, word) in canvas.pixels[..count].iter_mut().zip(data.chunks_exact(2)) {
            *pixel = Color::from_bgr565(u16::from_le_bytes([word[0], word[1]]));
        }
        Ok(canvas)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixels, exactly `width * height` long.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels[..self.width * self.height]
    }

    /// One row of pixels, or an empty slice past the bottom edge.
    pub fn row(&self, y: usize) -> &[Color] {
        if y >= self.height {
            return &[];
        }
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as u32, self.height as u32)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    // ── Clipping ─────────────────────────────────────────────────────────

    pub fn clipping_region(&self) -> Rect {
        self.clip
    }

    /// Restrict drawing to `region`, clamped to the canvas.
    pub fn set_clipping_region(&mut self, region: Rect) {
        self.clip = region.clamp_to(self.width as u32, self.height as u32);
    }

    pub fn reset_clipping_region(&mut self) {
        self.clip = self.bounds();
    }

    // ── Pixels ───────────────────────────────────────────────────────────

    /// Fill the whole canvas with black, ignoring the clipping region.
    pub fn clear(&mut self) {
        self.clear_with(Color::BLACK);
    }

    /// Fill the whole canvas with `color`, ignoring the clipping region.
    pub fn clear_with(&mut self, color: Color) {
        let count = self.width * self.height;
        self.pixels[..count].fill(color);
    }

    pub fn try_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        Some(self.pixels[self.index(x as usize, y as usize)])
    }

    /// Stored colour, or black outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        self.try_pixel(x, y).unwrap_or(Color::BLACK)
    }

    /// No-op outside the clipping region.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.clip.contains(x, y) {
            let i = self.index(x as usize, y as usize);
            self.pixels[i] = color;
        }
    }

    // ── Rectangles ───────────────────────────────────────────────────────

    pub fn fill_rectangle(&mut self, rect: Rect, color: Color) {
        let area = rect.intersection(&self.clip);
        if area.is_empty() {
            return;
        }
        for y in area.y..area.bottom() {
            let start = self.index(area.x as usize, y as usize);
            self.pixels[start..start + area.width as usize].fill(color);
        }
    }

    /// One-pixel outline.
    pub fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        self.fill_rectangle(Rect::new(rect.x, rect.y, rect.width, 1), color);
        self.fill_rectangle(Rect::new(rect.x, bottom, rect.width, 1), color);
        self.fill_rectangle(Rect::new(rect.x, rect.y, 1, rect.height), color);
        self.fill_rectangle(Rect::new(right, rect.y, 1, rect.height), color);
    }

    /// Fill `rect` with a linear blend from `from` to `to`.
    ///
    /// The blend spans the whole of `rect`; clipping only hides part of it.
    pub fn fill_gradient(&mut self, rect: Rect, from: Color, to: Color, direction: Direction) {
        let area = rect.intersection(&self.clip);
        if area.is_empty() {
            return;
        }
        match direction {
            Direction::Horizontal => {
                for x in area.x..area.right() {
                    let step = (x as i64 - rect.x as i64) as u32;
                    let color = Color::lerp(from, to, step, rect.width - 1);
                    self.fill_rectangle(Rect::new(x, area.y, 1, area.height), color);
                }
            }
            Direction::Vertical => {
                for y in area.y..area.bottom() {
                    let step = (y as i64 - rect.y as i64) as u32;
                    let color = Color::lerp(from, to, step, rect.height - 1);
                    self.fill_rectangle(Rect::new(area.x, y, area.width, 1), color);
                }
            }
        }
    }

    /// Inclusive horizontal span, cut to the clip before anything is drawn.
    fn hline(&mut self, x0: i64, x1: i64, y: i64, color: Color) {
        let clip = self.clip;
        if clip.is_empty() || y < clip.y as i64 || y >= clip.bottom() as i64 {
            return;
        }
        let a = x0.min(x1).max(clip.x as i64);
        let b = x0.max(x1).min(clip.right() as i64 - 1);
        if a > b {
            return;
        }
        self.fill_rectangle(Rect::new(a as i32, y as i32, (b - a + 1) as u32, 1), color);
    }

    /// [`Canvas::set_pixel`] for coordinates that may not fit in `i32`.
    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.set_pixel(x, y, color);
        }
    }

    // ── Lines ────────────────────────────────────────────────────────────

    /// Line including both end points.
    ///
    /// One pixel is lit per step along the major axis, and only the steps
    /// that fall inside the clip are visited. The minor coordinate is
    /// rounded to the nearest pixel, halves away from the start point.
    /// A line whose end points coincide draws nothing.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let clip = self.clip;
        if (x0 == x1 && y0 == y1)
            || clip.is_empty()
            || (x0 < clip.x && x1 < clip.x)
            || (y0 < clip.y && y1 < clip.y)
            || (x0 >= clip.right() && x1 >= clip.right())
            || (y0 >= clip.bottom() && y1 >= clip.bottom())
        {
            return;
        }
        if y0 == y1 {
            self.hline(x0 as i64, x1 as i64, y0 as i64, color);
            return;
        }

        let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (adx, ady) = (dx.abs(), dy.abs());

        // Minor-axis offset after `t` steps along the major axis.
        let offset = |t: i64, major: i64, minor: i64| -> i64 {
            ((2 * t as i128 * minor as i128 + major as i128) / (2 * major as i128)) as i64
        };

        if adx >= ady {
            let lo = x0.min(x1).max(clip.x as i64);
            let hi = x0.max(x1).min(clip.right() as i64 - 1);
            for x in lo..=hi {
                let y = y0 + dy.signum() * offset((x - x0).abs(), adx, ady);
                self.plot(x, y, color);
            }
        } else {
            let lo = y0.min(y1).max(clip.y as i64);
            let hi = y0.max(y1).min(clip.bottom() as i64 - 1);
            for y in lo..=hi {
                let x = x0 + dx.signum() * offset((y - y0).abs(), ady, adx);
                self.plot(x, y, color);
            }
        }
    }

    // ── Ellipses ─────────────────────────────────────────────────────────

    /// Outline of the ellipse centred on `(cx, cy)`.
    pub fn draw_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Color) {
        if rx < 0 || ry < 0 {
            return;
        }
        let (cx, cy) = (cx as i64, cy as i64);
        ellipse_quadrant(rx, ry, |dx, dy| {
            let (dx, dy) = (dx as i64, dy as i64);
            self.plot(cx + dx, cy + dy, color);
            self.plot(cx - dx, cy + dy, color);
            self.plot(cx + dx, cy - dy, color);
            self.plot(cx - dx, cy - dy, color);
        });
    }

    pub fn fill_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Color) {
        if rx < 0 || ry < 0 {
            return;
        }
        let (cx, cy) = (cx as i64, cy as i64);
        ellipse_quadrant(rx, ry, |dx, dy| {
            let (dx, dy) = (dx as i64, dy as i64);
            self.hline(cx - dx, cx + dx, cy + dy, color);
            self.hline(cx - dx, cx + dx, cy - dy, color);
        });
    }

    /// Filled ellipse blending from `from` to `to` across its bounding box.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_ellipse_gradient(
        &mut self,
        cx: i32,
        cy: i32,
        rx: i32,
        ry: i32,
        from: Color,
        to: Color,
        direction: Direction,
    ) {
        if rx < 0 || ry < 0 {
            return;
        }
        let clip = self.clip;
        let (cx, cy) = (cx as i64, cy as i64);
        let (left, top) = (cx - rx as i64, cy - ry as i64);
        ellipse_quadrant(rx, ry, |dx, dy| {
            let (dx, dy) = (dx as i64, dy as i64);
            for y in [cy - dy, cy + dy] {
                match direction {
                    Direction::Horizontal => {
                        if y < clip.y as i64 || y >= clip.bottom() as i64 {
                            continue;
                        }
                        let lo = (cx - dx).max(clip.x as i64);
                        let hi = (cx + dx).min(clip.right() as i64 - 1);
                        for x in lo..=hi {
                            let step = (x - left) as u32;
                            self.plot(x, y, Color::lerp(from, to, step, rx as u32 * 2));
                        }
                    }
                    Direction::Vertical => {
                        let step = (y - top) as u32;
                        let color = Color::lerp(from, to, step, ry as u32 * 2);
                        self.hline(cx - dx, cx + dx, y, color);
                    }
                }
            }
        });
    }

    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        self.draw_ellipse(cx, cy, radius, radius, color);
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        self.fill_ellipse(cx, cy, radius, radius, color);
    }

    // ── Images ───────────────────────────────────────────────────────────

    /// Copy `image` so that its top-left pixel lands on `(x, y)`.
    pub fn draw_image(&mut self, image: &Canvas, x: i32, y: i32) {
        let dest = Rect::new(x, y, image.width as u32, image.height as u32).intersection(&self.clip);
        if dest.is_empty() {
            return;
        }

        let src_x = (dest.x - x) as usize;
        let src_y = (dest.y - y) as usize;
        let width = dest.width as usize;

        for row in 0..dest.height as usize {
            let src = image.index(src_x, src_y + row);
            let dst = self.index(dest.x as usize, dest.y as usize + row);
            self.pixels[dst..dst + width].copy_from_slice(&image.pixels[src..src + width]);
        }
    }
}

/// Walk one quadrant of a midpoint ellipse, calling `plot(dx, dy)` with
/// non-negative offsets from the centre.
///
/// Region 1 steps in x while the slope is shallower than -1, region 2
/// steps in y for the remainder.
fn ellipse_quadrant(rx: i32, ry: i32, mut plot: impl FnMut(i32, i32)) {
    if ry == 0 {
        for dx in 0..=rx {
            plot(dx, 0);
        }
        return;
    }

    let rx2 = rx as i64 * rx as i64;
    let ry2 = ry as i64 * ry as i64;
    let mut x: i64 = 0;
    let mut y: i64 = ry as i64;
    let mut px: i64 = 0;
    let mut py: i64 = 2 * rx2 * y;

    plot(0, ry);

    let mut p = ry2 - rx2 * y + rx2 / 4;
    while px < py {
        x += 1;
        px += 2 * ry2;
        if p < 0 {
            p += ry2 + px;
        } else {
            y -= 1;
            py -= 2 * rx2;
            p += ry2 + px - py;
        }
        plot(x as i32, y as i32);
    }

    let mut p = ry2 * (x * x + x) + ry2 / 4 + rx2 * (y - 1) * (y - 1) - rx2 * ry2;
    while y > 0 {
        y -= 1;
        py -= 2 * rx2;
        if p > 0 {
            p += rx2 - py;
        } else {
            x += 1;
            px += 2 * ry2;
            p += rx2 - py + px;
        }
        plot(x as i32, y as i32);
    }
}

// ── embedded-graphics interop ────────────────────────────────────────────

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let rect = Rect::new(area.top_left.x, area.top_left.y, area.size.width, area.size.height);
        self.fill_rectangle(rect, color.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::tests::test_font_blob;
    use crate::font::Font;
    use crate::text::TextOptions;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    fn lit(canvas: &Canvas) -> usize {
        canvas.pixels().iter().filter(|&&c| c != Color::BLACK).count()
    }

    #[test]
    fn set_then_get_round_trips_everywhere() {
        let mut canvas = Canvas::new(16, 12);
        for y in 0..12 {
            for x in 0..16 {
                let c = Color((y * 16 + x) as u16);
                canvas.set_pixel(x, y, c);
                assert_eq!(canvas.pixel(x, y), c);
            }
        }
    }

    #[test]
    fn reads_outside_return_black_sentinel() {
        let mut canvas = Canvas::new(4, 4);
        canvas.clear_with(Color::WHITE);
        assert_eq!(canvas.pixel(-1, 0), Color::BLACK);
        assert_eq!(canvas.pixel(4, 0), Color::BLACK);
        assert_eq!(canvas.try_pixel(0, 4), None);
        assert_eq!(canvas.try_pixel(3, 3), Some(Color::WHITE));
    }

    #[test]
    fn new_clamps_to_panel_size() {
        let canvas = Canvas::new(200, 10);
        assert_eq!((canvas.width(), canvas.height()), (96, 10));
        assert_eq!(canvas.clipping_region(), Rect::new(0, 0, 96, 10));
    }

    #[test]
    fn clipping_region_is_clamped() {
        let mut canvas = Canvas::new(20, 20);
        canvas.set_clipping_region(Rect::new(-4, 10, 100, 100));
        assert_eq!(canvas.clipping_region(), Rect::new(0, 10, 20, 10));

        canvas.set_pixel(5, 5, Color::RED);
        assert_eq!(canvas.pixel(5, 5), Color::BLACK);
        canvas.set_pixel(5, 15, Color::RED);
        assert_eq!(canvas.pixel(5, 15), Color::RED);

        canvas.reset_clipping_region();
        assert_eq!(canvas.clipping_region(), Rect::new(0, 0, 20, 20));
    }

    #[test]
    fn clear_ignores_clip() {
        let mut canvas = Canvas::new(8, 8);
        canvas.set_clipping_region(Rect::new(0, 0, 1, 1));
        canvas.clear_with(Color::GREEN);
        assert!(canvas.pixels().iter().all(|&c| c == Color::GREEN));
        canvas.clear();
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn fill_rectangle_exact_coverage() {
        let mut canvas = Canvas::new(32, 32);
        canvas.clear_with(Color::BLUE);
        canvas.fill_rectangle(Rect::new(0, 0, 10, 7), Color::RED);

        for y in 0..32 {
            for x in 0..32 {
                let expected = if x < 10 && y < 7 { Color::RED } else { Color::BLUE };
                assert_eq!(canvas.pixel(x, y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn fill_rectangle_truncates_negative_and_oversized() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rectangle(Rect::new(-3, -3, 5, 5), Color::WHITE);
        assert_eq!(lit(&canvas), 4);

        canvas.clear();
        canvas.fill_rectangle(Rect::new(8, 8, 50, 50), Color::WHITE);
        assert_eq!(lit(&canvas), 4);
    }

    #[test]
    fn draw_rectangle_leaves_interior() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_rectangle(Rect::new(1, 1, 5, 4), Color::WHITE);
        assert_eq!(lit(&canvas), 2 * 5 + 2 * 2);
        assert_eq!(canvas.pixel(1, 1), Color::WHITE);
        assert_eq!(canvas.pixel(5, 4), Color::WHITE);
        assert_eq!(canvas.pixel(3, 2), Color::BLACK);
    }

    #[test]
    fn gradient_spans_full_rect() {
        let mut canvas = Canvas::new(11, 3);
        canvas.fill_gradient(Rect::new(0, 0, 11, 3), Color::BLACK, Color::WHITE, Direction::Horizontal);
        assert_eq!(canvas.pixel(0, 1), Color::BLACK);
        assert_eq!(canvas.pixel(10, 1), Color::WHITE);
        assert!(canvas.pixel(5, 0).r() > 100 && canvas.pixel(5, 0).r() < 150);

        canvas.fill_gradient(Rect::new(0, 0, 11, 3), Color::RED, Color::BLUE, Direction::Vertical);
        assert_eq!(canvas.pixel(7, 0), Color::RED);
        assert_eq!(canvas.pixel(7, 2), Color::BLUE);
    }

    #[test]
    fn gradient_is_stable_under_clipping() {
        let rect = Rect::new(0, 0, 20, 1);
        let mut full = Canvas::new(20, 1);
        full.fill_gradient(rect, Color::RED, Color::GREEN, Direction::Horizontal);

        let mut clipped = Canvas::new(20, 1);
        clipped.set_clipping_region(Rect::new(10, 0, 10, 1));
        clipped.fill_gradient(rect, Color::RED, Color::GREEN, Direction::Horizontal);

        assert_eq!(&full.pixels()[10..], &clipped.pixels()[10..]);
    }

    #[test]
    fn line_octants_and_endpoints() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(0, 0, 9, 9, Color::WHITE);
        for i in 0..10 {
            assert_eq!(canvas.pixel(i, i), Color::WHITE);
        }
        assert_eq!(lit(&canvas), 10);

        canvas.clear();
        canvas.draw_line(9, 2, 0, 5, Color::WHITE);
        assert_eq!(canvas.pixel(9, 2), Color::WHITE);
        assert_eq!(canvas.pixel(0, 5), Color::WHITE);
        assert_eq!(lit(&canvas), 10);

        canvas.clear();
        canvas.draw_line(3, 9, 3, 0, Color::WHITE);
        assert_eq!(lit(&canvas), 10);
    }

    #[test]
    fn zero_length_line_is_skipped() {
        let mut canvas = Canvas::new(5, 5);
        canvas.draw_line(2, 2, 2, 2, Color::WHITE);
        assert_eq!(lit(&canvas), 0);
        canvas.draw_line(2, 2, 3, 2, Color::WHITE);
        assert_eq!(lit(&canvas), 2);
    }

    #[test]
    fn line_crossing_the_edge_is_clipped() {
        let mut canvas = Canvas::new(5, 5);
        canvas.draw_line(-5, 2, 10, 2, Color::WHITE);
        assert_eq!(lit(&canvas), 5);
    }

    #[test]
    fn circle_matches_ellipse_with_equal_radii() {
        for r in 0..20 {
            let mut a = Canvas::new(48, 48);
            let mut b = Canvas::new(48, 48);
            a.draw_circle(24, 24, r, Color::WHITE);
            b.draw_ellipse(24, 24, r, r, Color::WHITE);
            assert!(a.pixels() == b.pixels(), "outline r={}", r);

            a.fill_circle(24, 24, r, Color::RED);
            b.fill_ellipse(24, 24, r, r, Color::RED);
            assert!(a.pixels() == b.pixels(), "fill r={}", r);
        }
    }

    #[test]
    fn ellipse_touches_its_extremes() {
        let mut canvas = Canvas::new(40, 40);
        canvas.draw_ellipse(20, 20, 10, 5, Color::WHITE);
        for (x, y) in [(30, 20), (10, 20), (20, 25), (20, 15)] {
            assert_eq!(canvas.pixel(x, y), Color::WHITE, "({}, {})", x, y);
        }
        assert_eq!(canvas.pixel(20, 20), Color::BLACK);
        assert_eq!(canvas.pixel(30, 25), Color::BLACK);

        // Outline is symmetric about both axes.
        for y in 0..40 {
            for x in 0..40 {
                assert_eq!(canvas.pixel(x, y), canvas.pixel(40 - x, y));
                assert_eq!(canvas.pixel(x, y), canvas.pixel(x, 40 - y));
            }
        }
    }

    #[test]
    fn filled_ellipse_covers_centre_and_axes() {
        let mut canvas = Canvas::new(40, 40);
        canvas.fill_ellipse(20, 20, 8, 4, Color::WHITE);
        assert_eq!(canvas.pixel(20, 20), Color::WHITE);
        assert_eq!(canvas.pixel(12, 20), Color::WHITE);
        assert_eq!(canvas.pixel(28, 20), Color::WHITE);
        assert_eq!(canvas.pixel(20, 16), Color::WHITE);
        assert_eq!(canvas.pixel(29, 20), Color::BLACK);
        assert_eq!(canvas.pixel(28, 24), Color::BLACK);
    }

    #[test]
    fn degenerate_ellipses_are_lines() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_ellipse(10, 10, 4, 0, Color::WHITE);
        assert_eq!(lit(&canvas), 9);

        canvas.clear();
        canvas.draw_ellipse(10, 10, 0, 3, Color::WHITE);
        assert_eq!(lit(&canvas), 7);

        canvas.clear();
        canvas.draw_ellipse(10, 10, -1, 3, Color::WHITE);
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn gradient_ellipse_blends_across_box() {
        let mut canvas = Canvas::new(40, 40);
        canvas.fill_ellipse_gradient(20, 20, 10, 6, Color::RED, Color::BLUE, Direction::Horizontal);
        assert_eq!(canvas.pixel(10, 20), Color::RED);
        assert_eq!(canvas.pixel(30, 20), Color::BLUE);

        canvas.clear();
        canvas.fill_ellipse_gradient(20, 20, 10, 6, Color::RED, Color::BLUE, Direction::Vertical);
        assert_eq!(canvas.pixel(20, 14), Color::RED);
        assert_eq!(canvas.pixel(20, 26), Color::BLUE);
    }

    #[test]
    fn draws_outside_clip_leave_canvas_unchanged() {
        let mut canvas = Canvas::new(48, 48);
        canvas.clear_with(Color::CYAN);
        canvas.set_clipping_region(Rect::new(10, 10, 10, 10));
        let before = canvas.clone();

        let image = Canvas::from_pixels(&[Color::RED; 16], 4, 4).unwrap();
        canvas.set_pixel(30, 30, Color::RED);
        canvas.fill_rectangle(Rect::new(25, 25, 10, 10), Color::RED);
        canvas.draw_rectangle(Rect::new(0, 0, 9, 9), Color::RED);
        canvas.fill_gradient(Rect::new(30, 0, 10, 40), Color::RED, Color::BLUE, Direction::Vertical);
        canvas.draw_line(0, 30, 47, 47, Color::RED);
        canvas.draw_ellipse(35, 35, 5, 3, Color::RED);
        canvas.fill_ellipse(35, 5, 5, 3, Color::RED);
        canvas.fill_ellipse_gradient(5, 35, 4, 4, Color::RED, Color::BLUE, Direction::Horizontal);
        canvas.fill_ellipse_gradient(35, 25, 4, 4, Color::RED, Color::BLUE, Direction::Vertical);
        canvas.draw_image(&image, 40, 2);

        let blob = test_font_blob();
        let font = Font::parse(&blob).unwrap();
        let options = TextOptions {
            centered: true,
            wrap: true,
        };
        canvas.draw_text(&font, "AAAA", Color::RED, 25, 0);
        canvas.draw_text_with_background(&font, "AA", Color::RED, Color::BLUE, 0, 30);
        canvas.draw_text_in_rect(&font, "AA AA", Color::RED, Rect::new(30, 30, 15, 15), options);

        assert!(canvas.pixels() == before.pixels());
        assert_eq!(canvas.clipping_region(), Rect::new(10, 10, 10, 10));
    }

    #[test]
    fn gradients_larger_than_the_canvas_are_truncated() {
        let grey = Color::from_rgb(127, 127, 127);

        let mut canvas = Canvas::new(16, 8);
        let wide = Rect::new(-100_000_000, 0, 200_000_000, 4);
        canvas.fill_gradient(wide, Color::BLACK, Color::WHITE, Direction::Horizontal);
        assert_eq!(canvas.pixel(0, 0), grey);
        assert_eq!(canvas.pixel(15, 3), grey);
        assert_eq!(canvas.pixel(0, 4), Color::BLACK);

        canvas.clear();
        let tall = Rect::new(0, -2_000_000_000, 4, 4_000_000_000);
        canvas.fill_gradient(tall, Color::BLACK, Color::WHITE, Direction::Vertical);
        assert_eq!(canvas.pixel(0, 0), grey);
        assert_eq!(canvas.pixel(3, 7), grey);
        assert_eq!(lit(&canvas), 4 * 8);
    }

    #[test]
    fn far_line_end_points_only_visit_the_clip() {
        let mut canvas = Canvas::new(16, 8);
        canvas.draw_line(-400_000_000, 5, 400_000_000, 6, Color::WHITE);
        assert_eq!(lit(&canvas), 16);
        assert_eq!(canvas.pixel(0, 6), Color::WHITE);
        assert_eq!(canvas.pixel(15, 6), Color::WHITE);

        canvas.clear();
        canvas.draw_line(3, i32::MIN, 3, i32::MAX, Color::WHITE);
        assert_eq!(lit(&canvas), 8);
        assert_eq!(canvas.pixel(3, 0), Color::WHITE);

        canvas.clear();
        canvas.set_clipping_region(Rect::new(4, 2, 4, 4));
        canvas.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, Color::WHITE);
        for i in 4..6 {
            assert_eq!(canvas.pixel(i, i), Color::WHITE);
        }
        assert_eq!(lit(&canvas), 2);
    }

    #[test]
    fn ellipses_near_the_coordinate_limits_do_not_overflow() {
        let mut canvas = Canvas::new(16, 8);
        canvas.draw_ellipse(i32::MAX - 2, 4, 10, 3, Color::WHITE);
        canvas.fill_ellipse(i32::MIN + 2, 4, 10, 3, Color::WHITE);
        canvas.fill_ellipse_gradient(i32::MAX - 2, 4, 10, 3, Color::RED, Color::BLUE, Direction::Horizontal);
        canvas.fill_ellipse_gradient(i32::MIN + 2, 4, 10, 3, Color::RED, Color::BLUE, Direction::Vertical);
        assert_eq!(lit(&canvas), 0);

        // Span wider than the canvas: only the visible part is coloured,
        // with the blend measured across the whole box.
        canvas.fill_ellipse_gradient(8, 4, 40_000, 2, Color::BLACK, Color::WHITE, Direction::Horizontal);
        assert_eq!(canvas.pixel(8, 4), Color::from_rgb(127, 127, 127));
        assert_eq!(lit(&canvas), 16 * 5);
    }

    #[test]
    fn image_blit_clips_both_sides() {
        let pixels: Vec<Color> = (0..16).map(|i| Color(i + 1)).collect();
        let image = Canvas::from_pixels(&pixels, 4, 4).unwrap();

        let mut canvas = Canvas::new(6, 6);
        canvas.draw_image(&image, -2, -1);
        assert_eq!(canvas.pixel(0, 0), Color(1 + 4 + 2));
        assert_eq!(canvas.pixel(1, 2), Color(1 + 12 + 3));
        assert_eq!(canvas.pixel(2, 0), Color::BLACK);

        canvas.clear();
        canvas.draw_image(&image, 4, 4);
        assert_eq!(canvas.pixel(4, 4), Color(1));
        assert_eq!(canvas.pixel(5, 5), Color(6));
        assert_eq!(lit(&canvas), 4);
    }

    #[test]
    fn from_pixels_round_trip() {
        let pixels: Vec<Color> = (0..35).map(|i| Color(i * 97)).collect();
        let canvas = Canvas::from_pixels(&pixels, 7, 5).unwrap();
        assert_eq!(canvas.pixels(), &pixels[..]);
        assert_eq!(canvas.row(1), &pixels[7..14]);
        assert!(canvas.row(5).is_empty());

        assert!(Canvas::from_pixels(&pixels, 6, 5).is_none());
        assert!(Canvas::from_pixels(&[], 97, 0).is_none());
    }

    #[test]
    fn blob_is_little_endian_bgr() {
        let blob = [2, 1, 0x00, 0xF8, 0x1F, 0x00];
        let canvas = Canvas::from_blob(&blob).unwrap();
        assert_eq!(canvas.pixels(), &[Color::BLUE, Color::RED]);

        assert_eq!(Canvas::from_blob(&[2, 2, 0, 0]).err(), Some(BitmapError::Truncated));
        assert_eq!(Canvas::from_blob(&[1]).err(), Some(BitmapError::Truncated));
        assert_eq!(Canvas::from_blob(&[97, 1]).err(), Some(BitmapError::TooLarge));
    }

    #[test]
    fn embedded_graphics_primitives_honour_clip() {
        let mut canvas = Canvas::new(20, 20);
        canvas.set_clipping_region(Rect::new(0, 0, 10, 20));

        Rectangle::new(Point::new(5, 5), Size::new(10, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut canvas)
            .unwrap();
        assert_eq!(lit(&canvas), 10);
        assert_eq!(canvas.pixel(9, 6), Color::RED);

        Pixel(Point::new(3, 3), Rgb565::GREEN).draw(&mut canvas).unwrap();
        assert_eq!(canvas.pixel(3, 3), Color::GREEN);
        assert_eq!(canvas.size(), Size::new(20, 20));
    }
}
