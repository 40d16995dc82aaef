//! Text rendering and word wrap on a [`Canvas`].

use crate::canvas::Canvas;
use crate::color::Color;
use crate::font::{Font, Glyph};
use crate::rect::Rect;

/// Layout options for [`Canvas::draw_text_in_rect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextOptions {
    /// Centre each line horizontally within the rectangle.
    pub centered: bool,
    /// Break lines at spaces so they fit the rectangle width.
    pub wrap: bool,
}

impl Canvas {
    fn draw_glyph(&mut self, glyph: &Glyph, x: i32, y: i32, fg: Color, bg: Option<Color>) {
        if let Some(bg) = bg {
            self.fill_rectangle(Rect::new(x, y, glyph.width, glyph.height), bg);
        }
        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                if glyph.is_set(gx, gy) {
                    self.set_pixel(x + gx as i32, y + gy as i32, fg);
                }
            }
        }
    }

    fn draw_run(&mut self, font: &Font, text: &str, x: i32, y: i32, fg: Color, bg: Option<Color>) -> i32 {
        let mut cursor = x;
        for c in text.chars() {
            let glyph = font.glyph(c);
            self.draw_glyph(&glyph, cursor, y, fg, bg);
            cursor += glyph.width as i32 + 1;
        }
        cursor
    }

    /// Draw `text` with a transparent background, top-left at `(x, y)`.
    ///
    /// Returns the x coordinate just past the last glyph's gap.
    pub fn draw_text(&mut self, font: &Font, text: &str, color: Color, x: i32, y: i32) -> i32 {
        self.draw_run(font, text, x, y, color, None)
    }

    /// Draw `text`, filling each glyph's box with `background` first.
    pub fn draw_text_with_background(
        &mut self,
        font: &Font,
        text: &str,
        color: Color,
        background: Color,
        x: i32,
        y: i32,
    ) -> i32 {
        self.draw_run(font, text, x, y, color, Some(background))
    }

    /// Lay `text` out inside `rect`, clipped to it.
    ///
    /// `'\n'` always starts a new line. With `wrap` set, lines break at
    /// spaces; a word wider than the rectangle is split between
    /// characters. Lines that would extend below the rectangle are not
    /// drawn. Returns the number of lines drawn.
    pub fn draw_text_in_rect(
        &mut self,
        font: &Font,
        text: &str,
        color: Color,
        rect: Rect,
        options: TextOptions,
    ) -> usize {
        let saved = self.clipping_region();
        self.set_clipping_region(saved.intersection(&rect));

        let line_height = font.height() as i32;
        let mut y = rect.y;
        let mut drawn = 0;

        for line in Lines::new(font, text, rect.width, options.wrap) {
            if y + line_height > rect.bottom() {
                break;
            }
            let x = if options.centered {
                let width = font.measure_str(line) as i32;
                rect.x + (rect.width as i32 - width) / 2
            } else {
                rect.x
            };
            self.draw_run(font, line, x, y, color, None);
            y += line_height;
            drawn += 1;
        }

        self.set_clipping_region(saved);
        drawn
    }
}

/// Iterator over the lines of a wrapped paragraph.
pub struct Lines<'t, 'f> {
    font: &'f Font<'f>,
    rest: &'t str,
    max_width: u32,
    wrap: bool,
}

impl<'t, 'f> Lines<'t, 'f> {
    pub fn new(font: &'f Font<'f>, text: &'t str, max_width: u32, wrap: bool) -> Self {
        Self {
            font,
            rest: text,
            max_width,
            wrap,
        }
    }

    /// Longest run of whole words from the start of `para` that fits.
    fn fit_words(&self, para: &str) -> usize {
        let mut fitted = 0;
        let mut pos = 0;
        loop {
            let end = para[pos..].find(' ').map_or(para.len(), |i| pos + i);
            if self.font.measure_str(&para[..end]) > self.max_width {
                return fitted;
            }
            fitted = end;
            if end == para.len() {
                return fitted;
            }
            pos = end + 1;
        }
    }

    /// Longest run of characters that fits, at least one.
    fn fit_chars(&self, para: &str) -> usize {
        let mut width = 0;
        let mut fitted = 0;
        for (i, c) in para.char_indices() {
            let gap = if i == 0 { 0 } else { 1 };
            width += gap + self.font.measure_char(c);
            if width > self.max_width && i > 0 {
                break;
            }
            fitted = i + c.len_utf8();
        }
        fitted
    }
}

impl<'t> Iterator for Lines<'t, '_> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.rest.is_empty() {
            return None;
        }
        let para_len = self.rest.find('\n').unwrap_or(self.rest.len());
        let para = &self.rest[..para_len];

        let take = if !self.wrap {
            para_len
        } else {
            match self.fit_words(para) {
                0 if !para.is_empty() => self.fit_chars(para),
                n => n,
            }
        };

        let line = &self.rest[..take];
        let mut rest = &self.rest[take..];
        if take == para_len {
            rest = rest.strip_prefix('\n').unwrap_or(rest);
        } else {
            // Spaces at a wrap point are dropped, and so is the paragraph
            // break when they ran up to one.
            rest = rest.trim_start_matches(' ');
            rest = rest.strip_prefix('\n').unwrap_or(rest);
        }
        self.rest = rest;
        Some(line)
    }
}
