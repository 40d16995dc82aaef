//! Bitmap fonts parsed from `mFnt` blobs.
//!
//! Blob layout:
//!
//! ```text
//! [b"mFnt"][extended: u8][height: u8][N x glyph_len: u8][glyph bytes...]
//! ```
//!
//! `N` is 94 for printable ASCII (codes 32..=125) or 222 for the extended
//! set (codes 32..=253). Each glyph is a row-major bit stream, MSB first,
//! `glyph_len * 8 / height` bits per row.

use heapless::Vec;

use crate::error::FontError;

const MAGIC: &[u8; 4] = b"mFnt";
const HEADER_LEN: usize = 6;
const FIRST_CHAR: u32 = 32;
const ASCII_GLYPHS: usize = 94;
const EXTENDED_GLYPHS: usize = 222;
/// Drawn in place of characters the font does not cover.
const FALLBACK: char = '?';

/// Immutable glyph atlas borrowing its blob.
#[derive(Debug, Clone)]
pub struct Font<'a> {
    height: u8,
    lengths: &'a [u8],
    offsets: Vec<u16, EXTENDED_GLYPHS>,
    data: &'a [u8],
}

/// One glyph's bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    pub width: u32,
    pub height: u32,
    data: &'a [u8],
}

impl Glyph<'_> {
    /// Whether the bit at column `x`, row `y` is set.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let bit = (y * self.width + x) as usize;
        self.data
            .get(bit / 8)
            .is_some_and(|byte| byte & (0x80 >> (bit % 8)) != 0)
    }
}

impl<'a> Font<'a> {
    pub fn parse(blob: &'a [u8]) -> Result<Self, FontError> {
        if blob.len() < HEADER_LEN || &blob[..4] != MAGIC {
            return Err(FontError::BadMagic);
        }
        let count = if blob[4] != 0 { EXTENDED_GLYPHS } else { ASCII_GLYPHS };
        let height = blob[5];
        if height == 0 {
            return Err(FontError::ZeroHeight);
        }

        let lengths = blob
            .get(HEADER_LEN..HEADER_LEN + count)
            .ok_or(FontError::Truncated)?;
        let data = &blob[HEADER_LEN + count..];

        let mut offsets = Vec::new();
        let mut offset: u32 = 0;
        for &len in lengths {
            offsets
                .push(offset as u16)
                .map_err(|_| FontError::Truncated)?;
            offset += len as u32;
        }
        if offset as usize > data.len() {
            return Err(FontError::Truncated);
        }

        Ok(Self {
            height,
            lengths,
            offsets,
            data,
        })
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn is_extended(&self) -> bool {
        self.lengths.len() == EXTENDED_GLYPHS
    }

    fn index(&self, c: char) -> Option<usize> {
        let index = (c as u32).checked_sub(FIRST_CHAR)? as usize;
        (index < self.lengths.len()).then_some(index)
    }

    /// Glyph for `c`, or the `'?'` glyph for characters the font lacks.
    pub fn glyph(&self, c: char) -> Glyph<'a> {
        let index = self
            .index(c)
            .or_else(|| self.index(FALLBACK))
            .unwrap_or(0);
        let len = self.lengths[index] as usize;
        let start = self.offsets[index] as usize;
        Glyph {
            width: len as u32 * 8 / self.height as u32,
            height: self.height as u32,
            data: &self.data[start..start + len],
        }
    }

    /// Width of one glyph in pixels.
    pub fn measure_char(&self, c: char) -> u32 {
        self.glyph(c).width
    }

    /// Width of `text`: glyph widths plus a one-pixel gap between glyphs.
    /// The empty string measures 0.
    pub fn measure_str(&self, text: &str) -> u32 {
        let (sum, count) = text
            .chars()
            .fold((0, 0), |(sum, count), c| (sum + self.measure_char(c), count + 1));
        if count == 0 {
            0
        } else {
            sum + count - 1
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// ASCII font, height 4. Every glyph is 2 bytes wide (4 px) and blank
    /// except 'A' (a 4x4 box outline) and 'i' (1 byte, 2 px, left column).
    pub(crate) fn test_font_blob() -> std::vec::Vec<u8> {
        let mut blob = b"mFnt".to_vec();
        blob.extend([0, 4]);

        let mut lengths = [2u8; ASCII_GLYPHS];
        lengths[('i' as u32 - FIRST_CHAR) as usize] = 1;
        blob.extend(lengths);

        for (i, &len) in lengths.iter().enumerate() {
            let c = char::from_u32(i as u32 + FIRST_CHAR).unwrap();
            match c {
                'A' => blob.extend([0b1111_1001, 0b1001_1111]),
                'i' => blob.push(0b1010_1010),
                _ => blob.extend(std::iter::repeat(0).take(len as usize)),
            }
        }
        blob
    }

    #[test]
    fn parses_header_and_tables() {
        let blob = test_font_blob();
        let font = Font::parse(&blob).unwrap();
        assert_eq!(font.height(), 4);
        assert!(!font.is_extended());
        assert_eq!(font.measure_char('A'), 4);
        assert_eq!(font.measure_char('i'), 2);
    }

    #[test]
    fn rejects_bad_blobs() {
        assert_eq!(Font::parse(b"mFn").err(), Some(FontError::BadMagic));
        assert_eq!(Font::parse(b"xFnt\x00\x04").err(), Some(FontError::BadMagic));
        assert_eq!(Font::parse(b"mFnt\x00\x00").err(), Some(FontError::ZeroHeight));
        assert_eq!(Font::parse(b"mFnt\x00\x04\x02").err(), Some(FontError::Truncated));

        let mut blob = test_font_blob();
        blob.pop();
        assert_eq!(Font::parse(&blob).err(), Some(FontError::Truncated));
    }

    #[test]
    fn extended_flag_selects_glyph_count() {
        let mut blob = b"mFnt".to_vec();
        blob.extend([1, 8]);
        blob.extend([1u8; EXTENDED_GLYPHS]);
        blob.extend([0xFFu8; EXTENDED_GLYPHS]);

        let font = Font::parse(&blob).unwrap();
        assert!(font.is_extended());
        assert_eq!(font.measure_char('é'), 1);

        // Every one of the 222 offsets is stored, up to code 253.
        let last = font.glyph(char::from_u32(253).unwrap());
        assert_eq!(last.width, 1);
        assert!(last.is_set(0, 0));
        assert_eq!(font.glyph('?'), font.glyph(char::from_u32(254).unwrap()));
    }

    #[test]
    fn glyph_bits_are_msb_first_row_major() {
        let blob = test_font_blob();
        let font = Font::parse(&blob).unwrap();

        let a = font.glyph('A');
        for y in 0..4 {
            for x in 0..4 {
                let edge = x == 0 || x == 3 || y == 0 || y == 3;
                assert_eq!(a.is_set(x, y), edge, "({}, {})", x, y);
            }
        }
        assert!(!a.is_set(4, 0));

        let i = font.glyph('i');
        assert!(i.is_set(0, 0) && !i.is_set(1, 0));
        assert!(i.is_set(0, 3) && !i.is_set(1, 3));
    }

    #[test]
    fn measure_str_adds_gaps() {
        let blob = test_font_blob();
        let font = Font::parse(&blob).unwrap();
        assert_eq!(font.measure_str(""), 0);
        assert_eq!(font.measure_str("A"), 4);
        assert_eq!(font.measure_str("AA"), 9);
        assert_eq!(font.measure_str("Ai A"), 4 + 1 + 2 + 1 + 4 + 1 + 4);
    }

    #[test]
    fn missing_characters_use_question_mark() {
        let blob = test_font_blob();
        let font = Font::parse(&blob).unwrap();
        assert_eq!(font.glyph('\u{7f}'), font.glyph('?'));
        assert_eq!(font.glyph('\n'), font.glyph('?'));
        assert_eq!(font.glyph('€'), font.glyph('?'));
    }
}
