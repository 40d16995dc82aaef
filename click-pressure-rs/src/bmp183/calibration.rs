//! BMP183 factory calibration and the Bosch integer compensation algorithm.
//!
//! The arithmetic mirrors the datasheet step for step. Shifts on signed
//! values are arithmetic and divisions truncate toward zero, which is what
//! makes the result match the hardware-verified reference output.

use super::registers::CALIBRATION_LEN;
use super::Oversampling;

/// The eleven calibration words stored in the sensor's EEPROM.
///
/// Owned by each [`Bmp183`](super::Bmp183) instance, so two sensors on two
/// sockets never share coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl Calibration {
    /// Decode the big-endian calibration block read from `0xAA..=0xBF`.
    ///
    /// Returns `None` if any word reads back as `0x0000` or `0xFFFF`, which
    /// the datasheet uses to flag a failed EEPROM read.
    pub fn from_bytes(raw: &[u8; CALIBRATION_LEN]) -> Option<Self> {
        let mut words = [0u16; CALIBRATION_LEN / 2];
        for (word, chunk) in words.iter_mut().zip(raw.chunks_exact(2)) {
            *word = u16::from_be_bytes([chunk[0], chunk[1]]);
            if *word == 0x0000 || *word == 0xFFFF {
                return None;
            }
        }

        Some(Self {
            ac1: words[0] as i16,
            ac2: words[1] as i16,
            ac3: words[2] as i16,
            ac4: words[3],
            ac5: words[4],
            ac6: words[5],
            b1: words[6] as i16,
            b2: words[7] as i16,
            mb: words[8] as i16,
            mc: words[9] as i16,
            md: words[10] as i16,
        })
    }

    /// Intermediate `B5` term shared by the temperature and pressure paths.
    fn b5(&self, ut: i32) -> Option<i32> {
        let x1 = ((ut - self.ac6 as i32) * self.ac5 as i32) >> 15;
        let denominator = x1 + self.md as i32;
        if denominator == 0 {
            return None;
        }
        let x2 = ((self.mc as i32) << 11) / denominator;
        Some(x1 + x2)
    }

    /// Compensated temperature in 0.1 °C from the raw temperature word.
    pub fn temperature(&self, ut: i32) -> Option<i32> {
        let b5 = self.b5(ut)?;
        Some((b5 + 8) >> 4)
    }

    /// Compensated pressure in Pa.
    ///
    /// `ut` is the raw temperature sampled just before `up`, and `up` must
    /// already be shifted right by `8 - oss`.
    pub fn pressure(&self, ut: i32, up: i32, oversampling: Oversampling) -> Option<i32> {
        let oss = oversampling.oss() as u32;
        let b5 = self.b5(ut)?;

        let b6 = b5 - 4000;
        let mut x1 = (self.b2 as i32 * ((b6 * b6) >> 12)) >> 11;
        let mut x2 = (self.ac2 as i32 * b6) >> 11;
        let mut x3 = x1 + x2;
        let b3 = ((((self.ac1 as i32) * 4 + x3) << oss) + 2) / 4;

        x1 = (self.ac3 as i32 * b6) >> 13;
        x2 = (self.b1 as i32 * ((b6 * b6) >> 12)) >> 16;
        x3 = ((x1 + x2) + 2) >> 2;
        let b4 = (self.ac4 as u32).wrapping_mul((x3 + 32768) as u32) >> 15;
        if b4 == 0 {
            return None;
        }

        let b7 = (up as u32)
            .wrapping_sub(b3 as u32)
            .wrapping_mul(50_000 >> oss);
        let mut p = if b7 < 0x8000_0000 {
            ((b7 * 2) / b4) as i32
        } else {
            ((b7 / b4) * 2) as i32
        };

        x1 = (p >> 8) * (p >> 8);
        x1 = (x1 * 3038) >> 16;
        x2 = (-7357 * p) >> 16;
        p += (x1 + x2 + 3791) >> 4;

        Some(p)
    }
}

/// Altitude in metres for `pressure_pa`, relative to `sea_level_pa`.
///
/// International barometric formula, `44330 * (1 - (p / p0)^(1 / 5.255))`.
pub fn altitude_m(pressure_pa: f32, sea_level_pa: f32) -> f32 {
    44_330.0 * (1.0 - libm::powf(pressure_pa / sea_level_pa, 1.0 / 5.255))
}
