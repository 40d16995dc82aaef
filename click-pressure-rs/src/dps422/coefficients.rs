//! DPS422 calibration coefficients and compensation.
//!
//! The temperature path applies the PTAT correction derived from the
//! factory `Vbe`, `dVbe` and gain trims. The pressure path is a nine-term
//! polynomial in the scaled raw pressure and the linearised temperature
//! `T' = 8.5 t / (1 + 8.8 t)`, where `t` is the scaled raw temperature.

use super::registers::{COEF_PRS_LEN, COEF_TEMP_LEN};

/// Full-scale divisor for the 24-bit raw results (2^20).
const SCALE: f32 = 1_048_576.0;

// PTAT model constants from the vendor reference driver.
const T_REF: f32 = 27.0;
const V_BE_TARGET: f32 = 0.687_027;
const T_C_VBE: f32 = -1.735e-3;
const K_PTAT_CORNER: f32 = -0.8;
const K_PTAT_CURVATURE: f32 = 0.039;
const A_0: f32 = 5030.0;

/// Interpret the low `bits` of `value` as two's complement.
pub(crate) fn twos_complement(value: u32, bits: u32) -> i32 {
    let sign = 1u32 << (bits - 1);
    if value & sign != 0 {
        value as i32 - (1i32 << bits)
    } else {
        value as i32
    }
}

/// Decoded factory coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coefficients {
    pub t_gain: i32,
    pub t_dvbe: i32,
    pub t_vbe: i32,
    pub c00: i32,
    pub c10: i32,
    pub c01: i32,
    pub c02: i32,
    pub c20: i32,
    pub c30: i32,
    pub c11: i32,
    pub c12: i32,
    pub c21: i32,
    alpha: f32,
    a_prime: f32,
    b_prime: f32,
}

impl Coefficients {
    /// Unpack the temperature (`0x20..=0x22`) and pressure (`0x26..=0x39`)
    /// coefficient blocks.
    pub fn from_bytes(temp: &[u8; COEF_TEMP_LEN], prs: &[u8; COEF_PRS_LEN]) -> Self {
        let t_gain = twos_complement(temp[0] as u32, 8);
        let t_dvbe = twos_complement((temp[1] >> 1) as u32, 7);
        let t_vbe = twos_complement((temp[1] & 0x01) as u32 | (temp[2] as u32) << 1, 9);

        let b = |i: usize| prs[i] as u32;
        let c00 = twos_complement(b(0) << 12 | b(1) << 4 | b(2) >> 4, 20);
        let c10 = twos_complement((b(2) & 0x0F) << 16 | b(3) << 8 | b(4), 20);
        let c01 = twos_complement(b(5) << 9 | b(6) << 1 | b(7) >> 7, 17);
        let c02 = twos_complement((b(7) & 0x7F) << 10 | b(8) << 2 | b(9) >> 6, 17);
        let c20 = twos_complement((b(9) & 0x3F) << 8 | b(10), 14);
        let c30 = twos_complement((b(11) & 0x0F) << 8 | b(12), 12);
        let c11 = twos_complement(b(13) << 9 | b(14) << 1 | b(15) >> 7, 17);
        let c12 = twos_complement((b(15) & 0x7F) << 10 | b(16) << 2 | b(17) >> 6, 17);
        let c21 = twos_complement((b(17) & 0x3F) << 8 | b(18), 14);

        let (alpha, a_prime, b_prime) = ptat_correction(t_gain, t_dvbe, t_vbe);

        Self {
            t_gain,
            t_dvbe,
            t_vbe,
            c00,
            c10,
            c01,
            c02,
            c20,
            c30,
            c11,
            c12,
            c21,
            alpha,
            a_prime,
            b_prime,
        }
    }

    /// Raw temperature divided by 2^20; the pressure polynomial needs it.
    pub fn scale_temperature(raw: i32) -> f32 {
        raw as f32 / SCALE
    }

    /// Compensated temperature in °C.
    pub fn temperature(&self, raw: i32) -> f32 {
        let t_sc = Self::scale_temperature(raw);
        let u = t_sc / (1.0 + self.alpha * t_sc);
        self.a_prime * u + self.b_prime
    }

    /// Compensated pressure in Pa, using `t_sc` from the most recent
    /// temperature conversion.
    pub fn pressure(&self, raw: i32, t_sc: f32) -> f32 {
        let p = raw as f32 / SCALE;
        let t = 8.5 * t_sc / (1.0 + 8.8 * t_sc);

        self.c00 as f32
            + self.c10 as f32 * p
            + self.c01 as f32 * t
            + self.c20 as f32 * p * p
            + self.c02 as f32 * t * t
            + self.c30 as f32 * p * p * p
            + self.c11 as f32 * p * t
            + self.c12 as f32 * p * t * t
            + self.c21 as f32 * p * p * t
    }
}

/// Derive the ADC gain `alpha` and the linear temperature coefficients
/// `a'` and `b'` from the factory trims.
fn ptat_correction(t_gain: i32, t_dvbe: i32, t_vbe: i32) -> (f32, f32, f32) {
    let vbe = t_vbe as f32 * 1.050_31e-4 + 0.463_232_42;
    let dvbe = t_dvbe as f32 * 1.258_85e-5 + 0.040_276_21;
    let alpha = t_gain as f32 * 8.4375e-5 + 9.483_203;

    let t_calib = A_0 * dvbe - 273.15;
    let vbe_cal = vbe - (t_calib - T_REF) * T_C_VBE;
    let k_ptat = (V_BE_TARGET - vbe_cal) * K_PTAT_CORNER + K_PTAT_CURVATURE;

    let a_prime = A_0 * (vbe_cal + alpha * dvbe) * (1.0 + k_ptat);
    let b_prime = -273.15 * (1.0 + k_ptat) - k_ptat * t_calib;
    (alpha, a_prime, b_prime)
}
