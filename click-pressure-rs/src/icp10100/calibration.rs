//! ICP-10100 three-point pressure calibration.
//!
//! The four OTP constants, together with the raw temperature, place three
//! look-up points on the sensor's transfer curve. Those three points are
//! matched against fixed reference pressures to solve
//! `P = A + B / (C + p_raw)`.
//!
//! Everything runs in `f32`, as in InvenSense's reference code.

use super::commands::OTP_WORDS;

/// Reference pressures (Pa) the look-up points correspond to.
const P_PA_CALIB: [f32; 3] = [45_000.0, 80_000.0, 105_000.0];
const LUT_LOWER: f32 = 3.5 * 1_048_576.0;
const LUT_UPPER: f32 = 11.5 * 1_048_576.0;
const QUADR_FACTOR: f32 = 1.0 / 16_777_216.0;
const OFFST_FACTOR: f32 = 2048.0;

/// Sensor constants read from OTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub constants: [i16; OTP_WORDS],
}

/// Coefficients of `P = A + B / (C + p_raw)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionConstants {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl ConversionConstants {
    /// Solve for the curve through three `(p_lut, p_pa)` pairs.
    pub fn solve(p_pa: [f32; 3], p_lut: [f32; 3]) -> Self {
        let c = (p_lut[0] * p_lut[1] * (p_pa[0] - p_pa[1])
            + p_lut[1] * p_lut[2] * (p_pa[1] - p_pa[2])
            + p_lut[2] * p_lut[0] * (p_pa[2] - p_pa[0]))
            / (p_lut[2] * (p_pa[0] - p_pa[1])
                + p_lut[0] * (p_pa[1] - p_pa[2])
                + p_lut[1] * (p_pa[2] - p_pa[0]));
        let a = (p_pa[0] * p_lut[0] - p_pa[1] * p_lut[1] - (p_pa[1] - p_pa[0]) * c)
            / (p_lut[0] - p_lut[1]);
        let b = (p_pa[0] - a) * (p_lut[0] + c);
        Self { a, b, c }
    }

    pub fn evaluate(&self, p_raw: f32) -> f32 {
        self.a + self.b / (self.c + p_raw)
    }
}

impl Calibration {
    /// The three look-up points at raw temperature `t_raw`.
    pub fn lut_points(&self, t_raw: u16) -> [f32; 3] {
        let t = t_raw as f32 - 32_768.0;
        let t2 = t * t * QUADR_FACTOR;
        let k = self.constants.map(|c| c as f32);

        [
            LUT_LOWER + k[0] * t2,
            OFFST_FACTOR * k[3] + k[1] * t2,
            LUT_UPPER + k[2] * t2,
        ]
    }

    /// Compensated pressure in Pa.
    pub fn pressure(&self, p_raw: u32, t_raw: u16) -> f32 {
        let constants = ConversionConstants::solve(P_PA_CALIB, self.lut_points(t_raw));
        constants.evaluate(p_raw as f32)
    }
}

/// Temperature in °C from the raw 16-bit temperature word.
pub fn temperature_c(t_raw: u16) -> f32 {
    -45.0 + 175.0 / 65_536.0 * t_raw as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_curve_passes_through_reference_points() {
        let lut = [3_700_000.0, 5_900_000.0, 12_000_000.0];
        let k = ConversionConstants::solve(P_PA_CALIB, lut);

        for (p_lut, p_pa) in lut.iter().zip(P_PA_CALIB) {
            let p = k.evaluate(*p_lut);
            // One f32 ulp at 105 kPa is 0.0078 Pa.
            assert!((p - p_pa).abs() < 0.02, "expected {}, got {}", p_pa, p);
        }
    }

    #[test]
    fn lut_points_at_reference_temperature() {
        // At t_raw = 32768 the quadratic terms vanish.
        let cal = Calibration {
            constants: [100, 200, 300, 3000],
        };
        let lut = cal.lut_points(32_768);
        assert_eq!(lut[0], LUT_LOWER);
        assert_eq!(lut[1], OFFST_FACTOR * 3000.0);
        assert_eq!(lut[2], LUT_UPPER);
    }

    #[test]
    fn pressure_is_monotonic_in_raw_value() {
        let cal = Calibration {
            constants: [-700, -500, 1800, 2900],
        };
        let low = cal.pressure(3_900_000, 30_000);
        let high = cal.pressure(8_000_000, 30_000);
        assert!(high > low);
    }

    #[test]
    fn pressure_at_mid_scale() {
        let cal = Calibration {
            constants: [-700, -500, 1800, 2900],
        };
        let lut = cal.lut_points(30_000);
        assert_eq!(lut, [3_669_696.25, 5_938_971.5, 12_059_446.0]);

        let pa = cal.pressure(5_000_000, 30_000);
        assert!((pa - 69_944.08).abs() < 0.01, "{}", pa);
    }

    #[test]
    fn temperature_conversion() {
        assert_eq!(temperature_c(0), -45.0);
        assert_eq!(temperature_c(32_768), 42.5);
    }
}
