//! Fixed-point temperature compensation (BMP280 datasheet §3.11.3).
//!
//! The reference routine is written against 32-bit integers. For coefficients
//! at the edges of their declared widths some of its products leave the `i32`
//! range, so the intermediates here are carried in `i64`. Everywhere the
//! 32-bit routine does not overflow the two agree bit for bit, and `t_fine`
//! and the result always fit in `i32`.

use core::fmt;

use super::calibration::CalibrationCoefficients;
use super::registers::MEASUREMENT_LEN;

/// Largest value a 20-bit ADC count can take.
pub const ADC_MAX: u32 = (1 << 20) - 1;

/// The six bytes of one burst read starting at `press_msb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMeasurement([u8; MEASUREMENT_LEN]);

impl RawMeasurement {
    pub const fn new(raw: [u8; MEASUREMENT_LEN]) -> Self {
        Self(raw)
    }

    /// 20-bit temperature count from temp_msb, temp_lsb and the top nibble of temp_xlsb.
    pub const fn adc_t(&self) -> u32 {
        Self::adc20(self.0[3], self.0[4], self.0[5])
    }

    /// 20-bit pressure count. Decoded for diagnostics only; never compensated.
    pub const fn adc_p(&self) -> u32 {
        Self::adc20(self.0[0], self.0[1], self.0[2])
    }

    const fn adc20(msb: u8, lsb: u8, xlsb: u8) -> u32 {
        ((msb as u32) << 12) | ((lsb as u32) << 4) | ((xlsb as u32) >> 4)
    }
}

/// Intermediate `t_fine` value of the compensation formula.
///
/// Overwritten on every compensation; pressure compensation would consume it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FineTemperature(pub i32);

/// Temperature in hundredths of a degree Celsius (5123 = 51.23 °C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CentiCelsius(pub i32);

impl CentiCelsius {
    /// Whole degrees, truncated toward zero.
    pub const fn whole(self) -> i32 {
        self.0 / 100
    }

    /// Hundredths of a degree, always in `0..100`.
    pub const fn fraction(self) -> u32 {
        (self.0 % 100).unsigned_abs()
    }
}

impl fmt::Display for CentiCelsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // -0.05 has a whole part of 0, so the sign cannot come from `whole()`.
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.whole().unsigned_abs(), self.fraction())
    }
}

/// Compensate a raw temperature count.
///
/// Writes the fine temperature to `t_fine` and returns the temperature in
/// hundredths of a degree. Never fails: implausible counts simply produce
/// implausible temperatures.
pub fn compensate_temperature(
    adc_t: u32,
    calib: &CalibrationCoefficients,
    t_fine: &mut FineTemperature,
) -> CentiCelsius {
    let adc_t = i64::from(adc_t);
    let t1 = i64::from(calib.t1);
    let t2 = i64::from(calib.t2);
    let t3 = i64::from(calib.t3);

    let var1 = (((adc_t >> 3) - (t1 << 1)) * t2) >> 11;
    let delta = (adc_t >> 4) - t1;
    let var2 = (((delta * delta) >> 12) * t3) >> 14;

    let fine = var1 + var2;
    // Bounded by ~4.2e6 in magnitude for 20-bit counts and 16-bit coefficients.
    t_fine.0 = fine as i32;

    CentiCelsius(((fine * 5 + 128) >> 8) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASHEET_CALIB: CalibrationCoefficients = CalibrationCoefficients {
        t1: 27504,
        t2: 26435,
        t3: -1000,
    };

    /// Unbounded-width rendition of the reference formula.
    fn reference(adc_t: u32, calib: &CalibrationCoefficients) -> (i128, i128) {
        let adc_t = adc_t as i128;
        let (t1, t2, t3) = (calib.t1 as i128, calib.t2 as i128, calib.t3 as i128);
        let var1 = (((adc_t >> 3) - (t1 << 1)) * t2) >> 11;
        let var2 = (((((adc_t >> 4) - t1) * ((adc_t >> 4) - t1)) >> 12) * t3) >> 14;
        let fine = var1 + var2;
        (fine, (fine * 5 + 128) >> 8)
    }

    /// The 32-bit routine from the datasheet, verbatim.
    fn datasheet_i32(adc_t: i32, calib: &CalibrationCoefficients) -> (i32, i32) {
        let var1 = (((adc_t >> 3) - ((calib.t1 as i32) << 1)) * (calib.t2 as i32)) >> 11;
        let var2 = (((((adc_t >> 4) - (calib.t1 as i32)) * ((adc_t >> 4) - (calib.t1 as i32)))
            >> 12)
            * (calib.t3 as i32))
            >> 14;
        let fine = var1 + var2;
        (fine, (fine * 5 + 128) >> 8)
    }

    #[test]
    fn test_datasheet_vector() {
        let mut t_fine = FineTemperature::default();

        let temperature = compensate_temperature(519888, &DATASHEET_CALIB, &mut t_fine);

        assert_eq!(temperature, CentiCelsius(2508));
        assert_eq!(t_fine, FineTemperature(128422));
    }

    #[test]
    fn test_known_vector_51_23() {
        let mut t_fine = FineTemperature::default();

        let temperature = compensate_temperature(603584, &DATASHEET_CALIB, &mut t_fine);

        assert_eq!(temperature, CentiCelsius(5123));
        assert_eq!(t_fine, FineTemperature(262276));
        assert_eq!(((t_fine.0 * 5 + 128) >> 8), temperature.0);
    }

    #[test]
    fn test_compensation_is_deterministic() {
        let mut first = FineTemperature::default();
        let mut second = FineTemperature(-1);

        let a = compensate_temperature(415148, &DATASHEET_CALIB, &mut first);
        let b = compensate_temperature(415148, &DATASHEET_CALIB, &mut second);

        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_t_fine_is_overwritten_not_accumulated() {
        let mut t_fine = FineTemperature(1_000_000);

        compensate_temperature(519888, &DATASHEET_CALIB, &mut t_fine);

        assert_eq!(t_fine, FineTemperature(128422));
    }

    #[test]
    fn test_matches_datasheet_routine_on_typical_range() {
        for adc_t in (300_000..700_000).step_by(997) {
            let mut t_fine = FineTemperature::default();
            let temperature = compensate_temperature(adc_t, &DATASHEET_CALIB, &mut t_fine);
            let (fine, expected) = datasheet_i32(adc_t as i32, &DATASHEET_CALIB);

            assert_eq!(t_fine.0, fine, "t_fine mismatch at adc_t={adc_t}");
            assert_eq!(temperature.0, expected, "temperature mismatch at adc_t={adc_t}");
        }
    }

    #[test]
    fn test_no_wrap_across_declared_widths() {
        let adc_samples = [0, 1, 0x7FFFF, 0x80000, 519888, ADC_MAX - 1, ADC_MAX];
        let t1_samples = [0, 1, 27504, 32768, u16::MAX];
        let signed_samples = [i16::MIN, -1000, -1, 0, 1, 26435, i16::MAX];

        for &adc_t in &adc_samples {
            for &t1 in &t1_samples {
                for &t2 in &signed_samples {
                    for &t3 in &signed_samples {
                        let calib = CalibrationCoefficients { t1, t2, t3 };
                        let mut t_fine = FineTemperature::default();

                        let temperature = compensate_temperature(adc_t, &calib, &mut t_fine);
                        let (fine, expected) = reference(adc_t, &calib);

                        assert_eq!(i128::from(t_fine.0), fine, "t_fine for {calib:?} adc={adc_t}");
                        assert_eq!(i128::from(temperature.0), expected, "T for {calib:?} adc={adc_t}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_decode_adc_counts() {
        let raw = RawMeasurement::new([0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00]);

        assert_eq!(raw.adc_p(), 415148);
        assert_eq!(raw.adc_t(), 519888);
    }

    #[test]
    fn test_decode_ignores_low_nibble_of_xlsb() {
        let raw = RawMeasurement::new([0, 0, 0, 0xFF, 0xFF, 0xFF]);

        assert_eq!(raw.adc_t(), ADC_MAX);
    }

    #[test]
    fn test_centi_celsius_display() {
        assert_eq!(std::format!("{}", CentiCelsius(5123)), "51.23");
        assert_eq!(std::format!("{}", CentiCelsius(2508)), "25.08");
        assert_eq!(std::format!("{}", CentiCelsius(0)), "0.00");
        assert_eq!(std::format!("{}", CentiCelsius(-5)), "-0.05");
        assert_eq!(std::format!("{}", CentiCelsius(-1234)), "-12.34");
    }
}
