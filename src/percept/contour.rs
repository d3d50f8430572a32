//! 60-phon equal-loudness contour (ISO 226-class reference values).
//!
//! The loudness estimator divides per-bin dB values by the contour level at
//! the bin frequency, so quieter-to-the-ear bands contribute less.

/// Contour control-point frequencies in Hz.
pub const CONTOUR_FREQ_HZ: [f32; 25] = [
    25.0, 31.5, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0, 400.0, 500.0,
    630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0, 5000.0, 6300.0,
];

/// SPL in dB at each control point for constant 60-phon perceived loudness.
pub const CONTOUR_SPL_DB: [f32; 25] = [
    104.23, 99.08, 94.18, 89.96, 85.94, 82.05, 78.65, 75.56, 72.47, 69.86, 67.53, 65.39, 63.45,
    62.05, 60.81, 59.89, 60.01, 62.15, 63.19, 59.96, 57.26, 56.42, 57.57, 60.89, 66.36,
];

/// 60-phon SPL (dB) at `freq` via piecewise-linear interpolation.
///
/// Frequencies outside the table clamp to the edge values. That flat
/// extrapolation is deliberate: the analysis band never strays far past the
/// table, and the edge level is a better divisor than any extrapolated slope.
pub fn level_db(freq: f32) -> f32 {
    let last = CONTOUR_FREQ_HZ.len() - 1;
    if freq <= CONTOUR_FREQ_HZ[0] {
        return CONTOUR_SPL_DB[0];
    }
    if freq >= CONTOUR_FREQ_HZ[last] {
        return CONTOUR_SPL_DB[last];
    }

    for i in 0..last {
        if freq >= CONTOUR_FREQ_HZ[i] && freq < CONTOUR_FREQ_HZ[i + 1] {
            let k = (freq - CONTOUR_FREQ_HZ[i]) / (CONTOUR_FREQ_HZ[i + 1] - CONTOUR_FREQ_HZ[i]);
            return CONTOUR_SPL_DB[i] + (CONTOUR_SPL_DB[i + 1] - CONTOUR_SPL_DB[i]) * k;
        }
    }
    unreachable!()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_at_control_points() {
        assert_eq!(level_db(25.0), 104.23);
        assert_eq!(level_db(1000.0), 60.01);
        assert_eq!(level_db(6300.0), 66.36);
    }

    #[test]
    fn interpolates_between_points() {
        // Midpoint of the 25-31.5 Hz segment
        let mid = level_db(28.25);
        assert!((mid - (104.23 + 99.08) / 2.0).abs() < 1e-3);

        // 150 Hz lies between 125 and 160 Hz
        let v = level_db(150.0);
        assert!(v < 75.56 && v > 72.47);
    }

    #[test]
    fn clamps_outside_table() {
        assert_eq!(level_db(5.0), 104.23);
        assert_eq!(level_db(20000.0), 66.36);
    }

    #[test]
    fn monotone_through_bass() {
        // The contour falls steadily from 25 Hz up to 800 Hz
        let mut prev = level_db(25.0);
        for f in [40.0, 80.0, 160.0, 315.0, 630.0, 800.0] {
            let v = level_db(f);
            assert!(v < prev, "contour should fall at {} Hz", f);
            prev = v;
        }
    }
}
