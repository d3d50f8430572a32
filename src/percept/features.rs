//! Per-frame psychoacoustic loudness and roughness estimators.
//!
//! Both operate on the magnitude spectrum of one rectangular analysis block.
//! Loudness weighs per-bin dB values against the equal-loudness contour;
//! roughness accumulates pairwise beat interactions between spectral peaks.

use rustfft::{num_complex::Complex, FftPlanner};

use super::contour;
use super::ContentType;

/// Lower edge of every analysis band, in Hz.
pub const BAND_LOW_HZ: f32 = 25.0;
/// Upper edge of the full (game/movie) band, in Hz.
pub const BAND_HIGH_HZ: f32 = 6400.0;
/// Upper edge of the bass band used for music loudness, in Hz.
pub const BASS_HIGH_HZ: f32 = 200.0;

/// Linear scale applied to magnitudes before the dB conversion.
pub const MAG_SCALE: f32 = 1.37;
/// Loudness gain for full-band (game/movie) content.
pub const FULLBAND_GAIN: f32 = 0.065;
/// Loudness gain for bass-band (music) content.
pub const BASS_GAIN: f32 = 1.91;

/// A spectral peak counts if its dB value is within this drop of the frame
/// maximum. Configurable at the pipeline level.
pub const PEAK_DROP_DB: f32 = 40.0;

// Beat-frequency sensitivity: s = 0.24 / (0.0207 * f_min + 18.96)
const SENS_NUM: f32 = 0.24;
const SENS_SLOPE: f32 = 0.0207;
const SENS_OFFSET: f32 = 18.96;
// Amplitude term exponents
const GEO_MEAN_EXP: f32 = 0.1;
const RATIO_EXP: f32 = 3.11;
// Double-exponential envelope decay rates over the frequency difference
const ENV_DECAY_SLOW: f32 = 3.5;
const ENV_DECAY_FAST: f32 = 5.75;

const LOG_GUARD: f32 = 1e-12;

/// Magnitude spectrum of one analysis frame.
pub struct Spectrum {
    mags: Vec<f32>,
    bin_hz: f32,
}

impl Spectrum {
    /// Real-input magnitude spectrum: bins 0..=N/2, rectangular window.
    pub fn compute(frame: &[f32], sample_rate: u32) -> Self {
        let n = frame.len();
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(n);

        let mut buffer: Vec<Complex<f32>> =
            frame.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft.process(&mut buffer);

        let mags: Vec<f32> = buffer[..=n / 2].iter().map(|c| c.norm()).collect();

        Spectrum {
            mags,
            bin_hz: sample_rate as f32 / n as f32,
        }
    }

    /// Bins whose center frequency lies in `[low_hz, high_hz]`, as
    /// `(frequency, magnitude)` pairs.
    fn band(&self, low_hz: f32, high_hz: f32) -> impl Iterator<Item = (f32, f32)> + '_ {
        let bin_hz = self.bin_hz;
        self.mags
            .iter()
            .enumerate()
            .map(move |(i, &mag)| (i as f32 * bin_hz, mag))
            .filter(move |&(freq, _)| freq >= low_hz && freq <= high_hz)
    }
}

/// Perceived loudness of one frame, clamped non-negative.
///
/// Music content is driven by bass energy only, with a correspondingly larger
/// gain; game/movie content uses the full band.
pub fn loudness(spectrum: &Spectrum, content: ContentType) -> f32 {
    let (gain, f_max) = match content {
        ContentType::Game => (FULLBAND_GAIN, BAND_HIGH_HZ),
        ContentType::Music => (BASS_GAIN, BASS_HIGH_HZ),
    };

    let sum: f32 = spectrum
        .band(BAND_LOW_HZ, f_max)
        .map(|(freq, mag)| {
            let db = 20.0 * (MAG_SCALE * mag + LOG_GUARD).log10();
            db / contour::level_db(freq)
        })
        .sum();

    (gain * sum).max(0.0)
}

/// Perceived roughness of one frame: the sum of pairwise beat interactions
/// between spectral peaks in the full analysis band.
///
/// A peak is a bin strictly above both neighbors whose dB value is within
/// `peak_drop_db` of the frame maximum. Fewer than two peaks yield 0.
pub fn roughness(spectrum: &Spectrum, peak_drop_db: f32) -> f32 {
    let bins: Vec<(f32, f32)> = spectrum.band(BAND_LOW_HZ, BAND_HIGH_HZ).collect();
    if bins.len() < 3 {
        return 0.0;
    }

    let db: Vec<f32> = bins
        .iter()
        .map(|&(_, mag)| 20.0 * (mag + LOG_GUARD).log10())
        .collect();
    let max_db = db.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let thresh = max_db - peak_drop_db;

    let mut peaks: Vec<(f32, f32)> = Vec::new();
    for i in 1..bins.len() - 1 {
        if db[i] >= thresh && db[i] > db[i - 1] && db[i] > db[i + 1] {
            peaks.push(bins[i]);
        }
    }

    // Every unordered pair contributes; the peak count stays small enough
    // that the quadratic loop is not worth approximating.
    let mut total = 0.0f32;
    for i in 0..peaks.len() {
        for j in i + 1..peaks.len() {
            let (f1, x1) = peaks[i];
            let (f2, x2) = peaks[j];
            let (x_min, x_max) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
            let fd = (f2 - f1).abs();

            let s = SENS_NUM / (SENS_SLOPE * f1.min(f2) + SENS_OFFSET);
            let term = (x_min * x_max).powf(GEO_MEAN_EXP) / 2.0
                * (2.0 * x_min / (x_min + x_max)).powf(RATIO_EXP);

            total += term * ((-ENV_DECAY_SLOW * s * fd).exp() - (-ENV_DECAY_FAST * s * fd).exp());
        }
    }

    total
}
