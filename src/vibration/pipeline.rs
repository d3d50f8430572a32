//! Block pipeline: frame extraction at the input rate, perceptual analysis,
//! inversion, synthesis at the output rate, placement, and the final
//! normalize-and-clip pass.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::error::InputError;
use crate::percept::features::{self, Spectrum};
use crate::percept::{mapping, ContentType};

use super::synth::{self, VIB_SAMPLE_RATE};

/// Analysis frame length in input-rate samples.
pub const FRAME_SIZE: usize = 4096;
/// Target RMS of the finished waveform.
pub const TARGET_RMS: f32 = 0.15;
/// Below this RMS the buffer is considered silent and left unscaled.
const SILENCE_RMS: f32 = 1e-6;

/// Pipeline knobs. The defaults reproduce the reference behavior:
/// non-overlapping frames, 40 dB peak window, 0.15 target RMS.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub content: ContentType,
    /// Frame advance in input samples. Smaller than `FRAME_SIZE` means
    /// overlapping frames; placement stays additive either way.
    pub hop: usize,
    pub peak_drop_db: f32,
    pub target_rms: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            content: ContentType::Game,
            hop: FRAME_SIZE,
            peak_drop_db: features::PEAK_DROP_DB,
            target_rms: TARGET_RMS,
        }
    }
}

/// Translate a mono, peak-normalized waveform at `sample_rate` into a
/// vibration waveform at [`VIB_SAMPLE_RATE`].
///
/// The output length is exactly `ceil(len * VIB_SAMPLE_RATE / sample_rate)`.
/// Frames are analyzed in parallel; each yields a scratch segment that a
/// single sequential pass adds into the output buffer, since placement
/// ranges may overlap under small hops.
pub fn translate(
    samples: &[f32],
    sample_rate: u32,
    opts: &Options,
) -> Result<Vec<f32>, InputError> {
    if samples.is_empty() {
        return Err(InputError::EmptyWaveform);
    }
    if samples.iter().any(|s| !s.is_finite()) {
        return Err(InputError::NonFinite);
    }

    // Index arithmetic in f64: sample counts overflow f32 precision quickly
    let ratio = VIB_SAMPLE_RATE as f64 / sample_rate as f64;
    let n_out_total = (samples.len() as f64 * ratio).ceil() as usize;
    let seg_len = (FRAME_SIZE as f64 * ratio).round() as usize;

    let hop = opts.hop.max(1);
    let starts: Vec<usize> = (0..samples.len()).step_by(hop).collect();

    log::debug!(
        "Translating {} samples @ {}Hz: {} frames, {} output samples",
        samples.len(),
        sample_rate,
        starts.len(),
        n_out_total
    );

    let pb = ProgressBar::new(starts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames")
            .unwrap()
            .progress_chars("=>-"),
    );

    let segments: Vec<(usize, Vec<f32>)> = starts
        .par_iter()
        .map(|&start| {
            let mut frame = vec![0.0f32; FRAME_SIZE];
            let end = (start + FRAME_SIZE).min(samples.len());
            frame[..end - start].copy_from_slice(&samples[start..end]);

            let spectrum = Spectrum::compute(&frame, sample_rate);
            let la = features::loudness(&spectrum, opts.content);
            let ra = features::roughness(&spectrum, opts.peak_drop_db);
            let (iv, rv) = mapping::targets(la, ra, opts.content);
            let (a1, a2) = mapping::amplitudes(iv, rv);

            let out_start = (start as f64 * ratio).round() as usize;
            pb.inc(1);
            (out_start, synth::synthesize(a1, a2, seg_len))
        })
        .collect();
    pb.finish_and_clear();

    // Sequential merge: additive placement, truncated at the buffer end
    let mut out = vec![0.0f32; n_out_total];
    for (out_start, segment) in segments {
        if out_start >= n_out_total {
            continue;
        }
        let len = segment.len().min(n_out_total - out_start);
        for (dst, src) in out[out_start..out_start + len].iter_mut().zip(&segment[..len]) {
            *dst += src;
        }
    }

    // One RMS normalization over the whole waveform, skipped for silence
    let rms = (out.iter().map(|&s| s as f64 * s as f64).sum::<f64>() / out.len() as f64).sqrt()
        as f32;
    if rms > SILENCE_RMS {
        let scale = opts.target_rms / rms;
        for s in out.iter_mut() {
            *s *= scale;
        }
    }

    for s in out.iter_mut() {
        *s = s.clamp(-1.0, 1.0);
    }

    Ok(out)
}
