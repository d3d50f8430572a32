//! Two-tone vibration synthesis at the output rate.

use std::f32::consts::TAU;

/// Output (vibration) sample rate in Hz.
pub const VIB_SAMPLE_RATE: u32 = 8000;
/// First fixed tone, in Hz.
pub const TONE1_HZ: f32 = 175.0;
/// Second fixed tone, in Hz.
pub const TONE2_HZ: f32 = 210.0;

/// Synthesize `n_samples` of `a1*sin(2*pi*F1*t) + a2*sin(2*pi*F2*t)` at the
/// output rate. Time restarts at zero for every segment: blocks are
/// independently phased, matching the non-overlapping block placement.
pub fn synthesize(a1: f32, a2: f32, n_samples: usize) -> Vec<f32> {
    (0..n_samples)
        .map(|i| {
            let t = i as f32 / VIB_SAMPLE_RATE as f32;
            a1 * (TAU * TONE1_HZ * t).sin() + a2 * (TAU * TONE2_HZ * t).sin()
        })
        .collect()
}
