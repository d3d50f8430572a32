//! Forward and inverse perceptual mapping.
//!
//! Forward: per-frame (loudness, roughness) to target vibrotactile
//! (intensity, roughness). Inverse: targets to the amplitudes of the two
//! fixed tones whose superposition reproduces the sensation. Pure math,
//! no state; all model constants are named so they can be tuned and tested
//! independently.

use super::ContentType;

/// Intensity gain for game/movie content (applied to sqrt(L) * R^2).
pub const GAME_GAIN: f32 = 0.035;
/// Intensity offset for game/movie content.
pub const GAME_OFFSET: f32 = 0.40;
/// Intensity gain for music content (applied to L).
pub const MUSIC_GAIN: f32 = 0.1;
/// Intensity offset for music content.
pub const MUSIC_OFFSET: f32 = 3.8;
/// Scale from auditory roughness to target vibrotactile roughness.
pub const ROUGHNESS_SCALE: f32 = 1.0;

// Inversion of the fitted quadratic relating the tone-mix ratio S to the
// targets: roots are (ROOT_OFFSET +/- sqrt(D)) / ROOT_SCALE with
// D = DISC_BASE - DISC_SCALE * (Rv - INTENSITY_SLOPE * Iv - ROUGHNESS_BIAS).
pub const DISC_BASE: f32 = 801.0;
pub const DISC_SCALE: f32 = 113.0;
pub const INTENSITY_SLOPE: f32 = 0.529;
pub const ROUGHNESS_BIAS: f32 = 0.479;
pub const ROOT_OFFSET: f32 = 28.3;
pub const ROOT_SCALE: f32 = 56.3;

/// Mix ratio used when neither quadratic root lands in [0, 1]: the vertex of
/// the quadratic, the nearest achievable point. A fixed constant, not a
/// per-input nearest-point search.
pub const FALLBACK_MIX: f32 = ROOT_OFFSET / ROOT_SCALE;

// Total-amplitude polynomial: A = ((AMP_QUAD*S^2 - AMP_LIN*S + Rv - AMP_BIAS) / AMP_SCALE)^2
pub const AMP_QUAD: f32 = 25.8;
pub const AMP_LIN: f32 = 25.5;
pub const AMP_BIAS: f32 = 0.203;
pub const AMP_SCALE: f32 = 3.98;

/// Forward mapping: auditory (loudness, roughness) to target vibrotactile
/// (intensity, roughness). Intensity is clamped non-negative.
pub fn targets(loudness: f32, roughness: f32, content: ContentType) -> (f32, f32) {
    let intensity = match content {
        ContentType::Game => GAME_GAIN * loudness.sqrt() * roughness * roughness - GAME_OFFSET,
        ContentType::Music => MUSIC_GAIN * loudness - MUSIC_OFFSET,
    };
    (intensity.max(0.0), ROUGHNESS_SCALE * roughness)
}

/// Inverse mapping: target (intensity, roughness) to the two tone amplitudes.
///
/// Zero intensity short-circuits to a silent frame. Otherwise the target
/// roughness is clamped to the achievable maximum for this intensity, the
/// quadratic in the mix ratio S is solved, and the smaller in-range root is
/// taken; when no root lies in [0, 1] the vertex `FALLBACK_MIX` stands in.
pub fn amplitudes(intensity: f32, roughness: f32) -> (f32, f32) {
    if intensity <= 0.0 {
        return (0.0, 0.0);
    }

    let rv_max = DISC_BASE / DISC_SCALE + INTENSITY_SLOPE * intensity + ROUGHNESS_BIAS;
    let rv = roughness.min(rv_max);

    // Clamped at zero: Rv beyond Rv_max would turn the discriminant negative
    let disc =
        (DISC_BASE - DISC_SCALE * (rv - INTENSITY_SLOPE * intensity - ROUGHNESS_BIAS)).max(0.0);
    let root = disc.sqrt();
    let low = (ROOT_OFFSET - root) / ROOT_SCALE;
    let high = (ROOT_OFFSET + root) / ROOT_SCALE;

    let in_range = |s: f32| (0.0..=1.0).contains(&s);
    let mix = if in_range(low) {
        low
    } else if in_range(high) {
        high
    } else {
        FALLBACK_MIX
    };

    let total = ((AMP_QUAD * mix * mix - AMP_LIN * mix + rv - AMP_BIAS) / AMP_SCALE).powi(2);
    let a2 = total * mix;
    (total - a2, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Target roughness that makes `mix` an exact root of the quadratic at
    /// the given intensity (the forward quadratic, solved for Rv).
    fn rv_for(mix: f32, intensity: f32) -> f32 {
        let root = ROOT_SCALE * mix - ROOT_OFFSET;
        INTENSITY_SLOPE * intensity + ROUGHNESS_BIAS + (DISC_BASE - root * root) / DISC_SCALE
    }

    #[test]
    fn intensity_never_negative() {
        let (iv, _) = targets(0.0, 0.0, ContentType::Game);
        assert_eq!(iv, 0.0);
        let (iv, _) = targets(0.0, 0.0, ContentType::Music);
        assert_eq!(iv, 0.0);
        // Music offset dominates small loudness
        let (iv, _) = targets(10.0, 5.0, ContentType::Music);
        assert_eq!(iv, 0.0);
        // Large inputs stay positive
        let (iv, _) = targets(100.0, 10.0, ContentType::Game);
        assert!(iv > 0.0);
    }

    #[test]
    fn branches_differ() {
        let (game, _) = targets(50.0, 2.0, ContentType::Game);
        let (music, _) = targets(50.0, 2.0, ContentType::Music);
        assert!((game - music).abs() > 1e-3);
    }

    #[test]
    fn roughness_target_is_scaled_roughness() {
        let (_, rv) = targets(1.0, 3.25, ContentType::Game);
        assert_eq!(rv, ROUGHNESS_SCALE * 3.25);
    }

    #[test]
    fn zero_intensity_is_silent() {
        assert_eq!(amplitudes(0.0, 5.0), (0.0, 0.0));
        assert_eq!(amplitudes(-1.0, 5.0), (0.0, 0.0));
    }

    #[test]
    fn round_trips_valid_mix() {
        // Construct (Iv, Rv) from a known in-range mix and recover it
        for &mix in &[0.1, 0.3, 0.5] {
            let iv = 1.0;
            let rv = rv_for(mix, iv);
            let (a1, a2) = amplitudes(iv, rv);
            assert!(a1 >= 0.0 && a2 >= 0.0);
            let recovered = a2 / (a1 + a2);
            assert!(
                (recovered - mix).abs() < 1e-3,
                "mix {} recovered as {}",
                mix,
                recovered
            );
        }
    }

    #[test]
    fn picks_smaller_in_range_root() {
        // Both roots in range: mix 0.3 gives roots 0.3 and ~0.705
        let rv = rv_for(0.3, 1.0);
        let (a1, a2) = amplitudes(1.0, rv);
        let recovered = a2 / (a1 + a2);
        assert!((recovered - 0.3).abs() < 1e-3);
    }

    #[test]
    fn falls_back_when_no_root_in_range() {
        // Rv = 0 with positive Iv pushes the discriminant past DISC_BASE:
        // low root negative, high root above 1
        let (a1, a2) = amplitudes(1.0, 0.0);
        assert!(a1.is_finite() && a2.is_finite());
        let recovered = a2 / (a1 + a2);
        assert!((recovered - FALLBACK_MIX).abs() < 1e-4);
    }

    #[test]
    fn clamps_unreachable_roughness() {
        // Far beyond Rv_max: clamped, discriminant pinned at zero, both
        // roots collapse onto the vertex
        let (a1, a2) = amplitudes(2.0, 1000.0);
        assert!(a1.is_finite() && a2.is_finite());
        assert!(a1 >= 0.0 && a2 >= 0.0);
        let recovered = a2 / (a1 + a2);
        assert!((recovered - FALLBACK_MIX).abs() < 1e-3);
    }

    #[test]
    fn huge_targets_stay_finite() {
        let (a1, a2) = amplitudes(5000.0, 200.0);
        assert!(a1.is_finite() && a2.is_finite());
        assert!(a1 >= 0.0 && a2 >= 0.0);
    }
}
