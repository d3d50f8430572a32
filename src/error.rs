use thiserror::Error;

/// Validation failures detected before the waveform enters the pipeline.
/// Numeric degeneracies inside the pipeline (negative discriminant, no
/// in-range root, near-silent normalization) are resolved by documented
/// fallbacks and never surface as errors.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input waveform is empty")]
    EmptyWaveform,

    #[error("input waveform contains non-finite samples")]
    NonFinite,
}
