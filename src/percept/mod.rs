pub mod contour;
pub mod features;
pub mod mapping;

use clap::ValueEnum;
use serde::Deserialize;

/// Kind of audio content being translated. Selects the loudness band and the
/// forward-mapping branch; roughness uses the same estimator for both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Games and movies: full-band loudness, roughness-driven intensity
    Game,
    /// Music: bass-band loudness, loudness-driven intensity
    Music,
}
