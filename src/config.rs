use serde::Deserialize;
use std::path::PathBuf;

use crate::percept::features;
use crate::percept::ContentType;
use crate::vibration::pipeline;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub vibration: VibrationConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_hop")]
    pub hop_size: usize,
    #[serde(default = "default_peak_drop")]
    pub peak_drop_db: f32,
    #[serde(default)]
    pub content_type: Option<ContentType>,
}

#[derive(Debug, Deserialize)]
pub struct VibrationConfig {
    #[serde(default = "default_target_rms")]
    pub target_rms: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hop_size: default_hop(),
            peak_drop_db: default_peak_drop(),
            content_type: None,
        }
    }
}

impl Default for VibrationConfig {
    fn default() -> Self {
        Self {
            target_rms: default_target_rms(),
        }
    }
}

fn default_hop() -> usize { pipeline::FRAME_SIZE }
fn default_peak_drop() -> f32 { features::PEAK_DROP_DB }
fn default_target_rms() -> f32 { pipeline::TARGET_RMS }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.analysis.hop_size, pipeline::FRAME_SIZE);
        assert_eq!(cfg.analysis.peak_drop_db, features::PEAK_DROP_DB);
        assert_eq!(cfg.vibration.target_rms, pipeline::TARGET_RMS);
        assert!(cfg.analysis.content_type.is_none());
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let cfg: Config = toml::from_str(
            "[analysis]\ncontent_type = \"music\"\nhop_size = 2048\n",
        )
        .unwrap();
        assert_eq!(cfg.analysis.hop_size, 2048);
        assert_eq!(cfg.analysis.content_type, Some(ContentType::Music));
        assert_eq!(cfg.analysis.peak_drop_db, features::PEAK_DROP_DB);
        assert_eq!(cfg.vibration.target_rms, pipeline::TARGET_RMS);
    }

    #[test]
    fn vibration_section_parses() {
        let cfg: Config = toml::from_str("[vibration]\ntarget_rms = 0.2\n").unwrap();
        assert_eq!(cfg.vibration.target_rms, 0.2);
    }
}
