mod audio;
mod cli;
mod config;
mod encode;
mod error;
mod percept;
mod vibration;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use percept::{features, ContentType};
use vibration::pipeline::{self, Options};
use vibration::synth;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect vibra.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("vibra.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("vibra").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.hop == pipeline::FRAME_SIZE {
                cli.hop = cfg.analysis.hop_size;
            }
            if cli.peak_drop_db == features::PEAK_DROP_DB {
                cli.peak_drop_db = cfg.analysis.peak_drop_db;
            }
            if cli.target_rms == pipeline::TARGET_RMS {
                cli.target_rms = cfg.vibration.target_rms;
            }
            if cli.content == ContentType::Game {
                if let Some(content) = cfg.analysis.content_type {
                    cli.content = content;
                }
            }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    log::info!("vibra - perception-level audio to vibration translator");
    log::info!("Input: {}", input.display());
    log::info!("Output: {}", cli.output.display());
    log::info!("Content type: {:?}", cli.content);

    // 1. Decode to mono
    log::info!("Decoding audio...");
    let mut audio_data = audio::decode::decode_audio(input)?;

    // 2. Peak-normalize so the model constants see a consistent level
    let peak = audio::normalize::peak_normalize(&mut audio_data.samples);
    log::info!("Peak-normalized input (peak was {:.4})", peak);

    // 3. Perceptual translation to the two-tone vibration waveform
    log::info!("Translating to vibration...");
    let options = Options {
        content: cli.content,
        hop: cli.hop,
        peak_drop_db: cli.peak_drop_db,
        target_rms: cli.target_rms,
    };
    let vibration = pipeline::translate(&audio_data.samples, audio_data.sample_rate, &options)?;

    // 4. Encode
    log::info!(
        "Writing {} samples @ {}Hz...",
        vibration.len(),
        synth::VIB_SAMPLE_RATE
    );
    encode::wav::write_wav(&cli.output, &vibration, synth::VIB_SAMPLE_RATE)?;

    log::info!("Done! Output: {}", cli.output.display());
    Ok(())
}
