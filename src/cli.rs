use clap::Parser;
use std::path::PathBuf;

use crate::percept::features;
use crate::percept::ContentType;
use crate::vibration::pipeline;

#[derive(Parser, Debug)]
#[command(name = "vibra", about = "Perception-level audio to vibrotactile waveform translator")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: Option<PathBuf>,

    /// Output haptic WAV file (mono, 8 kHz, 16-bit PCM)
    #[arg(short, long, default_value = "output.wav")]
    pub output: PathBuf,

    /// Content type of the input clip
    #[arg(short, long, value_enum, default_value = "game")]
    pub content: ContentType,

    /// Frame advance in input samples (defaults to the frame size: no overlap)
    #[arg(long, default_value_t = pipeline::FRAME_SIZE)]
    pub hop: usize,

    /// Roughness peak window: a spectral peak counts if it lies within this
    /// many dB of the frame maximum
    #[arg(long, default_value_t = features::PEAK_DROP_DB)]
    pub peak_drop_db: f32,

    /// Target RMS of the normalized output waveform
    #[arg(long, default_value_t = pipeline::TARGET_RMS)]
    pub target_rms: f32,

    /// Config file path (defaults to vibra.toml or the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
