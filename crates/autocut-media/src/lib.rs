//! FFmpeg CLI wrapper and audio analysis for AutoCut.
//!
//! This crate provides:
//! - Audio-track extraction to PCM WAV via the FFmpeg binary
//! - FFprobe-based duration and frame-rate probing
//! - WAV decoding into normalized mono buffers
//! - The energy-threshold silence scan

pub mod audio;
pub mod command;
pub mod error;
pub mod extract;
pub mod probe;
pub mod silence;

pub use audio::AudioBuffer;
pub use command::create_ffmpeg_command;
pub use error::{MediaError, MediaResult};
pub use extract::{extract_audio, DEFAULT_SAMPLE_RATE};
pub use probe::{get_duration, probe_video, VideoInfo};
pub use silence::{analyze_wav, detect_silence, SilenceAnalysis, SilenceConfig};
