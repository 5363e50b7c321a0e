//! Silence detection over decoded audio.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │ WAV / buffer │───►│ RMS windows  │───►│ Run-length scan  │
//! │ (mono f32)   │    │ (dBFS level) │    │ (min-duration)   │
//! └──────────────┘    └──────────────┘    └──────────────────┘
//!                                                 │
//!                                                 ▼
//!                                    silence + non-silent periods
//! ```

mod config;
mod detector;

pub use config::SilenceConfig;
pub use detector::{detect_silence, SilenceAnalysis};

use std::path::Path;

use crate::audio::AudioBuffer;
use crate::error::MediaResult;

/// Decode a WAV file and run the silence scan on it.
pub fn analyze_wav(path: impl AsRef<Path>, config: &SilenceConfig) -> MediaResult<SilenceAnalysis> {
    let buffer = AudioBuffer::from_wav_path(path)?;
    detect_silence(&buffer, config)
}
