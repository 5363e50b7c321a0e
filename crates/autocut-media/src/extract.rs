//! Audio extraction from video files.
//!
//! The external transcoder contract: 16-bit PCM WAV, stereo, at a
//! configurable sample rate.

use std::path::Path;
use tracing::debug;

use crate::command::{create_ffmpeg_command, run_ffmpeg};
use crate::error::{MediaError, MediaResult};

/// Default extraction sample rate (44.1 kHz, matching the source service).
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Extract the audio track of `video` to a PCM WAV file.
pub async fn extract_audio(
    video: &Path,
    wav_out: &Path,
    sample_rate: u32,
) -> MediaResult<()> {
    if !video.exists() {
        return Err(MediaError::FileNotFound(video.to_path_buf()));
    }

    debug!(
        input = %video.display(),
        output = %wav_out.display(),
        sample_rate,
        "Extracting audio track"
    );

    let mut cmd = create_ffmpeg_command()?;
    cmd.args([
        "-i",
        video.to_str().unwrap_or_default(),
        "-vn",
        "-acodec",
        "pcm_s16le",
        "-ar",
        &sample_rate.to_string(),
        "-ac",
        "2",
        "-y",
        wav_out.to_str().unwrap_or_default(),
    ]);

    run_ffmpeg(cmd, "audio extraction").await?;

    let metadata = tokio::fs::metadata(wav_out).await?;
    if metadata.len() == 0 {
        return Err(MediaError::EmptyAudio);
    }

    debug!(output_size = metadata.len(), "Audio extraction complete");
    Ok(())
}
