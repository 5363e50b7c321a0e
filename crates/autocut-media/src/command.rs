//! FFmpeg process invocation helpers.

use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Create an FFmpeg command after checking the binary is reachable.
pub fn create_ffmpeg_command() -> MediaResult<Command> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;
    let mut cmd = Command::new("ffmpeg");
    cmd.stdin(Stdio::null());
    Ok(cmd)
}

/// Run an FFmpeg command to completion, mapping a non-zero exit to a
/// typed error carrying captured stderr.
pub async fn run_ffmpeg(mut cmd: Command, what: &str) -> MediaResult<()> {
    let output = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| MediaError::ffmpeg_failed(format!("{what}: {e}"), None, None))?;

    if !output.status.success() {
        return Err(MediaError::ffmpeg_failed(
            what,
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
            output.status.code(),
        ));
    }

    Ok(())
}
