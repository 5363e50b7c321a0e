//! Subtitle emission from transcript segments.
//!
//! SRT and WebVTT share the same structure and differ in header and
//! millisecond separator only.

use std::fmt::Write as _;

use autocut_models::TranscriptSegment;

/// Render transcript segments as an SRT document.
pub fn to_srt(segments: &[TranscriptSegment]) -> String {
    let mut out = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        let _ = writeln!(out, "{}", idx + 1);
        let _ = writeln!(
            out,
            "{} --> {}",
            format_timestamp(segment.start_s, ','),
            format_timestamp(segment.end_s, ',')
        );
        let _ = writeln!(out, "{}", segment.text.trim());
        out.push('\n');
    }
    out
}

/// Render transcript segments as a WebVTT document.
pub fn to_vtt(segments: &[TranscriptSegment]) -> String {
    let mut out = String::from("WEBVTT\n\n");
    for segment in segments {
        let _ = writeln!(
            out,
            "{} --> {}",
            format_timestamp(segment.start_s, '.'),
            format_timestamp(segment.end_s, '.')
        );
        let _ = writeln!(out, "{}", segment.text.trim());
        out.push('\n');
    }
    out
}

/// Format seconds as `HH:MM:SS<sep>mmm`.
fn format_timestamp(seconds: f64, millis_sep: char) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{mins:02}:{secs:02}{millis_sep}{ms:03}")
}
