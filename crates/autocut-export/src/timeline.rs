//! Shared contract for the timeline exporters.
//!
//! Both formats are pure functions of the same inputs: the keep list,
//! the source media reference, a frame rate, and the total duration.
//! They are two concrete strategies behind one capability, not a class
//! hierarchy; the documents they build diverge structurally more than
//! they overlap.

use std::path::Path;

use autocut_models::Interval;

use crate::error::{ExportError, ExportResult};

/// Input contract shared by every timeline exporter.
#[derive(Debug, Clone, Copy)]
pub struct TimelineSpec<'a> {
    /// Kept segments, sorted and non-overlapping, in source milliseconds
    pub keep_intervals: &'a [Interval],
    /// The source media file both timelines reference
    pub media_path: &'a Path,
    /// Frame rate for frame-based placement
    pub fps: u32,
    /// Source duration in seconds
    pub total_duration_seconds: f64,
}

impl<'a> TimelineSpec<'a> {
    /// Validate the parts every exporter relies on.
    pub fn validate(&self) -> ExportResult<()> {
        if self.fps == 0 {
            return Err(ExportError::InvalidFps(self.fps));
        }
        Ok(())
    }

    /// File name of the referenced media.
    pub fn media_name(&self) -> String {
        self.media_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File stem of the referenced media, used in sequence names.
    pub fn media_stem(&self) -> String {
        self.media_path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Forward-slash path with no leading slash, ready for URL building.
    pub fn media_posix(&self) -> String {
        self.media_path
            .to_string_lossy()
            .replace('\\', "/")
            .trim_start_matches('/')
            .to_string()
    }
}

/// A timeline serializer for one NLE dialect.
pub trait TimelineExporter: Send + Sync {
    /// Short format label used in logs and output file naming.
    fn format_name(&self) -> &'static str;

    /// Extension of the emitted document, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Serialize the keep list into a complete XML document.
    fn export(&self, spec: &TimelineSpec<'_>) -> ExportResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_fps() {
        let spec = TimelineSpec {
            keep_intervals: &[],
            media_path: Path::new("/videos/talk.mp4"),
            fps: 0,
            total_duration_seconds: 10.0,
        };
        assert!(matches!(spec.validate(), Err(ExportError::InvalidFps(0))));
    }

    #[test]
    fn test_media_name_helpers() {
        let spec = TimelineSpec {
            keep_intervals: &[],
            media_path: Path::new("/videos/talk.mp4"),
            fps: 30,
            total_duration_seconds: 10.0,
        };
        assert_eq!(spec.media_name(), "talk.mp4");
        assert_eq!(spec.media_stem(), "talk");
        assert_eq!(spec.media_posix(), "videos/talk.mp4");
    }
}
