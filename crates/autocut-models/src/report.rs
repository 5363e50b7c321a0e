//! Final report assembled by the pipeline for a completed job.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::interval::Interval;
use crate::plan::CutStatistics;

/// Paths of the timeline documents written for a job.
///
/// A failed export is recorded as `None`; the job as a whole still
/// succeeds when the cut computation did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportPaths {
    /// Frame-based Premiere-style XML
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premiere_xml: Option<PathBuf>,
    /// Seconds-based Final Cut Pro FCPXML
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcpxml: Option<PathBuf>,
    /// SRT subtitles for the transcript, when one was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<PathBuf>,
}

/// Everything the job-status surface reports for a finished job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProcessingReport {
    /// Source video path
    pub video_path: PathBuf,

    /// Source video file name
    pub video_name: String,

    /// Source duration in seconds
    pub duration_seconds: f64,

    /// Kept segments in milliseconds
    pub keep_intervals: Vec<Interval>,

    /// Cut summary
    pub statistics: CutStatistics,

    /// Written timeline documents
    pub exports: ExportPaths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_paths_skip_absent_entries() {
        let paths = ExportPaths {
            premiere_xml: Some(PathBuf::from("/out/talk_premiere_pro.xml")),
            fcpxml: None,
            subtitles: None,
        };
        let json = serde_json::to_string(&paths).unwrap();
        assert!(json.contains("premiere_xml"));
        assert!(!json.contains("fcpxml"));
    }
}
