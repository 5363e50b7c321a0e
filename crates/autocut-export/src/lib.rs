//! NLE timeline exporters for AutoCut.
//!
//! Two serializers share one input contract and emit the same keep list
//! as incompatible professional timeline dialects:
//! - `xmeml`: frame-based, flat clip list, Premiere-importable
//! - `fcpxml`: seconds-based, spine of asset-clips, Final-Cut-importable
//!
//! Both are pure; a failure in one never affects the other. Subtitle
//! rendering for transcripts lives here too.

pub mod error;
pub mod fcpxml;
pub mod subtitles;
pub mod timeline;
pub mod xmeml;

pub use error::{ExportError, ExportResult};
pub use fcpxml::FcpXmlExporter;
pub use subtitles::{to_srt, to_vtt};
pub use timeline::{TimelineExporter, TimelineSpec};
pub use xmeml::PremiereXmlExporter;
