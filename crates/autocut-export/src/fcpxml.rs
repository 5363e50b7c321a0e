//! Seconds-based Final Cut Pro timeline export (FCPXML dialect).
//!
//! Keep intervals are written with 3-decimal second precision and no
//! frame rounding, as an ordered run of `asset-clip` elements on a
//! single spine sharing one `asset` definition. Each clip's `start`
//! attribute carries the literal source timecode of the kept material,
//! while its `offset` advances contiguously along the spine; preserving
//! the source timecodes instead of renumbering them is the structural
//! difference from the frame-based format.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use tracing::debug;

use crate::error::ExportResult;
use crate::timeline::{TimelineExporter, TimelineSpec};

/// Format milliseconds as an FCPXML `"<seconds>s"` value.
pub fn ms_to_seconds(ms: u64) -> String {
    format!("{:.3}s", ms as f64 / 1000.0)
}

/// Final Cut Pro FCPXML exporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct FcpXmlExporter;

impl TimelineExporter for FcpXmlExporter {
    fn format_name(&self) -> &'static str {
        "final_cut_pro"
    }

    fn file_extension(&self) -> &'static str {
        "fcpxml"
    }

    fn export(&self, spec: &TimelineSpec<'_>) -> ExportResult<String> {
        spec.validate()?;

        debug!(
            clips = spec.keep_intervals.len(),
            fps = spec.fps,
            "Generating Final Cut Pro XML"
        );

        let duration_attr = format!("{:.3}s", spec.total_duration_seconds);

        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut fcpxml = BytesStart::new("fcpxml");
        fcpxml.push_attribute(("version", "1.9"));
        writer.write_event(Event::Start(fcpxml))?;

        // Shared resources: one format, one asset
        writer.write_event(Event::Start(BytesStart::new("resources")))?;

        let mut format = BytesStart::new("format");
        format.push_attribute(("id", "r1"));
        format.push_attribute(("name", format!("FFVideoFormat1080p{}", spec.fps).as_str()));
        format.push_attribute(("frameDuration", format!("1/{}s", spec.fps).as_str()));
        format.push_attribute(("width", "1920"));
        format.push_attribute(("height", "1080"));
        writer.write_event(Event::Empty(format))?;

        let mut asset = BytesStart::new("asset");
        asset.push_attribute(("id", "r2"));
        asset.push_attribute(("name", spec.media_stem().as_str()));
        asset.push_attribute(("start", "0s"));
        asset.push_attribute(("duration", duration_attr.as_str()));
        asset.push_attribute(("hasVideo", "1"));
        asset.push_attribute(("hasAudio", "1"));
        writer.write_event(Event::Start(asset))?;

        let mut media_rep = BytesStart::new("media-rep");
        media_rep.push_attribute(("kind", "original-media"));
        media_rep.push_attribute(("src", format!("file:///{}", spec.media_posix()).as_str()));
        writer.write_event(Event::Empty(media_rep))?;

        writer.write_event(Event::End(BytesEnd::new("asset")))?;
        writer.write_event(Event::End(BytesEnd::new("resources")))?;

        writer.write_event(Event::Start(BytesStart::new("library")))?;
        let mut event = BytesStart::new("event");
        event.push_attribute(("name", "AutoCut"));
        writer.write_event(Event::Start(event))?;
        let mut project = BytesStart::new("project");
        project.push_attribute(("name", format!("AutoCut_{}", spec.media_stem()).as_str()));
        writer.write_event(Event::Start(project))?;

        let mut sequence = BytesStart::new("sequence");
        sequence.push_attribute(("format", "r1"));
        sequence.push_attribute(("duration", duration_attr.as_str()));
        writer.write_event(Event::Start(sequence))?;

        writer.write_event(Event::Start(BytesStart::new("spine")))?;

        let mut spine_position_ms = 0u64;
        for (idx, keep) in spec.keep_intervals.iter().enumerate() {
            let mut clip = BytesStart::new("asset-clip");
            clip.push_attribute(("name", format!("Segment {}", idx + 1).as_str()));
            clip.push_attribute(("ref", "r2"));
            // Spine placement advances contiguously...
            clip.push_attribute(("offset", ms_to_seconds(spine_position_ms).as_str()));
            clip.push_attribute(("duration", ms_to_seconds(keep.duration_ms()).as_str()));
            // ...while `start` keeps the original source timecode
            clip.push_attribute(("start", ms_to_seconds(keep.start_ms).as_str()));
            clip.push_attribute(("format", "r1"));
            writer.write_event(Event::Empty(clip))?;

            spine_position_ms += keep.duration_ms();
        }

        writer.write_event(Event::End(BytesEnd::new("spine")))?;
        writer.write_event(Event::End(BytesEnd::new("sequence")))?;
        writer.write_event(Event::End(BytesEnd::new("project")))?;
        writer.write_event(Event::End(BytesEnd::new("event")))?;
        writer.write_event(Event::End(BytesEnd::new("library")))?;
        writer.write_event(Event::End(BytesEnd::new("fcpxml")))?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocut_models::Interval;
    use std::path::Path;

    fn spec<'a>(keeps: &'a [Interval]) -> TimelineSpec<'a> {
        TimelineSpec {
            keep_intervals: keeps,
            media_path: Path::new("/videos/talk.mp4"),
            fps: 30,
            total_duration_seconds: 10.0,
        }
    }

    #[test]
    fn test_ms_to_seconds_formatting() {
        assert_eq!(ms_to_seconds(0), "0.000s");
        assert_eq!(ms_to_seconds(1000), "1.000s");
        assert_eq!(ms_to_seconds(5300), "5.300s");
        assert_eq!(ms_to_seconds(12345), "12.345s");
    }

    #[test]
    fn test_resources_and_nesting() {
        let keeps = [Interval::new(1000, 2000).unwrap()];
        let doc = FcpXmlExporter.export(&spec(&keeps)).unwrap();

        assert!(doc.contains("<fcpxml version=\"1.9\">"));
        assert!(doc.contains("frameDuration=\"1/30s\""));
        assert!(doc.contains("<asset id=\"r2\" name=\"talk\" start=\"0s\" duration=\"10.000s\""));
        assert!(doc.contains("kind=\"original-media\""));
        assert!(doc.contains("src=\"file:///videos/talk.mp4\""));
        assert!(doc.contains("<project name=\"AutoCut_talk\">"));
        assert!(doc.contains("<spine>"));
    }

    #[test]
    fn test_clip_start_keeps_source_timecode() {
        let keeps = [
            Interval::new(1000, 2000).unwrap(),
            Interval::new(5300, 10000).unwrap(),
        ];
        let doc = FcpXmlExporter.export(&spec(&keeps)).unwrap();

        // First clip: spine offset 0, source start 1.0s
        assert!(doc.contains("offset=\"0.000s\" duration=\"1.000s\" start=\"1.000s\""));
        // Second clip: spine offset continues at 1.0s, source start 5.3s
        assert!(doc.contains("offset=\"1.000s\" duration=\"4.700s\" start=\"5.300s\""));
    }

    #[test]
    fn test_empty_keep_list_yields_empty_spine() {
        let doc = FcpXmlExporter.export(&spec(&[])).unwrap();
        assert!(doc.contains("<spine>"));
        assert!(!doc.contains("asset-clip"));
    }

    #[test]
    fn test_clips_are_ordered_segments() {
        let keeps = [
            Interval::new(0, 500).unwrap(),
            Interval::new(1000, 1500).unwrap(),
            Interval::new(2000, 2500).unwrap(),
        ];
        let doc = FcpXmlExporter.export(&spec(&keeps)).unwrap();
        assert_eq!(doc.matches("<asset-clip").count(), 3);
        assert!(doc.contains("name=\"Segment 3\""));
    }
}
