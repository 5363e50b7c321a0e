//! Frame-based Premiere-style timeline export (`xmeml` dialect).
//!
//! Millisecond boundaries are converted to frame numbers by truncation
//! toward zero of `ms / 1000 * fps`; the policy is applied consistently
//! to every boundary so adjacent clips stay aligned. Clips are placed
//! back-to-back on the output timeline with no gaps, so the exported
//! sequence is as long as the sum of kept durations; the source in/out
//! points still address the original media's frame positions. A video
//! track and an audio track receive matching clip entries.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::debug;

use crate::error::ExportResult;
use crate::timeline::{TimelineExporter, TimelineSpec};

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Convert milliseconds to a frame number, truncating toward zero.
pub fn ms_to_frames(ms: u64, fps: u32) -> u64 {
    ms * fps as u64 / 1000
}

/// Premiere Pro `xmeml` exporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct PremiereXmlExporter;

impl TimelineExporter for PremiereXmlExporter {
    fn format_name(&self) -> &'static str {
        "premiere_pro"
    }

    fn file_extension(&self) -> &'static str {
        "xml"
    }

    fn export(&self, spec: &TimelineSpec<'_>) -> ExportResult<String> {
        spec.validate()?;

        debug!(
            clips = spec.keep_intervals.len(),
            fps = spec.fps,
            "Generating Premiere Pro XML"
        );

        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut xmeml = BytesStart::new("xmeml");
        xmeml.push_attribute(("version", "5"));
        writer.write_event(Event::Start(xmeml))?;

        writer.write_event(Event::Start(BytesStart::new("sequence")))?;
        text_element(&mut writer, "name", &format!("AutoCut_{}", spec.media_stem()))?;
        let sequence_duration =
            ms_to_frames((spec.total_duration_seconds * 1000.0) as u64, spec.fps);
        text_element(&mut writer, "duration", &sequence_duration.to_string())?;
        write_rate(&mut writer, spec.fps)?;

        writer.write_event(Event::Start(BytesStart::new("media")))?;

        for media_type in ["video", "audio"] {
            writer.write_event(Event::Start(BytesStart::new(media_type)))?;
            writer.write_event(Event::Start(BytesStart::new("track")))?;

            let mut timeline_position = 0u64;
            for (idx, keep) in spec.keep_intervals.iter().enumerate() {
                let source_in = ms_to_frames(keep.start_ms, spec.fps);
                let source_out = ms_to_frames(keep.end_ms, spec.fps);
                let duration_frames = source_out - source_in;

                write_clipitem(
                    &mut writer,
                    spec,
                    media_type,
                    idx + 1,
                    source_in,
                    source_out,
                    duration_frames,
                    timeline_position,
                )?;

                timeline_position += duration_frames;
            }

            writer.write_event(Event::End(BytesEnd::new("track")))?;
            writer.write_event(Event::End(BytesEnd::new(media_type)))?;
        }

        writer.write_event(Event::End(BytesEnd::new("media")))?;
        writer.write_event(Event::End(BytesEnd::new("sequence")))?;
        writer.write_event(Event::End(BytesEnd::new("xmeml")))?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }
}

/// Write one `clipitem` entry referencing the shared source file.
#[allow(clippy::too_many_arguments)]
fn write_clipitem(
    writer: &mut XmlWriter,
    spec: &TimelineSpec<'_>,
    media_type: &str,
    clip_id: usize,
    source_in: u64,
    source_out: u64,
    duration_frames: u64,
    timeline_position: u64,
) -> ExportResult<()> {
    let mut clipitem = BytesStart::new("clipitem");
    clipitem.push_attribute(("id", format!("{media_type}-{clip_id}").as_str()));
    writer.write_event(Event::Start(clipitem))?;

    text_element(
        writer,
        "name",
        &format!("{}_segment_{}", spec.media_name(), clip_id),
    )?;
    text_element(writer, "duration", &duration_frames.to_string())?;
    write_rate(writer, spec.fps)?;

    // Timeline placement: contiguous, no gaps
    text_element(writer, "start", &timeline_position.to_string())?;
    text_element(
        writer,
        "end",
        &(timeline_position + duration_frames).to_string(),
    )?;

    // Source read range in original media frames
    text_element(writer, "in", &source_in.to_string())?;
    text_element(writer, "out", &source_out.to_string())?;

    let mut file = BytesStart::new("file");
    file.push_attribute(("id", format!("file-{clip_id}").as_str()));
    writer.write_event(Event::Start(file))?;
    text_element(writer, "name", &spec.media_name())?;
    text_element(
        writer,
        "pathurl",
        &format!("file://localhost/{}", spec.media_posix()),
    )?;
    write_rate(writer, spec.fps)?;

    writer.write_event(Event::Start(BytesStart::new("media")))?;
    writer.write_event(Event::Start(BytesStart::new(media_type)))?;
    writer.write_event(Event::Start(BytesStart::new("samplecharacteristics")))?;
    write_rate(writer, spec.fps)?;
    if media_type == "video" {
        text_element(writer, "width", "1920")?;
        text_element(writer, "height", "1080")?;
    } else {
        text_element(writer, "depth", "16")?;
        text_element(writer, "samplerate", "48000")?;
    }
    writer.write_event(Event::End(BytesEnd::new("samplecharacteristics")))?;
    writer.write_event(Event::End(BytesEnd::new(media_type)))?;
    writer.write_event(Event::End(BytesEnd::new("media")))?;

    writer.write_event(Event::End(BytesEnd::new("file")))?;
    writer.write_event(Event::End(BytesEnd::new("clipitem")))?;

    Ok(())
}

/// Write a `rate` block (`timebase` + `ntsc`).
fn write_rate(writer: &mut XmlWriter, fps: u32) -> ExportResult<()> {
    writer.write_event(Event::Start(BytesStart::new("rate")))?;
    text_element(writer, "timebase", &fps.to_string())?;
    text_element(writer, "ntsc", "FALSE")?;
    writer.write_event(Event::End(BytesEnd::new("rate")))?;
    Ok(())
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> ExportResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
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
    fn test_ms_to_frames_truncates() {
        assert_eq!(ms_to_frames(1000, 30), 30);
        assert_eq!(ms_to_frames(2000, 30), 60);
        assert_eq!(ms_to_frames(1999, 30), 59);
        assert_eq!(ms_to_frames(33, 30), 0);
        assert_eq!(ms_to_frames(34, 30), 1);
    }

    #[test]
    fn test_single_clip_frame_math() {
        // keep (1000, 2000) at 30 fps: in=30, out=60, duration=30
        let keeps = [Interval::new(1000, 2000).unwrap()];
        let doc = PremiereXmlExporter.export(&spec(&keeps)).unwrap();

        assert!(doc.contains("<in>30</in>"));
        assert!(doc.contains("<out>60</out>"));
        assert!(doc.contains("<duration>30</duration>"));
        assert!(doc.contains("<start>0</start>"));
        assert!(doc.contains("<end>30</end>"));
    }

    #[test]
    fn test_timeline_positions_advance_without_gaps() {
        let keeps = [
            Interval::new(0, 1000).unwrap(),
            Interval::new(2000, 5000).unwrap(),
        ];
        let doc = PremiereXmlExporter.export(&spec(&keeps)).unwrap();

        // Second clip starts on the timeline right where the first ends
        assert!(doc.contains("<start>30</start>"));
        assert!(doc.contains("<end>120</end>"));
        // while reading from source frame 60
        assert!(doc.contains("<in>60</in>"));
    }

    #[test]
    fn test_document_structure() {
        let keeps = [Interval::new(0, 1000).unwrap()];
        let doc = PremiereXmlExporter.export(&spec(&keeps)).unwrap();

        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(doc.contains("<xmeml version=\"5\">"));
        assert!(doc.contains("<name>AutoCut_talk</name>"));
        assert!(doc.contains("<clipitem id=\"video-1\">"));
        assert!(doc.contains("<clipitem id=\"audio-1\">"));
        assert!(doc.contains("<pathurl>file://localhost/videos/talk.mp4</pathurl>"));
        assert!(doc.contains("<timebase>30</timebase>"));
        assert!(doc.contains("<samplerate>48000</samplerate>"));
    }

    #[test]
    fn test_empty_keep_list_yields_empty_tracks() {
        let doc = PremiereXmlExporter.export(&spec(&[])).unwrap();
        assert!(doc.contains("<xmeml"));
        assert!(!doc.contains("clipitem"));
    }

    #[test]
    fn test_both_tracks_get_matching_clips() {
        let keeps = [
            Interval::new(0, 1000).unwrap(),
            Interval::new(3000, 4000).unwrap(),
        ];
        let doc = PremiereXmlExporter.export(&spec(&keeps)).unwrap();
        assert_eq!(doc.matches("<clipitem").count(), 4);
        assert_eq!(doc.matches("video-2").count(), 1);
        assert_eq!(doc.matches("audio-2").count(), 1);
    }
}
