//! End-to-end pipeline tests over synthesized audio.
//!
//! These drive the pipeline from the point where the audio track has
//! been extracted, so no FFmpeg binary is needed.

use std::path::{Path, PathBuf};

use autocut_models::{ProcessingOptions, Transcript, TranscriptSegment};
use autocut_worker::{ChannelSink, NoopSink, Pipeline, WorkerError};

const RATE: u32 = 8000;

/// Write a WAV made of (amplitude, duration_ms) spans of a 200 Hz tone.
fn write_wav(path: &Path, spans: &[(f32, u64)]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &(amplitude, duration_ms) in spans {
        let count = (RATE as u64 * duration_ms / 1000) as usize;
        for i in 0..count {
            let t = i as f32 / RATE as f32;
            let v = amplitude * (2.0 * std::f32::consts::PI * 200.0 * t).sin();
            writer.write_sample((v * 32767.0) as i16).unwrap();
        }
    }
    writer.finalize().unwrap();
}

struct TestSetup {
    _dir: tempfile::TempDir,
    audio: PathBuf,
    output: PathBuf,
    video: PathBuf,
}

/// 1s speech, 1s silence, 1s speech at 8 kHz.
fn setup(spans: &[(f32, u64)]) -> TestSetup {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("talk_audio.wav");
    let output = dir.path().join("exports");
    write_wav(&audio, spans);
    TestSetup {
        video: dir.path().join("talk.mp4"),
        _dir: dir,
        audio,
        output,
    }
}

fn speech_gap_speech() -> Vec<(f32, u64)> {
    vec![(0.5, 1000), (0.0, 1000), (0.5, 1000)]
}

#[tokio::test]
async fn test_pipeline_cuts_silence_and_writes_both_timelines() {
    let setup = setup(&speech_gap_speech());
    let pipeline = Pipeline::new(ProcessingOptions::default());

    let report = pipeline
        .process_audio(&setup.video, &setup.audio, 3.0, &setup.output, None, &NoopSink)
        .await
        .unwrap();

    assert_eq!(report.video_name, "talk.mp4");
    assert_eq!(report.statistics.silence_periods_removed, 1);
    assert!(report.statistics.percentage_saved > 20.0);
    assert!(!report.keep_intervals.is_empty());

    let premiere = report.exports.premiere_xml.expect("premiere export");
    let fcp = report.exports.fcpxml.expect("fcp export");
    assert!(premiere.ends_with("talk_premiere_pro.xml"));
    assert!(fcp.ends_with("talk_final_cut_pro.fcpxml"));

    let premiere_doc = tokio::fs::read_to_string(&premiere).await.unwrap();
    assert!(premiere_doc.contains("<xmeml version=\"5\">"));
    let fcp_doc = tokio::fs::read_to_string(&fcp).await.unwrap();
    assert!(fcp_doc.contains("<fcpxml version=\"1.9\">"));
}

#[tokio::test]
async fn test_progress_is_monotonic_and_reaches_100() {
    let setup = setup(&speech_gap_speech());
    let pipeline = Pipeline::new(ProcessingOptions::default());
    let (sink, mut rx) = ChannelSink::new();

    pipeline
        .process_audio(&setup.video, &setup.audio, 3.0, &setup.output, None, &sink)
        .await
        .unwrap();

    let mut values = Vec::new();
    while let Ok(update) = rx.try_recv() {
        values.push(update.progress);
    }

    assert!(!values.is_empty());
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
    assert_eq!(*values.last().unwrap(), 100.0);
}

#[tokio::test]
async fn test_filler_detection_merges_into_cuts() {
    let setup = setup(&speech_gap_speech());
    let pipeline = Pipeline::new(
        ProcessingOptions::default()
            .with_filler_removal(0.7)
            .with_padding_ms(100),
    );

    // "euh" spoken during the first second of speech
    let transcript = Transcript::new(vec![
        TranscriptSegment::new(0.2, 0.5, "euh"),
        TranscriptSegment::new(0.5, 1.0, "on commence le montage"),
        TranscriptSegment::new(2.0, 3.0, "et on termine ici"),
    ]);

    let report = pipeline
        .process_audio(
            &setup.video,
            &setup.audio,
            3.0,
            &setup.output,
            Some(&transcript),
            &NoopSink,
        )
        .await
        .unwrap();

    assert_eq!(report.statistics.filler_words_removed, 1);
    assert!(report.statistics.silence_periods_removed >= 1);
    // Transcript present, so subtitles are written alongside the timelines
    let srt = report.exports.subtitles.expect("srt file");
    let srt_doc = tokio::fs::read_to_string(&srt).await.unwrap();
    assert!(srt_doc.contains("on commence le montage"));
}

#[tokio::test]
async fn test_filler_removal_without_transcript_is_rejected_up_front() {
    let setup = setup(&speech_gap_speech());
    let pipeline = Pipeline::new(ProcessingOptions::default().with_filler_removal(0.7));

    let result = pipeline
        .process_audio(&setup.video, &setup.audio, 3.0, &setup.output, None, &NoopSink)
        .await;

    assert!(matches!(result, Err(WorkerError::TranscriptionUnavailable)));
    // Nothing was written
    assert!(!setup.output.exists());
}

#[tokio::test]
async fn test_fully_silent_source_exports_empty_timelines() {
    let setup = setup(&[(0.0, 2000)]);
    let pipeline = Pipeline::new(ProcessingOptions::default());

    let report = pipeline
        .process_audio(&setup.video, &setup.audio, 2.0, &setup.output, None, &NoopSink)
        .await
        .unwrap();

    assert!(report.keep_intervals.is_empty());
    assert_eq!(report.statistics.percentage_saved, 100.0);

    // Exporters must handle the empty keep list, not crash
    let premiere = report.exports.premiere_xml.expect("premiere export");
    let doc = tokio::fs::read_to_string(&premiere).await.unwrap();
    assert!(!doc.contains("clipitem"));
}

#[tokio::test]
async fn test_export_failures_do_not_fail_the_job() {
    let setup = setup(&speech_gap_speech());
    // fps 0 makes both timeline exports fail validation
    let pipeline = Pipeline::new(ProcessingOptions::default().with_fps(0));

    let report = pipeline
        .process_audio(&setup.video, &setup.audio, 3.0, &setup.output, None, &NoopSink)
        .await
        .unwrap();

    assert!(report.exports.premiere_xml.is_none());
    assert!(report.exports.fcpxml.is_none());
    // The cut computation still succeeded
    assert!(!report.keep_intervals.is_empty());
}
