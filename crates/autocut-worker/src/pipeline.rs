//! Pipeline orchestrator.
//!
//! Sequences extract -> silence scan -> optional filler scan -> cut
//! merge -> exports, reporting progress at fixed checkpoints
//! (0/30/70/88/90/100). Progress is monotonic non-decreasing and
//! reaches 100 on success; failures surface as typed errors before any
//! partial plan can reach the exporters. The two timeline exports run
//! independently: one failing is recorded as absent while the other
//! (and the job) still completes.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use autocut_engine::{build_cut_plan, FillerConfig, FillerDetector, FillerScan};
use autocut_export::{
    to_srt, FcpXmlExporter, PremiereXmlExporter, TimelineExporter, TimelineSpec,
};
use autocut_media::{analyze_wav, extract_audio, probe_video, SilenceConfig, DEFAULT_SAMPLE_RATE};
use autocut_models::{ExportPaths, ProcessingOptions, ProcessingReport, Transcript};

use crate::error::{WorkerError, WorkerResult};
use crate::progress::{MonotonicSink, ProgressSink};

/// One job's processing pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: ProcessingOptions,
    audio_sample_rate: u32,
}

impl Pipeline {
    /// Create a pipeline for the given options.
    pub fn new(options: ProcessingOptions) -> Self {
        Self {
            options,
            audio_sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Override the audio extraction sample rate.
    pub fn with_sample_rate(mut self, rate: u32) -> Self {
        self.audio_sample_rate = rate;
        self
    }

    /// Process a video file end to end.
    ///
    /// Extracts the audio track into `work_dir`, analyzes it, and
    /// writes the timeline documents into `output_dir`.
    pub async fn run(
        &self,
        video_path: &Path,
        work_dir: &Path,
        output_dir: &Path,
        transcript: Option<&Transcript>,
        sink: &dyn ProgressSink,
    ) -> WorkerResult<ProcessingReport> {
        self.check_preconditions(transcript)?;
        let progress = MonotonicSink::new(sink);
        progress.report(0.0, "Starting video analysis...");

        tokio::fs::create_dir_all(work_dir).await?;

        let video_info = probe_video(video_path).await?;
        let audio_path = work_dir.join(format!("{}_audio.wav", file_stem(video_path)));
        extract_audio(video_path, &audio_path, self.audio_sample_rate).await?;

        self.process_extracted(
            video_path,
            &audio_path,
            video_info.duration,
            output_dir,
            transcript,
            &progress,
        )
        .await
    }

    /// Process a pre-extracted PCM WAV for `video_path`.
    ///
    /// This is the pipeline from the point where the external transcoder
    /// has already produced the audio track.
    pub async fn process_audio(
        &self,
        video_path: &Path,
        audio_path: &Path,
        duration_seconds: f64,
        output_dir: &Path,
        transcript: Option<&Transcript>,
        sink: &dyn ProgressSink,
    ) -> WorkerResult<ProcessingReport> {
        self.check_preconditions(transcript)?;
        let progress = MonotonicSink::new(sink);
        progress.report(0.0, "Starting video analysis...");
        self.process_extracted(
            video_path,
            audio_path,
            duration_seconds,
            output_dir,
            transcript,
            &progress,
        )
        .await
    }

    /// Caller-level preconditions, checked before any stage starts.
    fn check_preconditions(&self, transcript: Option<&Transcript>) -> WorkerResult<()> {
        if self.options.remove_fillers && transcript.is_none() {
            return Err(WorkerError::TranscriptionUnavailable);
        }
        Ok(())
    }

    async fn process_extracted(
        &self,
        video_path: &Path,
        audio_path: &Path,
        duration_seconds: f64,
        output_dir: &Path,
        transcript: Option<&Transcript>,
        progress: &MonotonicSink<'_>,
    ) -> WorkerResult<ProcessingReport> {
        progress.report(30.0, "Analyzing audio...");

        // The scan walks every sample; keep it off the runtime threads
        let silence_config = SilenceConfig::default()
            .with_threshold_db(self.options.silence_threshold_db)
            .with_min_silence_ms(self.options.min_silence_duration_ms)
            .with_scan_step_ms(self.options.scan_step_ms);
        let scan_path = audio_path.to_path_buf();
        let analysis =
            tokio::task::spawn_blocking(move || analyze_wav(&scan_path, &silence_config))
                .await
                .map_err(|e| WorkerError::job_failed(format!("silence scan aborted: {e}")))??;

        let filler_scan = if self.options.remove_fillers {
            // Presence checked up front; treat absence here as a bug
            let transcript = transcript.ok_or(WorkerError::TranscriptionUnavailable)?;
            let detector = FillerDetector::new(
                &FillerConfig::default().with_sensitivity(self.options.filler_sensitivity),
            )?;
            detector.detect(transcript)
        } else {
            FillerScan::default()
        };

        progress.report(70.0, "Analysis complete, generating exports...");

        let plan = build_cut_plan(
            analysis.silence_periods,
            &filler_scan.spans,
            self.options.padding_ms,
            analysis.duration_ms,
        );

        tokio::fs::create_dir_all(output_dir).await?;
        let spec = TimelineSpec {
            keep_intervals: &plan.keep_intervals,
            media_path: video_path,
            fps: self.options.fps,
            total_duration_seconds: duration_seconds,
        };

        let premiere_xml = write_export(&PremiereXmlExporter, &spec, output_dir).await;
        progress.report(88.0, "Premiere Pro timeline generated");
        let fcpxml = write_export(&FcpXmlExporter, &spec, output_dir).await;
        progress.report(90.0, "Exports generated...");

        let subtitles = match transcript {
            Some(t) => write_subtitles(t, video_path, output_dir).await,
            None => None,
        };

        let statistics = plan.statistics();
        let report = ProcessingReport {
            video_path: video_path.to_path_buf(),
            video_name: video_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            duration_seconds,
            keep_intervals: plan.keep_intervals.clone(),
            statistics,
            exports: ExportPaths {
                premiere_xml,
                fcpxml,
                subtitles,
            },
        };

        progress.report(100.0, "Processing complete!");
        info!(
            video = %video_path.display(),
            total_cuts = report.statistics.total_cuts,
            saved_pct = format!("{:.1}%", report.statistics.percentage_saved),
            "Processing complete"
        );

        Ok(report)
    }
}

/// Run one exporter and write its document, isolating failures.
async fn write_export(
    exporter: &dyn TimelineExporter,
    spec: &TimelineSpec<'_>,
    output_dir: &Path,
) -> Option<PathBuf> {
    let file_name = format!(
        "{}_{}.{}",
        file_stem(spec.media_path),
        exporter.format_name(),
        exporter.file_extension()
    );
    let path = output_dir.join(file_name);

    let document = match exporter.export(spec) {
        Ok(doc) => doc,
        Err(e) => {
            error!(format = exporter.format_name(), error = %e, "Timeline export failed");
            return None;
        }
    };

    match tokio::fs::write(&path, document).await {
        Ok(()) => {
            info!(format = exporter.format_name(), path = %path.display(), "Export written");
            Some(path)
        }
        Err(e) => {
            error!(format = exporter.format_name(), error = %e, "Failed to write export");
            None
        }
    }
}

/// Write the transcript as SRT next to the timeline documents.
async fn write_subtitles(
    transcript: &Transcript,
    video_path: &Path,
    output_dir: &Path,
) -> Option<PathBuf> {
    let path = output_dir.join(format!("{}.srt", file_stem(video_path)));
    match tokio::fs::write(&path, to_srt(&transcript.segments)).await {
        Ok(()) => Some(path),
        Err(e) => {
            error!(error = %e, "Failed to write subtitles");
            None
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string())
}
