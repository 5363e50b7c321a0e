//! Run-length silence scan over a decoded signal.
//!
//! The signal is walked in fixed windows. Each window is classified by
//! its RMS level against the threshold; a maximal run of sub-threshold
//! windows becomes a silence period only once its accumulated length
//! reaches the minimum duration. Until that point the run is
//! provisionally speech, so a single borderline window never opens or
//! closes a cut on its own.

use tracing::debug;

use autocut_models::{complement, Interval};

use crate::audio::AudioBuffer;
use crate::error::{MediaError, MediaResult};

use super::config::SilenceConfig;

/// Output of the silence scan.
///
/// `silence_periods` and `non_silent_periods` are exact complements of
/// each other over `[0, duration_ms)`.
#[derive(Debug, Clone)]
pub struct SilenceAnalysis {
    /// Silent ranges, each at least `min_silence_ms` long
    pub silence_periods: Vec<Interval>,
    /// Everything else
    pub non_silent_periods: Vec<Interval>,
    /// Scanned duration in milliseconds
    pub duration_ms: u64,
}

/// Classify a decoded signal into silent and non-silent ranges.
pub fn detect_silence(
    buffer: &AudioBuffer,
    config: &SilenceConfig,
) -> MediaResult<SilenceAnalysis> {
    let duration_ms = buffer.duration_ms();
    if duration_ms == 0 {
        return Err(MediaError::EmptyAudio);
    }

    let rate = buffer.sample_rate as u64;
    let window_samples =
        ((rate * config.scan_step_ms) / 1000).max(1) as usize;

    let n = buffer.samples.len();
    let mut silences: Vec<Interval> = Vec::new();
    let mut run_start_ms: Option<u64> = None;
    let mut pos = 0usize;

    while pos < n {
        let end = (pos + window_samples).min(n);
        let window_start_ms = pos as u64 * 1000 / rate;
        let below = buffer.level_db(pos, end) <= config.threshold_db;

        match (below, run_start_ms) {
            (true, None) => {
                // Provisional silence; committed only if the run grows long enough
                run_start_ms = Some(window_start_ms);
            }
            (false, Some(start_ms)) => {
                if window_start_ms - start_ms >= config.min_silence_ms {
                    silences.push(Interval {
                        start_ms,
                        end_ms: window_start_ms,
                    });
                }
                run_start_ms = None;
            }
            _ => {}
        }

        pos = end;
    }

    // Trailing run reaching the end of the signal
    if let Some(start_ms) = run_start_ms {
        if duration_ms > start_ms && duration_ms - start_ms >= config.min_silence_ms {
            silences.push(Interval {
                start_ms,
                end_ms: duration_ms,
            });
        }
    }

    let non_silent_periods = complement(&silences, duration_ms);

    debug!(
        duration_ms,
        silence_periods = silences.len(),
        non_silent_periods = non_silent_periods.len(),
        threshold_db = config.threshold_db,
        "Silence scan complete"
    );

    Ok(SilenceAnalysis {
        silence_periods: silences,
        non_silent_periods,
        duration_ms,
    })
}
