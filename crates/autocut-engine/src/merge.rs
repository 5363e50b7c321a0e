//! Cut-list merging: the step that turns heterogeneous detections into
//! one authoritative plan.
//!
//! Silence intervals arrive unpadded (the detector already placed their
//! boundaries); filler intervals get symmetric padding so a cut never
//! chops into the speech around a hesitation. The combined list is
//! overlap-merged and complemented into the keep list. A padded filler
//! that engulfs or is engulfed by a silence simply merges with it; the
//! algebra needs no special cases.

use tracing::{debug, info};

use autocut_models::{
    clamp_to_duration, complement, merge_overlapping, CutPlan, FillerSpan, Interval,
};

/// Pad filler intervals symmetrically and merge them with silences into
/// a single sorted, non-overlapping cut list.
///
/// Padding saturates at 0 and is clamped to the total duration, so no
/// cut ever leaves `[0, total_duration_ms]`.
pub fn merge_with_padding(
    silence: &[Interval],
    filler: &[Interval],
    padding_ms: u64,
    total_duration_ms: u64,
) -> Vec<Interval> {
    let mut cuts: Vec<Interval> = silence
        .iter()
        .filter_map(|iv| clamp_to_duration(*iv, total_duration_ms))
        .collect();

    cuts.extend(filler.iter().filter_map(|iv| {
        clamp_to_duration(
            Interval {
                start_ms: iv.start_ms.saturating_sub(padding_ms),
                end_ms: iv.end_ms.saturating_add(padding_ms),
            },
            total_duration_ms,
        )
    }));

    let merged = merge_overlapping(cuts);

    debug!(
        silences = silence.len(),
        fillers = filler.len(),
        merged = merged.len(),
        padding_ms,
        "Merged cut sources"
    );

    merged
}

/// Invert a merged cut list into the keep list over `[0, total_duration_ms)`.
pub fn to_keep_list(merged_cuts: &[Interval], total_duration_ms: u64) -> Vec<Interval> {
    complement(merged_cuts, total_duration_ms)
}

/// Assemble the full cut plan from detector output.
pub fn build_cut_plan(
    silence_intervals: Vec<Interval>,
    filler_spans: &[FillerSpan],
    padding_ms: u64,
    total_duration_ms: u64,
) -> CutPlan {
    let filler_intervals: Vec<Interval> = filler_spans
        .iter()
        .filter_map(|span| {
            clamp_to_duration(
                Interval {
                    start_ms: span.start_ms.saturating_sub(padding_ms),
                    end_ms: span.end_ms.saturating_add(padding_ms),
                },
                total_duration_ms,
            )
        })
        .collect();

    // Fillers are already padded above, so they merge in with no extra padding
    let merged_cuts = merge_with_padding(&silence_intervals, &filler_intervals, 0, total_duration_ms);
    let keep_intervals = to_keep_list(&merged_cuts, total_duration_ms);

    let plan = CutPlan {
        silence_intervals,
        filler_intervals,
        merged_cuts,
        keep_intervals,
        total_duration_ms,
    };

    let stats = plan.statistics();
    info!(
        total_cuts = stats.total_cuts,
        silences = stats.silence_periods_removed,
        fillers = stats.filler_words_removed,
        saved_pct = format!("{:.1}%", stats.percentage_saved),
        "Cut plan assembled"
    );

    plan
}
