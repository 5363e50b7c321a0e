//! Half-open millisecond intervals and the operations the cut pipeline
//! is built on: overlap-merging, complement against a total duration,
//! and clamping.
//!
//! An interval `[start, end)` includes its start and excludes its end,
//! so adjacent intervals concatenate without implying a one-millisecond
//! gap between them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for interval construction and algebra.
pub type IntervalResult<T> = Result<T, IntervalError>;

/// Errors from interval validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// `start_ms >= end_ms`. This is a programming error upstream, not a
    /// condition to clamp away.
    #[error("invalid interval: start {start_ms}ms >= end {end_ms}ms")]
    InvalidInterval { start_ms: u64, end_ms: u64 },
}

/// A half-open `[start_ms, end_ms)` timespan.
///
/// Construction enforces `start_ms < end_ms`, so a zero-length or
/// inverted interval cannot exist once this type is in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Interval {
    /// Start in milliseconds (inclusive)
    pub start_ms: u64,
    /// End in milliseconds (exclusive)
    pub end_ms: u64,
}

impl Interval {
    /// Create a validated interval.
    pub fn new(start_ms: u64, end_ms: u64) -> IntervalResult<Self> {
        if start_ms >= end_ms {
            return Err(IntervalError::InvalidInterval { start_ms, end_ms });
        }
        Ok(Self { start_ms, end_ms })
    }

    /// Length in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms() as f64 / 1000.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}ms, {}ms)", self.start_ms, self.end_ms)
    }
}

/// Merge overlapping or touching intervals into maximal runs.
///
/// Sorts by start, then extends the current run whenever the next
/// interval starts at or before the run's end. The output is sorted,
/// pairwise non-overlapping, and identical regardless of input order.
/// Idempotent: merging a merged list is a no-op.
pub fn merge_overlapping(mut intervals: Vec<Interval>) -> Vec<Interval> {
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by_key(|iv| (iv.start_ms, iv.end_ms));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    let mut current = intervals[0];

    for iv in intervals.into_iter().skip(1) {
        if iv.start_ms <= current.end_ms {
            current.end_ms = current.end_ms.max(iv.end_ms);
        } else {
            merged.push(current);
            current = iv;
        }
    }
    merged.push(current);

    merged
}

/// Clamp an interval to `[0, total_duration_ms]`.
///
/// Returns `None` when the interval falls entirely outside the range or
/// collapses to zero length after clamping.
pub fn clamp_to_duration(interval: Interval, total_duration_ms: u64) -> Option<Interval> {
    let end_ms = interval.end_ms.min(total_duration_ms);
    if interval.start_ms >= end_ms {
        return None;
    }
    Some(Interval {
        start_ms: interval.start_ms,
        end_ms,
    })
}

/// Complement of a cut list with respect to `[0, total_duration_ms)`.
///
/// Produces the gaps between consecutive cuts and at both ends. Cuts
/// reaching past the total duration are clamped first; an empty cut
/// list yields the single interval `[0, total_duration_ms)`; cuts that
/// cover the whole timeline yield an empty list.
pub fn complement(cuts: &[Interval], total_duration_ms: u64) -> Vec<Interval> {
    if total_duration_ms == 0 {
        return Vec::new();
    }

    let clamped: Vec<Interval> = cuts
        .iter()
        .filter_map(|iv| clamp_to_duration(*iv, total_duration_ms))
        .collect();
    let cuts = merge_overlapping(clamped);

    if cuts.is_empty() {
        return vec![Interval {
            start_ms: 0,
            end_ms: total_duration_ms,
        }];
    }

    let mut gaps = Vec::with_capacity(cuts.len() + 1);

    if cuts[0].start_ms > 0 {
        gaps.push(Interval {
            start_ms: 0,
            end_ms: cuts[0].start_ms,
        });
    }

    for pair in cuts.windows(2) {
        if pair[1].start_ms > pair[0].end_ms {
            gaps.push(Interval {
                start_ms: pair[0].end_ms,
                end_ms: pair[1].start_ms,
            });
        }
    }

    let last = cuts[cuts.len() - 1];
    if last.end_ms < total_duration_ms {
        gaps.push(Interval {
            start_ms: last.end_ms,
            end_ms: total_duration_ms,
        });
    }

    gaps
}

/// Sum of interval lengths in milliseconds.
pub fn total_duration(intervals: &[Interval]) -> u64 {
    intervals.iter().map(Interval::duration_ms).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u64, end: u64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn test_rejects_inverted_and_empty() {
        assert!(matches!(
            Interval::new(5, 5),
            Err(IntervalError::InvalidInterval { .. })
        ));
        assert!(matches!(
            Interval::new(10, 3),
            Err(IntervalError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_merge_disjoint_stays_disjoint() {
        let merged = merge_overlapping(vec![iv(0, 100), iv(200, 300)]);
        assert_eq!(merged, vec![iv(0, 100), iv(200, 300)]);
    }

    #[test]
    fn test_merge_overlapping_runs() {
        let merged = merge_overlapping(vec![iv(0, 150), iv(100, 300), iv(250, 400)]);
        assert_eq!(merged, vec![iv(0, 400)]);
    }

    #[test]
    fn test_merge_touching_counts_as_overlap() {
        let merged = merge_overlapping(vec![iv(0, 100), iv(100, 200)]);
        assert_eq!(merged, vec![iv(0, 200)]);
    }

    #[test]
    fn test_merge_unsorted_input() {
        let merged = merge_overlapping(vec![iv(500, 600), iv(0, 100), iv(550, 700)]);
        assert_eq!(merged, vec![iv(0, 100), iv(500, 700)]);
    }

    #[test]
    fn test_merge_engulfed_interval() {
        let merged = merge_overlapping(vec![iv(0, 1000), iv(200, 300)]);
        assert_eq!(merged, vec![iv(0, 1000)]);
    }

    #[test]
    fn test_merge_idempotent() {
        let input = vec![iv(0, 150), iv(100, 300), iv(600, 700)];
        let once = merge_overlapping(input);
        let twice = merge_overlapping(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_order_of_concatenation_irrelevant() {
        let silence = vec![iv(1000, 2000), iv(5000, 5300)];
        let fillers = vec![iv(1800, 2200), iv(4000, 4100)];

        let mut ab = silence.clone();
        ab.extend(fillers.clone());
        let mut ba = fillers;
        ba.extend(silence);

        assert_eq!(merge_overlapping(ab), merge_overlapping(ba));
    }

    #[test]
    fn test_complement_empty_cuts() {
        assert_eq!(complement(&[], 5000), vec![iv(0, 5000)]);
    }

    #[test]
    fn test_complement_full_cover() {
        assert_eq!(complement(&[iv(0, 5000)], 5000), Vec::<Interval>::new());
    }

    #[test]
    fn test_complement_interior_and_edges() {
        let cuts = vec![iv(1000, 2000), iv(5000, 5300)];
        assert_eq!(
            complement(&cuts, 10000),
            vec![iv(0, 1000), iv(2000, 5000), iv(5300, 10000)]
        );
    }

    #[test]
    fn test_complement_cut_at_start() {
        assert_eq!(complement(&[iv(0, 1000)], 3000), vec![iv(1000, 3000)]);
    }

    #[test]
    fn test_complement_clamps_overrunning_cut() {
        assert_eq!(complement(&[iv(4000, 9000)], 5000), vec![iv(0, 4000)]);
    }

    #[test]
    fn test_complement_drops_cut_past_end() {
        assert_eq!(complement(&[iv(6000, 9000)], 5000), vec![iv(0, 5000)]);
    }

    #[test]
    fn test_complement_zero_duration() {
        assert_eq!(complement(&[], 0), Vec::<Interval>::new());
    }

    #[test]
    fn test_cuts_and_complement_tile_the_timeline() {
        let total = 10000;
        let cuts = vec![iv(0, 500), iv(1000, 2000), iv(9900, 10000)];
        let keep = complement(&cuts, total);

        let mut all = cuts.clone();
        all.extend(keep.clone());
        let tiled = merge_overlapping(all);

        assert_eq!(tiled, vec![iv(0, total)]);
        assert_eq!(total_duration(&cuts) + total_duration(&keep), total);
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(total_duration(&[iv(0, 100), iv(200, 450)]), 350);
        assert_eq!(total_duration(&[]), 0);
    }
}
