//! Cut-decision engine for AutoCut.
//!
//! This crate turns detector output into an authoritative cut plan:
//! - Filler-word detection over transcript segments
//! - Padding, overlap-merging, and keep-list computation
//!
//! Everything here is pure and synchronous; IO lives in the media and
//! worker crates.

pub mod error;
pub mod filler;
pub mod merge;

pub use error::{EngineError, EngineResult};
pub use filler::{FillerConfig, FillerDetector, FillerScan};
pub use merge::{build_cut_plan, merge_with_padding, to_keep_list};
