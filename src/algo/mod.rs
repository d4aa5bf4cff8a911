//! Patch-computation algorithms.
//!
//! This module contains the algorithmic core of the crate:
//!
//! - **Geodesic search**: cutoff-bounded Dijkstra behind the
//!   [`ShortestPathWithCutoff`] seam
//! - **Patch extraction**: per-vertex geodesic neighborhoods, optionally in
//!   parallel
//! - **Scoring**: weighted feature means per patch
//! - **Selection**: deterministic top-K ranking
//!
//! [`ShortestPathWithCutoff`]: geodesic::ShortestPathWithCutoff

pub mod geodesic;
pub mod patch;
pub mod progress;

pub use progress::Progress;
