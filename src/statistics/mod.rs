//! Work counters for nearest-location requests.
//!
//! This module provides a per-thread statistics object that records how much
//! work the shortest-path search performed: searches run, frontier pushes,
//! edges relaxed, stale frontier entries skipped and records ranked.

mod stats;
pub use stats::*;
