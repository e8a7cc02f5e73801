//! Frontier management for the shortest-path search.
//!
//! This module provides the totally-ordered distance wrapper, the entries
//! pushed onto the search frontier and the min-first frontier itself.

mod candidate_entry;
mod frontier;
mod ordered_float;

pub use candidate_entry::*;
pub use frontier::*;
pub use ordered_float::*;
