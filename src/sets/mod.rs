//! Specialized data structures for the shortest-path search.
//!
//! # Submodules
//!
//! - [`candidates`]: Totally-ordered distances and the min-first search frontier

pub mod candidates;
