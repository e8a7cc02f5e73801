//! Distance ranking over a complete location graph.
//!
//! A request turns the catalog plus the query point into a weighted graph
//! ([`LocationGraph`]), runs a single-source shortest-path search from the
//! query node ([`shortest_paths`]) and ranks the records by the resulting
//! distances ([`rank`]).
//!
//! Great-circle distance obeys the triangle inequality, so on the complete
//! graph every shortest path is the direct edge and the ranking equals a plain
//! sort by direct distance ([`rank_direct`]). The graph formulation is kept
//! because the reported path is part of the output, and because it keeps the
//! door open for non-complete graphs (road networks, capacity constraints).
//! Graph storage is quadratic in the catalog size; past a few thousand
//! records, [`RankingStrategy::DirectSort`] is the way out.

mod graph;
mod node;
mod ranking;
mod shortest_paths;

pub use graph::*;
pub use node::*;
pub use ranking::*;
pub use shortest_paths::*;
