use crate::{search::NodeId, sets::candidates::TotalF64};
use std::cmp::Ordering;

/// A tentative (node, distance) pair waiting on the search frontier.
///
/// Entries order by distance first and node index second, so that popping
/// from the frontier is deterministic when two nodes are equally far. A node
/// may sit on the frontier several times with different distances; only the
/// smallest one is ever acted upon.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub struct CandidateEntry {
    /// Cumulative distance from the source node, in kilometers.
    pub distance: TotalF64,

    /// Node this entry refers to.
    pub index: NodeId,
}

impl PartialOrd for CandidateEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}
