/// Index of a node in a [`LocationGraph`](crate::search::LocationGraph).
///
/// For a catalog of `n` records, ids `0..n` are the records in snapshot order
/// and id `n` is the query point of the current request. Ids are rebuilt for
/// every request and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    pub internal: usize,
}

impl NodeId {
    pub fn new(internal: usize) -> Self {
        NodeId { internal }
    }
}

impl From<usize> for NodeId {
    fn from(internal: usize) -> Self {
        NodeId { internal }
    }
}
