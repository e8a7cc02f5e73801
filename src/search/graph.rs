use crate::{
    catalog::LocatedRecord,
    numerics::{Coordinate, GreatCircle},
    search::NodeId,
};

/// Weighted edge to `target`, weight in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight_km: f64,
}

/// Adjacency-list graph over the records of one catalog snapshot plus one
/// query node.
///
/// # Invariants
/// - `adjacency[i]` holds the outgoing edges of node `i`.
/// - Every edge target is a valid index into `adjacency`.
/// - Every weight is finite and non-negative.
///
/// A graph produced by [`LocationGraph::build`] is complete among the record
/// nodes and undirected there (each pair appears in both lists with the same
/// weight). The query node has one outgoing edge per record and no incoming
/// edge: it is only ever the source of a search, never an intermediate hop.
#[derive(Debug, Clone)]
pub struct LocationGraph {
    adjacency: Vec<Vec<Edge>>,
    query: NodeId,
}

impl LocationGraph {
    /// Builds the complete location graph for `records` and the query point.
    ///
    /// Record `i` becomes node `i`; the query point becomes node
    /// `records.len()`. Each pairwise distance is computed once and stored in
    /// both directions, so construction costs `n·(n-1)/2 + n` distance
    /// evaluations and `n²` edges of storage.
    pub fn build(records: &[LocatedRecord], query_point: Coordinate) -> Self {
        let n = records.len();
        let coordinates: Vec<Coordinate> = records.iter().map(LocatedRecord::coordinate).collect();

        let mut adjacency: Vec<Vec<Edge>> = (0..n).map(|_| Vec::with_capacity(n)).collect();
        for i in 0..n {
            for j in (i + 1)..n {
                let d = coordinates[i].haversine_km(&coordinates[j]);
                adjacency[i].push(Edge {
                    target: NodeId::new(j),
                    weight_km: d,
                });
                adjacency[j].push(Edge {
                    target: NodeId::new(i),
                    weight_km: d,
                });
            }
        }

        let query_edges = coordinates
            .iter()
            .enumerate()
            .map(|(i, coordinate)| Edge {
                target: NodeId::new(i),
                weight_km: query_point.haversine_km(coordinate),
            })
            .collect();
        adjacency.push(query_edges);

        LocationGraph {
            adjacency,
            query: NodeId::new(n),
        }
    }

    /// Wraps a hand-made adjacency list, e.g. a road network that is not complete.
    ///
    /// # Panics
    /// - If `query` or any edge target is out of bounds.
    /// - If any weight is negative or not finite.
    pub fn from_adjacency(adjacency: Vec<Vec<Edge>>, query: NodeId) -> Self {
        assert!(query.internal < adjacency.len(), "query node out of bounds");
        for edge in adjacency.iter().flatten() {
            assert!(edge.target.internal < adjacency.len(), "edge target out of bounds");
            assert!(
                edge.weight_km.is_finite() && edge.weight_km >= 0.0,
                "edge weights must be finite and non-negative"
            );
        }
        LocationGraph { adjacency, query }
    }

    pub fn query_node(&self) -> NodeId {
        self.query
    }

    /// Number of nodes, the query node included.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn neighbors(&self, node: NodeId) -> &[Edge] {
        &self.adjacency[node.internal]
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adjacency.len()).map(NodeId::new)
    }
}
