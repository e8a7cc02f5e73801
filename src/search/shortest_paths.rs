use hashbrown::HashMap;

use crate::{
    search::{LocationGraph, NodeId},
    sets::candidates::Frontier,
    statistics::Stats,
};

/// Result of a single-source shortest-path search.
///
/// Holds, for every node of the searched graph, the shortest known distance
/// from the source (infinite when unreachable) and the predecessor on that
/// path (`None` for the source and for unreachable nodes).
///
/// When two paths tie exactly, which predecessor wins depends on the order in
/// which the frontier settles nodes. Distances are unaffected; the recorded
/// path may differ from another implementation's on such ties.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: NodeId,
    distances: HashMap<NodeId, f64>,
    predecessors: HashMap<NodeId, Option<NodeId>>,
}

impl ShortestPaths {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Shortest distance from the source, `f64::INFINITY` if unreachable or unknown.
    pub fn distance_to(&self, node: NodeId) -> f64 {
        self.distances.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors.get(&node).copied().flatten()
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance_to(node).is_finite()
    }

    /// Walks predecessor links from `target` back to the source.
    ///
    /// Returns the nodes in source-to-target order with the source itself
    /// left out, or `None` if `target` is unreachable.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = Vec::new();
        let mut node = Some(target);
        while let Some(current) = node {
            if current == self.source {
                break;
            }
            path.push(current);
            node = self.predecessor(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Dijkstra's algorithm from `source`, with a lazy-deletion binary heap.
///
/// Every node starts at infinite distance except the source at zero. The
/// closest frontier entry is settled repeatedly; each outgoing edge updates
/// the distance and predecessor of its target when it yields a strictly
/// shorter path. A popped entry whose distance exceeds the recorded one is
/// stale and skipped. The search ends when the frontier is empty, after
/// `O((V + E) log V)` work.
///
/// # Panics
/// - If `source` is not a node of `graph`.
pub fn shortest_paths(graph: &LocationGraph, source: NodeId, stats: &mut Stats) -> ShortestPaths {
    assert!(source.internal < graph.len(), "source node out of bounds");
    stats.bump_searches();

    let mut distances: HashMap<NodeId, f64> =
        graph.nodes().map(|node| (node, f64::INFINITY)).collect();
    let mut predecessors: HashMap<NodeId, Option<NodeId>> =
        graph.nodes().map(|node| (node, None)).collect();

    distances.insert(source, 0.0);
    let mut frontier = Frontier::with_capacity(graph.len());
    frontier.push(source, 0.0);
    stats.bump_frontier_pushes();

    while let Some(entry) = frontier.pop() {
        let (d_u, u) = (entry.distance.0, entry.index);
        if d_u > distances[&u] {
            stats.bump_stale_entries();
            continue;
        }

        let edges = graph.neighbors(u);
        stats.bump_edges(edges.len());
        for edge in edges {
            let alt = d_u + edge.weight_km;
            if alt < distances[&edge.target] {
                distances.insert(edge.target, alt);
                predecessors.insert(edge.target, Some(u));
                frontier.push(edge.target, alt);
                stats.bump_frontier_pushes();
            }
        }
    }

    tracing::trace!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "shortest-path search settled"
    );

    ShortestPaths {
        source,
        distances,
        predecessors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Edge;
    use rand::prelude::*;

    fn edge(target: usize, weight_km: f64) -> Edge {
        Edge {
            target: NodeId::new(target),
            weight_km,
        }
    }

    // A small road network:
    //   3 -> 0 (1.0), 3 -> 1 (5.0), 0 -> 1 (1.0), 1 -> 2 (1.0), 2 -> 0 (0.5)
    //   4 is isolated
    fn road_network() -> LocationGraph {
        LocationGraph::from_adjacency(
            vec![
                vec![edge(1, 1.0)],
                vec![edge(2, 1.0)],
                vec![edge(0, 0.5)],
                vec![edge(0, 1.0), edge(1, 5.0)],
                vec![],
            ],
            NodeId::new(3),
        )
    }

    #[test]
    fn source_is_at_distance_zero() {
        let graph = road_network();
        let paths = shortest_paths(&graph, NodeId::new(3), &mut Stats::new());
        assert_eq!(paths.distance_to(NodeId::new(3)), 0.0);
        assert_eq!(paths.predecessor(NodeId::new(3)), None);
        assert_eq!(paths.path_to(NodeId::new(3)), Some(vec![]));
    }

    #[test]
    fn multi_hop_beats_direct_edge() {
        let graph = road_network();
        let paths = shortest_paths(&graph, graph.query_node(), &mut Stats::new());

        assert_eq!(paths.distance_to(NodeId::new(0)), 1.0);
        assert_eq!(paths.distance_to(NodeId::new(1)), 2.0);
        assert_eq!(paths.distance_to(NodeId::new(2)), 3.0);
        assert_eq!(paths.predecessor(NodeId::new(1)), Some(NodeId::new(0)));
        assert_eq!(
            paths.path_to(NodeId::new(2)),
            Some(vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)])
        );
    }

    #[test]
    fn isolated_node_is_unreachable() {
        let graph = road_network();
        let paths = shortest_paths(&graph, graph.query_node(), &mut Stats::new());

        assert!(!paths.is_reachable(NodeId::new(4)));
        assert_eq!(paths.distance_to(NodeId::new(4)), f64::INFINITY);
        assert_eq!(paths.predecessor(NodeId::new(4)), None);
        assert_eq!(paths.path_to(NodeId::new(4)), None);
    }

    #[test]
    fn stale_entries_are_skipped() {
        // 1 is first reached at 5.0, then improved to 2.0 through 0:
        // the 5.0 entry is popped later and must be ignored.
        let graph = road_network();
        let mut stats = Stats::new();
        let _ = shortest_paths(&graph, graph.query_node(), &mut stats);

        assert_eq!(stats.get_searches(), 1);
        assert_eq!(stats.get_stale_entries(), 1);
        // source, 0, 1 (at 5.0), 1 (at 2.0), 2
        assert_eq!(stats.get_frontier_pushes(), 5);
    }

    #[test]
    fn matches_bellman_ford_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let n = rng.random_range(2..25);
            let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); n];
            for edges in adjacency.iter_mut() {
                for target in 0..n {
                    if rng.random_bool(0.3) {
                        edges.push(edge(target, rng.random_range(0.0..100.0)));
                    }
                }
            }

            // reference: repeated relaxation until nothing changes
            let mut expected = vec![f64::INFINITY; n];
            expected[0] = 0.0;
            for _ in 0..n {
                for (u, edges) in adjacency.iter().enumerate() {
                    for e in edges {
                        let alt = expected[u] + e.weight_km;
                        if alt < expected[e.target.internal] {
                            expected[e.target.internal] = alt;
                        }
                    }
                }
            }

            let graph = LocationGraph::from_adjacency(adjacency, NodeId::new(0));
            let paths = shortest_paths(&graph, NodeId::new(0), &mut Stats::new());
            for (node, &want) in expected.iter().enumerate() {
                let got = paths.distance_to(NodeId::new(node));
                if want.is_finite() {
                    assert!((got - want).abs() < 1e-9, "node {node}: got {got} want {want}");
                } else {
                    assert!(got.is_infinite());
                }
            }
        }
    }

    #[test]
    fn complete_geographic_graph_uses_direct_edges() {
        use crate::{catalog::synthetic_catalog, numerics::Coordinate};

        let center = Coordinate::new(13.0, 80.2);
        let records = synthetic_catalog(40, center, 15.0, 9);
        let graph = LocationGraph::build(&records, center);
        let paths = shortest_paths(&graph, graph.query_node(), &mut Stats::new());

        for node in graph.nodes().filter(|&node| node != graph.query_node()) {
            assert_eq!(paths.predecessor(node), Some(graph.query_node()));
            assert_eq!(paths.path_to(node), Some(vec![node]));
        }
    }
}
