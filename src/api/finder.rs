use crate::{
    api::{NearestRequest, NearestResponse},
    catalog::{Catalog, LocatedRecord},
    numerics::Coordinate,
    search::{LocationGraph, RankedResult, RankingStrategy, rank, rank_direct, shortest_paths},
    statistics::Stats,
};

/// Answers nearest-location requests against a catalog.
///
/// The finder holds no per-request state: each call takes one snapshot of
/// the catalog and works on it alone, so a finder can be shared between
/// threads as long as its catalog can.
#[derive(Debug)]
pub struct NearestFinder<C> {
    catalog: C,
    strategy: RankingStrategy,
}

impl<C: Catalog> NearestFinder<C> {
    pub fn new(catalog: C) -> Self {
        NearestFinder {
            catalog,
            strategy: RankingStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: RankingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> RankingStrategy {
        self.strategy
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Answers one validated request.
    pub fn respond(&self, request: &NearestRequest, stats: &mut Stats) -> NearestResponse {
        let snapshot = self.catalog.snapshot();
        NearestResponse {
            origin: request.origin.into(),
            nearest: nearest(&snapshot, request.origin, request.k, self.strategy, stats),
        }
    }
}

/// Ranks `records` by distance from `origin` and keeps the `k` closest.
///
/// An empty catalog returns immediately, without building a graph.
pub fn nearest(
    records: &[LocatedRecord],
    origin: Coordinate,
    k: usize,
    strategy: RankingStrategy,
    stats: &mut Stats,
) -> Vec<RankedResult> {
    if records.is_empty() {
        return Vec::new();
    }

    match strategy {
        RankingStrategy::ShortestPath => {
            let graph = LocationGraph::build(records, origin);
            tracing::debug!(
                records = records.len(),
                edges = graph.edge_count(),
                k,
                "location graph built"
            );
            let paths = shortest_paths(&graph, graph.query_node(), stats);
            rank(records, &paths, k, stats)
        }
        RankingStrategy::DirectSort => rank_direct(records, origin, k, stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogStore, synthetic_catalog};
    use std::sync::Arc;

    fn record(id: i64, latitude: f64, longitude: f64) -> LocatedRecord {
        LocatedRecord {
            external_id: id,
            name: format!("Center {id}"),
            address: String::new(),
            phone: String::new(),
            latitude,
            longitude,
        }
    }

    fn chennai_store() -> CatalogStore {
        CatalogStore::from_records(vec![
            record(1, 12.9632, 79.9449),
            record(2, 12.9641, 79.9502),
            record(3, 12.9610, 79.9400),
            record(6, 13.0487, 80.0945),
            record(11, 13.0702, 80.1950),
            record(16, 13.1261, 80.1782),
            record(21, 13.0827, 80.2707),
            record(26, 13.0925, 80.2870),
        ])
        .unwrap()
    }

    #[test]
    fn empty_catalog_gives_empty_nearest() {
        let finder = NearestFinder::new(CatalogStore::new());
        let mut stats = Stats::new();

        for k in [0, 1, 5, 100] {
            let request = NearestRequest::new(Coordinate::new(-33.86, 151.2), k);
            let response = finder.respond(&request, &mut stats);
            assert!(response.nearest.is_empty());
            assert_eq!(response.origin.latitude, -33.86);
        }
        assert_eq!(stats.get_searches(), 0);
    }

    #[test]
    fn length_is_min_of_k_and_catalog() {
        let finder = NearestFinder::new(chennai_store());
        let origin = Coordinate::new(13.0, 80.1);

        for k in 0..12 {
            let response = finder.respond(&NearestRequest::new(origin, k), &mut Stats::new());
            assert_eq!(response.nearest.len(), k.min(8));
        }
    }

    #[test]
    fn default_and_fallback_k_from_request_bodies() {
        let finder = NearestFinder::new(chennai_store());

        let absent = NearestRequest::from_json(&serde_json::json!({"latitude": 13.0, "longitude": 80.1})).unwrap();
        assert_eq!(finder.respond(&absent, &mut Stats::new()).nearest.len(), 5);

        let invalid =
            NearestRequest::from_json(&serde_json::json!({"latitude": 13.0, "longitude": 80.1, "k": "many"}))
                .unwrap();
        assert_eq!(finder.respond(&invalid, &mut Stats::new()).nearest.len(), 3);
    }

    #[test]
    fn strategies_agree() {
        let records: Arc<[LocatedRecord]> =
            synthetic_catalog(120, Coordinate::new(13.05, 80.2), 12.0, 1).into();
        let graph_finder = NearestFinder::new(Arc::clone(&records));
        let direct_finder = NearestFinder::new(records).with_strategy(RankingStrategy::DirectSort);
        assert_eq!(direct_finder.strategy(), RankingStrategy::DirectSort);

        let request = NearestRequest::new(Coordinate::new(13.0, 80.25), 15);
        let mut graph_stats = Stats::new();
        let mut direct_stats = Stats::new();
        assert_eq!(
            graph_finder.respond(&request, &mut graph_stats),
            direct_finder.respond(&request, &mut direct_stats)
        );
        assert_eq!(graph_stats.get_searches(), 1);
        assert_eq!(direct_stats.get_searches(), 0);
        assert_eq!(direct_stats.get_records_ranked(), 120);
    }

    #[test]
    fn shared_finder_answers_from_many_threads() {
        let finder = Arc::new(NearestFinder::new(chennai_store()));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let finder = Arc::clone(&finder);
                std::thread::spawn(move || {
                    let request = NearestRequest::new(Coordinate::new(13.0 + t as f64 * 0.01, 80.1), 3);
                    finder.respond(&request, &mut Stats::new())
                })
            })
            .collect();

        for handle in handles {
            let response = handle.join().expect("Thread panicked");
            assert_eq!(response.nearest.len(), 3);
        }
    }
}
