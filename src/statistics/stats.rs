#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    searches: usize,
    frontier_pushes: usize,
    edges_relaxed: usize,
    stale_entries: usize,
    records_ranked: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            searches: 0,
            frontier_pushes: 0,
            edges_relaxed: 0,
            stale_entries: 0,
            records_ranked: 0,
        }
    }

    /// Record that a new shortest-path search has been started
    pub fn bump_searches(&mut self) {
        self.searches += 1
    }

    /// Record that an entry was pushed onto the search frontier
    pub fn bump_frontier_pushes(&mut self) {
        self.frontier_pushes += 1
    }

    /// Record that a bunch of outgoing edges were examined while settling a node
    pub fn bump_edges(&mut self, edge_amount: usize) {
        self.edges_relaxed += edge_amount
    }

    /// Record that a popped frontier entry was outdated and skipped
    pub fn bump_stale_entries(&mut self) {
        self.stale_entries += 1
    }

    pub fn bump_records_ranked(&mut self, amount: usize) {
        self.records_ranked += amount
    }

    pub fn get_searches(&self) -> usize {
        self.searches
    }

    pub fn get_frontier_pushes(&self) -> usize {
        self.frontier_pushes
    }

    pub fn get_edges_relaxed(&self) -> usize {
        self.edges_relaxed
    }

    pub fn get_stale_entries(&self) -> usize {
        self.stale_entries
    }

    pub fn get_records_ranked(&self) -> usize {
        self.records_ranked
    }

    /// Sums two statistics objects, typically the per-thread results of a batch run.
    pub fn merge(&self, other: &Stats) -> Stats {
        Stats {
            searches: self.searches + other.searches,
            frontier_pushes: self.frontier_pushes + other.frontier_pushes,
            edges_relaxed: self.edges_relaxed + other.edges_relaxed,
            stale_entries: self.stale_entries + other.stale_entries,
            records_ranked: self.records_ranked + other.records_ranked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_initialized_to_zero() {
        let stats = Stats::new();
        assert_eq!(stats.get_searches(), 0);
        assert_eq!(stats.get_frontier_pushes(), 0);
        assert_eq!(stats.get_edges_relaxed(), 0);
        assert_eq!(stats.get_stale_entries(), 0);
        assert_eq!(stats.get_records_ranked(), 0);
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(Stats::default(), Stats::new());
    }

    #[test]
    fn test_bump_searches_multiple_times() {
        let mut stats = Stats::new();
        stats.bump_searches();
        stats.bump_searches();
        stats.bump_searches();
        assert_eq!(stats.get_searches(), 3);
        assert_eq!(stats.get_edges_relaxed(), 0);
    }

    #[test]
    fn test_bump_edges_accumulates() {
        let mut stats = Stats::new();
        stats.bump_edges(5);
        stats.bump_edges(10);
        stats.bump_edges(0);
        assert_eq!(stats.get_edges_relaxed(), 15);
    }

    #[test]
    fn test_merge_sums_every_counter() {
        let mut left = Stats::new();
        left.bump_searches();
        left.bump_frontier_pushes();
        left.bump_edges(4);
        left.bump_records_ranked(2);

        let mut right = Stats::new();
        right.bump_searches();
        right.bump_stale_entries();
        right.bump_edges(6);

        let merged = left.merge(&right);
        assert_eq!(merged.get_searches(), 2);
        assert_eq!(merged.get_frontier_pushes(), 1);
        assert_eq!(merged.get_edges_relaxed(), 10);
        assert_eq!(merged.get_stale_entries(), 1);
        assert_eq!(merged.get_records_ranked(), 2);
    }
}
