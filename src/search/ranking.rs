use serde::{Deserialize, Serialize};

use crate::{
    catalog::LocatedRecord,
    numerics::{Coordinate, GreatCircle, round_km},
    search::{NodeId, ShortestPaths},
    sets::candidates::TotalF64,
    statistics::Stats,
};

/// One matched record, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub external_id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: String,
    /// Distance from the query point, rounded to 4 decimal places.
    pub distance_km: f64,
    /// External ids along the shortest path from the query point to this
    /// record, the record itself last. The query point has no id and is left out.
    pub path_external_ids: Vec<i64>,
}

impl RankedResult {
    fn new(record: &LocatedRecord, distance_km: f64, path_external_ids: Vec<i64>) -> Self {
        RankedResult {
            external_id: record.external_id,
            name: record.name.clone(),
            address: record.address.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            phone: record.phone.clone(),
            distance_km: round_km(distance_km),
            path_external_ids,
        }
    }
}

/// How distances are turned into a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RankingStrategy {
    /// Build the location graph and rank by shortest-path distance.
    #[default]
    ShortestPath,
    /// Sort records by their direct distance to the query point.
    DirectSort,
}

/// Ranks the records of a searched graph by their distance from the source.
///
/// `records[i]` must be the record behind node `i` of the graph `paths` was
/// computed on. Records the search could not reach are left out. Paths keep
/// only record nodes, so any extra junction nodes of a non-complete graph do
/// not show up in `path_external_ids`.
///
/// The output is sorted by rounded distance, ties keep catalog order, and
/// holds at most `k` entries.
pub fn rank(
    records: &[LocatedRecord],
    paths: &ShortestPaths,
    k: usize,
    stats: &mut Stats,
) -> Vec<RankedResult> {
    let mut results = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let node = NodeId::new(i);
        let Some(path) = paths.path_to(node) else {
            tracing::warn!(
                external_id = record.external_id,
                "record unreachable from query point, excluded"
            );
            continue;
        };

        let path_external_ids = path
            .into_iter()
            .filter(|step| step.internal < records.len())
            .map(|step| records[step.internal].external_id)
            .collect();
        results.push(RankedResult::new(record, paths.distance_to(node), path_external_ids));
    }

    stats.bump_records_ranked(results.len());
    sort_and_truncate(results, k)
}

/// Ranks records by direct great-circle distance, without building a graph.
///
/// Gives the same distances and order as [`rank`] on the complete location
/// graph; each path is just the record's own id.
pub fn rank_direct(
    records: &[LocatedRecord],
    origin: Coordinate,
    k: usize,
    stats: &mut Stats,
) -> Vec<RankedResult> {
    let results: Vec<RankedResult> = records
        .iter()
        .map(|record| {
            let d = origin.haversine_km(&record.coordinate());
            RankedResult::new(record, d, vec![record.external_id])
        })
        .collect();

    stats.bump_records_ranked(results.len());
    sort_and_truncate(results, k)
}

fn sort_and_truncate(mut results: Vec<RankedResult>, k: usize) -> Vec<RankedResult> {
    // stable: equal distances keep catalog order
    results.sort_by_key(|result| TotalF64(result.distance_km));
    results.truncate(k);
    results
}
