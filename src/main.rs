use anyhow::{Context, bail};
use centerfinder::{
    FinderError,
    api::{ErrorResponse, NearestFinder, NearestRequest},
    catalog::{Catalog, CatalogStore, LocatedRecord, synthetic_catalog},
    fs::{load_catalog, load_queries, save_catalog},
    numerics::Coordinate,
    search::RankingStrategy,
    statistics::Stats,
};
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{
    hint::black_box,
    io::Read,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::{Arc, atomic::AtomicUsize},
    thread,
};
use tqdm::tqdm;
use tracing_subscriber::EnvFilter;

/// Nearest-location finder over a static catalog
#[derive(Parser, Debug)]
#[command(name = "centerfinder")]
#[command(about = "Finds the catalog locations nearest to a coordinate", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer one request body and print the response JSON
    Query {
        /// Path to the catalog file (JSON array of records)
        #[arg(short, long, default_value = "data/centers.json")]
        catalog: PathBuf,

        /// Request body, e.g. '{"latitude": 12.97, "longitude": 79.95, "k": 5}'. Read from stdin when absent
        #[arg(short, long)]
        body: Option<String>,

        /// How distances are ranked
        #[arg(short, long, value_enum, default_value_t = RankingStrategy::ShortestPath)]
        strategy: RankingStrategy,
    },

    /// Run every query of a numpy file against the catalog
    Batch {
        /// Path to the catalog file (JSON array of records)
        #[arg(short, long, default_value = "data/centers.json")]
        catalog: PathBuf,

        /// Path to the queries file (numpy format, shape (N, 2))
        #[arg(short, long)]
        queries: PathBuf,

        /// Number of locations to return for each query
        #[arg(short, long, default_value_t = 5)]
        k: usize,

        /// Number of threads to use (comma-separated list, e.g., "1,2,4,8")
        #[arg(short, long, value_delimiter = ',', default_value = "1")]
        threads: Vec<usize>,

        /// How distances are ranked
        #[arg(short, long, value_enum, default_value_t = RankingStrategy::ShortestPath)]
        strategy: RankingStrategy,
    },

    /// Sweep synthetic catalog sizes and thread counts
    Bench {
        /// Catalog sizes to generate (comma-separated list, e.g., "30,300,1000")
        #[arg(short, long, value_delimiter = ',', default_value = "30,300")]
        records: Vec<usize>,

        /// Number of threads to use (comma-separated list, e.g., "1,2,4,8")
        #[arg(short, long, value_delimiter = ',', default_value = "1")]
        threads: Vec<usize>,

        /// Number of random queries per job
        #[arg(long, default_value_t = 1000)]
        num_queries: usize,

        /// Number of locations to return for each query
        #[arg(short, long, default_value_t = 5)]
        k: usize,

        /// Seed for catalog and query generation
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// How distances are ranked
        #[arg(short, long, value_enum, default_value_t = RankingStrategy::ShortestPath)]
        strategy: RankingStrategy,
    },

    /// Update-or-create catalog records from a seed file
    Seed {
        /// Seed records (JSON array with id, name, address, phone, latitude, longitude)
        #[arg(long, default_value = "data/centers.json")]
        seed_file: PathBuf,

        /// Catalog file to update; created when missing
        #[arg(short, long)]
        catalog: PathBuf,
    },
}

/// Centre of the synthetic catalogs: Chennai Central.
const BENCH_CENTER: Coordinate = Coordinate {
    latitude: 13.0827,
    longitude: 80.2707,
};
const BENCH_SPREAD_KM: f64 = 15.0;

fn open_store(path: &Path) -> anyhow::Result<CatalogStore> {
    let records = load_catalog(path)?;
    CatalogStore::from_records(records)
        .with_context(|| format!("catalog {} failed validation", path.display()))
}

fn run_query(catalog: PathBuf, body: Option<String>, strategy: RankingStrategy) -> anyhow::Result<ExitCode> {
    let finder = NearestFinder::new(open_store(&catalog)?).with_strategy(strategy);

    let body = match body {
        Some(body) => body,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read request body from stdin")?;
            buffer
        }
    };

    match body.parse::<NearestRequest>() {
        Ok(request) => {
            let mut stats = Stats::new();
            let response = finder.respond(&request, &mut stats);
            tracing::debug!(
                edges = stats.get_edges_relaxed(),
                stale = stats.get_stale_entries(),
                "request answered"
            );
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error @ (FinderError::InvalidRequest { .. } | FinderError::InvalidCoordinate { .. })) => {
            tracing::warn!(%error, "request rejected");
            let payload = ErrorResponse {
                error: error.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(ExitCode::from(2))
        }
        Err(error) => Err(error.into()),
    }
}

fn run_search_job<C: Catalog + Send + Sync + 'static>(
    finder: Arc<NearestFinder<C>>,
    queries: Arc<Vec<Coordinate>>,
    num_threads: usize,
    k: usize,
) {
    let num_queries = queries.len();
    println!("\n==========");
    println!("Running with threads={}, k={}", num_threads, k);
    println!("==========");

    let start_time = std::time::Instant::now();

    let (checksum, combined_stats) = if num_threads <= 1 {
        let mut stats = Stats::new();
        let mut checksum = 0i64;
        for query in tqdm(queries.iter()) {
            let response = black_box(finder.respond(&NearestRequest::new(*query, k), &mut stats));
            checksum += response.nearest.first().map_or(0, |r| r.external_id);
        }
        (checksum, stats)
    } else {
        let batch_size = 256;
        let next_batch = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..num_threads)
            .map(|_thread_id| {
                let finder = Arc::clone(&finder);
                let queries_clone = Arc::clone(&queries);
                let next_batch_clone = Arc::clone(&next_batch);

                thread::spawn(move || {
                    let mut local_checksum = 0i64;
                    let mut local_stats = Stats::new();

                    loop {
                        // Atomically grab the next batch of work
                        let batch_start =
                            next_batch_clone.fetch_add(batch_size, std::sync::atomic::Ordering::Relaxed);

                        if batch_start >= num_queries {
                            break;
                        }

                        let batch_end = std::cmp::min(batch_start + batch_size, num_queries);

                        for query in &queries_clone[batch_start..batch_end] {
                            let response = black_box(
                                finder.respond(&NearestRequest::new(*query, k), &mut local_stats),
                            );
                            local_checksum += response.nearest.first().map_or(0, |r| r.external_id);
                        }
                    }

                    (local_checksum, local_stats)
                })
            })
            .collect();

        let mut checksum = 0i64;
        let mut combined_stats = Stats::new();
        for handle in handles {
            let (local_checksum, local_stats) = handle.join().expect("Thread panicked");
            checksum += local_checksum;
            combined_stats = combined_stats.merge(&local_stats)
        }
        (checksum, combined_stats)
    };

    if num_queries > 0 {
        let per_query = |count: usize| count as f64 / num_queries as f64;
        println!(
            "Avg per query: {:.2} edges relaxed, {:.2} frontier pushes, {:.2} stale entries, {:.2} records ranked",
            per_query(combined_stats.get_edges_relaxed()),
            per_query(combined_stats.get_frontier_pushes()),
            per_query(combined_stats.get_stale_entries()),
            per_query(combined_stats.get_records_ranked()),
        );
    }

    println!("Checksum: {checksum}");

    let elapsed = start_time.elapsed();
    let total_qps = num_queries as f64 / elapsed.as_secs_f64();
    println!(
        "Completed {} queries in {:.2}s ({:.2} QPS)",
        num_queries,
        elapsed.as_secs_f64(),
        total_qps
    );
}

fn run_batch(
    catalog: PathBuf,
    queries: PathBuf,
    k: usize,
    threads: Vec<usize>,
    strategy: RankingStrategy,
) -> anyhow::Result<ExitCode> {
    let finder = Arc::new(NearestFinder::new(open_store(&catalog)?).with_strategy(strategy));
    let queries = Arc::new(load_queries(&queries)?);
    println!(
        "Catalog loaded with {} records, {} queries",
        finder.catalog().len(),
        queries.len()
    );

    for &num_threads in &threads {
        run_search_job(Arc::clone(&finder), Arc::clone(&queries), num_threads, k);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_bench(
    records: Vec<usize>,
    threads: Vec<usize>,
    num_queries: usize,
    k: usize,
    seed: u64,
    strategy: RankingStrategy,
) -> anyhow::Result<ExitCode> {
    let mut rng = StdRng::seed_from_u64(seed);
    let queries: Vec<Coordinate> = (0..num_queries)
        .map(|_| {
            Coordinate::new(
                BENCH_CENTER.latitude + rng.random_range(-0.3..0.3),
                BENCH_CENTER.longitude + rng.random_range(-0.3..0.3),
            )
        })
        .collect();
    let queries = Arc::new(queries);

    println!("\nStarting cartesian product sweep:");
    println!("  Catalog sizes: {:?}", records);
    println!("  Threads: {:?}", threads);
    println!("  Strategy: {:?}", strategy);
    println!("  Total jobs: {}", records.len() * threads.len());

    for &num_records in &records {
        let catalog: Arc<[LocatedRecord]> =
            synthetic_catalog(num_records, BENCH_CENTER, BENCH_SPREAD_KM, seed).into();
        let finder = Arc::new(NearestFinder::new(catalog).with_strategy(strategy));
        println!("\nSynthetic catalog with {num_records} records");

        for &num_threads in &threads {
            run_search_job(Arc::clone(&finder), Arc::clone(&queries), num_threads, k);
        }
    }

    println!("\n==========");
    println!("All jobs completed!");
    println!("==========");
    Ok(ExitCode::SUCCESS)
}

fn run_seed(seed_file: PathBuf, catalog: PathBuf) -> anyhow::Result<ExitCode> {
    let store = if catalog.exists() {
        open_store(&catalog)?
    } else {
        tracing::info!(path = %catalog.display(), "catalog missing, starting empty");
        CatalogStore::new()
    };

    let report = store.upsert(load_catalog(&seed_file)?)?;
    save_catalog(&catalog, &store.snapshot())?;

    println!(
        "Load complete: total: {} (created: {}, updated: {})",
        report.total, report.created, report.updated
    );
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Query {
            catalog,
            body,
            strategy,
        } => run_query(catalog, body, strategy),
        Command::Batch {
            catalog,
            queries,
            k,
            threads,
            strategy,
        } => {
            if threads.is_empty() {
                bail!("at least one thread count is required");
            }
            run_batch(catalog, queries, k, threads, strategy)
        }
        Command::Bench {
            records,
            threads,
            num_queries,
            k,
            seed,
            strategy,
        } => run_bench(records, threads, num_queries, k, seed, strategy),
        Command::Seed { seed_file, catalog } => run_seed(seed_file, catalog),
    }
}
