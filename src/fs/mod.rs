//! File system I/O for catalogs and query batches.
//!
//! Catalogs are JSON arrays of records. Query batches for load testing are
//! NumPy `.npy` matrices with one (latitude, longitude) row per query.

mod catalog_load;
mod query_load;

pub use catalog_load::*;
pub use query_load::*;
