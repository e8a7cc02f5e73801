use std::path::PathBuf;

/// Every failure the finder can report.
///
/// Only request validation and catalog/query file handling can fail. Graph
/// construction, shortest-path search and ranking are total functions over a
/// validated catalog and never produce one of these.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// The request body is not a JSON object.
    #[error("Request body must be a JSON object, got {found}.")]
    InvalidRequest {
        /// JSON kind that was received instead.
        found: &'static str,
    },

    /// `latitude` or `longitude` is missing or does not parse as a finite number.
    #[error("Please provide numeric \"latitude\" and \"longitude\" ({field}: {reason}).")]
    InvalidCoordinate {
        /// Offending request field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A catalog entry failed validation while loading.
    #[error("Catalog record {external_id} is invalid: {reason}")]
    InvalidRecord { external_id: i64, reason: String },

    /// Reading or writing a catalog file failed.
    #[error("Catalog file {path} could not be accessed: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not a JSON array of records.
    #[error("Catalog file {path} is malformed: {source}")]
    CatalogFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A query file could not be read or has the wrong shape.
    #[error("Query file {path} is unusable: {detail}")]
    QueryFile { path: PathBuf, detail: String },
}

pub type Result<T> = std::result::Result<T, FinderError>;
