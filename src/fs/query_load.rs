use std::path::Path;

use npyz::NpyFile;

use crate::{FinderError, Result, numerics::Coordinate};

/// Reads an `(N, 2)` NumPy matrix of query points, one (latitude, longitude)
/// row per query. Both `f8` and `f4` element types are accepted.
pub fn load_queries(path: impl AsRef<Path>) -> Result<Vec<Coordinate>> {
    let path = path.as_ref();
    let unusable = |detail: String| FinderError::QueryFile {
        path: path.to_path_buf(),
        detail,
    };

    let bytes = std::fs::read(path).map_err(|e| unusable(e.to_string()))?;
    let npy = NpyFile::new(&bytes[..]).map_err(|e| unusable(e.to_string()))?;

    let shape = npy.shape().to_vec();
    if shape.len() != 2 || shape[1] != 2 {
        return Err(unusable(format!("expected shape (N, 2), found {shape:?}")));
    }

    // f8 first; npyz refuses to widen, so f4 files need their own pass
    let values: Vec<f64> = match npy.into_vec::<f64>() {
        Ok(values) => values,
        Err(_) => NpyFile::new(&bytes[..])
            .and_then(|npy| npy.into_vec::<f32>())
            .map_err(|e| unusable(format!("elements must be f4 or f8: {e}")))?
            .into_iter()
            .map(f64::from)
            .collect(),
    };

    let queries: Vec<Coordinate> = values
        .chunks_exact(2)
        .map(|row| Coordinate::new(row[0], row[1]))
        .collect();

    if let Some(row) = queries.iter().position(|q| !q.is_finite()) {
        return Err(unusable(format!("row {row} holds a non-finite coordinate")));
    }

    tracing::info!(path = %path.display(), queries = queries.len(), "query file loaded");
    Ok(queries)
}
