use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{FinderError, Result, catalog::LocatedRecord};

/// Reads a JSON array of records.
///
/// Records are only parsed here. Range checks happen when they enter a
/// [`CatalogStore`](crate::catalog::CatalogStore).
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<LocatedRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FinderError::CatalogIo {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<LocatedRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| FinderError::CatalogFormat {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), records = records.len(), "catalog file loaded");
    Ok(records)
}

/// Writes records as a pretty-printed JSON array, replacing the file.
pub fn save_catalog(path: impl AsRef<Path>, records: &[LocatedRecord]) -> Result<()> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| FinderError::CatalogIo {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| FinderError::CatalogFormat {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)?;

    tracing::info!(path = %path.display(), records = records.len(), "catalog file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogStore};

    #[test]
    fn loading_shipped_catalog() {
        let records = load_catalog("data/centers.json").unwrap();
        assert_eq!(records.len(), 30);
        assert_eq!(records[0].external_id, 1);
        assert_eq!(records[0].name, "GreenTech Solar Solutions");

        let store = CatalogStore::from_records(records).unwrap();
        assert_eq!(store.len(), 30);
    }

    #[test]
    fn loading_fixture_with_missing_display_fields() {
        let records = load_catalog("test_data/sparse_centers.json").unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().any(|r| r.phone.is_empty()));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_catalog("test_data/does_not_exist.json"),
            Err(FinderError::CatalogIo { .. })
        ));
    }

    #[test]
    fn malformed_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"[{"id": 1, "latitude": "north"}]"#).unwrap();

        assert!(matches!(load_catalog(&path), Err(FinderError::CatalogFormat { .. })));
    }

    #[test]
    fn save_then_load_keeps_store_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let store = CatalogStore::from_records(load_catalog("test_data/sparse_centers.json").unwrap()).unwrap();
        save_catalog(&path, &store.snapshot()).unwrap();

        let reloaded = CatalogStore::from_records(load_catalog(&path).unwrap()).unwrap();
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }
}
