use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{Result, catalog::LocatedRecord};

/// Read side of the catalog, as consumed by the finder.
///
/// A snapshot is the complete, ordered catalog at the time of the call. It
/// never changes afterwards, so one request always sees one consistent list.
pub trait Catalog {
    fn snapshot(&self) -> Arc<[LocatedRecord]>;
}

impl Catalog for Arc<[LocatedRecord]> {
    fn snapshot(&self) -> Arc<[LocatedRecord]> {
        Arc::clone(self)
    }
}

/// Outcome of an update-or-create pass over the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpsertReport {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
}

/// In-memory keyed store of located records, ordered by external id.
///
/// Readers clone the current `Arc` under a read lock; writers build a whole
/// new list and swap it in under the write lock.
#[derive(Debug)]
pub struct CatalogStore {
    records: RwLock<Arc<[LocatedRecord]>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        CatalogStore {
            records: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Builds a store from a list of records, validating each of them.
    pub fn from_records(records: Vec<LocatedRecord>) -> Result<Self> {
        let store = CatalogStore::new();
        store.upsert(records)?;
        Ok(store)
    }

    /// Inserts new records and overwrites existing ones with the same external id.
    ///
    /// Every incoming record is validated before the store is touched, so a
    /// failing batch leaves the catalog unchanged. Within one batch a later
    /// entry for an id overwrites an earlier one and counts as an update.
    pub fn upsert(&self, incoming: Vec<LocatedRecord>) -> Result<UpsertReport> {
        for record in &incoming {
            record.validate()?;
        }

        let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let mut keyed: BTreeMap<i64, LocatedRecord> = guard
            .iter()
            .map(|record| (record.external_id, record.clone()))
            .collect();

        let mut report = UpsertReport {
            total: incoming.len(),
            ..UpsertReport::default()
        };
        for record in incoming {
            if keyed.insert(record.external_id, record).is_some() {
                report.updated += 1;
            } else {
                report.created += 1;
            }
        }

        *guard = keyed.into_values().collect();
        tracing::info!(
            total = report.total,
            created = report.created,
            updated = report.updated,
            catalog_size = guard.len(),
            "catalog upsert complete"
        );
        Ok(report)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        CatalogStore::new()
    }
}

impl Catalog for CatalogStore {
    fn snapshot(&self) -> Arc<[LocatedRecord]> {
        Arc::clone(&self.records.read().unwrap_or_else(PoisonError::into_inner))
    }
}
