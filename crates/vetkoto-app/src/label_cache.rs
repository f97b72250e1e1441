//! Foreign-key label resolution cache
//!
//! Memoizes `"entity:id"` → fetched record for the lifetime of the process.
//! Entries are never invalidated; a label renamed remotely keeps showing the
//! old text until restart. Failed fetches are not cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use vetkoto_core::prelude::*;
use vetkoto_core::{Entity, Record, RecordId, Relation};
use vetkoto_remote::RemoteStore;

/// Shared append-only cache of related records.
#[derive(Debug, Clone, Default)]
pub struct LabelCache {
    entries: Arc<Mutex<HashMap<String, Record>>>,
}

impl LabelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(entity: Entity, id: &RecordId) -> String {
        format!("{}:{}", entity, id)
    }

    /// Cached record for `entity:id`, if any.
    pub fn cached(&self, entity: Entity, id: &RecordId) -> Option<Record> {
        let entries = self.entries.lock().ok()?;
        entries.get(&Self::key(entity, id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn store(&self, entity: Entity, id: &RecordId, record: Record) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(Self::key(entity, id), record);
        }
    }

    /// Fetch a related record, consulting the cache first.
    pub async fn fetch<S>(&self, store: &S, entity: Entity, id: &RecordId) -> Result<Record>
    where
        S: RemoteStore + Sync,
    {
        if let Some(record) = self.cached(entity, id) {
            trace!("Label cache hit for {}:{}", entity, id);
            return Ok(record);
        }

        let record = store.get(entity, id).await?;
        self.store(entity, id, record.clone());
        Ok(record)
    }

    /// Resolve a relation's label for `row`, following a `through` hop.
    pub async fn resolve<S>(&self, store: &S, relation: &Relation, row: &Record) -> Result<String>
    where
        S: RemoteStore + Sync,
    {
        let id = row
            .id(relation.local_field)
            .ok_or_else(|| {
                Error::unresolved_relation(relation.entity.as_str(), relation.local_field)
            })?;
        let mut related = self.fetch(store, relation.entity, &id).await?;

        if let Some(hop) = relation.through {
            let next = related
                .id(hop.field)
                .ok_or_else(|| Error::unresolved_relation(hop.entity.as_str(), hop.field))?;
            related = self.fetch(store, hop.entity, &next).await?;
        }

        Ok(related.text(relation.label_field))
    }
}
