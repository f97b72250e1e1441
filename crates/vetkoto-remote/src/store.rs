//! Remote data operations
//!
//! This module provides the [`RemoteStore`] trait every backend implements.
//! The dashboard talks to the backend only through it, so the PostgREST
//! client and the in-memory store are interchangeable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vetkoto_core::prelude::*;
use vetkoto_core::{Entity, EntitySchema, Record, RecordId};

use crate::query::ListQuery;

/// One choice of a foreign-key select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The value as an id, for comparing against a record's field.
    pub fn id(&self) -> Option<RecordId> {
        RecordId::from_value(&self.value)
    }
}

/// Row-oriented operations on the clinic backend
///
/// `list` and `options` read the entity's list source (table or view);
/// the other operations address its base table.
#[trait_variant::make(RemoteStore: Send)]
pub trait LocalRemoteStore {
    /// Fetch rows, optionally filtered on one column.
    async fn list(&self, entity: Entity, query: &ListQuery) -> Result<Vec<Record>>;

    /// Fetch one row by primary key.
    async fn get(&self, entity: Entity, id: &RecordId) -> Result<Record>;

    /// Insert a row and return it as stored.
    async fn create(&self, entity: Entity, payload: Record) -> Result<Record>;

    /// Update the row named by the payload's primary key.
    ///
    /// Fails with a missing-primary-key error before any request when the
    /// payload carries no key.
    async fn update(&self, entity: Entity, payload: Record) -> Result<Record>;

    /// Delete one row by primary key.
    async fn remove(&self, entity: Entity, id: &RecordId) -> Result<()>;

    /// `(value, label)` pairs ordered by label.
    async fn options(
        &self,
        entity: Entity,
        label_key: &str,
        value_key: Option<&str>,
    ) -> Result<Vec<SelectOption>>;
}

/// Split an update payload into its primary key and the remaining body.
pub fn split_primary_key(schema: &EntitySchema, mut payload: Record) -> Result<(RecordId, Record)> {
    let id = payload
        .id(schema.primary_key)
        .ok_or_else(|| Error::missing_primary_key(schema.primary_key))?;
    payload.remove(schema.primary_key);
    Ok((id, payload))
}

/// Put the primary key back in front of an updated row.
pub fn merge_primary_key(schema: &EntitySchema, id: &RecordId, row: Record) -> Record {
    let mut merged = Record::new();
    merged.insert(schema.primary_key, id.to_value());
    for (key, value) in row.into_inner() {
        if key != schema.primary_key {
            merged.insert(key, value);
        }
    }
    merged
}
