//! In-memory backend
//!
//! Implements [`RemoteStore`] over plain vectors with the same filter,
//! ordering and error semantics as the PostgREST client. Used by `--demo`
//! and by tests, which can inject failures and count calls per operation.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde_json::Value;

use vetkoto_core::prelude::*;
use vetkoto_core::{display_value, Entity, EntitySchema, Record, RecordId, SchemaRegistry};

use crate::query::ListQuery;
use crate::store::{merge_primary_key, split_primary_key, RemoteStore, SelectOption};

/// Operations the store counts and can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `list` without an active filter.
    List,
    /// `list` with an active filter.
    FilteredList,
    Get,
    Create,
    Update,
    Remove,
    Options,
}

/// Message PostgREST returns when a single-object request matches no row.
const NO_SINGLE_ROW: &str = "JSON object requested, multiple (or no) rows returned";

#[derive(Default)]
struct Inner {
    tables: HashMap<Entity, Vec<Record>>,
    failing: HashSet<Operation>,
    calls: HashMap<Operation, usize>,
}

/// Backend holding every table in memory
pub struct MemoryStore {
    registry: SchemaRegistry,
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Store seeded with a small clinic for demo mode.
    pub fn with_sample_data(registry: SchemaRegistry) -> Self {
        let store = Self::new(registry);
        for (entity, rows) in crate::sample::clinic_rows() {
            store.seed(entity, rows);
        }
        store
    }

    /// Append rows to an entity's table as-is.
    pub fn seed(&self, entity: Entity, rows: impl IntoIterator<Item = Record>) {
        let mut inner = self.lock();
        inner.tables.entry(entity).or_default().extend(rows);
    }

    /// Make every later call of `op` fail (or succeed again).
    pub fn set_failing(&self, op: Operation, failing: bool) {
        let mut inner = self.lock();
        if failing {
            inner.failing.insert(op);
        } else {
            inner.failing.remove(&op);
        }
    }

    /// Number of calls of `op` that reached the store.
    pub fn calls(&self, op: Operation) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Snapshot of an entity's rows in insertion order.
    pub fn rows(&self, entity: Entity) -> Vec<Record> {
        self.lock().tables.get(&entity).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves plain data behind
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn schema(&self, entity: Entity) -> &EntitySchema {
        self.registry.schema(entity)
    }

    /// Count the call and fail it when injected.
    fn enter(&self, inner: &mut Inner, op: Operation) -> Result<()> {
        *inner.calls.entry(op).or_insert(0) += 1;
        if inner.failing.contains(&op) {
            return Err(Error::remote(500, format!("injected {op:?} failure")));
        }
        Ok(())
    }

    fn next_id(rows: &[Record], primary_key: &str) -> i64 {
        rows.iter()
            .filter_map(|r| r.get(primary_key).and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
            + 1
    }
}

fn position(rows: &[Record], primary_key: &str, id: &RecordId) -> Option<usize> {
    rows.iter()
        .position(|r| r.id(primary_key).as_ref() == Some(id))
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        // Nulls sort last in ascending order, as in Postgres
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(x), Some(y)) => display_value(x).cmp(&display_value(y)),
    }
}

impl RemoteStore for MemoryStore {
    async fn list(&self, entity: Entity, query: &ListQuery) -> Result<Vec<Record>> {
        let schema = self.schema(entity);
        let mut inner = self.lock();
        let filter = query.active_filter();
        let op = if filter.is_some() {
            Operation::FilteredList
        } else {
            Operation::List
        };
        self.enter(&mut inner, op)?;

        let mut rows: Vec<Record> = inner
            .tables
            .get(&entity)
            .map(|rows| {
                rows.iter()
                    .filter(|row| match filter {
                        Some(f) => row
                            .get(&f.column)
                            .is_some_and(|v| f.op().matches(&display_value(v))),
                        None => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let column = query.order_column(schema.primary_key);
        rows.sort_by(|a, b| {
            let ord = compare_values(a.get(column), b.get(column));
            if query.ascending {
                ord
            } else {
                ord.reverse()
            }
        });

        Ok(rows
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn get(&self, entity: Entity, id: &RecordId) -> Result<Record> {
        let schema = self.schema(entity);
        let mut inner = self.lock();
        self.enter(&mut inner, Operation::Get)?;
        inner
            .tables
            .get(&entity)
            .and_then(|rows| {
                position(rows, schema.primary_key, id).map(|index| rows[index].clone())
            })
            .ok_or_else(|| Error::remote(406, NO_SINGLE_ROW))
    }

    async fn create(&self, entity: Entity, payload: Record) -> Result<Record> {
        let schema = self.schema(entity);
        let mut inner = self.lock();
        self.enter(&mut inner, Operation::Create)?;
        let rows = inner.tables.entry(entity).or_default();

        let id = match payload.id(schema.primary_key) {
            Some(id) => {
                if position(rows, schema.primary_key, &id).is_some() {
                    return Err(Error::remote(
                        409,
                        format!("duplicate key value violates unique constraint on {}", schema.primary_key),
                    ));
                }
                id
            }
            None => RecordId::from(Self::next_id(rows, schema.primary_key)),
        };

        let row = merge_primary_key(schema, &id, payload);
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, entity: Entity, payload: Record) -> Result<Record> {
        let schema = self.schema(entity);
        let (id, body) = split_primary_key(schema, payload)?;
        let mut inner = self.lock();
        self.enter(&mut inner, Operation::Update)?;
        let rows = inner.tables.entry(entity).or_default();
        let index =
            position(rows, schema.primary_key, &id).ok_or_else(|| Error::remote(406, NO_SINGLE_ROW))?;

        let row = &mut rows[index];
        for (key, value) in body.into_inner() {
            row.insert(key, value);
        }
        Ok(merge_primary_key(schema, &id, row.clone()))
    }

    async fn remove(&self, entity: Entity, id: &RecordId) -> Result<()> {
        let schema = self.schema(entity);
        let mut inner = self.lock();
        self.enter(&mut inner, Operation::Remove)?;
        let rows = inner.tables.entry(entity).or_default();
        let index =
            position(rows, schema.primary_key, id).ok_or_else(|| Error::remote(406, NO_SINGLE_ROW))?;
        rows.remove(index);
        Ok(())
    }

    async fn options(
        &self,
        entity: Entity,
        label_key: &str,
        value_key: Option<&str>,
    ) -> Result<Vec<SelectOption>> {
        let schema = self.schema(entity);
        let value_key = value_key.unwrap_or(schema.primary_key);
        let mut inner = self.lock();
        self.enter(&mut inner, Operation::Options)?;

        let mut rows = inner.tables.get(&entity).cloned().unwrap_or_default();
        rows.sort_by(|a, b| compare_values(a.get(label_key), b.get(label_key)));
        Ok(rows
            .into_iter()
            .map(|row| SelectOption {
                value: row.get(value_key).cloned().unwrap_or(Value::Null),
                label: row.text(label_key),
            })
            .collect())
    }
}
