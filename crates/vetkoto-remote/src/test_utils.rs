//! Test utilities for remote stores
//!
//! Provides builders for records and pre-seeded in-memory stores.

use serde_json::Value;

use vetkoto_core::{Entity, Record, SchemaRegistry};

use crate::memory::MemoryStore;

/// Builds a record from `(field, value)` pairs.
///
/// # Example
/// ```ignore
/// let owner = record(&[("owner_id", json!(1)), ("owner_name", json!("Alice"))]);
/// ```
pub fn record(pairs: &[(&str, Value)]) -> Record {
    Record::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())))
}

/// Empty store over the clinic schema.
pub fn empty_store() -> MemoryStore {
    MemoryStore::new(SchemaRegistry::clinic())
}

/// Store holding a single owner, `{owner_id: 1, owner_name: "Alice"}`.
pub fn alice_store() -> MemoryStore {
    let store = empty_store();
    store.seed(
        Entity::Owners,
        [record(&[
            ("owner_id", Value::from(1)),
            ("owner_name", Value::from("Alice")),
        ])],
    );
    store
}

/// Store seeded with the demo clinic.
pub fn clinic_store() -> MemoryStore {
    MemoryStore::with_sample_data(SchemaRegistry::clinic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_pair_order() {
        let r = record(&[("b", json!(1)), ("a", json!(2))]);
        let keys: Vec<&str> = r.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_alice_store() {
        let store = alice_store();
        assert_eq!(store.rows(Entity::Owners).len(), 1);
        assert!(store.rows(Entity::Patients).is_empty());
    }
}
