//! Table rendering
//!
//! Turns an entity's rows into a [`TableView`]: one header cell per schema
//! column, and per row the display text of each data column with foreign
//! keys resolved to labels through the [`LabelCache`].

use std::sync::Arc;

use vetkoto_core::prelude::*;
use vetkoto_core::{Entity, EntitySchema, Record, RecordId, SchemaRegistry};
use vetkoto_remote::{ColumnFilter, ListQuery, RemoteStore};

use crate::label_cache::LabelCache;

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Edit/delete controls; carries everything the key handler needs.
    Actions {
        entity: Entity,
        id: Option<RecordId>,
    },
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Actions { .. } => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Primary-key value of the row; `None` when the backend returned none.
    pub id: Option<RecordId>,
    pub cells: Vec<Cell>,
}

/// Header/body view-model of one entity table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub entity: Entity,
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
    /// Declared relations that could not be resolved while rendering.
    pub unresolved: usize,
}

impl TableView {
    pub fn empty(entity: Entity, schema: &EntitySchema) -> Self {
        Self {
            entity,
            header: schema.columns.iter().map(|c| c.label.to_string()).collect(),
            rows: Vec::new(),
            unresolved: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_id(&self, index: usize) -> Option<&RecordId> {
        self.rows.get(index).and_then(|r| r.id.as_ref())
    }
}

/// Renders entity tables against a store.
pub struct TableRenderer<S> {
    store: Arc<S>,
    registry: SchemaRegistry,
    cache: LabelCache,
}

impl<S> TableRenderer<S>
where
    S: RemoteStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, registry: SchemaRegistry, cache: LabelCache) -> Self {
        Self {
            store,
            registry,
            cache,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Fetch rows (optionally filtered) and build the view.
    ///
    /// A failed row fetch propagates; label failures only blank their cell.
    pub async fn render(&self, entity: Entity, filter: Option<ColumnFilter>) -> Result<TableView> {
        let query = ListQuery::new().with_filter(filter);
        let rows = self.store.list(entity, &query).await?;
        Ok(self.build_view(entity, &rows).await)
    }

    /// Build the view for rows already fetched.
    pub async fn build_view(&self, entity: Entity, rows: &[Record]) -> TableView {
        let schema = self.registry.schema(entity);
        let mut view = TableView::empty(entity, schema);

        for row in rows {
            let id = row.id(schema.primary_key);
            let mut cells = Vec::with_capacity(schema.columns.len());

            for column in schema.columns {
                if column.is_actions() {
                    cells.push(Cell::Actions {
                        entity,
                        id: id.clone(),
                    });
                    continue;
                }
                match cell_text(self.store.as_ref(), &self.cache, schema, row, column.key).await {
                    Ok(text) => cells.push(Cell::Text(text)),
                    Err(e) => {
                        warn!(
                            "Unresolved label {}.{} for row {:?}: {}",
                            entity, column.key, id, e
                        );
                        view.unresolved += 1;
                        cells.push(Cell::Text(String::new()));
                    }
                }
            }

            view.rows.push(TableRow { id, cells });
        }

        debug!(
            "Rendered {} rows for {} ({} unresolved labels)",
            view.rows.len(),
            entity,
            view.unresolved
        );
        view
    }
}

/// Display text of `column` for `row`.
///
/// Uses the row's own value when present, otherwise the label of the
/// relation whose display field is `column`. Columns with neither are `""`.
pub async fn cell_text<S>(
    store: &S,
    cache: &LabelCache,
    schema: &EntitySchema,
    row: &Record,
    column: &str,
) -> Result<String>
where
    S: RemoteStore + Sync,
{
    if row.has_value(column) {
        return Ok(row.text(column));
    }
    match schema.relation_for_column(column) {
        Some(relation) => cache.resolve(store, relation, row).await,
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vetkoto_remote::test_utils::{alice_store, clinic_store, empty_store, record};
    use vetkoto_remote::{MemoryStore, Operation};

    fn renderer(store: MemoryStore) -> (TableRenderer<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(store);
        let renderer =
            TableRenderer::new(store.clone(), SchemaRegistry::clinic(), LabelCache::new());
        (renderer, store)
    }

    #[tokio::test]
    async fn test_header_matches_columns_for_every_entity() {
        let (renderer, _) = renderer(clinic_store());
        let registry = SchemaRegistry::clinic();

        for entity in Entity::ALL {
            let view = renderer.render(entity, None).await.unwrap();
            let expected: Vec<String> = registry
                .columns(entity)
                .iter()
                .map(|c| c.label.to_string())
                .collect();
            assert_eq!(view.header, expected, "header of {}", entity);
            for row in &view.rows {
                assert_eq!(row.cells.len(), expected.len());
            }
        }
    }

    #[tokio::test]
    async fn test_actions_cell_carries_row_id() {
        let (renderer, _) = renderer(alice_store());
        let view = renderer.render(Entity::Owners, None).await.unwrap();

        let row = &view.rows[0];
        assert_eq!(row.id, Some(RecordId::from(1)));
        assert!(row.cells.iter().any(|c| matches!(
            c,
            Cell::Actions { entity: Entity::Owners, id: Some(id) } if id.as_str() == "1"
        )));
    }

    #[tokio::test]
    async fn test_missing_display_field_resolved_through_relation() {
        let store = alice_store();
        store.seed(
            Entity::Patients,
            [record(&[
                ("patient_id", json!(7)),
                ("patient_name", json!("Rex")),
                ("owner_id", json!(1)),
            ])],
        );
        let (renderer, _) = renderer(store);
        let schema = SchemaRegistry::clinic();
        let owner_col = schema
            .columns(Entity::Patients)
            .iter()
            .position(|c| c.key == "owner_name")
            .unwrap();

        let view = renderer.render(Entity::Patients, None).await.unwrap();
        assert_eq!(view.rows[0].cells[owner_col].text(), "Alice");
        assert_eq!(view.unresolved, 0);
    }

    #[tokio::test]
    async fn test_unresolvable_label_renders_empty() {
        let store = empty_store();
        store.seed(
            Entity::Patients,
            [record(&[
                ("patient_id", json!(7)),
                ("patient_name", json!("Rex")),
                ("owner_id", json!(42)),
            ])],
        );
        let (renderer, _) = renderer(store);
        let schema = SchemaRegistry::clinic();
        let owner_col = schema
            .columns(Entity::Patients)
            .iter()
            .position(|c| c.key == "owner_name")
            .unwrap();

        let view = renderer.render(Entity::Patients, None).await.unwrap();
        assert_eq!(view.rows[0].cells[owner_col].text(), "");
        assert_eq!(view.unresolved, 1);
    }

    #[tokio::test]
    async fn test_row_value_wins_over_relation() {
        let store = empty_store();
        store.seed(
            Entity::Patients,
            [record(&[
                ("patient_id", json!(7)),
                ("owner_id", json!(42)),
                ("owner_name", json!("From view")),
            ])],
        );
        let (renderer, store) = renderer(store);

        let view = renderer.render(Entity::Patients, None).await.unwrap();
        assert!(view.rows[0].cells.iter().any(|c| c.text() == "From view"));
        assert_eq!(store.calls(Operation::Get), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let store = alice_store();
        store.set_failing(Operation::List, true);
        let (renderer, _) = renderer(store);

        assert!(renderer.render(Entity::Owners, None).await.is_err());
    }
}
