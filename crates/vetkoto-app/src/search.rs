//! Debounced search bound to the active entity table
//!
//! [`SearchState`] is the pure half: it tracks the query, the debounce
//! deadline and the token of the latest issued search. [`run_search`] is the
//! async half executed by the action layer.

use std::time::{Duration, Instant};

use vetkoto_core::prelude::*;
use vetkoto_core::{display_value, Entity, EntitySchema, Record};
use vetkoto_remote::{ListQuery, RemoteStore};

use crate::table::{TableRenderer, TableView};

/// A search ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub entity: Entity,
    pub token: u64,
    pub query: String,
}

/// Search input state for the bound entity.
#[derive(Debug, Clone)]
pub struct SearchState {
    bound: Option<Entity>,
    query: String,
    debounce: Duration,
    deadline: Option<Instant>,
    latest_token: u64,
    /// Search input has focus
    pub editing: bool,
}

impl SearchState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            bound: None,
            query: String::new(),
            debounce,
            deadline: None,
            latest_token: 0,
            editing: false,
        }
    }

    pub fn bound(&self) -> Option<Entity> {
        self.bound
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Bind to `entity`. Rebinding the bound entity keeps the query.
    ///
    /// Returns true when the binding changed.
    pub fn bind(&mut self, entity: Entity) -> bool {
        if self.bound == Some(entity) {
            return false;
        }
        self.bound = Some(entity);
        self.query.clear();
        self.deadline = None;
        self.editing = false;
        true
    }

    pub fn unbind(&mut self) {
        self.bound = None;
        self.query.clear();
        self.deadline = None;
        self.editing = false;
    }

    /// Replace the query and restart the debounce window.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.query = text.into();
        self.deadline = Some(now + self.debounce);
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        let mut text = std::mem::take(&mut self.query);
        text.push(c);
        self.input(text, now);
    }

    pub fn backspace(&mut self, now: Instant) {
        let mut text = std::mem::take(&mut self.query);
        text.pop();
        self.input(text, now);
    }

    /// Issue the debounced search once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.issue(),
            _ => None,
        }
    }

    /// Issue a search for the current query immediately.
    pub fn issue(&mut self) -> Option<SearchRequest> {
        let entity = self.bound?;
        self.deadline = None;
        self.latest_token += 1;
        Some(SearchRequest {
            entity,
            token: self.latest_token,
            query: self.query.clone(),
        })
    }

    /// True when `token` is the latest issued token for `entity`.
    pub fn accept(&self, entity: Entity, token: u64) -> bool {
        self.bound == Some(entity) && token == self.latest_token
    }
}

/// Run a search: server-side filter on the preferred column, then a
/// client-side substring match over the rendered rows when the server finds
/// nothing.
pub async fn run_search<S>(
    renderer: &TableRenderer<S>,
    entity: Entity,
    query: &str,
) -> Result<TableView>
where
    S: RemoteStore + Send + Sync + 'static,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return renderer.render(entity, None).await;
    }

    let schema = renderer.registry().schema(entity);
    if let Some(column) = schema.preferred_search_column() {
        let filtered = ListQuery::new().filter(column, query);
        let rows = match renderer.store().list(entity, &filtered).await {
            Ok(rows) => rows,
            Err(e) => {
                debug!("Server-side search on {}.{} failed: {}", entity, column, e);
                Vec::new()
            }
        };
        if !rows.is_empty() {
            return Ok(renderer.build_view(entity, &rows).await);
        }
    }

    let all = renderer.store().list(entity, &ListQuery::new()).await?;
    let mut view = renderer.build_view(entity, &all).await;

    // Candidate columns are matched on rendered text so resolved labels count
    let candidates: Vec<usize> = schema
        .search_columns
        .iter()
        .filter_map(|key| schema.columns.iter().position(|c| c.key == *key))
        .collect();
    let rendered = std::mem::take(&mut view.rows);
    view.rows = rendered
        .into_iter()
        .zip(&all)
        .filter(|(row, record)| {
            candidates.iter().any(|&i| {
                row.cells
                    .get(i)
                    .is_some_and(|cell| cell.text().to_lowercase().contains(&needle))
            }) || client_matches(schema, record, &needle)
        })
        .map(|(row, _)| row)
        .collect();

    debug!(
        "Client-side search on {} matched {} rows for {:?}",
        entity,
        view.rows.len(),
        needle
    );
    Ok(view)
}

/// `needle` must already be trimmed and lowercased.
pub fn client_matches(schema: &EntitySchema, row: &Record, needle: &str) -> bool {
    let in_candidates = schema
        .search_columns
        .iter()
        .any(|col| row.text(col).to_lowercase().contains(needle));
    in_candidates
        || row
            .iter()
            .filter(|(_, v)| v.is_string())
            .any(|(_, v)| display_value(v).to_lowercase().contains(needle))
}
