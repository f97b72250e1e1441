//! # vetkoto-remote - Remote Data Client
//!
//! Translates entity + verb into a backend call. Every backend implements
//! [`RemoteStore`]; the dashboard is generic over it.
//!
//! Depends on [`vetkoto_core`] for records, the schema registry and errors.
//!
//! ## Public API
//!
//! ### Store Trait
//! - [`RemoteStore`] - list/get/create/update/remove/options over an [`Entity`](vetkoto_core::Entity)
//! - [`ListQuery`] - limit, offset, ordering and an optional [`ColumnFilter`]
//! - [`SelectOption`] - `(value, label)` pair for foreign-key selects
//!
//! ### Backends
//! - [`PostgrestClient`] - HTTP client for a PostgREST-compatible service (Supabase)
//! - [`MemoryStore`] - In-memory tables for demo mode and tests
//!
//! ### CSV Conversion
//! - [`CsvConverter`] - Local codec or remote multipart conversion endpoint

pub mod convert;
pub mod memory;
pub mod postgrest;
pub mod query;
mod sample;
pub mod store;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use convert::{ConversionClient, CsvConverter, CSV_FILE_FIELD};
pub use memory::{MemoryStore, Operation};
pub use postgrest::{BackendConfig, PostgrestClient, DEFAULT_REST_PATH};
pub use query::{ColumnFilter, FilterOp, ListQuery, DEFAULT_LIST_LIMIT, EXPORT_LIMIT};
pub use store::{split_primary_key, RemoteStore, SelectOption};
