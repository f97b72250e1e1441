//! # vetkoto-core - Core Domain Types
//!
//! Foundation crate for VetKoto. Provides the record model, the static
//! schema registry, error handling, logging and the CSV codec.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, serde_json, thiserror, csv, tracing).
//!
//! ## Public API
//!
//! ### Records (`record`)
//! - [`Record`] - Ordered field-name to JSON scalar mapping, as the backend returned it
//! - [`RecordId`] - Textual primary-key value; null or empty is "no id"
//!
//! ### Schema (`schema`)
//! - [`Entity`] - Closed set of clinic entities
//! - [`EntitySchema`] - Columns, fields, relations and search columns of one entity
//! - [`SchemaRegistry`] - Built once at startup and passed by reference
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### CSV (`codec`)
//! - [`export_csv()`] - Rows to always-quoted CSV text
//! - [`convert_csv()`] - CSV text to a `{status, total, data}` document
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use vetkoto_core::prelude::*;
//! ```

pub mod codec;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod record;
pub mod schema;

pub use codec::{convert_csv, export_csv, export_file_name, ConversionReply, ConversionResponse};
pub use error::{Error, Result, ResultExt};
pub use record::{display_value, Record, RecordId};
pub use schema::{
    Column, ColumnKind, Entity, EntitySchema, Field, Hop, InputType, Relation, SchemaRegistry,
    ACTIONS_COLUMN,
};
