//! vetkoto-app - Application state and orchestration for VetKoto
//!
//! Implements the TEA (The Elm Architecture) pattern: [`Message`]s flow
//! through [`handler::update`], which mutates [`AppState`] and returns
//! [`UpdateAction`]s. Actions run on tokio tasks against a
//! [`RemoteStore`](vetkoto_remote::RemoteStore) and report back as messages.
//! The [`Engine`] owns the loop; frontends only translate input and render.
//!
//! Also home to configuration loading, section fragments, the modal
//! controller, forms, search, table rendering, the dashboard summary and
//! CSV import/export.

pub mod actions;
pub mod config;
pub mod confirm_dialog;
pub mod csv_tools;
pub mod dashboard;
pub mod engine;
pub mod form;
pub mod handler;
pub mod input_key;
pub mod label_cache;
pub mod message;
pub mod modal;
pub mod process;
pub mod search;
pub mod section;
pub mod services;
pub mod signals;
pub mod state;
pub mod table;

// Re-export primary types
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{Message, ModalClick};
pub use modal::{ModalController, ModalId};
pub use services::Services;
pub use state::{AppPhase, AppState, UiMode};
