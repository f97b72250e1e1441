//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes

pub(crate) mod keys;
pub(crate) mod update;


use std::path::PathBuf;

use vetkoto_core::{Entity, Record, RecordId};

use crate::form::FormMode;
use crate::message::Message;
use crate::search::SearchRequest;

// Re-export main entry point
pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Read the fragment of a section
    LoadSection { id: String },

    /// Render an entity table without a filter
    RenderTable { entity: Entity },

    /// Execute a debounced search
    RunSearch(SearchRequest),

    /// Compute the dashboard summary
    LoadDashboard,

    /// Build a create (`id: None`) or edit form
    OpenForm {
        entity: Entity,
        id: Option<RecordId>,
    },

    /// Send a validated form payload to create/update
    SubmitForm {
        entity: Entity,
        mode: FormMode,
        payload: Record,
    },

    DeleteRecord { entity: Entity, id: RecordId },

    ExportCsv { entity: Entity },

    ImportCsv { entity: Entity, path: PathBuf },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
