//! Message types for the application (TEA pattern)

use vetkoto_core::{Entity, Record, RecordId};

use crate::csv_tools::{ExportOutcome, ImportOutcome};
use crate::dashboard::DashboardSummary;
use crate::form::{FormMode, FormState};
use crate::input_key::InputKey;
use crate::section::SectionFragment;
use crate::table::TableView;

/// Part of a modal hit by a mouse click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    Overlay,
    CloseAffordance,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Mouse click on the topmost modal's decorations
    ModalClick(ModalClick),

    /// Tick event for periodic updates (drives the search debounce)
    Tick,

    /// Request to quit (may show a confirmation dialog)
    RequestQuit,

    /// Force quit without confirmation (Ctrl+C, signal handler)
    Quit,

    /// Confirm quit from confirmation dialog
    ConfirmQuit,

    /// Cancel quit from confirmation dialog
    CancelQuit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    NextSection,
    PreviousSection,
    /// Jump to the section at this navigation index
    GoToSection(usize),
    /// Load a section by id (startup, `--section`)
    OpenSection(String),
    ToggleSidebar,
    SectionLoaded {
        id: String,
        result: Result<SectionFragment, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Tables
    // ─────────────────────────────────────────────────────────
    RefreshTable,
    TableLoaded {
        entity: Entity,
        result: Result<TableView, String>,
    },
    SelectNextRow,
    SelectPreviousRow,
    SelectFirstRow,
    SelectLastRow,

    // ─────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────
    /// Focus the search input
    StartSearch,
    SearchChar(char),
    SearchBackspace,
    /// Leave the search input, keeping the query
    EndSearch,
    /// Clear the query and leave the search input
    ClearSearch,
    SearchResults {
        entity: Entity,
        token: u64,
        result: Result<TableView, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────
    DashboardLoaded(Result<DashboardSummary, String>),

    // ─────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────
    CreateRecord,
    /// Edit the record of the selected row
    EditSelected,
    EditRecord {
        entity: Entity,
        id: RecordId,
    },
    /// Delete the record of the selected row
    DeleteSelected,
    RequestDelete {
        entity: Entity,
        id: RecordId,
    },
    ConfirmDelete {
        entity: Entity,
        id: RecordId,
    },
    CancelDelete,
    RecordDeleted {
        entity: Entity,
    },
    DeleteFailed {
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Form
    // ─────────────────────────────────────────────────────────
    FormReady(Box<FormState>),
    FormLoadFailed {
        error: String,
    },
    FormChar(char),
    FormBackspace,
    FormFocusNext,
    FormFocusPrev,
    FormCycleOption {
        forward: bool,
    },
    /// Delegated save from the form's modal
    FormSave,
    FormReset,
    /// Delete the record being edited
    FormDelete,
    /// Escape pressed while a closable modal is open
    ModalEscape,
    FormSaved {
        entity: Entity,
        mode: FormMode,
        record: Record,
    },
    FormSaveFailed {
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // CSV
    // ─────────────────────────────────────────────────────────
    ExportCsv,
    ExportFinished(Result<ExportOutcome, String>),
    OpenImport,
    ImportChar(char),
    ImportBackspace,
    SubmitImport,
    ImportFinished(Result<ImportOutcome, String>),

    // ─────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────
    /// Show a blocking error alert
    ShowError {
        title: String,
        message: String,
    },
    DismissAlert,
}
