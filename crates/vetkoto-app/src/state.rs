//! Application state (Model in TEA pattern)

use vetkoto_core::prelude::*;
use vetkoto_core::{Entity, RecordId, SchemaRegistry};

use crate::config::Settings;
use crate::confirm_dialog::ConfirmDialogState;
use crate::dashboard::DashboardSummary;
use crate::form::FormState;
use crate::modal::{ModalController, ModalId};
use crate::search::SearchState;
use crate::section::{section_ids, SectionFragment, DASHBOARD};
use crate::table::TableView;

/// Current UI mode, derived from open modals and input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Section content with table/dashboard navigation
    #[default]
    Normal,

    /// Search input has focus
    SearchInput,

    /// Entity create/edit form
    Form,

    /// CSV import path prompt
    ImportPrompt,

    /// Confirmation dialog (delete, quit)
    ConfirmDialog,

    /// Blocking alert that must be dismissed
    Alert,
}

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Error,
    Info,
}

/// Blocking notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub title: String,
    pub message: String,
    pub level: AlertLevel,
}

/// Path prompt for CSV import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPromptState {
    pub entity: Entity,
    pub path: String,
}

pub struct AppState {
    pub phase: AppPhase,

    /// Application settings from config file
    pub settings: Settings,

    pub registry: SchemaRegistry,

    /// Section ids in navigation order
    pub sections: Vec<&'static str>,
    pub active_section: usize,

    /// Fragment of the active section, once loaded
    pub fragment: Option<SectionFragment>,

    /// Table of the active entity section
    pub table: Option<TableView>,
    pub table_loading: bool,
    pub selected_row: usize,

    pub search: SearchState,

    pub dashboard: Option<DashboardSummary>,
    pub dashboard_loading: bool,

    pub modals: ModalController,
    pub form: Option<FormState>,
    pub confirm_dialog_state: Option<ConfirmDialogState>,
    pub alert: Option<AlertState>,
    pub import_prompt: Option<ImportPromptState>,

    /// One-line status message
    pub status: Option<String>,

    pub show_sidebar: bool,
}

impl AppState {
    pub fn new(settings: Settings, registry: SchemaRegistry) -> Self {
        let sections = section_ids();
        let active_section = sections
            .iter()
            .position(|id| *id == settings.ui.start_section)
            .unwrap_or(0);
        Self {
            phase: AppPhase::Running,
            search: SearchState::new(settings.search.debounce()),
            show_sidebar: settings.ui.show_sidebar,
            settings,
            registry,
            sections,
            active_section,
            fragment: None,
            table: None,
            table_loading: false,
            selected_row: 0,
            dashboard: None,
            dashboard_loading: false,
            modals: ModalController::with_defaults(),
            form: None,
            confirm_dialog_state: None,
            alert: None,
            import_prompt: None,
            status: None,
        }
    }

    pub fn ui_mode(&self) -> UiMode {
        if self.modals.is_open(ModalId::Alert) {
            return UiMode::Alert;
        }
        match self.modals.top().map(|m| m.id) {
            Some(ModalId::Confirm) => UiMode::ConfirmDialog,
            Some(ModalId::EntityForm) => UiMode::Form,
            Some(ModalId::Import) => UiMode::ImportPrompt,
            _ if self.search.editing => UiMode::SearchInput,
            _ => UiMode::Normal,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Sections
    // ─────────────────────────────────────────────────────────

    pub fn active_section_id(&self) -> &'static str {
        self.sections
            .get(self.active_section)
            .copied()
            .unwrap_or(DASHBOARD)
    }

    /// Entity of the active section, `None` on the dashboard.
    pub fn active_entity(&self) -> Option<Entity> {
        self.registry.entity_for(self.active_section_id())
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| *s == id)
    }

    /// Switch the active section and drop content of the previous one.
    pub fn select_section(&mut self, index: usize) -> bool {
        if index >= self.sections.len() {
            return false;
        }
        self.active_section = index;
        self.fragment = None;
        self.table = None;
        self.table_loading = false;
        self.selected_row = 0;
        self.status = None;
        true
    }

    // ─────────────────────────────────────────────────────────
    // Table
    // ─────────────────────────────────────────────────────────

    pub fn set_table(&mut self, view: TableView) {
        self.selected_row = self.selected_row.min(view.len().saturating_sub(1));
        self.status = (view.unresolved > 0)
            .then(|| format!("{} labels could not be resolved", view.unresolved));
        self.table = Some(view);
        self.table_loading = false;
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        self.table
            .as_ref()
            .and_then(|t| t.row_id(self.selected_row))
            .cloned()
    }

    pub fn select_next_row(&mut self) {
        if let Some(table) = &self.table {
            if self.selected_row + 1 < table.len() {
                self.selected_row += 1;
            }
        }
    }

    pub fn select_previous_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_last_row(&mut self) {
        if let Some(table) = &self.table {
            self.selected_row = table.len().saturating_sub(1);
        }
    }

    // ─────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────

    /// Show a blocking error and log it.
    pub fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let alert = AlertState {
            title: title.into(),
            message: message.into(),
            level: AlertLevel::Error,
        };
        error!("{}: {}", alert.title, alert.message);
        self.alert = Some(alert);
        self.modals.open(ModalId::Alert);
    }

    /// Show a blocking informational notice.
    pub fn show_info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let alert = AlertState {
            title: title.into(),
            message: message.into(),
            level: AlertLevel::Info,
        };
        info!("{}: {}", alert.title, alert.message);
        self.alert = Some(alert);
        self.modals.open(ModalId::Alert);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.modals.close(ModalId::Alert);
    }

    pub fn show_confirm(&mut self, dialog: ConfirmDialogState) {
        self.confirm_dialog_state = Some(dialog);
        self.modals.open(ModalId::Confirm);
    }

    pub fn close_confirm(&mut self) {
        self.confirm_dialog_state = None;
        self.modals.close(ModalId::Confirm);
    }

    pub fn open_form(&mut self, form: FormState) {
        if let Some(modal) = self.modals.get_mut(ModalId::EntityForm) {
            modal.title = form.title.clone();
        }
        self.form = Some(form);
        self.modals.open(ModalId::EntityForm);
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.modals.close(ModalId::EntityForm);
    }

    pub fn open_import(&mut self, entity: Entity) {
        self.import_prompt = Some(ImportPromptState {
            entity,
            path: String::new(),
        });
        self.modals.open(ModalId::Import);
    }

    pub fn close_import(&mut self) {
        self.import_prompt = None;
        self.modals.close(ModalId::Import);
    }

    /// Drop dialog state whose modal was closed by the controller.
    pub fn sync_modals(&mut self) {
        if !self.modals.is_open(ModalId::EntityForm) {
            self.form = None;
        }
        if !self.modals.is_open(ModalId::Confirm) {
            self.confirm_dialog_state = None;
        }
        if !self.modals.is_open(ModalId::Import) {
            self.import_prompt = None;
        }
        if !self.modals.is_open(ModalId::Alert) {
            self.alert = None;
        }
    }

    // ─────────────────────────────────────────────────────────
    // Quit
    // ─────────────────────────────────────────────────────────

    /// Request quit; asks first when configured.
    pub fn request_quit(&mut self) {
        if self.settings.behavior.confirm_quit {
            let unsaved = self.form.as_ref().is_some_and(FormState::is_dirty);
            self.show_confirm(ConfirmDialogState::quit_confirmation(unsaved));
        } else {
            self.phase = AppPhase::Quitting;
        }
    }

    /// Force quit without confirmation
    pub fn force_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    /// Confirm quit (from confirmation dialog)
    pub fn confirm_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    /// Cancel quit (from confirmation dialog)
    pub fn cancel_quit(&mut self) {
        self.close_confirm();
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::ModalEvent;

    fn state() -> AppState {
        AppState::new(Settings::default(), SchemaRegistry::clinic())
    }

    #[test]
    fn test_starts_on_configured_section() {
        let mut settings = Settings::default();
        settings.ui.start_section = "visits".into();
        let state = AppState::new(settings, SchemaRegistry::clinic());
        assert_eq!(state.active_section_id(), "visits");
        assert_eq!(state.active_entity(), Some(Entity::Visits));

        let state = self::state();
        assert_eq!(state.active_section_id(), "dashboard");
        assert_eq!(state.active_entity(), None);
    }

    #[test]
    fn test_unknown_start_section_falls_back() {
        let mut settings = Settings::default();
        settings.ui.start_section = "billing".into();
        let state = AppState::new(settings, SchemaRegistry::clinic());
        assert_eq!(state.active_section_id(), "dashboard");
    }

    #[test]
    fn test_ui_mode_priority() {
        let mut state = state();
        assert_eq!(state.ui_mode(), UiMode::Normal);

        state.search.editing = true;
        assert_eq!(state.ui_mode(), UiMode::SearchInput);

        state.open_import(Entity::Owners);
        assert_eq!(state.ui_mode(), UiMode::ImportPrompt);

        state.request_quit();
        assert_eq!(state.ui_mode(), UiMode::ConfirmDialog);

        state.show_error("Save failed", "boom");
        assert_eq!(state.ui_mode(), UiMode::Alert);

        state.dismiss_alert();
        assert_eq!(state.ui_mode(), UiMode::ConfirmDialog);
    }

    #[test]
    fn test_quit_without_confirmation() {
        let mut settings = Settings::default();
        settings.behavior.confirm_quit = false;
        let mut state = AppState::new(settings, SchemaRegistry::clinic());
        state.request_quit();
        assert!(state.should_quit());
    }

    #[test]
    fn test_quit_confirmation_flow() {
        let mut state = state();
        state.request_quit();
        assert!(!state.should_quit());
        assert!(state.confirm_dialog_state.is_some());

        state.cancel_quit();
        assert!(state.confirm_dialog_state.is_none());
        assert_eq!(state.ui_mode(), UiMode::Normal);

        state.request_quit();
        state.confirm_quit();
        assert!(state.should_quit());
    }

    #[test]
    fn test_sync_after_escape() {
        let mut state = state();
        state.open_import(Entity::Owners);
        state.show_error("Import failed", "bad header");

        state.modals.handle(ModalEvent::Escape);
        state.sync_modals();

        assert!(state.import_prompt.is_none());
        assert!(state.alert.is_some());
    }
}
