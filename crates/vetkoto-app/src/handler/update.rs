//! Main update function - handles state transitions (TEA pattern)

use std::path::PathBuf;
use std::time::Instant;

use vetkoto_core::prelude::*;
use vetkoto_core::Entity;

use crate::confirm_dialog::ConfirmDialogState;
use crate::csv_tools::NO_DATA;
use crate::form::FormMode;
use crate::message::{Message, ModalClick};
use crate::modal::{ModalEvent, ModalId, ModalOutcome};
use crate::section::DASHBOARD;
use crate::state::AppState;

use super::{keys, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns an optional action for the event loop to execute
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match keys::handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::ModalClick(click) => {
            let Some(id) = state.modals.top().map(|m| m.id) else {
                return UpdateResult::none();
            };
            let event = match click {
                ModalClick::Overlay => ModalEvent::OverlayClick(id),
                ModalClick::CloseAffordance => ModalEvent::CloseAffordance(id),
            };
            state.modals.handle(event);
            state.sync_modals();
            UpdateResult::none()
        }

        Message::Tick => match state.search.poll(Instant::now()) {
            Some(request) => {
                debug!("Issuing search #{} on {}", request.token, request.entity);
                UpdateResult::action(UpdateAction::RunSearch(request))
            }
            None => UpdateResult::none(),
        },

        Message::RequestQuit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Quit => {
            state.force_quit();
            UpdateResult::none()
        }

        Message::ConfirmQuit => {
            state.confirm_quit();
            UpdateResult::none()
        }

        Message::CancelQuit => {
            state.cancel_quit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::NextSection => {
            let next = (state.active_section + 1) % state.sections.len();
            go_to_section(state, next)
        }

        Message::PreviousSection => {
            let len = state.sections.len();
            let prev = (state.active_section + len - 1) % len;
            go_to_section(state, prev)
        }

        Message::GoToSection(index) => go_to_section(state, index),

        Message::OpenSection(id) => match state.section_index(&id) {
            Some(index) => go_to_section(state, index),
            None => {
                state.show_error("Navigation", format!("Unknown section '{}'", id));
                UpdateResult::none()
            }
        },

        Message::ToggleSidebar => {
            state.show_sidebar = !state.show_sidebar;
            UpdateResult::none()
        }

        Message::SectionLoaded { id, result } => {
            if id != state.active_section_id() {
                debug!("Ignoring fragment for inactive section '{}'", id);
                return UpdateResult::none();
            }
            match result {
                Ok(fragment) => {
                    state.fragment = Some(fragment);
                    hydrate(state)
                }
                Err(e) => {
                    state.show_error("Failed to load section", e);
                    UpdateResult::none()
                }
            }
        }

        // ─────────────────────────────────────────────────────────
        // Tables
        // ─────────────────────────────────────────────────────────
        Message::RefreshTable => hydrate(state),

        Message::TableLoaded { entity, result } => {
            if state.active_entity() != Some(entity) {
                debug!("Ignoring table for inactive entity {}", entity);
                return UpdateResult::none();
            }
            if !state.search.query().trim().is_empty() {
                debug!("Ignoring unfiltered {} table while a search is active", entity);
                return UpdateResult::none();
            }
            match result {
                Ok(view) => state.set_table(view),
                Err(e) => {
                    state.table_loading = false;
                    state.show_error(format!("Failed to load {}", entity), e);
                }
            }
            UpdateResult::none()
        }

        Message::SelectNextRow => {
            state.select_next_row();
            UpdateResult::none()
        }

        Message::SelectPreviousRow => {
            state.select_previous_row();
            UpdateResult::none()
        }

        Message::SelectFirstRow => {
            state.selected_row = 0;
            UpdateResult::none()
        }

        Message::SelectLastRow => {
            state.select_last_row();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Search
        // ─────────────────────────────────────────────────────────
        Message::StartSearch => {
            if let Some(entity) = state.active_entity() {
                state.search.bind(entity);
                state.search.editing = true;
            }
            UpdateResult::none()
        }

        Message::SearchChar(c) => {
            state.search.push_char(c, Instant::now());
            UpdateResult::none()
        }

        Message::SearchBackspace => {
            state.search.backspace(Instant::now());
            UpdateResult::none()
        }

        Message::EndSearch => {
            state.search.editing = false;
            UpdateResult::none()
        }

        Message::ClearSearch => {
            state.search.editing = false;
            if state.search.query().is_empty() && !state.search.is_pending() {
                return UpdateResult::none();
            }
            state.search.input("", Instant::now());
            match state.search.issue() {
                Some(request) => UpdateResult::action(UpdateAction::RunSearch(request)),
                None => UpdateResult::none(),
            }
        }

        Message::SearchResults {
            entity,
            token,
            result,
        } => {
            if !state.search.accept(entity, token) {
                debug!("Discarding stale search #{} for {}", token, entity);
                return UpdateResult::none();
            }
            match result {
                Ok(view) => state.set_table(view),
                Err(e) => {
                    state.table_loading = false;
                    state.show_error("Error while searching", e);
                }
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Dashboard
        // ─────────────────────────────────────────────────────────
        Message::DashboardLoaded(result) => {
            if state.active_section_id() != DASHBOARD {
                return UpdateResult::none();
            }
            state.dashboard_loading = false;
            match result {
                Ok(summary) => state.dashboard = Some(summary),
                Err(e) => state.show_error("Failed to load dashboard", e),
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Records
        // ─────────────────────────────────────────────────────────
        Message::CreateRecord => match state.active_entity() {
            Some(entity) => UpdateResult::action(UpdateAction::OpenForm { entity, id: None }),
            None => UpdateResult::none(),
        },

        Message::EditSelected => match (state.active_entity(), state.selected_id()) {
            (Some(entity), Some(id)) => UpdateResult::message(Message::EditRecord { entity, id }),
            (Some(_), None) => {
                state.status = Some("No record selected".to_string());
                UpdateResult::none()
            }
            _ => UpdateResult::none(),
        },

        Message::EditRecord { entity, id } => UpdateResult::action(UpdateAction::OpenForm {
            entity,
            id: Some(id),
        }),

        Message::DeleteSelected => match (state.active_entity(), state.selected_id()) {
            (Some(entity), Some(id)) => UpdateResult::message(Message::RequestDelete { entity, id }),
            (Some(_), None) => {
                state.status = Some("No record selected".to_string());
                UpdateResult::none()
            }
            _ => UpdateResult::none(),
        },

        Message::RequestDelete { entity, id } => {
            if state.settings.behavior.confirm_delete {
                state.show_confirm(ConfirmDialogState::delete_confirmation(entity, id));
                UpdateResult::none()
            } else {
                UpdateResult::message(Message::ConfirmDelete { entity, id })
            }
        }

        Message::ConfirmDelete { entity, id } => {
            state.close_confirm();
            let editing_target = state
                .form
                .as_ref()
                .is_some_and(|f| f.entity == entity && f.hidden_id.as_ref() == Some(&id));
            if editing_target {
                state.close_form();
            }
            UpdateResult::action(UpdateAction::DeleteRecord { entity, id })
        }

        Message::CancelDelete => {
            state.close_confirm();
            UpdateResult::none()
        }

        Message::RecordDeleted { entity } => {
            state.status = Some(format!("{} record deleted", entity.title()));
            refresh_if_active(state, entity)
        }

        Message::DeleteFailed { error } => {
            state.show_error("Delete failed", error);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Form
        // ─────────────────────────────────────────────────────────
        Message::FormReady(form) => {
            state.open_form(*form);
            UpdateResult::none()
        }

        Message::FormLoadFailed { error } => {
            state.show_error("Failed to open form", error);
            UpdateResult::none()
        }

        Message::FormChar(c) => {
            if let Some(form) = state.form.as_mut() {
                form.insert_char(c);
            }
            UpdateResult::none()
        }

        Message::FormBackspace => {
            if let Some(form) = state.form.as_mut() {
                form.backspace();
            }
            UpdateResult::none()
        }

        Message::FormFocusNext => {
            if let Some(form) = state.form.as_mut() {
                form.focus_next();
            }
            UpdateResult::none()
        }

        Message::FormFocusPrev => {
            if let Some(form) = state.form.as_mut() {
                form.focus_prev();
            }
            UpdateResult::none()
        }

        Message::FormCycleOption { forward } => {
            if let Some(form) = state.form.as_mut() {
                form.cycle_option(forward);
            }
            UpdateResult::none()
        }

        Message::FormReset => {
            if let Some(form) = state.form.as_mut() {
                form.reset();
            }
            UpdateResult::none()
        }

        Message::FormSave => {
            let outcome = state.modals.handle(ModalEvent::Save(ModalId::EntityForm));
            if outcome != ModalOutcome::SubmitRequested(ModalId::EntityForm) {
                return UpdateResult::none();
            }
            let Some(form) = state.form.as_ref() else {
                return UpdateResult::none();
            };
            if let Err(e) = form.validate() {
                let message = e.to_string();
                state.show_error("Cannot save", message);
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::SubmitForm {
                entity: form.entity,
                mode: form.mode,
                payload: form.payload(),
            })
        }

        Message::FormDelete => {
            let target = state
                .form
                .as_ref()
                .filter(|f| f.mode == FormMode::Edit)
                .and_then(|f| f.hidden_id.clone().map(|id| (f.entity, id)));
            match target {
                Some((entity, id)) => UpdateResult::message(Message::RequestDelete { entity, id }),
                None => UpdateResult::none(),
            }
        }

        Message::ModalEscape => {
            state.modals.handle(ModalEvent::Escape);
            state.sync_modals();
            UpdateResult::none()
        }

        Message::FormSaved {
            entity,
            mode,
            record,
        } => {
            state.close_form();
            let verb = match mode {
                FormMode::Create => "created",
                FormMode::Edit => "updated",
            };
            let primary_key = state.registry.schema(entity).primary_key;
            debug!("Saved {} record {:?}", entity, record.id(primary_key));
            state.show_info(
                "Saved",
                format!("{} successfully {}", entity.as_str().to_uppercase(), verb),
            );
            refresh_if_active(state, entity)
        }

        Message::FormSaveFailed { error } => {
            state.show_error("Save failed", error);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // CSV
        // ─────────────────────────────────────────────────────────
        Message::ExportCsv => match state.active_entity() {
            Some(entity) => {
                state.status = Some(format!("Exporting {}...", entity));
                UpdateResult::action(UpdateAction::ExportCsv { entity })
            }
            None => UpdateResult::none(),
        },

        Message::ExportFinished(result) => {
            match result {
                Ok(outcome) if outcome.path.is_none() => state.show_info("Export", NO_DATA),
                Ok(outcome) => state.status = Some(outcome.summary()),
                Err(e) => state.show_error("Export failed", e),
            }
            UpdateResult::none()
        }

        Message::OpenImport => {
            if let Some(entity) = state.active_entity() {
                state.open_import(entity);
            }
            UpdateResult::none()
        }

        Message::ImportChar(c) => {
            if let Some(prompt) = state.import_prompt.as_mut() {
                prompt.path.push(c);
            }
            UpdateResult::none()
        }

        Message::ImportBackspace => {
            if let Some(prompt) = state.import_prompt.as_mut() {
                prompt.path.pop();
            }
            UpdateResult::none()
        }

        Message::SubmitImport => {
            let outcome = state.modals.handle(ModalEvent::Save(ModalId::Import));
            if outcome != ModalOutcome::SubmitRequested(ModalId::Import) {
                return UpdateResult::none();
            }
            let Some(prompt) = state.import_prompt.clone() else {
                return UpdateResult::none();
            };
            let path = prompt.path.trim();
            if path.is_empty() {
                return UpdateResult::none();
            }
            state.close_import();
            state.status = Some(format!("Importing {} into {}...", path, prompt.entity));
            UpdateResult::action(UpdateAction::ImportCsv {
                entity: prompt.entity,
                path: PathBuf::from(path),
            })
        }

        Message::ImportFinished(result) => match result {
            Ok(outcome) => {
                state.show_info("Import finished", outcome.summary());
                refresh_if_active(state, outcome.entity)
            }
            Err(e) => {
                state.show_error("Import failed", e);
                UpdateResult::none()
            }
        },

        // ─────────────────────────────────────────────────────────
        // Notifications
        // ─────────────────────────────────────────────────────────
        Message::ShowError { title, message } => {
            state.show_error(title, message);
            UpdateResult::none()
        }

        Message::DismissAlert => {
            state.dismiss_alert();
            UpdateResult::none()
        }
    }
}

/// Activate a section and load its fragment.
fn go_to_section(state: &mut AppState, index: usize) -> UpdateResult {
    if !state.select_section(index) {
        return UpdateResult::none();
    }
    let id = state.active_section_id();
    if state.active_entity().is_none() {
        state.search.unbind();
    }
    debug!("Navigating to section '{}'", id);
    UpdateResult::action(UpdateAction::LoadSection { id: id.to_string() })
}

/// Populate the active section: table (or current search) or dashboard.
fn hydrate(state: &mut AppState) -> UpdateResult {
    match state.active_entity() {
        Some(entity) => {
            state.search.bind(entity);
            state.table_loading = true;
            if state.search.query().trim().is_empty() {
                UpdateResult::action(UpdateAction::RenderTable { entity })
            } else {
                match state.search.issue() {
                    Some(request) => UpdateResult::action(UpdateAction::RunSearch(request)),
                    None => UpdateResult::action(UpdateAction::RenderTable { entity }),
                }
            }
        }
        None => {
            state.dashboard_loading = true;
            UpdateResult::action(UpdateAction::LoadDashboard)
        }
    }
}

fn refresh_if_active(state: &mut AppState, entity: Entity) -> UpdateResult {
    if state.active_entity() == Some(entity) {
        UpdateResult::message(Message::RefreshTable)
    } else {
        UpdateResult::none()
    }
}
