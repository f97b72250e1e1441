//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit works everywhere
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.ui_mode() {
        UiMode::Alert => handle_key_alert(key),
        UiMode::ConfirmDialog => handle_key_confirm_dialog(state, key),
        UiMode::Form => handle_key_form(key),
        UiMode::ImportPrompt => handle_key_import_prompt(key),
        UiMode::SearchInput => handle_key_search_input(key),
        UiMode::Normal => handle_key_normal(state, key),
    }
}

fn handle_key_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc => Some(Message::DismissAlert),
        _ => None,
    }
}

/// First dialog option confirms, second cancels
fn handle_key_confirm_dialog(state: &AppState, key: InputKey) -> Option<Message> {
    let dialog = state.confirm_dialog_state.as_ref()?;
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => dialog.confirm_message(),
        InputKey::Char('n' | 'N') | InputKey::Esc => dialog.cancel_message(),
        _ => None,
    }
}

fn handle_key_form(key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('s') => Some(Message::FormSave),
        InputKey::CharCtrl('r') => Some(Message::FormReset),
        InputKey::CharCtrl('d') => Some(Message::FormDelete),
        InputKey::Esc => Some(Message::ModalEscape),
        InputKey::Tab | InputKey::Down | InputKey::Enter => Some(Message::FormFocusNext),
        InputKey::BackTab | InputKey::Up => Some(Message::FormFocusPrev),
        InputKey::Left => Some(Message::FormCycleOption { forward: false }),
        InputKey::Right => Some(Message::FormCycleOption { forward: true }),
        InputKey::Backspace => Some(Message::FormBackspace),
        InputKey::Char(c) => Some(Message::FormChar(c)),
        _ => None,
    }
}

fn handle_key_import_prompt(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::ModalEscape),
        InputKey::Enter => Some(Message::SubmitImport),
        InputKey::Backspace => Some(Message::ImportBackspace),
        InputKey::Char(c) => Some(Message::ImportChar(c)),
        _ => None,
    }
}

fn handle_key_search_input(key: InputKey) -> Option<Message> {
    match key {
        // Cancel search: clear the query
        InputKey::Esc => Some(Message::ClearSearch),

        // Keep query, exit input mode
        InputKey::Enter | InputKey::Down => Some(Message::EndSearch),

        InputKey::Backspace => Some(Message::SearchBackspace),
        InputKey::CharCtrl('u') => Some(Message::ClearSearch),
        InputKey::Char(c) => Some(Message::SearchChar(c)),
        _ => None,
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(index) = key.section_index() {
        return Some(Message::GoToSection(index));
    }

    let on_entity = state.active_entity().is_some();
    match key {
        InputKey::Char('q') => Some(Message::RequestQuit),

        InputKey::Tab => Some(Message::NextSection),
        InputKey::BackTab => Some(Message::PreviousSection),
        InputKey::Char('s') => Some(Message::ToggleSidebar),
        InputKey::Char('r') => Some(Message::RefreshTable),

        // Table navigation
        InputKey::Down | InputKey::Char('j') if on_entity => Some(Message::SelectNextRow),
        InputKey::Up | InputKey::Char('k') if on_entity => Some(Message::SelectPreviousRow),
        InputKey::Home | InputKey::Char('g') if on_entity => Some(Message::SelectFirstRow),
        InputKey::End | InputKey::Char('G') if on_entity => Some(Message::SelectLastRow),

        // Records
        InputKey::Char('/') if on_entity => Some(Message::StartSearch),
        InputKey::Char('n') if on_entity => Some(Message::CreateRecord),
        InputKey::Char('e') | InputKey::Enter if on_entity => Some(Message::EditSelected),
        InputKey::Char('d') | InputKey::Delete if on_entity => Some(Message::DeleteSelected),
        InputKey::Char('x') if on_entity => Some(Message::ExportCsv),
        InputKey::Char('i') if on_entity => Some(Message::OpenImport),

        _ => None,
    }
}
