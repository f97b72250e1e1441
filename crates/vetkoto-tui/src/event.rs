//! Terminal event polling

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use vetkoto_app::message::{Message, ModalClick};
use vetkoto_app::{AppState, InputKey};
use vetkoto_core::prelude::*;

use crate::layout;

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(InputKey::BackTab),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::BackTab => Some(InputKey::BackTab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Delete => Some(InputKey::Delete),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None,
    }
}

/// Route a left click to the top modal.
///
/// Clicks on the close affordance or outside the modal (the overlay) become
/// modal clicks; clicks inside the dialog body and clicks with no modal open
/// are dropped.
pub fn mouse_event_to_message(mouse: MouseEvent, state: &AppState, area: Rect) -> Option<Message> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let top = state.modals.top()?;
    let rect = layout::modal_rect_for(state, top.id, area);

    if layout::contains(layout::close_affordance(rect), mouse.column, mouse.row) {
        Some(Message::ModalClick(ModalClick::CloseAffordance))
    } else if layout::contains(rect, mouse.column, mouse.row) {
        None
    } else {
        Some(Message::ModalClick(ModalClick::Overlay))
    }
}

/// Poll for terminal events with timeout
///
/// Yields `Message::Tick` when nothing arrives, which drives the search
/// debounce.
pub fn poll(state: &AppState, area: Rect) -> Result<Option<Message>> {
    // 50ms timeout (20 FPS)
    if !event::poll(Duration::from_millis(50))? {
        return Ok(Some(Message::Tick));
    }

    match event::read()? {
        Event::Key(key) if key.kind == event::KeyEventKind::Press => {
            Ok(key_event_to_input(key).map(Message::Key))
        }
        Event::Mouse(mouse) => Ok(mouse_event_to_message(mouse, state, area)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use vetkoto_app::config::Settings;
    use vetkoto_core::SchemaRegistry;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn state_with_alert() -> AppState {
        let mut state = AppState::new(Settings::default(), SchemaRegistry::clinic());
        state.show_error("Boom", "details");
        state
    }

    #[test]
    fn test_char_conversion() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('a')));
    }

    #[test]
    fn test_char_with_ctrl_conversion() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_input(key), Some(InputKey::CharCtrl('s')));
    }

    #[test]
    fn test_backtab_with_shift() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::BackTab));
    }

    #[test]
    fn test_unsupported_key_returns_none() {
        let key = KeyEvent::new(KeyCode::Insert, KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), None);
    }

    #[test]
    fn test_click_without_modal_is_ignored() {
        let state = AppState::new(Settings::default(), SchemaRegistry::clinic());
        let area = Rect::new(0, 0, 80, 24);
        assert!(mouse_event_to_message(click(0, 0), &state, area).is_none());
    }

    #[test]
    fn test_click_outside_modal_hits_overlay() {
        let state = state_with_alert();
        let area = Rect::new(0, 0, 80, 24);
        assert!(matches!(
            mouse_event_to_message(click(0, 0), &state, area),
            Some(Message::ModalClick(ModalClick::Overlay))
        ));
    }

    #[test]
    fn test_click_on_close_affordance() {
        let state = state_with_alert();
        let area = Rect::new(0, 0, 80, 24);
        let rect = layout::modal_rect_for(&state, vetkoto_app::ModalId::Alert, area);
        let close = layout::close_affordance(rect);

        assert!(matches!(
            mouse_event_to_message(click(close.x + 1, close.y), &state, area),
            Some(Message::ModalClick(ModalClick::CloseAffordance))
        ));
    }

    #[test]
    fn test_click_inside_modal_body_is_ignored() {
        let state = state_with_alert();
        let area = Rect::new(0, 0, 80, 24);
        let rect = layout::modal_rect_for(&state, vetkoto_app::ModalId::Alert, area);
        assert!(mouse_event_to_message(click(rect.x + 2, rect.y + 3), &state, area).is_none());
    }

    #[test]
    fn test_right_click_is_ignored() {
        let state = state_with_alert();
        let mut event = click(0, 0);
        event.kind = MouseEventKind::Down(MouseButton::Right);
        assert!(mouse_event_to_message(event, &state, Rect::new(0, 0, 80, 24)).is_none());
    }
}
