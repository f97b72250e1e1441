//! Confirmation dialog widget for quit and delete confirmations

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use vetkoto_app::confirm_dialog::ConfirmDialogState;
use vetkoto_app::modal::Modal;
use vetkoto_app::ModalId;

use super::modal_overlay::render_modal_frame;
use crate::layout;
use crate::theme::{palette, styles};

/// Confirmation dialog widget
pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
    modal: &'a Modal,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState, modal: &'a Modal) -> Self {
        Self { state, modal }
    }

    /// `[y] Quit  [n] Cancel` built from the dialog options
    fn key_hints(&self) -> Line<'static> {
        let mut spans = Vec::new();
        let keys = [("y", palette::STATUS_GREEN), ("n", palette::STATUS_RED)];
        for ((label, _), (key, color)) in self.state.options.iter().zip(keys) {
            spans.push(Span::styled("[", styles::text_muted()));
            spans.push(Span::styled(
                key,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!("] {}  ", label), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = layout::modal_rect(ModalId::Confirm, area, 0);
        let mut modal = self.modal.clone();
        modal.title = self.state.title.clone();
        let areas = render_modal_frame(buf, area, rect, &modal);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Message
            Constraint::Length(1), // Key hints
        ])
        .split(areas.body);

        Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(palette::STATUS_YELLOW))
            .render(chunks[1], buf);

        Paragraph::new(self.key_hints())
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use vetkoto_app::ModalController;
    use vetkoto_core::{Entity, RecordId};

    fn confirm_modal() -> Modal {
        let mut controller = ModalController::with_defaults();
        controller.open(ModalId::Confirm);
        controller.get(ModalId::Confirm).cloned().unwrap()
    }

    #[test]
    fn test_quit_dialog_renders_title_and_options() {
        let mut term = TestTerminal::new();
        let state = ConfirmDialogState::quit_confirmation(false);
        let modal = confirm_modal();

        term.render_widget(ConfirmDialog::new(&state, &modal), term.area());

        assert!(term.buffer_contains("Quit VetKoto?"));
        assert!(term.buffer_contains("[y] Quit"));
        assert!(term.buffer_contains("[n] Cancel"));
    }

    #[test]
    fn test_delete_dialog_names_record() {
        let mut term = TestTerminal::new();
        let state = ConfirmDialogState::delete_confirmation(Entity::Owners, RecordId::from(3));
        let modal = confirm_modal();

        term.render_widget(ConfirmDialog::new(&state, &modal), term.area());

        assert!(term.buffer_contains("Delete from Owners?"));
        assert!(term.buffer_contains("id 3"));
    }
}
