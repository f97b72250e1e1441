//! Status bar widget
//!
//! One line: the latest status text on the left and key hints for the
//! current UI mode on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use vetkoto_app::{AppState, UiMode};

use crate::theme::styles;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.state.ui_mode() {
            UiMode::Normal if self.state.active_entity().is_some() => &[
                ("/", "search"),
                ("n", "new"),
                ("e", "edit"),
                ("d", "delete"),
                ("x", "export"),
                ("i", "import"),
                ("q", "quit"),
            ],
            UiMode::Normal => &[("Tab", "next"), ("r", "refresh"), ("s", "sidebar"), ("q", "quit")],
            UiMode::SearchInput => &[("Enter", "keep"), ("Esc", "clear")],
            UiMode::Form => &[("Tab", "field"), ("←/→", "choose"), ("Ctrl+S", "save"), ("Esc", "close")],
            UiMode::ImportPrompt => &[("Enter", "import"), ("Esc", "cancel")],
            UiMode::ConfirmDialog => &[("y", "confirm"), ("n", "cancel")],
            UiMode::Alert => &[("Enter", "dismiss")],
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status = self.state.status.clone().unwrap_or_default();
        Paragraph::new(Span::styled(status, styles::text_secondary())).render(area, buf);

        let mut spans = Vec::new();
        for (key, action) in self.hints() {
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
        }
        let line = Line::from(spans);
        let width = (line.width() as u16).min(area.width);
        buf.set_line(area.right() - width, area.y, &line, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use vetkoto_app::config::Settings;
    use vetkoto_app::Message;
    use vetkoto_core::SchemaRegistry;

    fn state() -> AppState {
        AppState::new(Settings::default(), SchemaRegistry::clinic())
    }

    #[test]
    fn test_status_text_and_dashboard_hints() {
        let mut state = state();
        state.status = Some("owners record deleted".into());
        let mut term = TestTerminal::with_size(120, 1);
        term.render_widget(StatusBar::new(&state), term.area());

        assert!(term.buffer_contains("owners record deleted"));
        assert!(term.buffer_contains("Tab next"));
    }

    #[test]
    fn test_entity_hints() {
        let mut state = state();
        vetkoto_app::handler::update(&mut state, Message::OpenSection("owners".into()));
        let mut term = TestTerminal::with_size(120, 1);
        term.render_widget(StatusBar::new(&state), term.area());

        assert!(term.buffer_contains("/ search"));
        assert!(term.buffer_contains("x export"));
    }
}
