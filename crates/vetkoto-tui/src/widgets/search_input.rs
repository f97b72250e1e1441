//! Search input prompt widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use vetkoto_app::search::SearchState;

use crate::theme::styles;

/// Inline `/query` bar drawn at the bottom of the table.
pub struct SearchInput<'a> {
    search: &'a SearchState,
}

impl<'a> SearchInput<'a> {
    pub fn new(search: &'a SearchState) -> Self {
        Self { search }
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled("/", styles::keybinding().add_modifier(Modifier::BOLD)),
            Span::styled(self.search.query().to_string(), styles::text_primary()),
        ];

        if self.search.editing {
            spans.push(Span::styled("_", styles::keybinding()));
        }
        if self.search.is_pending() {
            spans.push(Span::styled(" …", styles::text_muted()));
        }
        if self.search.editing {
            spans.push(Span::styled(
                "  Enter keep · Esc clear",
                styles::text_muted(),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
