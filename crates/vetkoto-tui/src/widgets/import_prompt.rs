//! CSV import path prompt

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use vetkoto_app::modal::Modal;
use vetkoto_app::state::ImportPromptState;
use vetkoto_app::ModalId;

use super::modal_overlay::render_modal_frame;
use crate::layout;
use crate::theme::{palette, styles};

pub struct ImportPrompt<'a> {
    prompt: &'a ImportPromptState,
    modal: &'a Modal,
}

impl<'a> ImportPrompt<'a> {
    pub fn new(prompt: &'a ImportPromptState, modal: &'a Modal) -> Self {
        Self { prompt, modal }
    }
}

impl Widget for ImportPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = layout::modal_rect(ModalId::Import, area, 0);
        let areas = render_modal_frame(buf, area, rect, self.modal);

        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(areas.body);
        Paragraph::new(format!("CSV file to import into {}:", self.prompt.entity.title()))
            .style(styles::text_secondary())
            .render(rows[0], buf);

        let input = Line::from(vec![
            Span::styled(self.prompt.path.clone(), styles::text_primary()),
            Span::styled("_", styles::keybinding()),
        ]);
        Paragraph::new(input)
            .style(Style::default().bg(palette::INPUT_FOCUSED_BG))
            .render(rows[1], buf);
    }
}
