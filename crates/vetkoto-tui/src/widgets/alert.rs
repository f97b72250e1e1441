//! Blocking alert dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use vetkoto_app::modal::Modal;
use vetkoto_app::state::AlertState;
use vetkoto_app::ModalId;

use super::modal_overlay::render_modal_frame;
use crate::layout;
use crate::theme::styles;

/// Error or notice that must be dismissed with Enter/Esc.
pub struct AlertDialog<'a> {
    alert: &'a AlertState,
    modal: &'a Modal,
}

impl<'a> AlertDialog<'a> {
    pub fn new(alert: &'a AlertState, modal: &'a Modal) -> Self {
        Self { alert, modal }
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = layout::modal_rect(ModalId::Alert, area, 0);
        let areas = render_modal_frame(buf, area, rect, self.modal);

        let lines = vec![
            Line::from(Span::styled(
                self.alert.title.clone(),
                styles::alert_title(self.alert.level),
            )),
            Line::from(""),
            Line::from(Span::styled(self.alert.message.clone(), styles::text_primary())),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(areas.body, buf);
    }
}
