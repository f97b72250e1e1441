//! Create/edit form dialog

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use vetkoto_app::form::{Control, FormControl, FormState};
use vetkoto_app::modal::Modal;
use vetkoto_app::ModalId;

use super::modal_overlay::render_modal_frame;
use crate::layout;
use crate::theme::{palette, styles};

/// Form modal: one row per field, focused row highlighted.
pub struct FormDialog<'a> {
    form: &'a FormState,
    modal: &'a Modal,
}

impl<'a> FormDialog<'a> {
    pub fn new(form: &'a FormState, modal: &'a Modal) -> Self {
        Self { form, modal }
    }

    fn label_width(&self) -> usize {
        self.form
            .controls
            .iter()
            .map(|c| c.label.width() + usize::from(c.required))
            .max()
            .unwrap_or(0)
            + 2
    }

    fn control_line(&self, control: &FormControl, focused: bool, label_width: usize) -> Line<'static> {
        let mut label = control.label.to_string();
        if control.required {
            label.push('*');
        }
        let padding = label_width.saturating_sub(label.width());
        let label_style = if focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };

        let value_style = Style::default()
            .fg(palette::TEXT_PRIMARY)
            .bg(if focused {
                palette::INPUT_FOCUSED_BG
            } else {
                palette::INPUT_BG
            });

        let value = match &control.control {
            Control::Select { .. } if focused => format!("◂ {} ▸", control.display()),
            Control::Select { .. } => control.display(),
            Control::Input {
                value, placeholder, ..
            } if value.is_empty() && !focused => placeholder.clone().unwrap_or_default(),
            Control::Input { value, .. } if focused => format!("{}_", value),
            Control::Input { value, .. } => value.clone(),
        };
        let value_style = match &control.control {
            Control::Input { value, .. } if value.is_empty() && !focused => {
                value_style.fg(palette::TEXT_MUTED).add_modifier(Modifier::ITALIC)
            }
            _ => value_style,
        };

        Line::from(vec![
            Span::styled(format!("{}{}", label, " ".repeat(padding)), label_style),
            Span::styled(format!(" {} ", value), value_style),
        ])
    }
}

impl Widget for FormDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let body_rows = self.form.controls.len() as u16 + 2;
        let rect = layout::modal_rect(ModalId::EntityForm, area, body_rows);
        let areas = render_modal_frame(buf, area, rect, self.modal);

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(areas.body);

        let label_width = self.label_width();
        let lines: Vec<Line> = self
            .form
            .controls
            .iter()
            .enumerate()
            .map(|(i, control)| self.control_line(control, i == self.form.focus, label_width))
            .collect();
        Paragraph::new(lines).render(rows[0], buf);

        let hints = Line::from(vec![
            Span::styled("Ctrl+S", styles::keybinding()),
            Span::styled(" save  ", styles::text_muted()),
            Span::styled("Ctrl+R", styles::keybinding()),
            Span::styled(" reset  ", styles::text_muted()),
            Span::styled("Ctrl+D", styles::keybinding()),
            Span::styled(" delete  ", styles::text_muted()),
            Span::styled("Esc", styles::keybinding()),
            Span::styled(" close", styles::text_muted()),
        ]);
        Paragraph::new(hints).render(rows[1], buf);
    }
}
