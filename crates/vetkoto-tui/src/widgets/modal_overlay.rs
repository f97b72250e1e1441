//! Shared modal chrome.
//!
//! Dims the screen behind an open modal (the overlay), draws a shadowed
//! frame with the close affordance on its top border and lays out the
//! normalized footer: left group first, right group flush right.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Widget};

use vetkoto_app::modal::{ButtonRole, Decoration, FooterButton, Modal};

use crate::layout::{close_affordance, CLOSE_LABEL};
use crate::theme::{palette, styles};

/// Dim all cells in the given area by overriding their styles.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    let y_end = area.y.saturating_add(area.height);
    let x_end = area.x.saturating_add(area.width);
    for y in area.y..y_end {
        for x in area.x..x_end {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// Render a 1-cell shadow offset to the right and bottom of a modal rect.
pub fn render_shadow(buf: &mut Buffer, modal_rect: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);

    let right_x = modal_rect.x.saturating_add(modal_rect.width);
    for y in modal_rect.y.saturating_add(1)..modal_rect.bottom().saturating_add(1) {
        if let Some(cell) = buf.cell_mut((right_x, y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }

    let bottom_y = modal_rect.bottom();
    for x in modal_rect.x.saturating_add(1)..modal_rect.right().saturating_add(1) {
        if let Some(cell) = buf.cell_mut((x, bottom_y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

/// Areas inside a rendered modal frame.
#[derive(Debug, Clone, Copy)]
pub struct ModalAreas {
    pub body: Rect,
    pub footer: Rect,
}

/// Draw the frame of `modal` in `rect` and return its content areas.
///
/// `area` is the whole screen, dimmed when the modal carries an overlay.
pub fn render_modal_frame(buf: &mut Buffer, area: Rect, rect: Rect, modal: &Modal) -> ModalAreas {
    if modal.overlay_visible() {
        dim_background(buf, area);
    }
    Clear.render(rect, buf);
    render_shadow(buf, rect);

    let block = styles::modal_block(&modal.title);
    let inner = block.inner(rect);
    block.render(rect, buf);

    if modal.has(Decoration::CloseAffordance) {
        let close = close_affordance(rect);
        buf.set_string(close.x, close.y, CLOSE_LABEL, styles::keybinding());
    }

    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
    let footer = rows[1];
    render_footer(buf, footer, modal);

    ModalAreas {
        body: rows[0],
        footer,
    }
}

fn button_span(button: &FooterButton) -> Span<'static> {
    let style = match button.role {
        ButtonRole::Save => Style::default()
            .fg(palette::CONTRAST_FG)
            .bg(palette::STATUS_GREEN)
            .add_modifier(Modifier::BOLD),
        ButtonRole::Delete => Style::default()
            .fg(palette::TEXT_PRIMARY)
            .bg(palette::STATUS_RED),
        ButtonRole::Reset | ButtonRole::Other => styles::text_secondary(),
    };
    Span::styled(format!(" {} ", button.label), style)
}

fn group_line(buttons: &[FooterButton]) -> Line<'static> {
    let mut spans = Vec::with_capacity(buttons.len() * 2);
    for (i, button) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(button_span(button));
    }
    Line::from(spans)
}

fn render_footer(buf: &mut Buffer, area: Rect, modal: &Modal) {
    let footer = &modal.footer;
    buf.set_line(area.x, area.y, &group_line(&footer.left), area.width);

    let right = group_line(&footer.right);
    let width = (right.width() as u16).min(area.width);
    buf.set_line(area.right() - width, area.y, &right, width);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::centered_rect;
    use crate::test_utils::TestTerminal;
    use vetkoto_app::{ModalController, ModalId};

    fn open_modal(id: ModalId) -> Modal {
        let mut controller = ModalController::with_defaults();
        controller.open(id);
        controller.get(id).cloned().unwrap()
    }

    #[test]
    fn test_dim_background_covers_area() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        dim_background(&mut buf, area);

        for y in 0..5 {
            for x in 0..10 {
                assert_eq!(buf[(x, y)].fg, palette::TEXT_MUTED);
                assert_eq!(buf[(x, y)].bg, palette::DEEPEST_BG);
            }
        }
    }

    #[test]
    fn test_shadow_outside_modal_only() {
        let area = Rect::new(0, 0, 20, 10);
        let modal = Rect::new(5, 2, 10, 6);
        let mut buf = Buffer::empty(area);
        render_shadow(&mut buf, modal);

        assert_eq!(buf[(15, 3)].bg, palette::SHADOW);
        assert_eq!(buf[(6, 8)].bg, palette::SHADOW);
        assert_ne!(buf[(5, 2)].bg, palette::SHADOW);
    }

    #[test]
    fn test_frame_shows_close_affordance_and_footer_groups() {
        let mut term = TestTerminal::new();
        let modal = open_modal(ModalId::EntityForm);
        let area = term.area();
        let rect = centered_rect(64, 10, area);

        term.draw_with(|frame| {
            render_modal_frame(frame.buffer_mut(), area, rect, &modal);
        });

        assert!(term.buffer_contains(CLOSE_LABEL));
        assert!(term.buffer_contains("Save"));
        assert!(term.buffer_contains("Reset"));
        assert!(term.buffer_contains("Delete"));

        let footer_row = rect.bottom() - 2;
        let line = term.line(footer_row);
        let save = line.find("Save").unwrap();
        let reset = line.find("Reset").unwrap();
        assert!(reset < save, "save belongs to the right group: {line}");
    }
}
