//! Screen layout definitions for the TUI
//!
//! Every rect the renderer paints into is computed here so mouse
//! hit-testing in [`crate::event`] agrees with what is on screen.

use ratatui::layout::{Constraint, Layout, Rect};

use vetkoto_app::{AppState, ModalId};

/// Width of the navigation sidebar
pub const SIDEBAR_WIDTH: u16 = 22;

/// Label drawn on the top border of every modal
pub const CLOSE_LABEL: &str = "[x]";

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// App title and active section
    pub header: Rect,

    /// Section list; `None` when hidden
    pub sidebar: Option<Rect>,

    /// Dashboard or entity table
    pub content: Rect,

    /// One-line status and key hints
    pub status: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect, show_sidebar: bool) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(3), // Header (glass container)
        Constraint::Min(3),    // Body
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let (sidebar, content) = if show_sidebar && rows[1].width > SIDEBAR_WIDTH * 2 {
        let cols =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)]).split(rows[1]);
        (Some(cols[0]), cols[1])
    } else {
        (None, rows[1])
    };

    ScreenAreas {
        header: rows[0],
        sidebar,
        content,
        status: rows[2],
    }
}

/// Rect of a modal dialog. `body_rows` sizes the entity form.
pub fn modal_rect(id: ModalId, area: Rect, body_rows: u16) -> Rect {
    let (width, height) = match id {
        ModalId::EntityForm => (64, body_rows.saturating_add(4).max(8)),
        ModalId::Confirm => (54, 8),
        ModalId::Alert => (60, 9),
        ModalId::Import => (64, 7),
    };
    centered_rect(width, height, area)
}

/// Rect of an open modal as the renderer lays it out for `state`.
pub fn modal_rect_for(state: &AppState, id: ModalId, area: Rect) -> Rect {
    // One row per field plus a spacer and the footer
    let body_rows = match id {
        ModalId::EntityForm => state
            .form
            .as_ref()
            .map(|f| f.controls.len() as u16 + 2)
            .unwrap_or(2),
        _ => 0,
    };
    modal_rect(id, area, body_rows)
}

/// Cells of the close affordance on a modal's top border.
pub fn close_affordance(modal: Rect) -> Rect {
    let width = CLOSE_LABEL.len() as u16;
    let x = modal.right().saturating_sub(width + 2).max(modal.x);
    Rect::new(x, modal.y, width.min(modal.width), 1.min(modal.height))
}

/// Center a fixed-size rect within an area, clamped to the area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// True when `(column, row)` falls inside `rect`.
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}
