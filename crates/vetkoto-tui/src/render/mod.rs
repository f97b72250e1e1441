//! Main render/view function (View in TEA pattern)

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use vetkoto_app::section::DASHBOARD;
use vetkoto_app::{AppState, ModalId};
use vetkoto_core::Entity;

use crate::layout;
use crate::theme::{palette, styles};
use crate::widgets;

/// Sidebar/header title for a section id
pub fn section_title(id: &str) -> String {
    if id == DASHBOARD {
        return "Dashboard".to_string();
    }
    id.parse::<Entity>()
        .map(|entity| entity.title())
        .unwrap_or_else(|_| id.to_string())
}

/// Render the complete UI
///
/// Pure with respect to `state`. Modals are painted last, bottom layer
/// first, each over the full frame so their rects match mouse hit-testing.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area, state.show_sidebar);

    let backend = if state.settings.backend.url.is_empty() {
        "demo"
    } else {
        state.settings.backend.url.as_str()
    };
    let header = widgets::MainHeader::new(
        section_title(state.active_section_id()),
        state.fragment.as_ref(),
    )
    .with_backend(backend);
    frame.render_widget(header, areas.header);

    if let Some(sidebar) = areas.sidebar {
        let titles: Vec<String> = state.sections.iter().map(|id| section_title(id)).collect();
        frame.render_widget(widgets::NavSidebar::new(&titles, state.active_section), sidebar);
    }

    render_content(frame, areas.content, state);

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    render_modals(frame, area, state);
}

fn render_content(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.active_entity().is_none() {
        frame.render_widget(
            widgets::DashboardView::new(state.dashboard.as_ref(), state.dashboard_loading),
            area,
        );
        return;
    }

    match &state.table {
        Some(view) => frame.render_widget(
            widgets::EntityTable::new(view, state.selected_row).loading(state.table_loading),
            area,
        ),
        None => {
            let block = styles::glass_block(false);
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new(Span::styled("Loading…", styles::text_muted())), inner);
        }
    }

    if state.search.editing || !state.search.query().is_empty() {
        render_search_bar(frame, area, state);
    }
}

/// Search bar on the last row inside the table border
fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height < 3 || area.width < 3 {
        return;
    }
    let bar = Rect::new(area.x + 1, area.bottom() - 2, area.width - 2, 1);
    frame.render_widget(Clear, bar);
    frame.render_widget(widgets::SearchInput::new(&state.search), bar);
}

fn render_modals(frame: &mut Frame, area: Rect, state: &AppState) {
    for modal in state.modals.open_modals() {
        match modal.id {
            ModalId::EntityForm => {
                if let Some(form) = &state.form {
                    frame.render_widget(widgets::FormDialog::new(form, modal), area);
                }
            }
            ModalId::Confirm => {
                if let Some(dialog) = &state.confirm_dialog_state {
                    frame.render_widget(widgets::ConfirmDialog::new(dialog, modal), area);
                }
            }
            ModalId::Alert => {
                if let Some(alert) = &state.alert {
                    frame.render_widget(widgets::AlertDialog::new(alert, modal), area);
                }
            }
            ModalId::Import => {
                if let Some(prompt) = &state.import_prompt {
                    frame.render_widget(widgets::ImportPrompt::new(prompt, modal), area);
                }
            }
        }
    }
}
