//! Entity table widget

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell as TableCell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};
use unicode_width::UnicodeWidthStr;

use vetkoto_app::table::{Cell, TableView};

use crate::theme::styles;

/// Text of the row-action cell
pub const ACTIONS_TEXT: &str = "[e]dit [d]elete";

/// Widest a data column may get
const MAX_COLUMN_WIDTH: usize = 32;

/// Table of the active entity with the selected row highlighted.
pub struct EntityTable<'a> {
    view: &'a TableView,
    selected: usize,
    loading: bool,
}

impl<'a> EntityTable<'a> {
    pub fn new(view: &'a TableView, selected: usize) -> Self {
        Self {
            view,
            selected,
            loading: false,
        }
    }

    /// Mark the table as being refreshed
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn cell_text(cell: &Cell) -> &str {
        match cell {
            Cell::Text(text) => text,
            Cell::Actions { id: Some(_), .. } => ACTIONS_TEXT,
            Cell::Actions { id: None, .. } => "",
        }
    }

    /// Column widths from the header and cell contents, capped.
    fn widths(&self) -> Vec<Constraint> {
        self.view
            .header
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let widest = self
                    .view
                    .rows
                    .iter()
                    .filter_map(|row| row.cells.get(i))
                    .map(|cell| Self::cell_text(cell).width())
                    .max()
                    .unwrap_or(0)
                    .max(title.width())
                    .min(MAX_COLUMN_WIDTH);
                Constraint::Length(widest as u16)
            })
            .collect()
    }
}

impl Widget for EntityTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut title = format!(" {} ({}) ", self.view.entity.title(), self.view.len());
        if self.loading {
            title.push_str("⟳ ");
        }
        let block = styles::glass_block(true).title(title);

        if self.view.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Line::from(Span::styled("No records", styles::text_muted())))
                .render(inner, buf);
            return;
        }

        let header = Row::new(
            self.view
                .header
                .iter()
                .map(|h| TableCell::from(h.as_str())),
        )
        .style(styles::table_header());

        let rows = self.view.rows.iter().map(|row| {
            Row::new(row.cells.iter().map(|cell| match cell {
                Cell::Actions { .. } => {
                    TableCell::from(Span::styled(Self::cell_text(cell), styles::keybinding()))
                }
                Cell::Text(_) => TableCell::from(Self::cell_text(cell)),
            }))
        });

        let table = Table::new(rows, self.widths())
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(styles::focused_selected());

        let mut state = TableState::default().with_selected(Some(self.selected));
        StatefulWidget::render(table, area, buf, &mut state);
    }
}
