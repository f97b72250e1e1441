//! Section navigation sidebar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

/// Numbered list of sections; the active one is highlighted.
pub struct NavSidebar<'a> {
    titles: &'a [String],
    active: usize,
}

impl<'a> NavSidebar<'a> {
    pub fn new(titles: &'a [String], active: usize) -> Self {
        Self { titles, active }
    }

    /// Jump key for the section at `index` (1-9, then 0).
    pub fn shortcut(index: usize) -> Option<char> {
        match index {
            0..=8 => char::from_digit(index as u32 + 1, 10),
            9 => Some('0'),
            _ => None,
        }
    }
}

impl Widget for NavSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Sections ");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let key = Self::shortcut(i).map(String::from).unwrap_or_default();
                if i == self.active {
                    Line::from(Span::styled(
                        format!("{:>1} {:<width$}", key, title, width = inner.width as usize),
                        styles::focused_selected(),
                    ))
                } else {
                    Line::from(vec![
                        Span::styled(format!("{:>1} ", key), styles::keybinding()),
                        Span::styled(title.clone(), styles::text_primary()),
                    ])
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
