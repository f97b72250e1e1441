//! Main header: app name, active section and its toolbar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use vetkoto_app::section::SectionFragment;

use crate::theme::styles;

pub struct MainHeader<'a> {
    section_title: String,
    fragment: Option<&'a SectionFragment>,
    backend: &'a str,
}

impl<'a> MainHeader<'a> {
    /// `fallback_title` is shown until the section fragment has loaded.
    pub fn new(fallback_title: String, fragment: Option<&'a SectionFragment>) -> Self {
        Self {
            section_title: fragment.map(|f| f.title.clone()).unwrap_or(fallback_title),
            fragment,
            backend: "",
        }
    }

    /// Backend label shown on the right ("demo", host name)
    pub fn with_backend(mut self, backend: &'a str) -> Self {
        self.backend = backend;
        self
    }

    fn toolbar(&self) -> Vec<Span<'static>> {
        let Some(fragment) = self.fragment else {
            return Vec::new();
        };
        let mut spans = Vec::new();
        for action in &fragment.toolbar {
            spans.push(Span::styled(format!("[{}]", action.key), styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action.label), styles::text_muted()));
        }
        spans
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut title = " VetKoto ".to_string();
        if !self.backend.is_empty() {
            title.push_str(&format!("· {} ", self.backend));
        }
        let block = styles::glass_block(false).title(Span::styled(title, styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled(self.section_title.clone(), styles::accent_bold())];
        if let Some(intro) = self.fragment.and_then(|f| f.intro.first()) {
            spans.push(Span::styled(" │ ", styles::text_muted()));
            spans.push(Span::styled(intro.clone(), styles::text_secondary()));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);

        let toolbar = Line::from(self.toolbar());
        let width = (toolbar.width() as u16).min(inner.width);
        if width > 0 {
            buf.set_line(inner.right() - width, inner.y, &toolbar, width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use vetkoto_app::section::ToolbarAction;

    fn owners_fragment() -> SectionFragment {
        SectionFragment {
            id: "owners".into(),
            title: "Pet owners".into(),
            intro: vec!["Everyone who brings an animal in.".into()],
            toolbar: vec![ToolbarAction {
                key: "n".into(),
                label: "New owner".into(),
            }],
        }
    }

    #[test]
    fn test_header_renders_fragment_title_and_toolbar() {
        let fragment = owners_fragment();
        let mut term = TestTerminal::with_size(120, 3);
        term.render_widget(
            MainHeader::new("Owners".into(), Some(&fragment)).with_backend("demo"),
            term.area(),
        );

        assert!(term.buffer_contains("VetKoto"));
        assert!(term.buffer_contains("demo"));
        assert!(term.buffer_contains("Pet owners"));
        assert!(term.buffer_contains("Everyone who brings"));
        assert!(term.buffer_contains("[n] New owner"));
    }

    #[test]
    fn test_header_falls_back_before_fragment_loads() {
        let mut term = TestTerminal::with_size(80, 3);
        term.render_widget(MainHeader::new("Visits".into(), None), term.area());
        assert!(term.buffer_contains("Visits"));
    }
}
