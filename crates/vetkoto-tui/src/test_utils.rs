//! Test utilities for TUI rendering
//!
//! Wraps ratatui's `TestBackend` so widgets and full frames can be
//! rendered and inspected without a real terminal.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

use vetkoto_app::config::Settings;
use vetkoto_app::AppState;
use vetkoto_core::SchemaRegistry;

pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// 80x24
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. with `render::view`.
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        self.content().contains(text)
    }

    /// Text of a single row, empty when out of range.
    pub fn line(&self, row: u16) -> String {
        let buffer = self.buffer();
        let mut result = String::new();
        if row < buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, row)].symbol());
            }
        }
        result
    }

    /// Whole buffer, one line per row (for debugging failed asserts)
    pub fn content(&self) -> String {
        let mut result = String::new();
        for y in 0..self.buffer().area.height {
            result.push_str(&self.line(y));
            result.push('\n');
        }
        result
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh state with default settings and the clinic schema
pub fn test_state() -> AppState {
    AppState::new(Settings::default(), SchemaRegistry::clinic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_custom_size() {
        let term = TestTerminal::with_size(100, 50);
        assert_eq!(term.area().width, 100);
        assert_eq!(term.area().height, 50);
    }

    #[test]
    fn test_line_and_contains() {
        let mut term = TestTerminal::with_size(20, 3);
        term.render_widget(Paragraph::new("Hello World"), term.area());

        assert!(term.buffer_contains("Hello World"));
        assert!(!term.buffer_contains("Goodbye"));
        assert!(term.line(0).starts_with("Hello World"));
        assert_eq!(term.line(7), "");
    }
}
