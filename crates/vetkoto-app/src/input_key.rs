//! Terminal-independent key input.
//!
//! The TUI converts crossterm key events into [`InputKey`] so the handlers
//! in this crate never depend on a terminal library.

/// A key press as seen by the update handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character (letters, digits, symbols)
    Char(char),
    /// Character with Ctrl held (Ctrl+S, Ctrl+C, ...)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// Digit keys `1`-`9` and `0` select sections 0-9.
    pub fn section_index(&self) -> Option<usize> {
        match self {
            InputKey::Char('0') => Some(9),
            InputKey::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
            _ => None,
        }
    }
}
