//! vetkoto-tui - Terminal UI for VetKoto
//!
//! Paints [`AppState`](vetkoto_app::AppState) with ratatui and feeds
//! crossterm key and mouse events back into the
//! [`Engine`](vetkoto_app::Engine) as messages.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
