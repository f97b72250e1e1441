//! Color palette.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const CONTRAST_FG: Color = Color::Black;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_BLUE: Color = Color::Blue;

// --- Effects ---
pub const SHADOW: Color = Color::Rgb(5, 6, 8);

// --- Forms ---
pub const INPUT_BG: Color = Color::Rgb(40, 40, 50);
pub const INPUT_FOCUSED_BG: Color = Color::Rgb(60, 60, 80);

// --- Dashboard cards ---
pub const CARD_OWNERS: Color = Color::Cyan;
pub const CARD_PATIENTS: Color = Color::Green;
pub const CARD_VISITS: Color = Color::Magenta;
pub const CARD_VACCINATIONS: Color = Color::Yellow;
