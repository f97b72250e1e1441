//! Custom widget components

mod alert;
mod confirm_dialog;
mod dashboard;
mod entity_table;
mod form_dialog;
mod header;
mod import_prompt;
pub mod modal_overlay;
mod search_input;
mod sidebar;
mod status_bar;

pub use alert::AlertDialog;
pub use confirm_dialog::ConfirmDialog;
pub use dashboard::DashboardView;
pub use entity_table::{EntityTable, ACTIONS_TEXT};
pub use form_dialog::FormDialog;
pub use header::MainHeader;
pub use import_prompt::ImportPrompt;
pub use search_input::SearchInput;
pub use sidebar::NavSidebar;
pub use status_bar::StatusBar;
