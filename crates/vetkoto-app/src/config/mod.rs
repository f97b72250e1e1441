//! Configuration loading
//!
//! Settings come from `<config_dir>/vetkoto/config.toml`, then environment
//! variables, then command-line flags.

mod settings;
mod types;

pub use settings::{
    apply_env_overrides, apply_overrides, default_config_path, init_config, load_settings,
    save_settings, API_KEY_ENV_VAR, URL_ENV_VAR,
};
pub use types::{
    BackendSettings, BehaviorSettings, ExportSettings, ImportSettings, SearchSettings, Settings,
    UiSettings,
};
