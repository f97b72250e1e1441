//! Settings parser for `config.toml`

use std::path::{Path, PathBuf};

use super::types::Settings;
use vetkoto_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "vetkoto";

/// Environment variable overriding `backend.url`
pub const URL_ENV_VAR: &str = "VETKOTO_URL";

/// Environment variable overriding `backend.api_key`
pub const API_KEY_ENV_VAR: &str = "VETKOTO_API_KEY";

/// Default location of the config file: `<config_dir>/vetkoto/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILENAME)
}

/// Load settings from `path`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Apply explicit overrides on top of loaded settings.
///
/// Blank values are ignored so an empty env var never wipes a configured url.
pub fn apply_overrides(settings: &mut Settings, url: Option<&str>, api_key: Option<&str>) {
    if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
        settings.backend.url = url.to_string();
    }
    if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
        settings.backend.api_key = key.to_string();
    }
}

/// Apply `VETKOTO_URL` / `VETKOTO_API_KEY` from the environment.
pub fn apply_env_overrides(settings: &mut Settings) {
    let url = std::env::var(URL_ENV_VAR).ok();
    let key = std::env::var(API_KEY_ENV_VAR).ok();
    apply_overrides(settings, url.as_deref(), key.as_deref());
}

/// Write a commented default config to `path`.
///
/// Returns `false` without touching anything when the file already exists.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
        }
    }

    let default_content = r#"# VetKoto Configuration

[backend]
url = ""                # e.g. https://<project>.supabase.co
api_key = ""            # anon key; VETKOTO_API_KEY overrides
rest_path = "/rest/v1"
timeout_ms = 10000

[search]
debounce_ms = 250

[import]
# converter_url = "http://localhost:8000/convert"   # local conversion when unset

[export]
# directory = "exports"                             # working directory when unset

[ui]
show_sidebar = true
start_section = "dashboard"
# sections_dir = "sections"                         # built-in sections when unset

[behavior]
confirm_delete = true
confirm_quit = true
"#;

    std::fs::write(path, default_content)
        .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
    info!("Created default config at {:?}", path);
    Ok(true)
}

/// Persist settings with an atomic temp-file write.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let temp_path = dir.join(".config.toml.tmp");

    std::fs::write(&temp_path, format!("# VetKoto Configuration\n\n{}", content))
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", path);
    Ok(())
}
