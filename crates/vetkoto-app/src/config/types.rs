//! Configuration types for VetKoto

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vetkoto_remote::{BackendConfig, DEFAULT_REST_PATH};

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub import: ImportSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Base URL of the service, e.g. `https://<project>.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Anonymous/service API key, sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,

    /// REST prefix appended to the base URL
    #[serde(default = "default_rest_path")]
    pub rest_path: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            rest_path: default_rest_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn to_backend_config(&self) -> BackendConfig {
        BackendConfig {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            rest_path: self.rest_path.clone(),
            timeout: self.timeout(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

fn default_rest_path() -> String {
    DEFAULT_REST_PATH.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Search settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchSettings {
    /// Delay between the last keystroke and the search request
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce_ms() -> u64 {
    250
}

/// CSV import settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ImportSettings {
    /// Conversion endpoint; CSV is converted locally when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter_url: Option<String>,
}

/// CSV export settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Directory export files are written to; the working directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl ExportSettings {
    pub fn directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Directory holding `<id>.toml` section fragments; built-in set when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections_dir: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub show_sidebar: bool,

    /// Section shown at startup
    #[serde(default = "default_start_section")]
    pub start_section: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            sections_dir: None,
            show_sidebar: true,
            start_section: default_start_section(),
        }
    }
}

fn default_start_section() -> String {
    "dashboard".to_string()
}

/// Behavior settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Ask before deleting a record
    #[serde(default = "default_true")]
    pub confirm_delete: bool,

    /// Ask before quitting
    #[serde(default = "default_true")]
    pub confirm_quit: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            confirm_delete: true,
            confirm_quit: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.search.debounce_ms, 250);
        assert_eq!(settings.backend.rest_path, "/rest/v1");
        assert_eq!(settings.backend.timeout_ms, 10_000);
        assert!(settings.behavior.confirm_delete);
        assert!(settings.behavior.confirm_quit);
        assert!(settings.ui.show_sidebar);
        assert_eq!(settings.ui.start_section, "dashboard");
        assert!(settings.import.converter_url.is_none());
        assert!(!settings.backend.is_configured());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [backend]
            url = "https://clinic.supabase.co"

            [search]
            debounce_ms = 100
            "#,
        )
        .unwrap();
        assert!(settings.backend.is_configured());
        assert_eq!(settings.backend.rest_path, "/rest/v1");
        assert_eq!(settings.search.debounce_ms, 100);
        assert!(settings.behavior.confirm_quit);
    }

    #[test]
    fn test_backend_config_conversion() {
        let backend = BackendSettings {
            url: "http://localhost:3000".into(),
            api_key: "anon".into(),
            rest_path: "/".into(),
            timeout_ms: 1500,
        };
        let config = backend.to_backend_config();
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.api_key, "anon");
    }

    #[test]
    fn test_export_directory_defaults_to_cwd() {
        assert_eq!(ExportSettings::default().directory(), PathBuf::from("."));
    }
}
