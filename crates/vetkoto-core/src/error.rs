//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Schema Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown entity: {name}")]
    UnknownEntity { name: String },

    #[error("{key} required")]
    MissingPrimaryKey { key: String },

    #[error("{label} is required")]
    RequiredField { key: String, label: String },

    #[error("Cannot resolve {entity} label: row has no {field}")]
    UnresolvedRelation { entity: String, field: String },

    // ─────────────────────────────────────────────────────────────
    // Remote Backend Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("HTTP transport error: {message}")]
    Http { message: String },

    // ─────────────────────────────────────────────────────────────
    // CSV Import / Sections
    // ─────────────────────────────────────────────────────────────
    #[error("CSV import failed: {message}")]
    Import { message: String },

    #[error("Section '{id}' could not be loaded: {message}")]
    Section { id: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity { name: name.into() }
    }

    pub fn missing_primary_key(key: impl Into<String>) -> Self {
        Self::MissingPrimaryKey { key: key.into() }
    }

    pub fn required_field(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::RequiredField {
            key: key.into(),
            label: label.into(),
        }
    }

    pub fn unresolved_relation(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnresolvedRelation {
            entity: entity.into(),
            field: field.into(),
        }
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    pub fn section(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Section {
            id: id.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
