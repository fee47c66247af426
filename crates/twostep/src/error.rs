//! Error types for view rendering.
//!
//! [`ViewError`] is the single error type returned by every public operation.
//! The resolver itself never creates errors of its own; it forwards whatever
//! the render engine or configuration provider reports.

use std::io;

/// Errors that can occur while resolving and rendering a view.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The render engine could not resolve a view or layout name.
    #[error("view not found: {0}")]
    ViewNotFound(String),

    /// The configuration provider could not be reached or read.
    #[error("configuration unavailable: {0}")]
    ConfigurationUnavailable(String),

    /// A configuration value has the wrong shape.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Template syntax or evaluation failure.
    #[error("template error: {0}")]
    Template(String),

    /// View data could not be converted to a template context.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error while reading views or configuration.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ViewError {
    /// Create a view-not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ViewNotFound(name.into())
    }

    /// Create a configuration-unavailable error.
    pub fn config_unavailable(msg: impl Into<String>) -> Self {
        Self::ConfigurationUnavailable(msg.into())
    }

    /// Returns true if this is a [`ViewError::ViewNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ViewNotFound(_))
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ViewError {
    fn from(err: serde_yaml::Error) -> Self {
        ViewError::InvalidConfiguration(err.to_string())
    }
}

// `TemplateNotFound` raised here comes from inside a template (a missing
// include); unresolved view names are reported by the engine itself.
impl From<minijinja::Error> for ViewError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::BadSerialization => ViewError::Serialization(err.to_string()),
            _ => ViewError::Template(err.to_string()),
        }
    }
}
