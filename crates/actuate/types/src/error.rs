//! Property error types

use thiserror::Error;

/// Errors raised while reading or parsing configuration properties.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("property '{key}' is not a boolean: '{value}'")]
    InvalidBoolean { key: String, value: String },

    #[error("malformed property entry '{0}', expected key=value")]
    MalformedPair(String),

    #[error("property '{0}' holds an array, only scalar values are supported")]
    UnsupportedValue(String),

    #[error("failed to parse TOML properties: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read properties file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for property operations
pub type PropertyResult<T> = std::result::Result<T, PropertyError>;
