//! Registry error types

use actuate_types::ComponentType;
use thiserror::Error;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Component '{name}' already registered as {ty}")]
    DuplicateComponent { ty: ComponentType, name: String },

    #[error("Expected a single {ty} but found {}: {candidates:?}", candidates.len())]
    Ambiguous {
        ty: ComponentType,
        candidates: Vec<String>,
    },

    #[error("Component '{name}' registered as {ty} is not a {expected}")]
    TypeMismatch {
        ty: ComponentType,
        name: String,
        expected: &'static str,
    },

    #[error("Registry scope '{0}' is closed")]
    Closed(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Alias for use next to other crates' result types
pub type RegistryResult<T> = Result<T>;
