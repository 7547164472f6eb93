//! Error types for actuate-autoconfig crate.
//!
//! Non-registration is never an error. These errors are fatal startup
//! failures: the host must abort initialization when it sees one.

use actuate_registry::RegistryError;
use actuate_types::{ComponentType, PropertyError};
use thiserror::Error;

/// Errors that abort auto-configuration.
#[derive(Debug, Error)]
pub enum AutoConfigError {
    /// The rule matched but its dependency vanished before construction.
    #[error("rule '{rule}' matched but its dependency {dependency} is no longer registered")]
    DependencyUnavailable {
        rule: String,
        dependency: ComponentType,
    },

    /// The component factory refused to build the component.
    #[error("failed to construct component for rule '{rule}': {reason}")]
    Construction { rule: String, reason: String },

    /// Auto-configuration ordering constraints form a cycle.
    #[error("auto-configuration ordering cycle between: {}", .0.join(", "))]
    OrderingCycle(Vec<String>),

    /// User configuration failed.
    #[error("user configuration '{name}' failed: {source}")]
    UserConfiguration {
        name: String,
        #[source]
        source: RegistryError,
    },

    /// Registry contract violation.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Invalid configuration properties.
    #[error("property error: {0}")]
    Property(#[from] PropertyError),
}

/// Result type for auto-configuration operations.
pub type AutoConfigResult<T> = Result<T, AutoConfigError>;
