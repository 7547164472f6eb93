//! Graph database driver contract.
//!
//! Only the part the health indicator needs is modelled: a connectivity
//! check returning a summary of the server that answered.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a driver reports while talking to the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The session expired; a fresh session may succeed.
    #[error("session expired")]
    SessionExpired,

    /// No server could be reached.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The server rejected the health query.
    #[error("query failed: {0}")]
    Query(String),
}

/// Server that answered a connectivity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSummary {
    pub version: String,
    pub address: String,
    pub edition: String,
}

impl ServerSummary {
    pub fn new(
        version: impl Into<String>,
        address: impl Into<String>,
        edition: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            address: address.into(),
            edition: edition.into(),
        }
    }
}

/// Client used to connect to and query the graph database.
#[async_trait]
pub trait GraphDriver: Send + Sync {
    /// Run a trivial query and report the server that answered.
    async fn verify_connectivity(&self) -> Result<ServerSummary, DriverError>;
}
