//! Health value types
//!
//! A [`Health`] is what a health indicator reports: a [`Status`] plus string
//! details. A [`HealthSnapshot`] aggregates several named results.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health status of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Up,
    Down,
    OutOfService,
    Unknown,
}

impl Status {
    /// Severity rank used for aggregation; higher is worse.
    pub fn severity(&self) -> u8 {
        match self {
            Status::Up => 0,
            Status::Unknown => 1,
            Status::OutOfService => 2,
            Status::Down => 3,
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Status::Up)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Up => write!(f, "UP"),
            Status::Down => write!(f, "DOWN"),
            Status::OutOfService => write!(f, "OUT_OF_SERVICE"),
            Status::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Result of a single health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: Status,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl Health {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            details: BTreeMap::new(),
        }
    }

    pub fn up() -> Self {
        Self::new(Status::Up)
    }

    pub fn down() -> Self {
        Self::new(Status::Down)
    }

    pub fn unknown() -> Self {
        Self::new(Status::Unknown)
    }

    /// `Down` with the error text recorded under the `error` detail.
    pub fn down_with_error(error: impl std::fmt::Display) -> Self {
        Self::down().with_detail("error", error.to_string())
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

/// Aggregated health of several named components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: Status,
    pub components: BTreeMap<String, Health>,
    pub checked_at: DateTime<Utc>,
}

impl HealthSnapshot {
    pub fn new(status: Status, components: BTreeMap<String, Health>) -> Self {
        Self {
            status,
            components,
            checked_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
