//! Actuate Types - Core types for conditional health-indicator wiring
//!
//! Actuate decides at startup whether optional components (health indicators
//! for external systems) are registered into a shared component registry.
//! This crate holds the value types every other Actuate crate agrees on.
//!
//! ## Key Concepts
//!
//! - **Capability**: a marker standing in for "this functionality is available
//!   at runtime". Optional components require their markers to be present.
//! - **Properties**: string-keyed configuration (`management.health.*`), loaded
//!   from `key=value` pairs or TOML files.
//! - **ComponentType**: the key under which components live in the registry.
//! - **Health**: the result of a health check (status plus string details).

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod capability;
pub mod component;
pub mod error;
pub mod health;
pub mod property;

// Re-export main types
pub use capability::{Capability, CapabilitySet, CapabilitySource, FilteredCapabilities};
pub use component::ComponentType;
pub use error::{PropertyError, PropertyResult};
pub use health::{Health, HealthSnapshot, Status};
pub use property::Properties;
