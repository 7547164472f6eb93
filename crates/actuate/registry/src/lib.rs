//! Actuate Registry - Component registry traits and implementations
//!
//! The registry is the shared store of constructed components used for
//! dependency resolution during startup:
//!
//! - **ComponentRegistry**: `has` / `get` / `put` over component type keys
//! - **ComponentDefinition**: one named component exposed under several contracts
//! - **RegistryScope**: ties a registry's lifetime to application startup and shutdown
//!
//! ## In-Memory Only
//!
//! Components are live Rust values, so the only backend is the in-memory
//! [`InMemoryComponentRegistry`].

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod memory;
pub mod registry;
pub mod scope;

// Re-exports
pub use error::{RegistryError, RegistryResult, Result};
pub use memory::InMemoryComponentRegistry;
pub use registry::{ComponentDefinition, ComponentRef, ComponentRegistry, ComponentRegistryExt};
pub use scope::RegistryScope;
