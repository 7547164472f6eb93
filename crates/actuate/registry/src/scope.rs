//! Registry lifecycle scope
//!
//! A [`RegistryScope`] owns the registry for one application run. Opening the
//! scope marks startup, closing it (explicitly or on drop) tears every
//! component down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::error::{RegistryError, Result};
use crate::memory::InMemoryComponentRegistry;
use crate::registry::ComponentRegistry;

/// Scoped ownership of a component registry.
pub struct RegistryScope {
    name: String,
    registry: Arc<dyn ComponentRegistry>,
    closed: AtomicBool,
}

impl RegistryScope {
    /// Open a scope over a fresh in-memory registry.
    pub fn open(name: impl Into<String>) -> Self {
        Self::with_registry(name, Arc::new(InMemoryComponentRegistry::new()))
    }

    /// Open a scope over an existing registry.
    pub fn with_registry(name: impl Into<String>, registry: Arc<dyn ComponentRegistry>) -> Self {
        let name = name.into();
        info!(scope = %name, "Opening registry scope");
        Self {
            name,
            registry,
            closed: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scoped registry, unless the scope was closed.
    pub fn registry(&self) -> Result<Arc<dyn ComponentRegistry>> {
        if self.is_closed() {
            return Err(RegistryError::Closed(self.name.clone()));
        }
        Ok(self.registry.clone())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Tear down every component. Closing twice is a no-op.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let released = self.registry.len();
        self.registry.clear();
        info!(scope = %self.name, released, "Closed registry scope");
    }
}

impl Drop for RegistryScope {
    fn drop(&mut self) {
        self.close();
    }
}
