//! Runtime environment: available capabilities plus configuration properties.

use std::sync::Arc;

use actuate_types::{Capability, CapabilitySource, FilteredCapabilities, Properties};

/// Capabilities and properties visible to auto-configuration.
#[derive(Clone)]
pub struct Environment {
    capabilities: Arc<dyn CapabilitySource>,
    properties: Properties,
}

impl Environment {
    pub fn new(capabilities: Arc<dyn CapabilitySource>, properties: Properties) -> Self {
        Self {
            capabilities,
            properties,
        }
    }

    pub fn capabilities(&self) -> &Arc<dyn CapabilitySource> {
        &self.capabilities
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Hide capability markers, as if that functionality were not linked in.
    pub fn filtered<I, C>(self, hidden: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        Self {
            capabilities: Arc::new(FilteredCapabilities::new(self.capabilities, hidden)),
            properties: self.properties,
        }
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("capabilities", &self.capabilities.markers())
            .field("properties", &self.properties)
            .finish()
    }
}
