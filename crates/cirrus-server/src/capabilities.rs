//! Capability probing against a [`ServerPlatform`].

use cirrus_core::{Capability, CapabilityProbe, NATIVE_SUGGESTIONS};

use crate::platform::ServerPlatform;

/// Probes the platform for the capabilities a server integration uses.
#[derive(Debug)]
pub struct ServerCapabilityProbe<'a, P> {
    platform: &'a P,
}

impl<'a, P: ServerPlatform> ServerCapabilityProbe<'a, P> {
    /// Creates a probe over `platform`.
    #[must_use]
    pub const fn new(platform: &'a P) -> Self {
        Self { platform }
    }

    /// Capabilities worth probing: native suggestions and any the platform
    /// declares itself.
    #[must_use]
    pub fn candidates(&self) -> Vec<Capability> {
        let mut candidates = vec![NATIVE_SUGGESTIONS];
        candidates.extend_from_slice(self.platform.declared_capabilities());
        candidates
    }
}

impl<P: ServerPlatform> CapabilityProbe for ServerCapabilityProbe<'_, P> {
    fn probe(&self, capability: Capability) -> bool {
        if capability == NATIVE_SUGGESTIONS {
            self.platform.has_native_suggestion_engine()
        } else {
            self.platform.supports(capability)
        }
    }
}
