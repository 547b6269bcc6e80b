//! Bridge from generic senders to the native suggestion engine.

use std::fmt;
use std::sync::Arc;

use cirrus_core::{CapabilityRegistry, NATIVE_SUGGESTIONS, SenderMapper};

use crate::platform::ServerPlatform;

/// Shared sender mapper for platform `P` and generic sender `C`.
pub type SharedSenderMapper<P, C> = Arc<dyn SenderMapper<<P as ServerPlatform>::Sender, C>>;

/// Converts a generic sender into the platform's suggestion-engine sender by
/// reverse mapping it to the native actor first.
///
/// Only exists when the native suggestion capability is present, so callers
/// hold an `Option<NativeSuggestionMapper>` instead of checking the
/// capability at every use.
pub struct NativeSuggestionMapper<P: ServerPlatform, C> {
    platform: Arc<P>,
    sender_mapper: SharedSenderMapper<P, C>,
}

impl<P: ServerPlatform, C> NativeSuggestionMapper<P, C> {
    /// Builds the mapper when `capabilities` include [`NATIVE_SUGGESTIONS`].
    #[must_use]
    pub fn for_capabilities(
        capabilities: &CapabilityRegistry,
        platform: &Arc<P>,
        sender_mapper: &SharedSenderMapper<P, C>,
    ) -> Option<Self> {
        capabilities.has(NATIVE_SUGGESTIONS).then(|| Self {
            platform: Arc::clone(platform),
            sender_mapper: Arc::clone(sender_mapper),
        })
    }

    /// Suggestion-engine sender for `sender`.
    #[must_use]
    pub fn apply(&self, sender: &C) -> P::SuggestionSource {
        let native = self.sender_mapper.reverse(sender);
        self.platform.suggestion_source(&native)
    }
}

impl<P: ServerPlatform, C> fmt::Debug for NativeSuggestionMapper<P, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NativeSuggestionMapper")
            .finish_non_exhaustive()
    }
}
