//! Collaborator interface implemented by a game-server host.
//!
//! Everything the integration needs from the host is funnelled through
//! [`ServerPlatform`]: native actor types, the primary-thread scheduler, the
//! native selector resolver and, when present, the native suggestion engine.
//! Host-specific type checks stay behind this seam and are resolved once at
//! integration setup.

use cirrus_core::{Capability, Task};
use thiserror::Error;

/// The host's native selector resolver refused a selector outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selector rejected by platform: {reason}")]
pub struct SelectorRejected {
    /// Host-supplied explanation, kept for logs only.
    pub reason: String,
}

impl SelectorRejected {
    /// Creates a rejection with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Host services consumed by the server integration.
///
/// Implementations are shared read-only across concurrent invocations.
pub trait ServerPlatform: Send + Sync + 'static {
    /// Native representation of the actor issuing a command.
    type Sender: Send + Sync + 'static;
    /// Sender representation expected by the native suggestion engine.
    type SuggestionSource: Send + Sync + 'static;
    /// Entity type returned by entity selectors.
    type Entity;
    /// Player type returned by player selectors.
    type Player;

    /// Returns `true` when the host ships a native suggestion engine.
    fn has_native_suggestion_engine(&self) -> bool;

    /// Additional host-defined capabilities worth probing at setup.
    fn declared_capabilities(&self) -> &[Capability] {
        &[]
    }

    /// Probes a host-defined capability other than native suggestions.
    fn supports(&self, _capability: Capability) -> bool {
        false
    }

    /// Returns `true` when the calling thread owns platform state.
    fn is_primary_thread(&self) -> bool;

    /// Queues `task` to run on the primary thread.
    fn schedule(&self, task: Task);

    /// Wraps a native sender for the native suggestion engine.
    fn suggestion_source(&self, sender: &Self::Sender) -> Self::SuggestionSource;

    /// Resolves an entity selector from the point of view of `sender`.
    ///
    /// Matches are returned in the host's native order.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorRejected`] when the host cannot interpret `selector`.
    fn select_entities(
        &self,
        sender: &Self::Sender,
        selector: &str,
    ) -> Result<Vec<Self::Entity>, SelectorRejected>;

    /// Resolves a player selector from the point of view of `sender`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorRejected`] when the host cannot interpret `selector`.
    fn select_players(
        &self,
        sender: &Self::Sender,
        selector: &str,
    ) -> Result<Vec<Self::Player>, SelectorRejected>;

    /// Completion candidates from the native suggestion engine.
    fn native_suggestions(&self, source: &Self::SuggestionSource, input: &str) -> Vec<String>;
}
