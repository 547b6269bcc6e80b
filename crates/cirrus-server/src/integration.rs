//! Wiring for a server platform integration.

use std::fmt;
use std::sync::Arc;

use cirrus_config::Config;
use cirrus_core::{
    Capability, CapabilityRegistry, CommandManager, NATIVE_SUGGESTIONS, SenderMapper,
};
use tracing::info;

use crate::SERVER_TARGET;
use crate::capabilities::ServerCapabilityProbe;
use crate::mapper::SharedSenderMapper;
use crate::platform::ServerPlatform;
use crate::preprocessor::ServerCommandPreprocessor;
use crate::selector::SelectorParser;

/// A [`CommandManager`] wired to a server platform.
///
/// Capabilities are probed once at construction and overridden from the
/// configuration; the server preprocessor is then registered so it runs for
/// every invocation.
pub struct ServerIntegration<P: ServerPlatform, C> {
    platform: Arc<P>,
    sender_mapper: SharedSenderMapper<P, C>,
    manager: CommandManager<C>,
}

impl<P: ServerPlatform, C: 'static> ServerIntegration<P, C> {
    /// Creates the integration.
    #[must_use]
    pub fn new<M>(platform: Arc<P>, sender_mapper: M, config: &Config) -> Self
    where
        M: SenderMapper<P::Sender, C> + 'static,
    {
        Self::with_leading_preprocessors(platform, sender_mapper, config, |_| {})
    }

    /// Creates the integration, letting `register` add preprocessors that
    /// must run before the server preprocessor.
    pub fn with_leading_preprocessors<M, F>(
        platform: Arc<P>,
        sender_mapper: M,
        config: &Config,
        register: F,
    ) -> Self
    where
        M: SenderMapper<P::Sender, C> + 'static,
        F: FnOnce(&mut CommandManager<C>),
    {
        let probe = ServerCapabilityProbe::new(platform.as_ref());
        let capabilities = Arc::new(CapabilityRegistry::probe(
            &probe,
            &probe.candidates(),
            &config.capability_matrix(),
        ));
        let shared_mapper: SharedSenderMapper<P, C> = Arc::new(sender_mapper);

        let mut manager = CommandManager::new(Arc::clone(&capabilities));
        register(&mut manager);
        manager.register_preprocessor(ServerCommandPreprocessor::new(
            Arc::clone(&platform),
            Arc::clone(&shared_mapper),
            &capabilities,
        ));

        info!(
            target: SERVER_TARGET,
            native_suggestions = capabilities.has(NATIVE_SUGGESTIONS),
            preprocessors = manager.preprocessors().len(),
            "server integration ready"
        );

        Self {
            platform,
            sender_mapper: shared_mapper,
            manager,
        }
    }

    /// The platform collaborator.
    #[must_use]
    pub fn platform(&self) -> &Arc<P> {
        &self.platform
    }

    /// The command manager driving invocations.
    #[must_use]
    pub fn manager(&self) -> &CommandManager<C> {
        &self.manager
    }

    /// Mutable access for registering further preprocessors.
    pub fn manager_mut(&mut self) -> &mut CommandManager<C> {
        &mut self.manager
    }

    /// Returns `true` when `capability` resolved as available.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.manager.has_capability(capability)
    }

    /// Wraps a native sender into the generic sender type.
    #[must_use]
    pub fn map_sender(&self, native: P::Sender) -> C {
        self.sender_mapper.map(native)
    }

    /// Creates a selector parser resolving through this platform.
    #[must_use]
    pub fn selector_parser<K, N>(&self) -> SelectorParser<P, K, N> {
        SelectorParser::new(Arc::clone(&self.platform))
    }
}

impl<P: ServerPlatform, C> fmt::Debug for ServerIntegration<P, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ServerIntegration")
            .field("capabilities", self.manager.capabilities())
            .finish_non_exhaustive()
    }
}
