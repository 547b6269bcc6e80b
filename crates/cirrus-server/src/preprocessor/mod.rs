//! Preprocessor that decorates each command context with server objects.
//!
//! For every invocation it:
//!
//! 1. stores the native suggestion-engine sender, if the native suggestion
//!    capability is present and no earlier preprocessor stored one;
//! 2. stores the reverse-mapped native sender under the platform sender key,
//!    replacing any previous value;
//! 3. supplies a [`PrimaryThreadExecutor`] under the execution-affinity key
//!    unless an earlier preprocessor already provided an executor.


use std::fmt;
use std::sync::Arc;

use cirrus_core::keys::EXECUTION_AFFINITY_EXECUTOR;
use cirrus_core::{
    CapabilityRegistry, CommandPreprocessor, PreprocessError, PreprocessingContext, SharedExecutor,
};
use tracing::debug;

use crate::SERVER_TARGET;
use crate::executor::PrimaryThreadExecutor;
use crate::keys::{native_sender_key, platform_sender_key};
use crate::mapper::{NativeSuggestionMapper, SharedSenderMapper};
use crate::platform::ServerPlatform;

/// Stores server-specific objects in the command context.
pub struct ServerCommandPreprocessor<P: ServerPlatform, C> {
    platform: Arc<P>,
    sender_mapper: SharedSenderMapper<P, C>,
    native_mapper: Option<NativeSuggestionMapper<P, C>>,
}

impl<P: ServerPlatform, C> ServerCommandPreprocessor<P, C> {
    /// Creates the preprocessor for an integration with `capabilities`.
    #[must_use]
    pub fn new(
        platform: Arc<P>,
        sender_mapper: SharedSenderMapper<P, C>,
        capabilities: &CapabilityRegistry,
    ) -> Self {
        let native_mapper =
            NativeSuggestionMapper::for_capabilities(capabilities, &platform, &sender_mapper);
        Self {
            platform,
            sender_mapper,
            native_mapper,
        }
    }

    /// Returns `true` when the native suggestion sender will be populated.
    #[must_use]
    pub const fn bridges_native_suggestions(&self) -> bool {
        self.native_mapper.is_some()
    }
}

impl<P: ServerPlatform, C> CommandPreprocessor<C> for ServerCommandPreprocessor<P, C> {
    fn accept(&self, preprocessing: &mut PreprocessingContext<'_, C>) -> Result<(), PreprocessError> {
        let context = preprocessing.command_context_mut();

        if let Some(native_mapper) = &self.native_mapper {
            let key = native_sender_key::<P>();
            if context.contains(&key) {
                debug!(target: SERVER_TARGET, "native suggestion sender already present");
            } else {
                let source = native_mapper.apply(context.sender());
                context.store(&key, source);
            }
        }

        let native = self.sender_mapper.reverse(context.sender());
        context.store(&platform_sender_key::<P>(), native);

        let platform = Arc::clone(&self.platform);
        context.compute_if_absent(&EXECUTION_AFFINITY_EXECUTOR, move |_| {
            Arc::new(PrimaryThreadExecutor::new(platform)) as SharedExecutor
        })?;
        Ok(())
    }
}

impl<P: ServerPlatform, C> fmt::Debug for ServerCommandPreprocessor<P, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ServerCommandPreprocessor")
            .field("native_mapper", &self.native_mapper)
            .finish_non_exhaustive()
    }
}
