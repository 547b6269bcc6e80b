//! Well-known context keys shared between the core and platform integrations.
//!
//! Sender keys are generic over the platform's native types, so they are
//! exposed as `const fn` constructors rather than constants.

use crate::context::ContextKey;
use crate::execution::SharedExecutor;

/// Name of the key holding the platform-native command sender.
pub const PLATFORM_COMMAND_SENDER: &str = "platform-command-sender";

/// Name of the key holding the sender in the form expected by the native
/// suggestion engine.
pub const NATIVE_SUGGESTION_SENDER: &str = "native-brigadier-sender";

/// Name of the key holding the execution-affinity executor.
pub const EXECUTION_AFFINITY_EXECUTOR_NAME: &str = "execution-affinity-executor";

/// Executor that runs work where it is safe to touch platform state.
pub const EXECUTION_AFFINITY_EXECUTOR: ContextKey<SharedExecutor> =
    ContextKey::new(EXECUTION_AFFINITY_EXECUTOR_NAME);

/// Key holding the platform-native sender of type `N`.
#[must_use]
pub const fn platform_command_sender<N>() -> ContextKey<N> {
    ContextKey::new(PLATFORM_COMMAND_SENDER)
}

/// Key holding the native suggestion-engine sender of type `S`.
#[must_use]
pub const fn native_suggestion_sender<S>() -> ContextKey<S> {
    ContextKey::new(NATIVE_SUGGESTION_SENDER)
}
