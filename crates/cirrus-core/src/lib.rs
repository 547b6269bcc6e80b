//! Platform-agnostic command pipeline for Cirrus.
//!
//! The `cirrus-core` crate defines the pieces every server integration shares:
//! a per-invocation [`CommandContext`] holding typed values under
//! [`ContextKey`]s, an ordered [`PreprocessorChain`] that enriches the context
//! before parsing, the [`ArgumentParser`] contract, a [`CapabilityRegistry`]
//! resolved once at start-up, bidirectional [`SenderMapper`]s and the
//! [`TaskExecutor`] execution-affinity contract.
//!
//! # Architecture
//!
//! A [`CommandManager`] owns the capabilities and the preprocessor chain. For
//! each raw input line it creates a fresh context, runs every preprocessor in
//! registration order and then hands the context to the parse step. Failures
//! are reported as [`DispatchError`]s rather than panics: parse failures are
//! rendered back to the sender, while grammar and preprocessing failures are
//! logged and replaced by [`INTERNAL_ERROR_MESSAGE`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use cirrus_core::{CapabilityRegistry, CommandManager, ContextKey};
//!
//! const GREETING: ContextKey<String> = ContextKey::new("greeting");
//!
//! let mut manager: CommandManager<String> =
//!     CommandManager::new(Arc::new(CapabilityRegistry::default()));
//! manager.register_preprocessor_fn(|preprocessing| {
//!     let greeting = format!("hello {}", preprocessing.command_context().sender());
//!     preprocessing.command_context_mut().store(&GREETING, greeting);
//!     Ok(())
//! });
//!
//! let greeting = manager
//!     .execute(String::from("alex"), "greet", |context, _input| {
//!         Ok(context.get(&GREETING).cloned().unwrap_or_default())
//!     })
//!     .map_err(|error| error.render());
//! assert_eq!(greeting.as_deref(), Ok("hello alex"));
//! ```

pub mod capability;
pub mod context;
pub mod error;
pub mod execution;
pub mod input;
pub mod manager;
pub mod parser;
pub mod preprocessor;
pub mod sender;

#[cfg(test)]
mod tests;

pub use self::capability::{
    Capability, CapabilityProbe, CapabilityRegistry, CapabilitySource, CapabilityState,
    NATIVE_SUGGESTIONS,
};
pub use self::context::{CommandContext, ContextKey, InvocationPass, keys};
pub use self::error::{
    ArgumentParseError, BoxedCause, ContextError, DispatchError, GrammarError,
    INTERNAL_ERROR_MESSAGE, NoInputProvided, ParseFailure, PreprocessError,
};
pub use self::execution::{
    AffinityExecutor, AffinityQueue, InlineExecutor, SharedExecutor, Task, TaskExecutor,
    affinity_channel,
};
pub use self::input::CommandInput;
pub use self::manager::CommandManager;
pub use self::parser::{ArgumentParser, Suggestion};
pub use self::preprocessor::{CommandPreprocessor, PreprocessingContext, PreprocessorChain};
pub use self::sender::{FnSenderMapper, IdentityMapper, SenderMapper};
