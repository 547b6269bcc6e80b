//! Preprocessors that enrich the command context before parsing.
//!
//! Preprocessors run synchronously in registration order, once per
//! invocation, for both execution and suggestion passes. A preprocessor may
//! only write to the context and read its own immutable collaborators. Keys
//! it does not exclusively own must be written with
//! [`CommandContext::compute_if_absent`] so values supplied by an
//! earlier-registered preprocessor survive.


use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::CommandContext;
use crate::error::PreprocessError;
use crate::input::CommandInput;

/// Tracing target for preprocessing.
pub(crate) const PREPROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::preprocess");

/// View handed to each preprocessor.
pub struct PreprocessingContext<'a, C> {
    context: &'a mut CommandContext<C>,
    input: &'a CommandInput,
}

impl<'a, C> PreprocessingContext<'a, C> {
    /// Wraps a context and the input about to be parsed.
    #[must_use]
    pub const fn new(context: &'a mut CommandContext<C>, input: &'a CommandInput) -> Self {
        Self { context, input }
    }

    /// The command context being prepared.
    #[must_use]
    pub const fn command_context(&self) -> &CommandContext<C> {
        self.context
    }

    /// Mutable access to the command context being prepared.
    pub const fn command_context_mut(&mut self) -> &mut CommandContext<C> {
        self.context
    }

    /// The input that will be parsed once preprocessing finishes.
    #[must_use]
    pub const fn input(&self) -> &CommandInput {
        self.input
    }
}

/// A context-mutating step run before argument parsing.
pub trait CommandPreprocessor<C>: Send + Sync {
    /// Enriches the context.
    ///
    /// # Errors
    ///
    /// Returns a [`PreprocessError`] only for unrecoverable conditions; the
    /// rest of the chain and the parse are then skipped.
    fn accept(&self, context: &mut PreprocessingContext<'_, C>) -> Result<(), PreprocessError>;
}

struct FnPreprocessor<F>(F);

impl<C, F> CommandPreprocessor<C> for FnPreprocessor<F>
where
    F: Fn(&mut PreprocessingContext<'_, C>) -> Result<(), PreprocessError> + Send + Sync,
{
    fn accept(&self, context: &mut PreprocessingContext<'_, C>) -> Result<(), PreprocessError> {
        (self.0)(context)
    }
}

/// Ordered list of preprocessors.
pub struct PreprocessorChain<C> {
    preprocessors: Vec<Arc<dyn CommandPreprocessor<C>>>,
}

impl<C> Default for PreprocessorChain<C> {
    fn default() -> Self {
        Self {
            preprocessors: Vec::new(),
        }
    }
}

impl<C> PreprocessorChain<C> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a preprocessor; it runs after every one registered before it.
    pub fn register<P>(&mut self, preprocessor: P)
    where
        P: CommandPreprocessor<C> + 'static,
    {
        self.preprocessors.push(Arc::new(preprocessor));
    }

    /// Appends a closure preprocessor.
    pub fn register_fn<F>(&mut self, preprocessor: F)
    where
        F: Fn(&mut PreprocessingContext<'_, C>) -> Result<(), PreprocessError>
            + Send
            + Sync
            + 'static,
    {
        self.register(FnPreprocessor(preprocessor));
    }

    /// Number of registered preprocessors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.preprocessors.len()
    }

    /// Returns `true` when no preprocessors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preprocessors.is_empty()
    }

    /// Runs every preprocessor in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`PreprocessError`]; later preprocessors do not run.
    pub fn run(
        &self,
        context: &mut CommandContext<C>,
        input: &CommandInput,
    ) -> Result<(), PreprocessError> {
        let mut preprocessing = PreprocessingContext::new(context, input);
        for (index, preprocessor) in self.preprocessors.iter().enumerate() {
            if let Err(error) = preprocessor.accept(&mut preprocessing) {
                warn!(
                    target: PREPROCESS_TARGET,
                    index,
                    %error,
                    "preprocessor aborted the chain"
                );
                return Err(error);
            }
        }
        debug!(
            target: PREPROCESS_TARGET,
            count = self.preprocessors.len(),
            suggestions = preprocessing.command_context().is_suggestions(),
            "preprocessing complete"
        );
        Ok(())
    }
}

impl<C> Clone for PreprocessorChain<C> {
    fn clone(&self) -> Self {
        Self {
            preprocessors: self.preprocessors.clone(),
        }
    }
}

impl<C> fmt::Debug for PreprocessorChain<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PreprocessorChain")
            .field("len", &self.preprocessors.len())
            .finish()
    }
}
