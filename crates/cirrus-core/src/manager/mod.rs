//! Invocation boundary tying the pipeline together.
//!
//! The [`CommandManager`] owns the capability registry and the preprocessor
//! chain. For each raw input line it creates a fresh [`CommandContext`], runs
//! the chain, then hands the context to the caller's parse/execute step.
//! Every failure is converted into a [`DispatchError`] so nothing escapes as a
//! panic into the integrating layer.


use std::sync::Arc;

use tracing::{debug, error};

use crate::capability::{Capability, CapabilityRegistry};
use crate::context::{CommandContext, InvocationPass};
use crate::error::{ArgumentParseError, DispatchError};
use crate::input::CommandInput;
use crate::parser::{ArgumentParser, Suggestion};
use crate::preprocessor::{CommandPreprocessor, PreprocessingContext, PreprocessorChain};

/// Tracing target for dispatch.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Entry point that prepares contexts and runs commands for senders of type `C`.
#[derive(Debug)]
pub struct CommandManager<C> {
    capabilities: Arc<CapabilityRegistry>,
    preprocessors: PreprocessorChain<C>,
}

impl<C> CommandManager<C> {
    /// Creates a manager for an integration with the given capabilities.
    #[must_use]
    pub fn new(capabilities: Arc<CapabilityRegistry>) -> Self {
        Self {
            capabilities,
            preprocessors: PreprocessorChain::new(),
        }
    }

    /// Capabilities resolved for this integration.
    #[must_use]
    pub fn capabilities(&self) -> &Arc<CapabilityRegistry> {
        &self.capabilities
    }

    /// Returns `true` when `capability` is available.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.has(capability)
    }

    /// Registered preprocessors.
    #[must_use]
    pub fn preprocessors(&self) -> &PreprocessorChain<C> {
        &self.preprocessors
    }

    /// Appends a preprocessor to the chain.
    pub fn register_preprocessor<P>(&mut self, preprocessor: P)
    where
        P: CommandPreprocessor<C> + 'static,
    {
        self.preprocessors.register(preprocessor);
    }

    /// Appends a closure preprocessor to the chain.
    pub fn register_preprocessor_fn<F>(&mut self, preprocessor: F)
    where
        F: Fn(&mut PreprocessingContext<'_, C>) -> Result<(), crate::error::PreprocessError>
            + Send
            + Sync
            + 'static,
    {
        self.preprocessors.register_fn(preprocessor);
    }

    /// Creates a fresh context for `raw_input` and runs the preprocessor chain.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Preprocess`] when a preprocessor aborts.
    pub fn prepare(
        &self,
        sender: C,
        raw_input: &str,
        pass: InvocationPass,
    ) -> Result<(CommandContext<C>, CommandInput), DispatchError> {
        let mut context = CommandContext::new(sender, pass, raw_input);
        let input = CommandInput::new(raw_input);
        self.preprocessors.run(&mut context, &input)?;
        Ok((context, input))
    }

    /// Runs the execution pass for `raw_input`.
    ///
    /// `handler` parses the arguments it needs and performs the command.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] describing why the invocation failed; use
    /// [`DispatchError::render`] for the message shown to the sender.
    pub fn execute<T, H>(&self, sender: C, raw_input: &str, handler: H) -> Result<T, DispatchError>
    where
        H: FnOnce(&mut CommandContext<C>, &mut CommandInput) -> Result<T, ArgumentParseError>,
    {
        let (mut context, mut input) = self.prepare(sender, raw_input, InvocationPass::Execution)?;
        handler(&mut context, &mut input).map_err(|failure| report(raw_input, failure))
    }

    /// Runs the suggestion pass for `raw_input`, completing with `parser`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Preprocess`] when a preprocessor aborts.
    pub fn suggest<P>(
        &self,
        sender: C,
        raw_input: &str,
        parser: &P,
    ) -> Result<Vec<Suggestion>, DispatchError>
    where
        P: ArgumentParser<C> + ?Sized,
    {
        let (context, mut input) = self.prepare(sender, raw_input, InvocationPass::Suggestions)?;
        input.skip_whitespace();
        let suggestions = parser.suggestions(&context, input.remaining());
        debug!(
            target: DISPATCH_TARGET,
            count = suggestions.len(),
            "generated suggestions"
        );
        Ok(suggestions)
    }
}

fn report(raw_input: &str, failure: ArgumentParseError) -> DispatchError {
    let dispatch = DispatchError::from(failure);
    match &dispatch {
        DispatchError::Grammar(grammar) => error!(
            target: DISPATCH_TARGET,
            component = grammar.component(),
            input = raw_input,
            error = %grammar,
            "command grammar is misconfigured"
        ),
        DispatchError::Parse(parse) => debug!(
            target: DISPATCH_TARGET,
            parser = parse.parser(),
            cursor = parse.cursor(),
            error = %parse,
            "argument rejected"
        ),
        DispatchError::Preprocess(_) => {}
    }
    dispatch
}
