//! Error taxonomy for context access, preprocessing, parsing and dispatch.
//!
//! Errors are split by who is at fault. [`ParseFailure`] is bad user input and
//! is rendered back to the sender. [`GrammarError`] is a defect in how a
//! command grammar was declared and is logged loudly. [`PreprocessError`]
//! aborts a single invocation when a required collaborator is missing. The
//! [`DispatchError`] produced at the invocation boundary wraps all of them so
//! the integrating layer never has to handle a panic.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error used as the underlying cause of a [`ParseFailure`].
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised when reading the per-invocation context store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// No value of the declared type is stored under the key.
    #[error("context key '{key}' of type {type_name} is not present")]
    NotPresent {
        /// Name of the key that was looked up.
        key: &'static str,
        /// Declared value type of the key.
        type_name: &'static str,
    },
}

impl ContextError {
    /// Creates a [`ContextError::NotPresent`] for the given key name and type.
    #[must_use]
    pub fn not_present<T>(key: &'static str) -> Self {
        Self::NotPresent {
            key,
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// The parser ran out of input before it could read its token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no input was provided for {parser}")]
pub struct NoInputProvided {
    /// Name of the parser that expected input.
    pub parser: &'static str,
}

/// User-input parse failure.
///
/// Carries the verbatim input the parser rejected and the cursor offset at
/// which the rejected token started, so the dispatcher can render a message
/// and offer suggestions at that position. The rendered message is the
/// message of the underlying cause.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ParseFailure {
    parser: &'static str,
    input: String,
    cursor: usize,
    #[source]
    source: BoxedCause,
}

impl ParseFailure {
    /// Creates a parse failure for `input` rejected by `parser`.
    #[must_use]
    pub fn new(
        parser: &'static str,
        input: impl Into<String>,
        cursor: usize,
        source: impl Into<BoxedCause>,
    ) -> Self {
        Self {
            parser,
            input: input.into(),
            cursor,
            source: source.into(),
        }
    }

    /// Creates a failure signalling that `parser` found no input at `cursor`.
    #[must_use]
    pub fn no_input(parser: &'static str, cursor: usize) -> Self {
        Self::new(parser, String::new(), cursor, NoInputProvided { parser })
    }

    /// Name of the parser that rejected the input.
    #[must_use]
    pub fn parser(&self) -> &'static str {
        self.parser
    }

    /// Verbatim input that was rejected.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset in the raw command line where the rejected token starts.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the underlying cause when it is of type `E`.
    #[must_use]
    pub fn cause<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }
}

/// A command grammar was declared in a way that cannot hold at runtime.
///
/// Distinct from [`ParseFailure`]: the user typed something valid, but the
/// grammar asked a component for a guarantee it cannot give (for example a
/// single-valued selector that matched several entities).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("grammar error in {component}: {message}")]
pub struct GrammarError {
    component: &'static str,
    message: String,
}

impl GrammarError {
    /// Creates a grammar error raised by `component`.
    #[must_use]
    pub fn new(component: &'static str, message: impl Into<String>) -> Self {
        Self {
            component,
            message: message.into(),
        }
    }

    /// Component that detected the defect.
    #[must_use]
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Description of the defect.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of an argument parser that did not produce a value.
#[derive(Debug, Error)]
pub enum ArgumentParseError {
    /// The user supplied input the parser rejected.
    #[error(transparent)]
    Failure(#[from] ParseFailure),
    /// The grammar is misconfigured for the value that was parsed.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Errors that abort the preprocessor chain.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// A collaborator the preprocessor depends on was not available.
    #[error("required collaborator '{name}' is not available")]
    MissingCollaborator {
        /// Name of the missing collaborator.
        name: String,
    },
    /// Reading or populating the context store failed.
    #[error(transparent)]
    Context(#[from] ContextError),
}

impl PreprocessError {
    /// Creates a [`PreprocessError::MissingCollaborator`].
    #[must_use]
    pub fn missing_collaborator(name: impl Into<String>) -> Self {
        Self::MissingCollaborator { name: name.into() }
    }
}

/// Message rendered to senders when an invocation fails for internal reasons.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "An internal error occurred while attempting to perform this command.";

/// Structured failure of a single invocation, produced at the dispatch boundary.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The preprocessor chain was aborted.
    #[error("preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    /// An argument parser rejected the user's input.
    #[error(transparent)]
    Parse(ParseFailure),
    /// The grammar was misconfigured.
    #[error(transparent)]
    Grammar(GrammarError),
}

impl DispatchError {
    /// Returns `true` when the failure was caused by the sender's input.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Renders the message shown to the sender.
    ///
    /// Parse failures render their own message verbatim. Internal failures
    /// render [`INTERNAL_ERROR_MESSAGE`] so details stay in the logs.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Parse(failure) => failure.to_string(),
            Self::Preprocess(_) | Self::Grammar(_) => INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }
}

impl From<ArgumentParseError> for DispatchError {
    fn from(error: ArgumentParseError) -> Self {
        match error {
            ArgumentParseError::Failure(failure) => Self::Parse(failure),
            ArgumentParseError::Grammar(grammar) => Self::Grammar(grammar),
        }
    }
}
