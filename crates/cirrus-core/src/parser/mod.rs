//! Argument parser contract.
//!
//! A parser consumes zero or more tokens from the [`CommandInput`] and either
//! produces a typed value or reports why it could not. Parsers may cache
//! intermediate results in the context under their own private keys but must
//! not otherwise write to it.

#[cfg(test)]
mod tests;

use std::fmt;

use crate::context::CommandContext;
use crate::error::ArgumentParseError;
use crate::input::CommandInput;

/// A completion candidate for the token under the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Suggestion {
    text: String,
}

impl Suggestion {
    /// Creates a suggestion offering `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Text that would replace the current token.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.text)
    }
}

/// Parses one argument of type [`ArgumentParser::Output`] for senders of type `C`.
pub trait ArgumentParser<C> {
    /// Value produced on success.
    type Output;

    /// Parses the next argument from `input`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentParseError::Failure`] for input the user should fix
    /// and [`ArgumentParseError::Grammar`] when the grammar cannot hold.
    fn parse(
        &self,
        context: &mut CommandContext<C>,
        input: &mut CommandInput,
    ) -> Result<Self::Output, ArgumentParseError>;

    /// Completion candidates for the partially typed `input`.
    fn suggestions(&self, _context: &CommandContext<C>, _input: &str) -> Vec<Suggestion> {
        Vec::new()
    }
}
