//! Cursor over the raw command line consumed by argument parsers.

/// Unconsumed remainder of a raw input line.
///
/// Tokens are separated by ASCII whitespace. Parsers that need a different
/// notion of token (for example one that may contain bracketed spaces) scan
/// the remainder themselves and call [`CommandInput::read_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInput {
    raw: String,
    cursor: usize,
}

impl CommandInput {
    /// Creates a cursor positioned at the start of `raw`.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            cursor: 0,
        }
    }

    /// The complete input line.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Byte offset of the next unconsumed character.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Everything that has not been consumed yet.
    #[must_use]
    pub fn remaining(&self) -> &str {
        self.raw.get(self.cursor..).unwrap_or_default()
    }

    /// Returns `true` when only whitespace remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining().trim_start().is_empty()
    }

    /// Advances past leading whitespace.
    pub fn skip_whitespace(&mut self) {
        let remaining = self.remaining();
        self.cursor += remaining.len() - remaining.trim_start().len();
    }

    /// Returns the next whitespace-delimited token without consuming it.
    #[must_use]
    pub fn peek_token(&self) -> Option<&str> {
        self.remaining().split_whitespace().next()
    }

    /// Consumes and returns the next whitespace-delimited token.
    pub fn read_token(&mut self) -> Option<String> {
        self.read_with(|remaining| {
            remaining
                .find(char::is_whitespace)
                .unwrap_or(remaining.len())
        })
    }

    /// Skips whitespace, then consumes the prefix whose byte length `scan`
    /// reports for the remainder. Returns `None` when nothing is consumed.
    ///
    /// Lengths that overshoot the remainder or split a character consume the
    /// whole remainder.
    pub fn read_with<F>(&mut self, scan: F) -> Option<String>
    where
        F: FnOnce(&str) -> usize,
    {
        self.skip_whitespace();
        let remaining = self.remaining();
        let length = scan(remaining);
        let consumed = remaining.get(..length).unwrap_or(remaining);
        if consumed.is_empty() {
            return None;
        }
        let token = consumed.to_owned();
        self.cursor += token.len();
        Some(token)
    }
}
