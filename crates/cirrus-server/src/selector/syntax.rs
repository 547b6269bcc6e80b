//! Structural checks for selector tokens.
//!
//! A selector is either a bare name or a variable such as `@e`, optionally
//! followed by a bracketed argument list. Values may be quoted and may nest
//! brackets or braces, so token boundaries are found with a small state
//! machine rather than by splitting on whitespace. Only the structure needed
//! to find the boundary is checked here; the platform's resolver decides
//! whether variables and arguments are valid.

use thiserror::Error;

/// Why a selector token failed the structural check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorSyntaxError {
    /// A bracket was opened but never closed, or closed without being opened.
    #[error("unbalanced selector brackets")]
    UnbalancedBrackets,
    /// A bracket was closed by the wrong kind of closer.
    #[error("expected '{expected}' but found '{found}'")]
    MismatchedBracket {
        /// Closer matching the innermost open bracket.
        expected: char,
        /// Closer actually found.
        found: char,
    },
    /// A quoted argument value was never closed.
    #[error("unterminated quoted argument")]
    UnterminatedQuote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Square,
    Brace,
}

impl Bracket {
    const fn opened_by(ch: char) -> Option<Self> {
        match ch {
            '[' => Some(Self::Square),
            '{' => Some(Self::Brace),
            _ => None,
        }
    }

    const fn closed_by(ch: char) -> Option<Self> {
        match ch {
            ']' => Some(Self::Square),
            '}' => Some(Self::Brace),
            _ => None,
        }
    }

    const fn closer(self) -> char {
        match self {
            Self::Square => ']',
            Self::Brace => '}',
        }
    }
}

#[derive(Debug, Default)]
struct Nesting {
    open: Vec<Bracket>,
    quote: Option<char>,
    escaped: bool,
}

impl Nesting {
    /// Advances over `ch`, returning `true` when it is structural (outside quotes).
    fn step(&mut self, ch: char) -> Result<bool, SelectorSyntaxError> {
        if let Some(open) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if ch == '\\' {
                self.escaped = true;
            } else if ch == open {
                self.quote = None;
            }
            return Ok(false);
        }
        if matches!(ch, '"' | '\'') && !self.open.is_empty() {
            self.quote = Some(ch);
            return Ok(false);
        }
        if let Some(bracket) = Bracket::opened_by(ch) {
            self.open.push(bracket);
        } else if let Some(bracket) = Bracket::closed_by(ch) {
            match self.open.pop() {
                Some(innermost) if innermost == bracket => {}
                Some(innermost) => {
                    return Err(SelectorSyntaxError::MismatchedBracket {
                        expected: innermost.closer(),
                        found: ch,
                    });
                }
                None => return Err(SelectorSyntaxError::UnbalancedBrackets),
            }
        }
        Ok(true)
    }

    const fn depth(&self) -> usize {
        self.open.len()
    }
}

/// Byte length of the selector token at the start of `remaining`.
///
/// Whitespace only ends the token outside brackets and quotes; an unclosed
/// argument list extends to the end of the input.
#[must_use]
pub fn token_length(remaining: &str) -> usize {
    let mut nesting = Nesting::default();
    for (index, ch) in remaining.char_indices() {
        let structural = nesting.step(ch).unwrap_or(true);
        if structural && nesting.depth() == 0 && ch.is_whitespace() {
            return index;
        }
    }
    remaining.len()
}

/// Checks that every bracket in `token` is closed by its own kind and that
/// quoted values are terminated.
///
/// # Errors
///
/// Returns a [`SelectorSyntaxError`] describing the first problem found.
pub fn check_structure(token: &str) -> Result<(), SelectorSyntaxError> {
    let mut nesting = Nesting::default();
    for ch in token.chars() {
        nesting.step(ch)?;
    }
    if nesting.quote.is_some() {
        return Err(SelectorSyntaxError::UnterminatedQuote);
    }
    if nesting.depth() > 0 {
        return Err(SelectorSyntaxError::UnbalancedBrackets);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::bare_variable("@e rest", 2)]
    #[case::arguments_with_spaces("@e[type=zombie, limit=1] rest", 24)]
    #[case::quoted_bracket("@e[name=\"a ] b\"] x", 16)]
    #[case::unclosed("@e[type=", 8)]
    #[case::mismatched_closer("@e[type=pig} rest", 12)]
    #[case::name("alex next", 4)]
    #[case::empty("", 0)]
    fn finds_token_boundaries(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(token_length(input), expected);
    }

    #[rstest]
    #[case::variable("@p")]
    #[case::unknown_variable("@n")]
    #[case::bare_at("@")]
    #[case::empty_arguments("@e[]")]
    #[case::arguments("@e[type=zombie,limit=2]")]
    #[case::dangling_comma("@e[type=pig,]")]
    #[case::flag_argument("@e[type]")]
    #[case::nested("@a[scores={kills=1..,deaths=0}]")]
    #[case::quoted("@e[name=\"Big, Bad\"]")]
    #[case::quoted_closer("@e[name=\"}\"]")]
    #[case::name("alex")]
    #[case::uuid("dd12be42-52a9-4a91-a8a1-11c01849e498")]
    fn leaves_content_to_the_platform(#[case] token: &str) {
        assert_eq!(check_structure(token), Ok(()));
    }

    #[rstest]
    #[case::unbalanced("@e[type=", SelectorSyntaxError::UnbalancedBrackets)]
    #[case::stray_closer("al]ex", SelectorSyntaxError::UnbalancedBrackets)]
    #[case::unterminated_quote("@e[name=\"open]", SelectorSyntaxError::UnterminatedQuote)]
    #[case::brace_closes_square(
        "@e[type=pig}",
        SelectorSyntaxError::MismatchedBracket { expected: ']', found: '}' }
    )]
    #[case::square_closes_brace(
        "@a[scores={kills=1]]",
        SelectorSyntaxError::MismatchedBracket { expected: '}', found: ']' }
    )]
    fn rejects_broken_structure(#[case] token: &str, #[case] expected: SelectorSyntaxError) {
        assert_eq!(check_structure(token), Err(expected));
    }
}
