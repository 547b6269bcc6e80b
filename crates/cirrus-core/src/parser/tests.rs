//! Contract tests using a small integer parser.

use rstest::rstest;
use thiserror::Error;

use super::*;
use crate::context::ContextKey;
use crate::error::{NoInputProvided, ParseFailure};

const PARSE_COUNT: ContextKey<usize> = ContextKey::new("integer-parser:parse-count");

#[derive(Debug, Error)]
#[error("'{0}' is not a valid integer")]
struct InvalidInteger(String);

struct IntegerParser;

impl ArgumentParser<()> for IntegerParser {
    type Output = i64;

    fn parse(
        &self,
        context: &mut CommandContext<()>,
        input: &mut CommandInput,
    ) -> Result<i64, ArgumentParseError> {
        input.skip_whitespace();
        let cursor = input.cursor();
        let token = input
            .read_token()
            .ok_or_else(|| ParseFailure::no_input("integer", cursor))?;
        let count = context.get_optional(&PARSE_COUNT).copied().unwrap_or(0);
        context.store(&PARSE_COUNT, count + 1);
        token.parse().map_err(|_| {
            ParseFailure::new("integer", token.clone(), cursor, InvalidInteger(token.clone())).into()
        })
    }

    fn suggestions(&self, _context: &CommandContext<()>, input: &str) -> Vec<Suggestion> {
        (0..3)
            .map(|n| n.to_string())
            .filter(|candidate| candidate.starts_with(input))
            .map(Suggestion::new)
            .collect()
    }
}

struct Silent;

impl ArgumentParser<()> for Silent {
    type Output = ();

    fn parse(
        &self,
        _context: &mut CommandContext<()>,
        _input: &mut CommandInput,
    ) -> Result<(), ArgumentParseError> {
        Ok(())
    }
}

#[test]
fn parses_consecutive_tokens_and_caches_under_private_key() {
    let mut context = CommandContext::for_execution((), "12 -4");
    let mut input = CommandInput::new("12 -4");

    assert_eq!(IntegerParser.parse(&mut context, &mut input).ok(), Some(12));
    assert_eq!(IntegerParser.parse(&mut context, &mut input).ok(), Some(-4));
    assert_eq!(context.get(&PARSE_COUNT), Ok(&2));
    assert!(input.is_empty());
}

#[rstest]
#[case::not_a_number("twelve", "'twelve' is not a valid integer", 0)]
#[case::after_space("  x1", "'x1' is not a valid integer", 2)]
fn invalid_token_fails_with_cursor(
    #[case] raw: &str,
    #[case] message: &str,
    #[case] cursor: usize,
) {
    let mut context = CommandContext::for_execution((), raw);
    let mut input = CommandInput::new(raw);

    let error = IntegerParser
        .parse(&mut context, &mut input)
        .expect_err("should fail");

    let ArgumentParseError::Failure(failure) = error else {
        panic!("expected a parse failure, got {error:?}");
    };
    assert_eq!(failure.to_string(), message);
    assert_eq!(failure.cursor(), cursor);
    assert!(failure.cause::<InvalidInteger>().is_some());
}

#[test]
fn empty_input_reports_no_input() {
    let mut context = CommandContext::for_execution((), "");
    let mut input = CommandInput::new("   ");

    let error = IntegerParser
        .parse(&mut context, &mut input)
        .expect_err("should fail");

    let ArgumentParseError::Failure(failure) = error else {
        panic!("expected a parse failure, got {error:?}");
    };
    assert!(failure.cause::<NoInputProvided>().is_some());
    assert_eq!(failure.cursor(), 3);
}

#[test]
fn suggestions_filter_by_prefix() {
    let context = CommandContext::for_suggestions((), "1");
    assert_eq!(
        IntegerParser.suggestions(&context, "1"),
        vec![Suggestion::new("1")]
    );
    assert_eq!(IntegerParser.suggestions(&context, "").len(), 3);
}

#[test]
fn default_suggestions_are_empty() {
    let context = CommandContext::for_suggestions((), "");
    assert!(Silent.suggestions(&context, "anything").is_empty());
}

#[test]
fn suggestion_displays_text() {
    let suggestion = Suggestion::new("@p");
    assert_eq!(suggestion.text(), "@p");
    assert_eq!(suggestion.to_string(), "@p");
}
