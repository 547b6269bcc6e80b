//! Selector parser tests against the in-memory platform.

use std::sync::Arc;

use cirrus_core::{ArgumentParseError, ArgumentParser, CommandContext, CommandInput, Suggestion};
use rstest::{fixture, rstest};

use super::*;
use crate::keys::{native_sender_key, platform_sender_key};
use crate::tests::fake::{FakeEntity, FakePlatform, NativeSender, NativeSource};

#[fixture]
fn platform() -> Arc<FakePlatform> {
    Arc::new(FakePlatform::new(false))
}

fn prepared(raw: &str) -> CommandContext<()> {
    let mut context = CommandContext::for_execution((), raw);
    context.store(&platform_sender_key::<FakePlatform>(), NativeSender::named("alex"));
    context
}

fn parse_with<N>(
    platform: &Arc<FakePlatform>,
    raw: &str,
) -> Result<N::Output, ArgumentParseError>
where
    N: SelectorCardinality<FakeEntity>,
{
    let parser: SelectorParser<FakePlatform, Entities, N> = SelectorParser::new(Arc::clone(platform));
    let mut context = prepared(raw);
    parser.parse(&mut context, &mut CommandInput::new(raw))
}

fn names(selection: &EntitySelection<FakeEntity>) -> Vec<&'static str> {
    selection.iter().map(|entity| entity.name).collect()
}

#[rstest]
#[case::everything("@e", vec!["alex", "sam", "gerald"])]
#[case::filtered("@e[type=zombie]", vec!["gerald"])]
#[case::by_name("sam", vec!["sam"])]
fn multiple_selector_returns_matches_in_platform_order(
    platform: Arc<FakePlatform>,
    #[case] raw: &str,
    #[case] expected: Vec<&str>,
) {
    let selection = parse_with::<Multiple>(&platform, raw).expect("selector should parse");
    assert_eq!(names(&selection), expected);
    assert_eq!(selection.input(), raw);
}

#[rstest]
fn multiple_selector_with_no_matches_is_empty(platform: Arc<FakePlatform>) {
    let selection =
        parse_with::<Multiple>(&platform, "@e[type=creeper]").expect("zero matches is not a failure");
    assert!(selection.is_empty());
}

#[rstest]
fn single_selector_exposes_its_entity(platform: Arc<FakePlatform>) {
    let selection = parse_with::<Single>(&platform, "@p").expect("selector should parse");
    assert_eq!(selection.entity().map(|entity| entity.name), Some("alex"));
    assert_eq!(selection.require_entity().map(|entity| entity.kind), Ok("player"));
}

#[rstest]
fn single_selector_with_no_match_fails_only_on_require(platform: Arc<FakePlatform>) {
    let selection = parse_with::<Single>(&platform, "nobody").expect("zero matches is valid");
    assert_eq!(selection.entity(), None);
    assert_eq!(
        selection.require_entity(),
        Err(NoSuchEntity {
            input: String::from("nobody")
        })
    );
    assert_eq!(selection.into_entity(), None);
}

#[rstest]
fn single_selector_over_match_is_a_grammar_error(platform: Arc<FakePlatform>) {
    let error = parse_with::<Single>(&platform, "@e").expect_err("two or more matches");
    let ArgumentParseError::Grammar(grammar) = error else {
        panic!("expected a grammar error, got {error:?}");
    };
    assert_eq!(grammar.component(), "single entity selector");
    assert!(grammar.message().contains("3 matched"));
}

#[test]
fn single_selection_from_two_entities_is_a_cardinality_error() {
    let selection = EntitySelection::new("@a", vec![1_u8, 2]);
    assert_eq!(
        SingleEntitySelection::try_from(selection),
        Err(SelectorCardinalityError {
            input: String::from("@a"),
            matched: 2
        })
    );
}

#[rstest]
#[case::unbalanced("@e[type=")]
#[case::mismatched_closer("@e[type=zombie}")]
#[case::unknown_variable("@x")]
#[case::rejected_by_platform("@e[distance=..5]")]
fn malformed_selectors_render_verbatim(platform: Arc<FakePlatform>, #[case] raw: &str) {
    let error = parse_with::<Multiple>(&platform, raw).expect_err("selector is malformed");
    let ArgumentParseError::Failure(failure) = error else {
        panic!("expected a parse failure, got {error:?}");
    };
    assert_eq!(failure.to_string(), format!("Selector '{raw}' is malformed."));
    assert_eq!(failure.input(), raw);
    assert_eq!(
        failure.cause::<SelectorParseError>().map(SelectorParseError::input),
        Some(raw)
    );
}

#[rstest]
fn unbalanced_selector_message_is_exact(platform: Arc<FakePlatform>) {
    let error = parse_with::<Multiple>(&platform, "@e[type=").expect_err("unbalanced");
    assert_eq!(
        cirrus_core::DispatchError::from(error).render(),
        "Selector '@e[type=' is malformed."
    );
}

#[rstest]
#[case::unknown_variable("@n")]
#[case::dangling_comma("@e[type=pig,]")]
#[case::flag_argument("@e[type]")]
fn selector_content_is_judged_by_the_platform(#[case] raw: &str) {
    let platform = Arc::new(FakePlatform::permissive());

    let selection = parse_with::<Multiple>(&platform, raw).expect("platform accepts the selector");

    assert_eq!(platform.selector_requests(), vec![raw.to_owned()]);
    assert_eq!(selection.len(), 3);
}

#[test]
fn broken_structure_never_reaches_the_platform() {
    let platform = Arc::new(FakePlatform::permissive());

    let error = parse_with::<Multiple>(&platform, "@e[type=pig}").expect_err("closer mismatch");

    assert!(matches!(error, ArgumentParseError::Failure(_)));
    assert!(platform.selector_requests().is_empty());
}

#[rstest]
fn missing_platform_sender_is_a_grammar_error(platform: Arc<FakePlatform>) {
    let parser = MultipleEntitySelectorParser::new(platform);
    let mut context = CommandContext::for_execution((), "@e");

    let error = parser
        .parse(&mut context, &mut CommandInput::new("@e"))
        .expect_err("sender key is missing");

    assert!(matches!(error, ArgumentParseError::Grammar(_)));
}

#[rstest]
fn empty_input_reports_no_input(platform: Arc<FakePlatform>) {
    let error = parse_with::<Multiple>(&platform, "   ").expect_err("no selector typed");
    let ArgumentParseError::Failure(failure) = error else {
        panic!("expected a parse failure, got {error:?}");
    };
    assert!(failure.cause::<cirrus_core::NoInputProvided>().is_some());
    assert_eq!(failure.cursor(), 3);
}

#[rstest]
fn bracketed_selector_consumes_one_token(platform: Arc<FakePlatform>) {
    let parser = MultipleEntitySelectorParser::new(platform);
    let raw = "@e[type=player] rest";
    let mut context = prepared(raw);
    let mut input = CommandInput::new(raw);

    let selection = parser.parse(&mut context, &mut input).expect("selector should parse");

    assert_eq!(selection.len(), 2);
    assert_eq!(input.remaining(), " rest");
}

#[rstest]
fn player_selector_filters_to_players(platform: Arc<FakePlatform>) {
    let parser = MultiplePlayerSelectorParser::new(platform);
    let mut context = prepared("@e");

    let players = parser
        .parse(&mut context, &mut CommandInput::new("@e"))
        .expect("selector should parse");

    assert_eq!(names(&players), vec!["alex", "sam"]);
}

#[rstest]
fn single_player_selector_is_available(platform: Arc<FakePlatform>) {
    let parser = SinglePlayerSelectorParser::new(platform);
    let mut context = prepared("sam");

    let player = parser
        .parse(&mut context, &mut CommandInput::new("sam"))
        .expect("selector should parse");

    assert_eq!(player.into_entity().map(|entity| entity.name), Some("sam"));
}

#[rstest]
fn suggestions_fall_back_to_prefixes(platform: Arc<FakePlatform>) {
    let parser = SingleEntitySelectorParser::new(platform);
    let context = CommandContext::for_suggestions((), "@");

    let all = parser.suggestions(&context, "@");
    let narrowed = parser.suggestions(&context, "@p");

    assert_eq!(all.len(), SELECTOR_PREFIXES.len());
    assert_eq!(narrowed, vec![Suggestion::new("@p")]);
}

#[rstest]
fn suggestions_use_native_engine_when_bridged(platform: Arc<FakePlatform>) {
    let parser = MultipleEntitySelectorParser::new(platform);
    let mut context = CommandContext::for_suggestions((), "@e[");
    context.store(
        &native_sender_key::<FakePlatform>(),
        NativeSource(String::from("native:alex")),
    );

    assert_eq!(
        parser.suggestions(&context, "@e["),
        vec![Suggestion::new("native:alex|@e[")]
    );
}
