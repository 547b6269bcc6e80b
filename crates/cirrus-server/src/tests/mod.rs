//! Crate-level integration and BDD tests.

use std::sync::Arc;

use cirrus_config::{Config, parse_directive_list};
use cirrus_core::{ArgumentParser, NATIVE_SUGGESTIONS, Suggestion};
use rstest::rstest;

use crate::integration::ServerIntegration;
use crate::keys::platform_sender_key;
use crate::selector::{Entities, Single, SingleEntitySelection};



use self::fake::{FakeEntity, FakePlatform, GameSender, game_sender_mapper};

fn integration(native: bool, config: &Config) -> ServerIntegration<FakePlatform, GameSender> {
    ServerIntegration::new(
        Arc::new(FakePlatform::new(native)),
        game_sender_mapper(),
        config,
    )
}

fn sender(name: &str) -> GameSender {
    GameSender {
        name: name.to_owned(),
    }
}

#[test]
fn capabilities_are_probed_once_across_invocations() {
    let server = integration(true, &Config::default());

    for _ in 0..10 {
        assert!(server.has_capability(NATIVE_SUGGESTIONS));
        server
            .manager()
            .execute(sender("alex"), "ping", |_, _| Ok(()))
            .expect("invocation succeeds");
    }

    assert_eq!(server.platform().engine_probes(), 1);
}

#[rstest]
#[case::probed_present(true, "", true)]
#[case::probed_absent(false, "", false)]
#[case::denied(true, "native-suggestions=deny", false)]
#[case::forced(false, "native-suggestions=force", true)]
#[case::allowed(false, "native-suggestions=allow", false)]
fn overrides_apply_after_probing(
    #[case] native: bool,
    #[case] directives: &str,
    #[case] expected: bool,
) {
    let config = Config {
        capability_overrides: parse_directive_list(directives).expect("directives parse"),
        ..Config::default()
    };

    let server = integration(native, &config);

    assert_eq!(server.has_capability(NATIVE_SUGGESTIONS), expected);
}

#[test]
fn executes_single_selector_against_the_invoking_sender() {
    let server = integration(false, &Config::default());
    let parser = server.selector_parser::<Entities, Single>();

    let target = server
        .manager()
        .execute(sender("sam"), "@e[type=zombie]", |context, input| {
            assert_eq!(
                context.get(&platform_sender_key::<FakePlatform>()).map(|native| native.name.as_str()),
                Ok("sam")
            );
            parser.parse(context, input)
        })
        .map(SingleEntitySelection::into_entity);

    assert_eq!(
        target.ok().flatten(),
        Some(FakeEntity {
            name: "gerald",
            kind: "zombie"
        })
    );
}

#[test]
fn malformed_selector_is_rendered_to_the_sender() {
    let server = integration(false, &Config::default());
    let parser = server.selector_parser::<Entities, Single>();

    let error = server
        .manager()
        .execute(sender("sam"), "@e[type=", |context, input| {
            parser.parse(context, input).map(drop)
        })
        .expect_err("selector is malformed");

    assert!(error.is_user_error());
    assert_eq!(error.render(), "Selector '@e[type=' is malformed.");
}

#[rstest]
#[case::bridged(true, vec![Suggestion::new("native:alex|@")])]
#[case::fallback(false, vec![
    Suggestion::new("@a"),
    Suggestion::new("@e"),
    Suggestion::new("@p"),
    Suggestion::new("@r"),
    Suggestion::new("@s"),
])]
fn suggestions_follow_capability(#[case] native: bool, #[case] expected: Vec<Suggestion>) {
    let server = integration(native, &Config::default());
    let parser = server.selector_parser::<Entities, Single>();

    let suggestions = server
        .manager()
        .suggest(sender("alex"), "@", &parser)
        .expect("suggestions succeed");

    assert_eq!(suggestions, expected);
}

#[test]
fn leading_preprocessors_run_first() {
    let server: ServerIntegration<FakePlatform, GameSender> =
        ServerIntegration::with_leading_preprocessors(
            Arc::new(FakePlatform::new(false)),
            game_sender_mapper(),
            &Config::default(),
            |manager| {
                manager.register_preprocessor_fn(|preprocessing| {
                    let sender_seen = preprocessing
                        .command_context()
                        .contains(&platform_sender_key::<FakePlatform>());
                    assert!(!sender_seen);
                    Ok(())
                });
            },
        );

    assert_eq!(server.manager().preprocessors().len(), 2);
    assert_eq!(
        server.map_sender(fake::NativeSender::named("sam")),
        sender("sam")
    );
}
