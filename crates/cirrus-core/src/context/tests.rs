//! Unit tests for the typed context store.

use std::cell::Cell;

use rstest::{fixture, rstest};

use super::*;
use crate::context::keys::{native_suggestion_sender, platform_command_sender};

const COUNT: ContextKey<u32> = ContextKey::new("count");
const COUNT_TEXT: ContextKey<String> = ContextKey::new("count");
const LABEL: ContextKey<String> = ContextKey::new("label");

#[fixture]
fn context() -> CommandContext<String> {
    CommandContext::for_execution(String::from("alex"), "give alex 3")
}

#[rstest]
fn new_context_is_empty(context: CommandContext<String>) {
    assert!(context.is_empty());
    assert_eq!(context.len(), 0);
    assert_eq!(context.sender(), "alex");
    assert_eq!(context.raw_input(), "give alex 3");
    assert!(!context.is_suggestions());
}

#[test]
fn suggestion_context_reports_pass() {
    let context = CommandContext::for_suggestions((), "gi");
    assert!(context.is_suggestions());
    assert_eq!(context.pass(), InvocationPass::Suggestions);
}

#[rstest]
fn store_then_get(mut context: CommandContext<String>) {
    assert_eq!(context.store(&COUNT, 3), None);
    assert_eq!(context.get(&COUNT), Ok(&3));
    assert!(context.contains(&COUNT));
}

#[rstest]
fn store_overwrites_and_returns_previous(mut context: CommandContext<String>) {
    context.store(&COUNT, 1);
    assert_eq!(context.store(&COUNT, 2), Some(1));
    assert_eq!(context.get(&COUNT), Ok(&2));
    assert_eq!(context.len(), 1);
}

#[rstest]
fn get_missing_key_is_not_present(context: CommandContext<String>) {
    let error = context.get(&LABEL).expect_err("label is absent");
    assert_eq!(
        error,
        ContextError::NotPresent {
            key: "label",
            type_name: std::any::type_name::<String>(),
        }
    );
    assert!(!context.contains(&LABEL));
    assert!(context.get_optional(&LABEL).is_none());
}

#[rstest]
fn same_name_different_type_never_collides(mut context: CommandContext<String>) {
    context.store(&COUNT, 7);
    context.store(&COUNT_TEXT, String::from("seven"));

    assert_eq!(context.get(&COUNT), Ok(&7));
    assert_eq!(
        context.get(&COUNT_TEXT).map(String::as_str),
        Ok("seven")
    );
    assert_eq!(context.len(), 2);
}

#[rstest]
fn compute_if_absent_runs_supplier_once(mut context: CommandContext<String>) {
    let calls = Cell::new(0_u32);
    let supplier = |_: &ContextKey<u32>| {
        calls.set(calls.get() + 1);
        calls.get() * 10
    };

    let first = *context
        .compute_if_absent(&COUNT, supplier)
        .expect("value computed");
    let second = *context
        .compute_if_absent(&COUNT, supplier)
        .expect("value reused");

    assert_eq!(first, 10);
    assert_eq!(second, 10);
    assert_eq!(calls.get(), 1);
}

#[rstest]
fn compute_if_absent_keeps_existing_value(mut context: CommandContext<String>) {
    context.store(&LABEL, String::from("existing"));
    let value = context
        .compute_if_absent(&LABEL, |_| String::from("computed"))
        .expect("existing value returned");
    assert_eq!(value, "existing");
}

#[rstest]
fn remove_returns_value(mut context: CommandContext<String>) {
    context.store(&COUNT, 5);
    assert_eq!(context.remove(&COUNT), Some(5));
    assert!(!context.contains(&COUNT));
    assert_eq!(context.remove(&COUNT), None);
}

#[test]
fn well_known_sender_keys_are_distinguished_by_name() {
    let mut context = CommandContext::for_execution((), "");
    context.store(&platform_command_sender::<u64>(), 1);
    context.store(&native_suggestion_sender::<u64>(), 2);

    assert_eq!(context.get(&platform_command_sender::<u64>()), Ok(&1));
    assert_eq!(context.get(&native_suggestion_sender::<u64>()), Ok(&2));
    assert!(!context.contains(&platform_command_sender::<u32>()));
}

#[rstest]
fn debug_lists_key_names(mut context: CommandContext<String>) {
    context.store(&LABEL, String::from("x"));
    context.store(&COUNT, 1);
    let rendered = format!("{context:?}");
    assert!(rendered.contains(r#"keys: ["count", "label"]"#), "{rendered}");
}
