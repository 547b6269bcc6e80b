//! Selector argument parsers.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use cirrus_core::{
    ArgumentParseError, ArgumentParser, CommandContext, CommandInput, GrammarError, ParseFailure,
    Suggestion,
};
use tracing::debug;

use super::syntax::{check_structure, token_length};
use super::{
    EntitySelection, SELECTOR_TARGET, SelectorCardinalityError, SelectorParseError,
    SingleEntitySelection,
};
use crate::keys::{native_sender_key, platform_sender_key};
use crate::platform::{SelectorRejected, ServerPlatform};

/// Selector prefixes offered when no native suggestion engine is bridged.
pub const SELECTOR_PREFIXES: [&str; 5] = ["@a", "@e", "@p", "@r", "@s"];

/// What a selector resolves to on platform `P`.
pub trait SelectorKind<P: ServerPlatform> {
    /// Matched item type.
    type Item;

    /// Parser name used in errors and logs.
    const NAME: &'static str;

    /// Resolves `selector` through the platform's native matcher.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorRejected`] when the platform refuses the selector.
    fn resolve(
        platform: &P,
        sender: &P::Sender,
        selector: &str,
    ) -> Result<Vec<Self::Item>, SelectorRejected>;
}

/// Selects any entity.
#[derive(Debug, Clone, Copy)]
pub struct Entities;

impl<P: ServerPlatform> SelectorKind<P> for Entities {
    type Item = P::Entity;

    const NAME: &'static str = "entity selector";

    fn resolve(
        platform: &P,
        sender: &P::Sender,
        selector: &str,
    ) -> Result<Vec<P::Entity>, SelectorRejected> {
        platform.select_entities(sender, selector)
    }
}

/// Selects players only.
#[derive(Debug, Clone, Copy)]
pub struct Players;

impl<P: ServerPlatform> SelectorKind<P> for Players {
    type Item = P::Player;

    const NAME: &'static str = "player selector";

    fn resolve(
        platform: &P,
        sender: &P::Sender,
        selector: &str,
    ) -> Result<Vec<P::Player>, SelectorRejected> {
        platform.select_players(sender, selector)
    }
}

/// Constraint on how many matches a selector may produce.
pub trait SelectorCardinality<E> {
    /// Parsed value.
    type Output;

    /// Applies the constraint to a resolved selection.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorCardinalityError`] when the selection has more
    /// matches than the constraint allows.
    fn constrain(selection: EntitySelection<E>) -> Result<Self::Output, SelectorCardinalityError>;
}

/// Any number of matches, including none.
#[derive(Debug, Clone, Copy)]
pub struct Multiple;

impl<E> SelectorCardinality<E> for Multiple {
    type Output = EntitySelection<E>;

    fn constrain(selection: EntitySelection<E>) -> Result<EntitySelection<E>, SelectorCardinalityError> {
        Ok(selection)
    }
}

/// At most one match.
#[derive(Debug, Clone, Copy)]
pub struct Single;

impl<E> SelectorCardinality<E> for Single {
    type Output = SingleEntitySelection<E>;

    fn constrain(
        selection: EntitySelection<E>,
    ) -> Result<SingleEntitySelection<E>, SelectorCardinalityError> {
        SingleEntitySelection::try_from(selection)
    }
}

/// Parses a selector of kind `K` with cardinality `N` on platform `P`.
///
/// Requires the platform sender key in the context, which the server
/// preprocessor populates for every invocation.
pub struct SelectorParser<P, K, N> {
    platform: Arc<P>,
    _selector: PhantomData<fn() -> (K, N)>,
}

/// Parser yielding every matched entity.
pub type MultipleEntitySelectorParser<P> = SelectorParser<P, Entities, Multiple>;
/// Parser yielding at most one entity.
pub type SingleEntitySelectorParser<P> = SelectorParser<P, Entities, Single>;
/// Parser yielding every matched player.
pub type MultiplePlayerSelectorParser<P> = SelectorParser<P, Players, Multiple>;
/// Parser yielding at most one player.
pub type SinglePlayerSelectorParser<P> = SelectorParser<P, Players, Single>;

impl<P, K, N> SelectorParser<P, K, N> {
    /// Creates a parser resolving through `platform`.
    #[must_use]
    pub const fn new(platform: Arc<P>) -> Self {
        Self {
            platform,
            _selector: PhantomData,
        }
    }
}

impl<P, K, N> Clone for SelectorParser<P, K, N> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.platform))
    }
}

impl<P, K, N> fmt::Debug for SelectorParser<P, K, N> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SelectorParser")
            .field("kind", &std::any::type_name::<K>())
            .field("cardinality", &std::any::type_name::<N>())
            .finish_non_exhaustive()
    }
}

impl<C, P, K, N> ArgumentParser<C> for SelectorParser<P, K, N>
where
    P: ServerPlatform,
    K: SelectorKind<P>,
    N: SelectorCardinality<K::Item>,
{
    type Output = N::Output;

    fn parse(
        &self,
        context: &mut CommandContext<C>,
        input: &mut CommandInput,
    ) -> Result<N::Output, ArgumentParseError> {
        input.skip_whitespace();
        let cursor = input.cursor();
        let token = input
            .read_with(token_length)
            .ok_or_else(|| ParseFailure::no_input(K::NAME, cursor))?;

        if let Err(reason) = check_structure(&token) {
            debug!(
                target: SELECTOR_TARGET,
                selector = %token,
                %reason,
                "selector structure is broken"
            );
            return Err(malformed(K::NAME, token, cursor));
        }

        let sender = context.get(&platform_sender_key::<P>()).map_err(|error| {
            GrammarError::new(
                K::NAME,
                format!("{error}; the server preprocessor must run before selectors are parsed"),
            )
        })?;

        let matches = K::resolve(&self.platform, sender, &token).map_err(|rejected| {
            debug!(
                target: SELECTOR_TARGET,
                selector = %token,
                reason = %rejected.reason,
                "platform rejected selector"
            );
            malformed(K::NAME, token.clone(), cursor)
        })?;
        debug!(
            target: SELECTOR_TARGET,
            selector = %token,
            matched = matches.len(),
            "resolved selector"
        );

        N::constrain(EntitySelection::new(token, matches))
            .map_err(|error| GrammarError::from(error).into())
    }

    fn suggestions(&self, context: &CommandContext<C>, input: &str) -> Vec<Suggestion> {
        match context.get_optional(&native_sender_key::<P>()) {
            Some(source) => self
                .platform
                .native_suggestions(source, input)
                .into_iter()
                .map(Suggestion::new)
                .collect(),
            None => SELECTOR_PREFIXES
                .iter()
                .filter(|prefix| prefix.starts_with(input))
                .map(|prefix| Suggestion::new(*prefix))
                .collect(),
        }
    }
}

fn malformed(parser: &'static str, input: String, cursor: usize) -> ArgumentParseError {
    let error = SelectorParseError::new(input.as_str());
    ParseFailure::new(parser, input, cursor, error).into()
}
