//! Selector arguments resolved through the platform's native matcher.
//!
//! Parsing flows from the raw token, through the platform's multi-match
//! resolution, to an ordered [`EntitySelection`]. Single-valued grammar
//! tokens wrap that selection in a [`SingleEntitySelection`], which enforces
//! at most one match. Over-matching is a grammar defect and is reported as a
//! [`GrammarError`], never as a parse failure.

mod parser;
pub mod syntax;

#[cfg(test)]
mod tests;

use std::slice;

use cirrus_core::GrammarError;
use thiserror::Error;

pub use self::parser::{
    Entities, Multiple, MultipleEntitySelectorParser, MultiplePlayerSelectorParser, Players,
    SELECTOR_PREFIXES, SelectorCardinality, SelectorKind, SelectorParser, Single,
    SingleEntitySelectorParser, SinglePlayerSelectorParser,
};

/// Tracing target for selector resolution.
pub(crate) const SELECTOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::selector");

/// Selector input that the platform cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Selector '{input}' is malformed.")]
pub struct SelectorParseError {
    input: String,
}

impl SelectorParseError {
    /// Creates an error for the verbatim `input`.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The rejected input, exactly as typed.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A single-valued selector matched more than one entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("more than one entity selected by single entity selector '{input}' ({matched} matched)")]
pub struct SelectorCardinalityError {
    /// Selector input.
    pub input: String,
    /// Number of entities it matched.
    pub matched: usize,
}

impl From<SelectorCardinalityError> for GrammarError {
    fn from(error: SelectorCardinalityError) -> Self {
        Self::new("single entity selector", error.to_string())
    }
}

/// A single-valued selector matched nothing where a match was required.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selector '{input}' did not match any entity")]
pub struct NoSuchEntity {
    /// Selector input.
    pub input: String,
}

/// Ordered matches for a selector, in the platform's resolution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySelection<E> {
    input: String,
    entities: Vec<E>,
}

impl<E> EntitySelection<E> {
    /// Wraps the matches resolved for `input`.
    #[must_use]
    pub fn new(input: impl Into<String>, entities: Vec<E>) -> Self {
        Self {
            input: input.into(),
            entities,
        }
    }

    /// The selector as typed.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Matched entities.
    #[must_use]
    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over the matches.
    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.entities.iter()
    }

    /// Consumes the selection, returning the matches.
    #[must_use]
    pub fn into_entities(self) -> Vec<E> {
        self.entities
    }
}

impl<E> IntoIterator for EntitySelection<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a EntitySelection<E> {
    type Item = &'a E;
    type IntoIter = slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// View over an [`EntitySelection`] holding at most one match.
///
/// # Example
///
/// ```
/// use cirrus_server::selector::{EntitySelection, SingleEntitySelection};
///
/// let none = SingleEntitySelection::try_from(EntitySelection::<u32>::new("@p", vec![]))
///     .map_err(|error| error.to_string());
/// assert_eq!(none.as_ref().map(SingleEntitySelection::entity), Ok(None));
///
/// let many = SingleEntitySelection::try_from(EntitySelection::new("@a", vec![1, 2]));
/// assert!(many.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleEntitySelection<E> {
    selection: EntitySelection<E>,
}

impl<E> SingleEntitySelection<E> {
    /// The matched entity, if any.
    #[must_use]
    pub fn entity(&self) -> Option<&E> {
        self.selection.entities().first()
    }

    /// The matched entity.
    ///
    /// # Errors
    ///
    /// Returns [`NoSuchEntity`] when the selector matched nothing.
    pub fn require_entity(&self) -> Result<&E, NoSuchEntity> {
        self.entity().ok_or_else(|| NoSuchEntity {
            input: self.selection.input().to_owned(),
        })
    }

    /// The selector as typed.
    #[must_use]
    pub fn input(&self) -> &str {
        self.selection.input()
    }

    /// The underlying selection.
    #[must_use]
    pub const fn selection(&self) -> &EntitySelection<E> {
        &self.selection
    }

    /// Consumes the view, returning the matched entity if any.
    #[must_use]
    pub fn into_entity(self) -> Option<E> {
        self.selection.into_entities().into_iter().next()
    }
}

impl<E> TryFrom<EntitySelection<E>> for SingleEntitySelection<E> {
    type Error = SelectorCardinalityError;

    fn try_from(selection: EntitySelection<E>) -> Result<Self, Self::Error> {
        if selection.len() > 1 {
            return Err(SelectorCardinalityError {
                input: selection.input,
                matched: selection.entities.len(),
            });
        }
        Ok(Self { selection })
    }
}
