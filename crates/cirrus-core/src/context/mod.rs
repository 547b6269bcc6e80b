//! Per-invocation typed context store.
//!
//! A [`CommandContext`] is created for every raw input line and dropped once
//! execution or suggestion generation finishes. Values are stored under
//! [`ContextKey`]s whose identity is the pair of key name and declared value
//! type, so two components that happen to pick the same name for different
//! types never observe each other's values.

pub mod keys;

#[cfg(test)]
mod tests;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::marker::PhantomData;

use crate::error::ContextError;

/// Typed key into a [`CommandContext`].
///
/// # Example
///
/// ```
/// use cirrus_core::{CommandContext, ContextKey};
///
/// const RETRIES: ContextKey<u8> = ContextKey::new("retries");
///
/// let mut context = CommandContext::for_execution("console", "retry 3");
/// context.store(&RETRIES, 3);
/// assert_eq!(context.get(&RETRIES), Ok(&3));
/// ```
pub struct ContextKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    /// Creates a key with the given name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    /// Name of the key.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: 'static> ContextKey<T> {
    fn slot(&self) -> Slot {
        Slot {
            name: self.name,
            value_type: TypeId::of::<T>(),
        }
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ContextKey")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Slot {
    name: &'static str,
    value_type: TypeId,
}

type StoredValue = Box<dyn Any + Send + Sync>;

/// Which pass over the input created the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationPass {
    /// The command will be executed.
    Execution,
    /// Only suggestions are being generated.
    Suggestions,
}

/// Typed key/value store owned by a single command invocation.
pub struct CommandContext<C> {
    sender: C,
    pass: InvocationPass,
    raw_input: String,
    values: HashMap<Slot, StoredValue>,
}

impl<C> CommandContext<C> {
    /// Creates an empty context for `sender`.
    #[must_use]
    pub fn new(sender: C, pass: InvocationPass, raw_input: impl Into<String>) -> Self {
        Self {
            sender,
            pass,
            raw_input: raw_input.into(),
            values: HashMap::new(),
        }
    }

    /// Creates an empty context for an execution pass.
    #[must_use]
    pub fn for_execution(sender: C, raw_input: impl Into<String>) -> Self {
        Self::new(sender, InvocationPass::Execution, raw_input)
    }

    /// Creates an empty context for a suggestion pass.
    #[must_use]
    pub fn for_suggestions(sender: C, raw_input: impl Into<String>) -> Self {
        Self::new(sender, InvocationPass::Suggestions, raw_input)
    }

    /// The sender on whose behalf the command runs.
    #[must_use]
    pub const fn sender(&self) -> &C {
        &self.sender
    }

    /// Pass that created this context.
    #[must_use]
    pub const fn pass(&self) -> InvocationPass {
        self.pass
    }

    /// Returns `true` when the context only serves suggestion generation.
    #[must_use]
    pub const fn is_suggestions(&self) -> bool {
        matches!(self.pass, InvocationPass::Suggestions)
    }

    /// Raw input line the context was created for.
    #[must_use]
    pub const fn raw_input(&self) -> &str {
        self.raw_input.as_str()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn store<T>(&mut self, key: &ContextKey<T>, value: T) -> Option<T>
    where
        T: Send + Sync + 'static,
    {
        self.values
            .insert(key.slot(), Box::new(value))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NotPresent`] when no value is stored.
    pub fn get<T: 'static>(&self, key: &ContextKey<T>) -> Result<&T, ContextError> {
        self.get_optional(key)
            .ok_or_else(|| ContextError::not_present::<T>(key.name()))
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get_optional<T: 'static>(&self, key: &ContextKey<T>) -> Option<&T> {
        self.values
            .get(&key.slot())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns `true` when a value is stored under `key`.
    #[must_use]
    pub fn contains<T: 'static>(&self, key: &ContextKey<T>) -> bool {
        self.values.contains_key(&key.slot())
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove<T: 'static>(&mut self, key: &ContextKey<T>) -> Option<T> {
        self.values
            .remove(&key.slot())
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
    }

    /// Returns the value under `key`, computing and storing it first when
    /// absent. `supplier` runs at most once per key for the lifetime of the
    /// context; exclusive access is guaranteed by `&mut self`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NotPresent`] only if the stored value cannot be
    /// viewed as `T`, which the key identity rules out.
    pub fn compute_if_absent<T, F>(
        &mut self,
        key: &ContextKey<T>,
        supplier: F,
    ) -> Result<&T, ContextError>
    where
        T: Send + Sync + 'static,
        F: FnOnce(&ContextKey<T>) -> T,
    {
        let value = match self.values.entry(key.slot()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(Box::new(supplier(key))),
        };
        value
            .downcast_ref::<T>()
            .ok_or_else(|| ContextError::not_present::<T>(key.name()))
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<C: fmt::Debug> fmt::Debug for CommandContext<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(|slot| slot.name).collect();
        keys.sort_unstable();
        formatter
            .debug_struct("CommandContext")
            .field("sender", &self.sender)
            .field("pass", &self.pass)
            .field("raw_input", &self.raw_input)
            .field("keys", &keys)
            .finish()
    }
}
