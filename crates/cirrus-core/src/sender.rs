//! Bridge between the generic sender type and the platform-native actor.
//!
//! A [`SenderMapper`] is a pair of pure functions. `reverse(map(n))` must be
//! behaviourally equivalent to `n` for every native value the platform hands
//! out, but transient native state may be lost on the way back. Mappers hold
//! no state beyond the functions themselves and are shared read-only across
//! every invocation.

use std::fmt;
use std::marker::PhantomData;

/// Bidirectional conversion between a native sender `N` and a generic sender `C`.
pub trait SenderMapper<N, C>: Send + Sync {
    /// Wraps a native sender into the generic sender type.
    fn map(&self, native: N) -> C;

    /// Recovers the native sender behind a generic sender.
    fn reverse(&self, sender: &C) -> N;
}

/// Mapper for integrations whose generic sender is the native sender.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityMapper;

impl<T: Clone> SenderMapper<T, T> for IdentityMapper {
    fn map(&self, native: T) -> T {
        native
    }

    fn reverse(&self, sender: &T) -> T {
        sender.clone()
    }
}

/// Mapper built from a pair of closures.
///
/// # Example
///
/// ```
/// use cirrus_core::{FnSenderMapper, SenderMapper};
///
/// let mapper = FnSenderMapper::new(|id: u32| format!("player-{id}"), |name: &String| {
///     name.trim_start_matches("player-").parse().unwrap_or_default()
/// });
///
/// assert_eq!(mapper.map(7), "player-7");
/// assert_eq!(mapper.reverse(&String::from("player-7")), 7);
/// ```
pub struct FnSenderMapper<N, C, M, R> {
    map: M,
    reverse: R,
    _types: PhantomData<fn(N) -> C>,
}

impl<N, C, M, R> FnSenderMapper<N, C, M, R>
where
    M: Fn(N) -> C,
    R: Fn(&C) -> N,
{
    /// Creates a mapper from its forward and reverse functions.
    #[must_use]
    pub fn new(map: M, reverse: R) -> Self {
        Self {
            map,
            reverse,
            _types: PhantomData,
        }
    }
}

impl<N, C, M, R> SenderMapper<N, C> for FnSenderMapper<N, C, M, R>
where
    M: Fn(N) -> C + Send + Sync,
    R: Fn(&C) -> N + Send + Sync,
{
    fn map(&self, native: N) -> C {
        (self.map)(native)
    }

    fn reverse(&self, sender: &C) -> N {
        (self.reverse)(sender)
    }
}

impl<N, C, M, R> fmt::Debug for FnSenderMapper<N, C, M, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("FnSenderMapper").finish_non_exhaustive()
    }
}
