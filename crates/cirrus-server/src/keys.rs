//! Context keys typed for a particular [`ServerPlatform`].

use cirrus_core::{ContextKey, keys};

use crate::platform::ServerPlatform;

/// Key holding the native sender of platform `P`.
#[must_use]
pub const fn platform_sender_key<P: ServerPlatform>() -> ContextKey<P::Sender> {
    keys::platform_command_sender::<P::Sender>()
}

/// Key holding the native suggestion-engine sender of platform `P`.
#[must_use]
pub const fn native_sender_key<P: ServerPlatform>() -> ContextKey<P::SuggestionSource> {
    keys::native_suggestion_sender::<P::SuggestionSource>()
}
