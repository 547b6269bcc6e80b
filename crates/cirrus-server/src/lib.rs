//! Game-server platform integration for the Cirrus command pipeline.
//!
//! The `cirrus-server` crate adapts [`cirrus_core`] to a server host exposed
//! through the [`ServerPlatform`] trait. A [`ServerIntegration`] probes the
//! host's capabilities once, applies configured overrides and registers the
//! [`ServerCommandPreprocessor`], which stores the native sender, the
//! bridged suggestion sender and a [`PrimaryThreadExecutor`] in every
//! command context. [`bootstrap()`] loads configuration through
//! `ortho_config` and installs telemetry before building the integration.
//! The [`selector`] module provides entity and player selector parsers
//! resolved through the host's native matcher.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use cirrus_config::Config;
//! use cirrus_core::{IdentityMapper, Task};
//! use cirrus_server::{SelectorRejected, ServerIntegration, ServerPlatform};
//!
//! struct Console;
//!
//! impl ServerPlatform for Console {
//!     type Sender = String;
//!     type SuggestionSource = String;
//!     type Entity = String;
//!     type Player = String;
//!
//!     fn has_native_suggestion_engine(&self) -> bool {
//!         false
//!     }
//!     fn is_primary_thread(&self) -> bool {
//!         true
//!     }
//!     fn schedule(&self, task: Task) {
//!         task();
//!     }
//!     fn suggestion_source(&self, sender: &String) -> String {
//!         sender.clone()
//!     }
//!     fn select_entities(&self, _: &String, selector: &str) -> Result<Vec<String>, SelectorRejected> {
//!         Ok(vec![selector.to_owned()])
//!     }
//!     fn select_players(&self, _: &String, selector: &str) -> Result<Vec<String>, SelectorRejected> {
//!         Ok(vec![selector.to_owned()])
//!     }
//!     fn native_suggestions(&self, _: &String, _: &str) -> Vec<String> {
//!         Vec::new()
//!     }
//! }
//!
//! let integration: ServerIntegration<Console, String> =
//!     ServerIntegration::new(Arc::new(Console), IdentityMapper, &Config::default());
//! let echoed = integration
//!     .manager()
//!     .execute(String::from("console"), "say hi", |_, input| {
//!         Ok(input.remaining().to_owned())
//!     })
//!     .map_err(|error| error.render());
//! assert_eq!(echoed.as_deref(), Ok("say hi"));
//! ```

pub mod bootstrap;
pub mod capabilities;
pub mod executor;
pub mod integration;
pub mod keys;
pub mod mapper;
pub mod platform;
pub mod preprocessor;
pub mod selector;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use self::bootstrap::{
    BootstrapError, Bootstrapped, ConfigLoader, SystemConfigLoader, bootstrap,
};
pub use self::capabilities::ServerCapabilityProbe;
pub use self::executor::PrimaryThreadExecutor;
pub use self::integration::ServerIntegration;
pub use self::keys::{native_sender_key, platform_sender_key};
pub use self::mapper::{NativeSuggestionMapper, SharedSenderMapper};
pub use self::platform::{SelectorRejected, ServerPlatform};
pub use self::preprocessor::ServerCommandPreprocessor;

/// Tracing target for the server integration.
pub(crate) const SERVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::server");
