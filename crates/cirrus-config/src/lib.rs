//! Shared configuration for the command framework and its integrations.
//!
//! The configuration is deliberately small: logging preferences consumed by
//! telemetry initialisation, and capability override directives applied to
//! the capability registry after the platform has been probed. Values are
//! layered by `ortho_config`: built-in defaults, then configuration files
//! (`.cirrus.toml` or `--config-path`), then `CIRRUS_*` environment
//! variables, then command-line flags.

mod capability;
mod defaults;
mod logging;

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use capability::{
    CapabilityDirective, CapabilityDirectiveParseError, CapabilityOverride, CapabilityOverrides,
    parse_directive_list,
};
pub use defaults::{
    DEFAULT_LOG_FILTER, ENV_PREFIX, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "CIRRUS")]
pub struct Config {
    /// `tracing` filter expression, e.g. `info` or `cirrus_core=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Capability override directives, applied in order.
    #[ortho_config(merge_strategy = "append")]
    pub capability_overrides: Vec<CapabilityDirective>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            capability_overrides: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration files and `CIRRUS_*` variables without reading the
    /// host process's command line.
    ///
    /// Game servers own their argument vector, so only the program name is
    /// handed to the loader.
    ///
    /// # Errors
    ///
    /// Returns the loader error when a file or variable fails to parse.
    pub fn load_from_environment() -> Result<Self, Arc<OrthoError>> {
        Self::load_from_iter([OsString::from(env!("CARGO_PKG_NAME"))])
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Capability overrides keyed by capability name. Later directives win.
    #[must_use]
    pub fn capability_matrix(&self) -> CapabilityOverrides {
        CapabilityOverrides::from_directives(&self.capability_overrides)
    }
}
