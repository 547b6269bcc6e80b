/// Default log filter expression used by integrations.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Prefix shared by every environment variable the configuration reads.
pub const ENV_PREFIX: &str = "CIRRUS_";

/// Default log filter expression used by integrations.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Default logging format for integrations.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}
