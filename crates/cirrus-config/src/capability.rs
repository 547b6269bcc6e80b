use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Directive applied to a platform capability after probing.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CapabilityOverride {
    /// Report the capability as present even when the probe declined it.
    Force,
    /// Report the capability as absent regardless of the probe result.
    Deny,
    /// Keep whatever the probe reported (default behaviour).
    #[default]
    Allow,
}

/// Errors produced when parsing [`CapabilityDirective`] values.
#[derive(Debug, Error)]
pub enum CapabilityDirectiveParseError {
    /// Override assignment (`=`) was missing from the directive.
    #[error("directive '{0}' is missing the override assignment '='")]
    MissingDirective(String),
    /// The capability name was blank.
    #[error("directive '{0}' does not name a capability")]
    MissingCapability(String),
    /// The override directive could not be parsed.
    #[error("unsupported capability directive '{0}'")]
    InvalidDirective(String),
}

/// Declarative override for a single capability, written `name=override`.
///
/// Configuration files, `CIRRUS_CAPABILITY_OVERRIDES` and the
/// `--capability-overrides` flag all use the textual form.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct CapabilityDirective {
    /// Capability identifier such as `native-suggestions`.
    pub capability: String,
    /// Override applied to the capability.
    pub directive: CapabilityOverride,
}

impl CapabilityDirective {
    /// Creates a new directive.
    #[must_use]
    pub fn new(capability: impl Into<String>, directive: CapabilityOverride) -> Self {
        Self {
            capability: capability.into(),
            directive,
        }
    }
}

impl fmt::Display for CapabilityDirective {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}={}", self.capability, self.directive)
    }
}

impl FromStr for CapabilityDirective {
    type Err = CapabilityDirectiveParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (capability, directive) = input
            .split_once('=')
            .ok_or_else(|| CapabilityDirectiveParseError::MissingDirective(input.to_string()))?;
        if capability.trim().is_empty() {
            return Err(CapabilityDirectiveParseError::MissingCapability(
                input.to_string(),
            ));
        }
        let parsed = CapabilityOverride::from_str(directive.trim())
            .map_err(|_| CapabilityDirectiveParseError::InvalidDirective(directive.to_string()))?;
        Ok(Self::new(normalise_key(capability), parsed))
    }
}

impl TryFrom<String> for CapabilityDirective {
    type Error = CapabilityDirectiveParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CapabilityDirective> for String {
    fn from(directive: CapabilityDirective) -> Self {
        directive.to_string()
    }
}

/// Overrides keyed by normalised capability name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CapabilityOverrides {
    #[serde(default)]
    overrides: BTreeMap<String, CapabilityOverride>,
}

impl CapabilityOverrides {
    /// Builds the override set from an iterator of directives. Later
    /// directives for the same capability win.
    #[must_use]
    pub fn from_directives<'a, I>(directives: I) -> Self
    where
        I: IntoIterator<Item = &'a CapabilityDirective>,
    {
        let mut overrides = Self::default();
        for directive in directives {
            overrides.set_override(directive.capability.clone(), directive.directive);
        }
        overrides
    }

    /// Stores or updates an override for a capability.
    pub fn set_override(&mut self, capability: impl Into<String>, directive: CapabilityOverride) {
        self.overrides
            .insert(normalise_key(&capability.into()), directive);
    }

    /// Retrieves an override for a capability, when present.
    #[must_use]
    pub fn override_for(&self, capability: &str) -> Option<CapabilityOverride> {
        self.overrides.get(&normalise_key(capability)).copied()
    }

    /// Returns `true` when no overrides are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

/// Parses a comma-separated list of directives such as
/// `native-suggestions=deny, async-suggestions=force`.
///
/// # Errors
///
/// Returns the first directive that fails to parse.
pub fn parse_directive_list(
    input: &str,
) -> Result<Vec<CapabilityDirective>, CapabilityDirectiveParseError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(CapabilityDirective::from_str)
        .collect()
}

fn normalise_key(key: &str) -> String {
    key.trim().to_lowercase()
}
