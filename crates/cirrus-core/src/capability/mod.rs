//! Capability modelling and resolution.
//!
//! A platform integration probes its host once, at construction, for each
//! candidate [`Capability`]. Configured overrides are then applied and the
//! result is frozen into a [`CapabilityRegistry`] that preprocessors and
//! parser factories consult instead of inspecting platform versions.


use std::collections::BTreeMap;
use std::fmt;

use cirrus_config::{CapabilityOverride, CapabilityOverrides};
use tracing::debug;

/// Tracing target for capability resolution.
pub(crate) const CAPABILITY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::capability");

/// Opaque identifier naming a platform feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Capability(&'static str);

impl Capability {
    /// Creates a capability identifier.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the identifier used in override directives.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.0)
    }
}

/// The platform exposes a native suggestion engine that parsers can bridge to.
pub const NATIVE_SUGGESTIONS: Capability = Capability::new("native-suggestions");

/// Answers whether the host environment provides a capability.
pub trait CapabilityProbe {
    /// Probes the host for `capability`.
    fn probe(&self, capability: Capability) -> bool;
}

impl<F> CapabilityProbe for F
where
    F: Fn(Capability) -> bool,
{
    fn probe(&self, capability: Capability) -> bool {
        self(capability)
    }
}

/// Provenance for a capability's availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilitySource {
    /// Reported by the platform probe.
    Probed,
    /// Enabled by a force override.
    ForcedOverride,
    /// Disabled by an explicit deny override.
    DeniedOverride,
    /// Not provided by the platform.
    MissingOnPlatform,
}

impl fmt::Display for CapabilitySource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Probed => "reported by platform",
            Self::ForcedOverride => "forced by override",
            Self::DeniedOverride => "denied by override",
            Self::MissingOnPlatform => "missing from platform",
        };
        formatter.write_str(label)
    }
}

/// Effective state for a single capability after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityState {
    /// Capability being described.
    pub capability: Capability,
    /// Whether the capability is usable.
    pub enabled: bool,
    /// Why the capability is (un)available.
    pub source: CapabilitySource,
}

impl CapabilityState {
    /// Constructs a new capability state.
    #[must_use]
    pub const fn new(capability: Capability, enabled: bool, source: CapabilitySource) -> Self {
        Self {
            capability,
            enabled,
            source,
        }
    }
}

/// Immutable set of resolved capabilities for one platform integration.
///
/// # Example
///
/// ```
/// use cirrus_config::CapabilityOverrides;
/// use cirrus_core::{Capability, CapabilityRegistry, NATIVE_SUGGESTIONS};
///
/// let registry = CapabilityRegistry::probe(
///     &|_: Capability| true,
///     &[NATIVE_SUGGESTIONS],
///     &CapabilityOverrides::default(),
/// );
/// assert!(registry.has(NATIVE_SUGGESTIONS));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityRegistry {
    states: BTreeMap<Capability, CapabilityState>,
}

impl CapabilityRegistry {
    /// Probes each candidate exactly once and applies `overrides`.
    #[must_use]
    pub fn probe<P>(probe: &P, candidates: &[Capability], overrides: &CapabilityOverrides) -> Self
    where
        P: CapabilityProbe + ?Sized,
    {
        let mut states = BTreeMap::new();
        for &capability in candidates {
            if states.contains_key(&capability) {
                continue;
            }
            let state = resolve_state(probe, capability, overrides);
            debug!(
                target: CAPABILITY_TARGET,
                capability = capability.name(),
                enabled = state.enabled,
                source = %state.source,
                "resolved capability"
            );
            states.insert(capability, state);
        }
        Self { states }
    }

    /// Builds a registry in which exactly `enabled` are present.
    ///
    /// Intended for integrations that already know their feature set and
    /// for stub registries in tests.
    #[must_use]
    pub fn with_enabled<I>(enabled: I) -> Self
    where
        I: IntoIterator<Item = Capability>,
    {
        let states = enabled
            .into_iter()
            .map(|capability| {
                (
                    capability,
                    CapabilityState::new(capability, true, CapabilitySource::Probed),
                )
            })
            .collect();
        Self { states }
    }

    /// Returns `true` when `capability` is available.
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.state(capability).enabled
    }

    /// Returns the resolved state for `capability`.
    #[must_use]
    pub fn state(&self, capability: Capability) -> CapabilityState {
        match self.states.get(&capability) {
            Some(state) => *state,
            None => CapabilityState::new(capability, false, CapabilitySource::MissingOnPlatform),
        }
    }

    /// Returns the enabled capabilities in name order.
    pub fn enabled(&self) -> impl Iterator<Item = Capability> + '_ {
        self.states
            .values()
            .filter(|state| state.enabled)
            .map(|state| state.capability)
    }

    /// Returns every resolved state in name order.
    pub fn states(&self) -> impl Iterator<Item = CapabilityState> + '_ {
        self.states.values().copied()
    }
}

fn resolve_state<P>(
    probe: &P,
    capability: Capability,
    overrides: &CapabilityOverrides,
) -> CapabilityState
where
    P: CapabilityProbe + ?Sized,
{
    match overrides.override_for(capability.name()) {
        Some(CapabilityOverride::Force) => {
            return CapabilityState::new(capability, true, CapabilitySource::ForcedOverride);
        }
        Some(CapabilityOverride::Deny) => {
            return CapabilityState::new(capability, false, CapabilitySource::DeniedOverride);
        }
        None | Some(CapabilityOverride::Allow) => {}
    }

    if probe.probe(capability) {
        CapabilityState::new(capability, true, CapabilitySource::Probed)
    } else {
        CapabilityState::new(capability, false, CapabilitySource::MissingOnPlatform)
    }
}
