//! Start-up orchestration: configuration, telemetry, then the integration.

use std::fmt;
use std::sync::Arc;

use cirrus_config::Config;
use cirrus_core::SenderMapper;
use ortho_config::OrthoError;
use thiserror::Error;

use crate::integration::ServerIntegration;
use crate::platform::ServerPlatform;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the integration configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load_from_environment`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_environment()
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

/// A configured integration together with its telemetry handle.
pub struct Bootstrapped<P: ServerPlatform, C> {
    /// The wired integration.
    pub integration: ServerIntegration<P, C>,
    /// Handle for the installed subscriber.
    pub telemetry: TelemetryHandle,
}

impl<P: ServerPlatform, C> fmt::Debug for Bootstrapped<P, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Bootstrapped")
            .field("integration", &self.integration)
            .field("telemetry", &self.telemetry)
            .finish()
    }
}

/// Loads configuration, installs telemetry and builds the integration.
///
/// The platform is only probed once configuration and telemetry succeed.
///
/// # Errors
///
/// Returns [`BootstrapError`] when either step fails.
pub fn bootstrap<P, C, M>(
    platform: Arc<P>,
    sender_mapper: M,
    loader: &dyn ConfigLoader,
) -> Result<Bootstrapped<P, C>, BootstrapError>
where
    P: ServerPlatform,
    C: 'static,
    M: SenderMapper<P::Sender, C> + 'static,
{
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let handle =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    Ok(Bootstrapped {
        integration: ServerIntegration::new(platform, sender_mapper, &config),
        telemetry: handle,
    })
}
