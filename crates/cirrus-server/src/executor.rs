//! Default execution-affinity executor for server integrations.

use std::fmt;
use std::sync::Arc;

use cirrus_core::{Task, TaskExecutor};
use tracing::trace;

use crate::SERVER_TARGET;
use crate::platform::ServerPlatform;

/// Runs work inline on the platform's primary thread and schedules it there
/// from any other thread.
pub struct PrimaryThreadExecutor<P> {
    platform: Arc<P>,
}

impl<P> PrimaryThreadExecutor<P> {
    /// Creates an executor bound to `platform`.
    #[must_use]
    pub const fn new(platform: Arc<P>) -> Self {
        Self { platform }
    }
}

impl<P: ServerPlatform> TaskExecutor for PrimaryThreadExecutor<P> {
    fn execute(&self, task: Task) {
        if self.platform.is_primary_thread() {
            task();
            return;
        }
        trace!(target: SERVER_TARGET, "deferring task to primary thread");
        self.platform.schedule(task);
    }
}

impl<P> Clone for PrimaryThreadExecutor<P> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
        }
    }
}

impl<P> fmt::Debug for PrimaryThreadExecutor<P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PrimaryThreadExecutor")
            .finish_non_exhaustive()
    }
}
