//! Execution-affinity contract.
//!
//! Some work may only touch platform state from one designated thread. A
//! [`TaskExecutor`] accepts a unit of work and guarantees only that it will
//! eventually run there: inline when the caller is already on the owning
//! thread, otherwise handed off. No completion signal is returned.
//!
//! [`AffinityExecutor`] and [`AffinityQueue`] implement the contract with a
//! single-consumer channel: the executor is cloned freely across worker
//! threads while the queue stays on the owning thread and drains hand-offs.


use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, ThreadId};

use tracing::warn;

/// Tracing target for execution-affinity hand-offs.
pub(crate) const EXECUTION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::execution");

/// Unit of work handed to a [`TaskExecutor`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Shared handle to an executor, as stored in the command context.
pub type SharedExecutor = Arc<dyn TaskExecutor>;

/// Runs units of work on the execution context that owns platform state.
pub trait TaskExecutor: Send + Sync {
    /// Runs `task` now when already on the owning context, otherwise
    /// schedules it there.
    fn execute(&self, task: Task);
}

/// Executor that always runs work on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl TaskExecutor for InlineExecutor {
    fn execute(&self, task: Task) {
        task();
    }
}

/// Creates an executor/queue pair owned by the calling thread.
///
/// # Example
///
/// ```
/// use std::sync::mpsc;
/// use cirrus_core::{TaskExecutor, affinity_channel};
///
/// let (executor, queue) = affinity_channel();
/// let (done, finished) = mpsc::channel();
///
/// std::thread::spawn(move || {
///     executor.execute(Box::new(move || done.send(()).unwrap_or_default()));
/// })
/// .join()
/// .unwrap_or_default();
///
/// assert_eq!(queue.run_pending(), 1);
/// assert!(finished.try_recv().is_ok());
/// ```
#[must_use]
pub fn affinity_channel() -> (AffinityExecutor, AffinityQueue) {
    let owner = thread::current().id();
    let (sender, receiver) = mpsc::channel();
    (
        AffinityExecutor { owner, sender },
        AffinityQueue { owner, receiver },
    )
}

/// Executor half of [`affinity_channel`]; cheap to clone and share.
#[derive(Clone)]
pub struct AffinityExecutor {
    owner: ThreadId,
    sender: Sender<Task>,
}

impl AffinityExecutor {
    /// Returns `true` when called from the owning thread.
    #[must_use]
    pub fn is_owner_thread(&self) -> bool {
        thread::current().id() == self.owner
    }
}

impl TaskExecutor for AffinityExecutor {
    fn execute(&self, task: Task) {
        if self.is_owner_thread() {
            task();
            return;
        }
        if self.sender.send(task).is_err() {
            warn!(
                target: EXECUTION_TARGET,
                "affinity queue was dropped; discarding task"
            );
        }
    }
}

impl fmt::Debug for AffinityExecutor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AffinityExecutor")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Queue half of [`affinity_channel`], drained by the owning thread.
pub struct AffinityQueue {
    owner: ThreadId,
    receiver: Receiver<Task>,
}

impl AffinityQueue {
    /// Runs every task queued so far and returns how many ran.
    ///
    /// Tasks are only run when called from the owning thread; on any other
    /// thread nothing is drained and `0` is returned.
    pub fn run_pending(&self) -> usize {
        if thread::current().id() != self.owner {
            warn!(
                target: EXECUTION_TARGET,
                "affinity queue drained from a foreign thread; ignoring"
            );
            return 0;
        }
        let mut ran = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(task) => {
                    task();
                    ran += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return ran,
            }
        }
    }
}

impl fmt::Debug for AffinityQueue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AffinityQueue")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}
