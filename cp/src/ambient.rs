//! Ambient scope propagation
//!
//! Installs a [`Scope`] in a Tokio task-local slot so code deep in the call
//! graph can call [`start_reporting`] without a scope parameter. Task-locals
//! do not follow `tokio::spawn`, so use [`Scope::spawn`] (or wrap the future
//! with [`Scope::run`]) to carry the scope into new tasks.
//!
//! The slot is typed, so it can only ever hold a `Scope`. Missing is the
//! only degenerate case, and it degrades to a no-op reporter.

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::reporter::Reporter;
use crate::scope::Scope;

tokio::task_local! {
    static CURRENT_SCOPE: Scope;
}

impl Scope {
    /// The scope installed for the running task, or a background scope
    pub fn current() -> Scope {
        CURRENT_SCOPE.try_with(Scope::clone).unwrap_or_default()
    }

    /// Drive `future` with this scope installed as the ambient scope
    pub async fn run<F>(self, future: F) -> F::Output
    where
        F: Future,
    {
        debug!(tracking = self.is_tracking(), "Scope::run: called");
        CURRENT_SCOPE.scope(self, future).await
    }

    /// Call `f` with this scope installed as the ambient scope
    pub fn run_sync<F, R>(self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        CURRENT_SCOPE.sync_scope(self, f)
    }

    /// Spawn `future` on the Tokio runtime with this scope installed
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime, as `tokio::spawn` does.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        tokio::spawn(CURRENT_SCOPE.scope(self.clone(), future))
    }
}

/// Obtain a reporter from the ambient scope
pub fn start_reporting() -> Reporter {
    Scope::current().start_reporting()
}
