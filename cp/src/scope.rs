//! Scope - carrier binding a subtree of work to one registry
//!
//! The owner derives a tracking scope with [`Scope::with_progress_receiver`]
//! and passes it down to workers, explicitly or through [`crate::ambient`].
//! Workers call [`Scope::start_reporting`] once per unit of progress they want
//! tracked as a single entry.

use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::receiver::Receiver;
use crate::registry::Registry;
use crate::reporter::Reporter;

/// Propagated progress-tracking scope
///
/// Cloning is cheap; every clone refers to the same registry.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    registry: Option<Arc<Registry>>,
}

impl Scope {
    /// A scope with no registry; reporters obtained from it are no-ops
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a scope bound to a fresh registry, plus the receiver reading it
    pub fn with_progress_receiver(&self) -> (Scope, Receiver) {
        self.with_progress_receiver_config(&Config::default())
    }

    /// Like [`Scope::with_progress_receiver`] with explicit config
    ///
    /// Any registry already bound to `self` is replaced in the child, not
    /// nested: the parent's receiver never sees the child's reports.
    pub fn with_progress_receiver_config(&self, config: &Config) -> (Scope, Receiver) {
        debug!(
            identity = ?config.identity,
            replaces = self.registry.is_some(),
            "Scope::with_progress_receiver_config: called"
        );
        let registry = Arc::new(Registry::new(config.identity));
        let child = Scope {
            registry: Some(Arc::clone(&registry)),
        };
        (child, Receiver::new(registry))
    }

    /// Obtain a reporter with a new identity, or a no-op one if untracked
    ///
    /// Two calls yield two independent entries.
    pub fn start_reporting(&self) -> Reporter {
        match &self.registry {
            Some(registry) => {
                let reporter = Reporter::bound(Arc::clone(registry));
                debug!(id = ?reporter.id(), "Scope::start_reporting: new reporter");
                reporter
            }
            None => {
                debug!("Scope::start_reporting: no registry bound, using noop reporter");
                Reporter::noop()
            }
        }
    }

    /// Whether this scope has a registry bound
    pub fn is_tracking(&self) -> bool {
        self.registry.is_some()
    }
}
