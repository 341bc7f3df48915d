//! Reporter - write-only handle for one unit of work

use std::sync::Arc;

use tracing::trace;

use crate::registry::{Registry, ReporterId};

/// Handle a worker uses to publish its own `(current, total)` pair
///
/// Every call to [`Reporter::report`] replaces this reporter's previous entry.
/// Clones share the identity, so they update the same entry. A reporter
/// obtained from a scope without a registry is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    binding: Option<Binding>,
}

#[derive(Debug, Clone)]
struct Binding {
    registry: Arc<Registry>,
    id: ReporterId,
}

impl Reporter {
    pub(crate) fn bound(registry: Arc<Registry>) -> Self {
        let id = registry.next_id();
        Self {
            binding: Some(Binding { registry, id }),
        }
    }

    /// A reporter that discards everything it is given
    pub fn noop() -> Self {
        Self { binding: None }
    }

    /// Store the literal pair as this reporter's latest progress
    ///
    /// No validation is performed: negative values, `current > total` and
    /// `total == 0` are all stored as given.
    pub fn report(&self, current: i64, total: i64) {
        match &self.binding {
            Some(binding) => binding.registry.put(binding.id, current, total),
            None => trace!(current, total, "Reporter::report: no scope, discarded"),
        }
    }

    /// Whether reports from this handle go nowhere
    pub fn is_noop(&self) -> bool {
        self.binding.is_none()
    }

    /// Identity under which this reporter stores its entry
    pub fn id(&self) -> Option<&ReporterId> {
        self.binding.as_ref().map(|binding| &binding.id)
    }
}
