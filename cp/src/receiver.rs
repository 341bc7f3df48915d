//! Receiver - read-only view of a scope's aggregate progress

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::registry::Registry;

/// Aggregate progress at one moment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Sum of every reporter's `current`
    pub current: i64,
    /// Sum of every reporter's `total`
    pub total: i64,
    /// Number of reporters that have reported at least once
    pub reporters: usize,
}

impl Progress {
    /// `current / total`, or `None` when nothing is expected yet
    pub fn fraction(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.current as f64 / self.total as f64)
    }

    /// [`Progress::fraction`] scaled to 0..=100
    pub fn percent(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.current as f64 * 100.0 / self.total as f64)
    }
}

/// Owner-side handle returned alongside a new scope
///
/// Cheap to clone. Reads never block reporters for longer than one map
/// iteration and may be called from any thread at any time.
#[derive(Debug, Clone)]
pub struct Receiver {
    registry: Arc<Registry>,
}

impl Receiver {
    pub(crate) fn new(registry: Arc<Registry>) -> Self {
        debug!("Receiver::new: called");
        Self { registry }
    }

    /// Summed `(current, total)` across all reporters in the scope
    pub fn receive(&self) -> (i64, i64) {
        self.registry.sum().into()
    }

    /// Summed progress plus the number of contributing reporters
    pub fn snapshot(&self) -> Progress {
        let (sum, reporters) = self.registry.totals();
        Progress {
            current: sum.current,
            total: sum.total,
            reporters,
        }
    }

    /// Number of reporters that have reported at least once
    pub fn reporter_count(&self) -> usize {
        self.registry.len()
    }
}
