//! Registry - shared store of the latest report per reporter
//!
//! Entries are only inserted or overwritten, never removed. The registry lives
//! as long as the longest holder of its scope, so growth is bounded by one
//! logical operation.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::config::IdentityScheme;

/// One reporter's most recent self-reported progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Work done so far
    pub current: i64,
    /// Work expected in total
    pub total: i64,
}

impl Report {
    pub fn new(current: i64, total: i64) -> Self {
        Self { current, total }
    }
}

impl From<Report> for (i64, i64) {
    fn from(report: Report) -> Self {
        (report.current, report.total)
    }
}

/// Identity of a single reporter handle within a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReporterId {
    /// Time-ordered random identifier
    Uuid(Uuid),
    /// Registry-local sequence number
    Sequence(u64),
}

impl fmt::Display for ReporterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(id) => write!(f, "{}", id),
            Self::Sequence(n) => write!(f, "#{}", n),
        }
    }
}

/// Concurrency-safe mapping of reporter identity to its latest report
///
/// Callers never lock anything themselves. Each entry is a `Copy` value
/// written under the lock, so `sum` can never see half of an update.
#[derive(Debug)]
pub struct Registry {
    scheme: IdentityScheme,
    next_seq: AtomicU64,
    reports: RwLock<HashMap<ReporterId, Report>>,
}

impl Registry {
    /// Create an empty registry issuing identities with `scheme`
    pub fn new(scheme: IdentityScheme) -> Self {
        debug!(?scheme, "Registry::new: called");
        Self {
            scheme,
            next_seq: AtomicU64::new(0),
            reports: RwLock::new(HashMap::new()),
        }
    }

    /// Allocate an identity that this registry has never handed out before
    pub fn next_id(&self) -> ReporterId {
        match self.scheme {
            IdentityScheme::Uuid => ReporterId::Uuid(Uuid::now_v7()),
            IdentityScheme::Sequential => ReporterId::Sequence(self.next_seq.fetch_add(1, Ordering::Relaxed)),
        }
    }

    /// Insert or overwrite the entry for `id`
    pub fn put(&self, id: ReporterId, current: i64, total: i64) {
        trace!(%id, current, total, "Registry::put");
        // A panic elsewhere while holding the lock cannot leave a torn entry,
        // so the poisoned map is still consistent.
        let mut reports = self.reports.write().unwrap_or_else(PoisonError::into_inner);
        reports.insert(id, Report::new(current, total));
    }

    /// Sum `current` and `total` over every entry present right now
    ///
    /// The result is exact whenever the true sum fits in `i64` and clamps to
    /// the `i64` bounds otherwise.
    pub fn sum(&self) -> Report {
        self.totals().0
    }

    /// Sum of all entries together with the number of entries summed
    ///
    /// Both come from the same read of the map.
    pub fn totals(&self) -> (Report, usize) {
        let reports = self.reports.read().unwrap_or_else(PoisonError::into_inner);
        let (current, total) = reports.values().fold((0i128, 0i128), |(current, total), report| {
            (current + i128::from(report.current), total + i128::from(report.total))
        });
        let sum = Report::new(clamp_i64(current), clamp_i64(total));
        trace!(entries = reports.len(), current = sum.current, total = sum.total, "Registry::totals");
        (sum, reports.len())
    }

    /// Latest report stored for `id`, if it has reported at all
    #[cfg(test)]
    pub(crate) fn get(&self, id: &ReporterId) -> Option<Report> {
        let reports = self.reports.read().unwrap_or_else(PoisonError::into_inner);
        reports.get(id).copied()
    }

    /// Number of reporters that have reported at least once
    pub fn len(&self) -> usize {
        self.reports.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn clamp_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(IdentityScheme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_empty_registry_sums_to_zero() {
        let registry = Registry::default();
        assert_eq!(registry.sum(), Report::new(0, 0));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_put_overwrites_same_identity() {
        let registry = Registry::default();
        let id = registry.next_id();

        registry.put(id, 10, 100);
        registry.put(id, 20, 100);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&id), Some(Report::new(20, 100)));
        assert_eq!(registry.sum(), Report::new(20, 100));
    }

    #[test]
    fn test_sum_across_identities() {
        let registry = Registry::new(IdentityScheme::Sequential);
        let a = registry.next_id();
        let b = registry.next_id();

        registry.put(a, 10, 100);
        registry.put(b, 1, 10);

        assert_eq!(registry.sum(), Report::new(11, 110));
    }

    #[test]
    fn test_values_stored_verbatim() {
        let registry = Registry::default();
        let id = registry.next_id();

        registry.put(id, -5, 0);
        assert_eq!(registry.get(&id), Some(Report::new(-5, 0)));

        registry.put(id, 300, 7);
        assert_eq!(registry.sum(), Report::new(300, 7));
    }

    #[test]
    fn test_sum_clamps_on_overflow() {
        let registry = Registry::default();
        registry.put(registry.next_id(), i64::MAX, i64::MIN);
        registry.put(registry.next_id(), 1, -1);

        assert_eq!(registry.sum(), Report::new(i64::MAX, i64::MIN));
    }

    #[test]
    fn test_sum_exact_when_result_fits() {
        // Fresh registries hash with fresh seeds, so this covers many iteration orders
        for _ in 0..200 {
            let registry = Registry::new(IdentityScheme::Sequential);
            registry.put(registry.next_id(), i64::MAX, i64::MIN);
            registry.put(registry.next_id(), 1, -1);
            registry.put(registry.next_id(), -1, 1);

            assert_eq!(registry.sum(), Report::new(i64::MAX, i64::MIN));
        }
    }

    #[test]
    fn test_totals_counts_entries() {
        let registry = Registry::default();
        assert_eq!(registry.totals(), (Report::default(), 0));

        let id = registry.next_id();
        registry.put(id, 2, 3);
        registry.put(id, 4, 5);
        registry.put(registry.next_id(), 1, 1);

        assert_eq!(registry.totals(), (Report::new(5, 6), 2));
    }

    #[test]
    fn test_sequential_ids_are_distinct() {
        let registry = Registry::new(IdentityScheme::Sequential);
        let ids: HashSet<_> = (0..1000).map(|_| registry.next_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.contains(&ReporterId::Sequence(0)));
        assert!(ids.contains(&ReporterId::Sequence(999)));
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let registry = Registry::new(IdentityScheme::Uuid);
        let ids: HashSet<_> = (0..1000).map(|_| registry.next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_reporter_id_display() {
        assert_eq!(ReporterId::Sequence(7).to_string(), "#7");
        let uuid = Uuid::now_v7();
        assert_eq!(ReporterId::Uuid(uuid).to_string(), uuid.to_string());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let registry = Arc::new(Registry::default());
        let id = registry.next_id();
        registry.put(id, 3, 4);

        let poisoner = Arc::clone(&registry);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.reports.write().unwrap();
            panic!("poison the registry lock");
        })
        .join();
        assert!(result.is_err());

        registry.put(id, 5, 6);
        assert_eq!(registry.sum(), Report::new(5, 6));
        assert_eq!(registry.len(), 1);
    }
}
