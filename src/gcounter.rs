use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::snapshot::GCounterSnapshot;
use crate::Crdt;

/// A grow-only counter (G-Counter).
///
/// Each replica maintains its own count. The total value is the sum of all
/// replica counts. This counter can only be incremented, never decremented.
///
/// # Example
///
/// ```
/// use tagset_crdt::prelude::*;
///
/// let mut c1 = GCounter::new("node-1");
/// c1.increment();
/// c1.increment();
///
/// let mut c2 = GCounter::new("node-2");
/// c2.increment();
///
/// c1.merge(&c2);
/// assert_eq!(c1.value(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GCounter {
    id: String,
    counts: BTreeMap<String, u64>,
}

impl GCounter {
    /// Create a new G-Counter for the given replica ID.
    ///
    /// The replica's own slot starts at zero.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let mut counts = BTreeMap::new();
        counts.insert(id.clone(), 0);
        Self { id, counts }
    }

    /// Increment this replica's count by 1.
    pub fn increment(&mut self) {
        self.increment_by(1);
    }

    /// Increment this replica's count by `n`. Zero is a no-op.
    ///
    /// The count saturates at `u64::MAX`.
    pub fn increment_by(&mut self, n: u64) {
        let slot = self.counts.entry(self.id.clone()).or_insert(0);
        *slot = slot.saturating_add(n);
    }

    /// Get the total counter value across all replicas, saturating at
    /// `u64::MAX`.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, &count| total.saturating_add(count))
    }

    /// Get this replica's ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the count for a specific replica.
    #[must_use]
    pub fn count_for(&self, id: &str) -> u64 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// All per-replica counts.
    #[must_use]
    pub fn counters(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Same replica id and the same per-replica counts.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    /// Export as `{ id, counters }`.
    #[must_use]
    pub fn to_snapshot(&self) -> GCounterSnapshot {
        GCounterSnapshot {
            id: self.id.clone(),
            counters: self.counts.clone(),
        }
    }

    /// Rebuild a counter from a snapshot.
    pub fn from_snapshot(snapshot: GCounterSnapshot) -> Self {
        Self::from_parts(snapshot.id, snapshot.counters)
    }

    pub(crate) fn from_parts(id: String, mut counts: BTreeMap<String, u64>) -> Self {
        counts.entry(id.clone()).or_insert(0);
        Self { id, counts }
    }
}

impl Crdt for GCounter {
    fn merge(&mut self, other: &Self) {
        for (id, &count) in &other.counts {
            let entry = self.counts.entry(id.clone()).or_insert(0);
            *entry = (*entry).max(count);
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GCounter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_snapshot(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GCounter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <GCounterSnapshot as serde::Deserialize<'de>>::deserialize(deserializer)
            .map(Self::from_snapshot)
    }
}
