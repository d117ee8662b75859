use alloc::string::String;

use crate::snapshot::PNCounterSnapshot;
use crate::{Crdt, GCounter};

/// A positive-negative counter (PN-Counter).
///
/// Supports both increment and decrement operations by maintaining two
/// internal G-Counters: one for increments (`p`) and one for decrements
/// (`n`). The value is `p - n`.
///
/// # Example
///
/// ```
/// use tagset_crdt::prelude::*;
///
/// let mut c1 = PNCounter::new("node-1");
/// c1.increment();
/// c1.increment();
/// c1.decrement();
/// assert_eq!(c1.value(), 1);
///
/// let mut c2 = PNCounter::new("node-2");
/// c2.decrement();
///
/// c1.merge(&c2);
/// assert_eq!(c1.value(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PNCounter {
    increments: GCounter,
    decrements: GCounter,
}

impl PNCounter {
    /// Create a new PN-Counter for the given replica ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            increments: GCounter::new(id.clone()),
            decrements: GCounter::new(id),
        }
    }

    /// Increment the counter by 1.
    pub fn increment(&mut self) {
        self.increments.increment();
    }

    /// Increment the counter by `n`.
    pub fn increment_by(&mut self, n: u64) {
        self.increments.increment_by(n);
    }

    /// Decrement the counter by 1.
    pub fn decrement(&mut self) {
        self.decrements.increment();
    }

    /// Decrement the counter by `n`.
    pub fn decrement_by(&mut self, n: u64) {
        self.decrements.increment_by(n);
    }

    /// Get the current counter value (increments - decrements).
    ///
    /// Clamped to the `i64` range.
    #[must_use]
    pub fn value(&self) -> i64 {
        let net = i128::from(self.increments.value()) - i128::from(self.decrements.value());
        i64::try_from(net).unwrap_or(if net > 0 { i64::MAX } else { i64::MIN })
    }

    /// Get this replica's ID.
    #[must_use]
    pub fn id(&self) -> &str {
        self.increments.id()
    }

    /// The increment half.
    #[must_use]
    pub fn increments(&self) -> &GCounter {
        &self.increments
    }

    /// The decrement half.
    #[must_use]
    pub fn decrements(&self) -> &GCounter {
        &self.decrements
    }

    /// Same replica id and the same counts in both halves.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    /// Export as `{ id, p, n }`.
    #[must_use]
    pub fn to_snapshot(&self) -> PNCounterSnapshot {
        PNCounterSnapshot {
            id: self.id().into(),
            p: self.increments.counters().clone(),
            n: self.decrements.counters().clone(),
        }
    }

    /// Rebuild a counter from a snapshot.
    pub fn from_snapshot(snapshot: PNCounterSnapshot) -> Self {
        let PNCounterSnapshot { id, p, n } = snapshot;
        Self {
            increments: GCounter::from_parts(id.clone(), p),
            decrements: GCounter::from_parts(id, n),
        }
    }
}

impl Crdt for PNCounter {
    fn merge(&mut self, other: &Self) {
        self.increments.merge(&other.increments);
        self.decrements.merge(&other.decrements);
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PNCounter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_snapshot(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PNCounter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <PNCounterSnapshot as serde::Deserialize<'de>>::deserialize(deserializer)
            .map(Self::from_snapshot)
    }
}
