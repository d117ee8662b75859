//! Lamport clock usable as a set tag.
//!
//! Sets never generate tags themselves; the replication layer above them
//! does. This module provides a small logical clock that works as a tag for
//! [`LWWSet`](crate::LWWSet) and [`ORSet`](crate::ORSet) when wall-clock
//! timestamps are not trustworthy.
//!
//! Ordering is total:
//! - **time** first: a later logical time is a later event;
//! - **id** second: concurrent events with equal time are ordered by
//!   replica id, lower id first.
//!
//! # Example
//!
//! ```
//! use tagset_crdt::clock::LamportClock;
//!
//! let a1 = LamportClock::new("a").tick();
//! let mut b = LamportClock::new("b");
//!
//! // b receives a1, then produces an event ordered after it
//! let b1 = b.merge(&a1).tick();
//! assert!(b1 > a1);
//! ```

use alloc::string::String;
use core::cmp::Ordering;

use crate::Comparator;

/// A logical timestamp owned by one replica.
///
/// Clocks are values: [`tick`](LamportClock::tick) returns the next clock
/// instead of mutating, so a clock can be stored as a tag and the replica
/// keeps advancing its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LamportClock {
    // Field order is the comparison order.
    time: u64,
    id: String,
}

impl LamportClock {
    /// Create a clock at time zero for replica `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_time(id, 0)
    }

    /// Create a clock at an explicit time.
    pub fn with_time(id: impl Into<String>, time: u64) -> Self {
        Self {
            time,
            id: id.into(),
        }
    }

    /// The replica that owns this clock.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The logical time.
    #[must_use]
    pub fn time(&self) -> u64 {
        self.time
    }

    /// The next clock for a local event.
    #[must_use]
    pub fn tick(&self) -> Self {
        Self {
            time: self.time + 1,
            id: self.id.clone(),
        }
    }

    /// Advance this clock past a received one and return a copy.
    pub fn merge(&mut self, other: &Self) -> Self {
        self.time = self.time.max(other.time);
        self.clone()
    }

    /// Three-way comparison: time, then replica id.
    pub fn compare(a: &Self, b: &Self) -> Ordering {
        a.cmp(b)
    }

    /// Same replica and same time.
    pub fn is_equal(a: &Self, b: &Self) -> bool {
        a == b
    }

    /// [`LamportClock::compare`] as a set comparator.
    pub fn comparator() -> Comparator<Self> {
        Comparator::new(Self::compare)
    }
}
