//! Plain-data snapshots of every CRDT in the crate.
//!
//! A snapshot is an owned, self-contained record of a replica's full state.
//! With the `serde` feature enabled each snapshot serializes to the shapes
//! below (shown as JSON), and the CRDT types themselves serialize through
//! their snapshot.
//!
//! | Type | Shape |
//! |------|-------|
//! | [`ORSet`](crate::ORSet), [`LWWSet`](crate::LWWSet) | `{"values": [{"value": v, "added": [t..], "removed": [t..]}]}` |
//! | [`GSet`](crate::GSet) | `{"values": [v..]}` |
//! | [`TwoPSet`](crate::TwoPSet) | `{"values": {"added": [v..], "removed": [v..]}}` |
//! | [`GCounter`](crate::GCounter) | `{"id": "..", "counters": {"replica": n}}` |
//! | [`PNCounter`](crate::PNCounter) | `{"id": "..", "p": {"replica": n}, "n": {"replica": n}}` |
//!
//! [`OpSet`](crate::OpSet) exports the same tuple shape through
//! [`OpSet::to_snapshot`](crate::OpSet::to_snapshot); its policy is chosen
//! again on import.
//!
//! Restoring a snapshot reproduces the visible state of the replica it was
//! taken from. Internal ordering is not part of the contract.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::OperationTuple;

/// Full tag history of a tag-resolved set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetSnapshot<T: Ord + Clone, Tag: Ord + Clone> {
    /// One record per value ever added, visible or not.
    pub values: Vec<OperationTuple<T, Tag>>,
}

/// Contents of a grow-only set. Grow-only membership needs no tags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GSetSnapshot<T> {
    /// Every value ever added.
    pub values: Vec<T>,
}

/// Contents of a two-phase set, kept as its two grow-only halves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoPSetSnapshot<T> {
    /// The add and remove halves.
    pub values: TwoPhaseValues<T>,
}

/// The two grow-only halves of a two-phase set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoPhaseValues<T> {
    /// Values that have been added.
    pub added: Vec<T>,
    /// Values that have been removed (tombstones).
    pub removed: Vec<T>,
}

/// State of a grow-only counter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GCounterSnapshot {
    /// Replica that owns the counter.
    pub id: String,
    /// Count per replica.
    pub counters: BTreeMap<String, u64>,
}

/// State of a positive-negative counter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PNCounterSnapshot {
    /// Replica that owns the counter.
    pub id: String,
    /// Increments per replica.
    pub p: BTreeMap<String, u64>,
    /// Decrements per replica.
    pub n: BTreeMap<String, u64>,
}
