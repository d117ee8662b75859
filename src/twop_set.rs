use alloc::vec::Vec;

use crate::snapshot::{TwoPSetSnapshot, TwoPhaseValues};
use crate::{Crdt, OpSet, OperationTuple, Resolution, SetQuery};

/// A two-phase set (2P-Set).
///
/// Elements can be added and removed, but once removed, they cannot be
/// re-added. Logically this is two G-Sets: one for additions and one for
/// removals (tombstones). Both halves live in the set engine as untagged add
/// and remove records under the two-phase policy.
///
/// # Example
///
/// ```
/// use tagset_crdt::prelude::*;
///
/// let mut s1 = TwoPSet::new();
/// s1.insert("apple");
/// s1.insert("banana");
/// s1.remove(&"banana");
///
/// assert!(s1.contains(&"apple"));
/// assert!(!s1.contains(&"banana")); // removed
///
/// let mut s2 = TwoPSet::new();
/// s2.insert("banana"); // trying to re-add on another replica
///
/// s1.merge(&s2);
/// assert!(!s1.contains(&"banana")); // still removed (tombstone wins)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoPSet<T: Ord + Clone> {
    inner: OpSet<T, ()>,
}

impl<T: Ord + Clone> TwoPSet<T> {
    /// Create a new empty 2P-Set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: OpSet::new(Resolution::TwoPhase),
        }
    }

    /// Build a set from its two halves.
    ///
    /// `removed` is taken as-is, so a value may be tombstoned before this
    /// replica has seen it added.
    pub fn from_parts<A, R>(added: A, removed: R) -> Self
    where
        A: IntoIterator<Item = T>,
        R: IntoIterator<Item = T>,
    {
        let tuples = added
            .into_iter()
            .map(|v| OperationTuple::new(v, [()], []))
            .chain(removed.into_iter().map(|v| OperationTuple::new(v, [], [()])));
        Self {
            inner: OpSet::from_tuples(Resolution::TwoPhase, Default::default(), tuples),
        }
    }

    /// Insert an element.
    ///
    /// Returns `true` if the element was newly added. The add is always
    /// recorded, but an element that was already removed stays removed and
    /// this returns `false`.
    pub fn insert(&mut self, value: T) -> bool {
        self.inner.add(value, ())
    }

    /// Remove an element.
    ///
    /// The element must have been added first; otherwise nothing is
    /// recorded. Once removed, it can never be re-added. Returns `true` if
    /// the element was present and is now removed.
    pub fn remove(&mut self, value: &T) -> bool {
        self.inner.remove_tagged(value, ())
    }

    /// Check if the set contains an element (added and not removed).
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    /// Check if the set contains every element of `values`.
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.inner.contains_all(values)
    }

    /// Get the number of active elements (added minus removed).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the set has no active elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over active elements (added and not removed).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.values()
    }

    /// Copy the active elements into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.to_vec()
    }

    /// The add half: every element ever added, removed or not.
    pub fn added(&self) -> impl Iterator<Item = &T> {
        self.inner
            .tuples()
            .filter(|t| !t.added().is_empty())
            .map(OperationTuple::value)
    }

    /// The remove half: every tombstoned element.
    pub fn removed(&self) -> impl Iterator<Item = &T> {
        self.inner
            .tuples()
            .filter(|t| !t.removed().is_empty())
            .map(OperationTuple::value)
    }

    /// Export as `{ values: { added: [..], removed: [..] } }`.
    #[must_use]
    pub fn to_snapshot(&self) -> TwoPSetSnapshot<T> {
        TwoPSetSnapshot {
            values: TwoPhaseValues {
                added: self.added().cloned().collect(),
                removed: self.removed().cloned().collect(),
            },
        }
    }

    /// Rebuild a set from a snapshot.
    pub fn from_snapshot(snapshot: TwoPSetSnapshot<T>) -> Self {
        let TwoPhaseValues { added, removed } = snapshot.values;
        Self::from_parts(added, removed)
    }
}

impl<T: Ord + Clone> Default for TwoPSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Crdt for TwoPSet<T> {
    fn merge(&mut self, other: &Self) {
        self.inner.merge_tuples(&other.inner);
    }
}

impl<T: Ord + Clone> SetQuery for TwoPSet<T> {
    type Value = T;

    fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn to_vec(&self) -> Vec<T> {
        self.inner.to_vec()
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for TwoPSet<T>
where
    T: Ord + Clone + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_snapshot(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for TwoPSet<T>
where
    T: Ord + Clone + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <TwoPSetSnapshot<T> as serde::Deserialize<'de>>::deserialize(deserializer)
            .map(Self::from_snapshot)
    }
}
