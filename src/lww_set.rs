use alloc::vec::Vec;

use crate::snapshot::SetSnapshot;
use crate::{Comparator, Crdt, OpSet, OperationTuple, Resolution, SetQuery};

/// A last-writer-wins set (LWW-Set).
///
/// Every add and remove carries a tag such as a timestamp or a logical
/// clock. An element is present while its latest add tag is not older than
/// its latest remove tag; ties go to the add. "Latest" is decided by the
/// set's [`Comparator`], which defaults to the tag's natural order.
///
/// # Example
///
/// ```
/// use tagset_crdt::prelude::*;
///
/// let mut s1 = LWWSet::new();
/// s1.add("A", 5);
/// s1.remove(&"A", 3); // older than the add
/// assert!(s1.contains(&"A"));
///
/// let mut s2 = LWWSet::new();
/// s2.add("A", 5);
/// s2.remove(&"A", 7); // newer than the add
/// assert!(!s2.contains(&"A"));
///
/// s1.merge(&s2);
/// assert!(!s1.contains(&"A"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LWWSet<T: Ord + Clone, Tag: Ord + Clone> {
    inner: OpSet<T, Tag>,
}

impl<T: Ord + Clone, Tag: Ord + Clone> LWWSet<T, Tag> {
    /// Create a new empty LWW-Set ordering tags naturally.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }

    /// Create a new empty LWW-Set with a custom tag order.
    ///
    /// Every replica of one logical set must use the same comparator.
    /// [`Crdt::merge`] keeps the receiving side's comparator, so replicas
    /// built with different comparators can disagree on which tag is the
    /// latest after exchanging state.
    ///
    /// ```
    /// use tagset_crdt::clock::LamportClock;
    /// use tagset_crdt::prelude::*;
    ///
    /// let mut clock = LamportClock::new("node-1");
    /// let mut s = LWWSet::with_comparator(LamportClock::comparator());
    ///
    /// clock = clock.tick();
    /// s.add("doc", clock.clone());
    /// clock = clock.tick();
    /// s.remove(&"doc", clock);
    /// assert!(s.is_empty());
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: Comparator<Tag>) -> Self {
        Self {
            inner: OpSet::with_comparator(Resolution::LastWriteWins, comparator),
        }
    }

    /// Create a set from existing tuples.
    pub fn from_tuples<I>(tuples: I) -> Self
    where
        I: IntoIterator<Item = OperationTuple<T, Tag>>,
    {
        Self::from_tuples_with(tuples, Comparator::natural())
    }

    /// Create a set from existing tuples with a custom tag order.
    pub fn from_tuples_with<I>(tuples: I, comparator: Comparator<Tag>) -> Self
    where
        I: IntoIterator<Item = OperationTuple<T, Tag>>,
    {
        Self {
            inner: OpSet::from_tuples(Resolution::LastWriteWins, comparator, tuples),
        }
    }

    /// Add an element at `tag`.
    ///
    /// Returns `true` if the element became visible.
    pub fn add(&mut self, value: T, tag: Tag) -> bool {
        self.inner.add(value, tag)
    }

    /// Add an element at the default tag (zero for integer tags).
    pub fn insert(&mut self, value: T) -> bool
    where
        Tag: Default,
    {
        self.inner.add(value, Tag::default())
    }

    /// Remove an element at `tag`.
    ///
    /// Only elements this replica has seen added can be removed; removing
    /// an unknown element records nothing. Returns `true` if the element was
    /// present and `tag` is late enough to hide it.
    pub fn remove(&mut self, value: &T, tag: Tag) -> bool {
        self.inner.remove_tagged(value, tag)
    }

    /// Check if the set contains an element.
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

    /// Get the number of visible elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if no element is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over the visible elements.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.values()
    }

    /// Copy the visible elements into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.to_vec()
    }

    /// The recorded add and remove tags for an element.
    #[must_use]
    pub fn tuple(&self, value: &T) -> Option<&OperationTuple<T, Tag>> {
        self.inner.tuple(value)
    }

    /// Every recorded history, including hidden elements.
    pub fn tuples(&self) -> impl Iterator<Item = &OperationTuple<T, Tag>> {
        self.inner.tuples()
    }

    /// The tag comparator in use.
    #[must_use]
    pub fn comparator(&self) -> Comparator<Tag> {
        self.inner.comparator()
    }

    /// Export the full tag history.
    #[must_use]
    pub fn to_snapshot(&self) -> SetSnapshot<T, Tag> {
        self.inner.to_snapshot()
    }

    /// Rebuild a set from a snapshot, ordering tags naturally.
    pub fn from_snapshot(snapshot: SetSnapshot<T, Tag>) -> Self {
        Self::from_snapshot_with(snapshot, Comparator::natural())
    }

    /// Rebuild a set from a snapshot with a custom tag order.
    pub fn from_snapshot_with(snapshot: SetSnapshot<T, Tag>, comparator: Comparator<Tag>) -> Self {
        Self {
            inner: OpSet::from_snapshot(Resolution::LastWriteWins, comparator, snapshot),
        }
    }
}

impl<T: Ord + Clone, Tag: Ord + Clone> Default for LWWSet<T, Tag> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone, Tag: Ord + Clone> Crdt for LWWSet<T, Tag> {
    fn merge(&mut self, other: &Self) {
        self.inner.merge_tuples(&other.inner);
    }
}

impl<T: Ord + Clone, Tag: Ord + Clone> SetQuery for LWWSet<T, Tag> {
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
impl<T, Tag> serde::Serialize for LWWSet<T, Tag>
where
    T: Ord + Clone + serde::Serialize,
    Tag: Ord + Clone + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_snapshot(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, Tag> serde::Deserialize<'de> for LWWSet<T, Tag>
where
    T: Ord + Clone + serde::Deserialize<'de>,
    Tag: Ord + Clone + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <SetSnapshot<T, Tag> as serde::Deserialize<'de>>::deserialize(deserializer)
            .map(Self::from_snapshot)
    }
}
