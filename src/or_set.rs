use alloc::vec::Vec;

use crate::snapshot::SetSnapshot;
use crate::{Comparator, Crdt, OpSet, OperationTuple, Resolution, SetQuery};

/// An observed-remove set (OR-Set), also known as an add-wins set.
///
/// Unlike the 2P-Set, elements can be freely added and removed, and
/// re-added after removal. Every add carries a caller-chosen tag. A remove
/// cancels exactly the add tags this replica has observed for the element,
/// so an add the remover never saw (a concurrent add on another replica, or
/// a later add with a fresh tag) keeps the element in the set.
///
/// Tags are matched through the set's [`Comparator`]: an add tag counts as
/// observed if some remove tag compares equal to it.
///
/// # Example
///
/// ```
/// use tagset_crdt::prelude::*;
///
/// let mut s1 = ORSet::new();
/// s1.add("apple", 1);
/// s1.add("banana", 1);
/// s1.remove(&"banana");
///
/// let mut s2 = ORSet::new();
/// s2.add("banana", 2); // concurrent add
///
/// s1.merge(&s2);
/// // banana is present because s1's remove never observed tag 2
/// assert!(s1.contains(&"banana"));
/// assert!(s1.contains(&"apple"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ORSet<T: Ord + Clone, Tag: Ord + Clone> {
    inner: OpSet<T, Tag>,
}

impl<T: Ord + Clone, Tag: Ord + Clone> ORSet<T, Tag> {
    /// Create a new empty OR-Set matching tags by their natural order.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }

    /// Create a new empty OR-Set with a custom tag comparator.
    ///
    /// Every replica of one logical set must use the same comparator.
    /// [`Crdt::merge`] keeps the receiving side's comparator, so replicas
    /// built with different comparators can disagree on visibility after
    /// exchanging state.
    #[must_use]
    pub fn with_comparator(comparator: Comparator<Tag>) -> Self {
        Self {
            inner: OpSet::with_comparator(Resolution::ObservedRemove, comparator),
        }
    }

    /// Create a set from existing tuples.
    pub fn from_tuples<I>(tuples: I) -> Self
    where
        I: IntoIterator<Item = OperationTuple<T, Tag>>,
    {
        Self::from_tuples_with(tuples, Comparator::natural())
    }

    /// Create a set from existing tuples with a custom tag comparator.
    pub fn from_tuples_with<I>(tuples: I, comparator: Comparator<Tag>) -> Self
    where
        I: IntoIterator<Item = OperationTuple<T, Tag>>,
    {
        Self {
            inner: OpSet::from_tuples(Resolution::ObservedRemove, comparator, tuples),
        }
    }

    /// Add an element under `tag`.
    ///
    /// Re-adding a removed element with a tag the remove did not observe
    /// brings it back. Returns `true` if the element became visible.
    pub fn add(&mut self, value: T, tag: Tag) -> bool {
        self.inner.add(value, tag)
    }

    /// Add an element under the default tag.
    ///
    /// Every call reuses the same tag, so after a remove this does not bring
    /// the element back. Use [`ORSet::add`] with fresh tags for re-adds.
    pub fn insert(&mut self, value: T) -> bool
    where
        Tag: Default,
    {
        self.inner.add(value, Tag::default())
    }

    /// Remove an element.
    ///
    /// Marks every add tag this replica currently knows for the element as
    /// observed. Concurrent adds on other replicas survive the merge.
    /// Removing an element never added here is a no-op.
    ///
    /// Returns `true` if the element was present and removed.
    pub fn remove(&mut self, value: &T) -> bool {
        self.inner.remove_observed(value)
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

    /// Get the number of distinct elements in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over the elements in the set.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.values()
    }

    /// Copy the elements into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.to_vec()
    }

    /// The recorded add and remove tags for an element.
    #[must_use]
    pub fn tuple(&self, value: &T) -> Option<&OperationTuple<T, Tag>> {
        self.inner.tuple(value)
    }

    /// Every recorded history, including removed elements.
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

    /// Rebuild a set from a snapshot, matching tags by natural order.
    pub fn from_snapshot(snapshot: SetSnapshot<T, Tag>) -> Self {
        Self::from_snapshot_with(snapshot, Comparator::natural())
    }

    /// Rebuild a set from a snapshot with a custom tag comparator.
    pub fn from_snapshot_with(snapshot: SetSnapshot<T, Tag>, comparator: Comparator<Tag>) -> Self {
        Self {
            inner: OpSet::from_snapshot(Resolution::ObservedRemove, comparator, snapshot),
        }
    }
}

impl<T: Ord + Clone, Tag: Ord + Clone> Default for ORSet<T, Tag> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone, Tag: Ord + Clone> Crdt for ORSet<T, Tag> {
    fn merge(&mut self, other: &Self) {
        self.inner.merge_tuples(&other.inner);
    }
}

impl<T: Ord + Clone, Tag: Ord + Clone> SetQuery for ORSet<T, Tag> {
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
impl<T, Tag> serde::Serialize for ORSet<T, Tag>
where
    T: Ord + Clone + serde::Serialize,
    Tag: Ord + Clone + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_snapshot(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, Tag> serde::Deserialize<'de> for ORSet<T, Tag>
where
    T: Ord + Clone + serde::Deserialize<'de>,
    Tag: Ord + Clone + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <SetSnapshot<T, Tag> as serde::Deserialize<'de>>::deserialize(deserializer)
            .map(Self::from_snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn new_set_is_empty() {
        let s = ORSet::<String, u64>::new();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn add_and_contains() {
        let mut s = ORSet::new();
        assert!(s.add("x", 1));
        assert!(s.contains(&"x"));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn remove_element() {
        let mut s = ORSet::new();
        s.add("x", 1);
        assert!(s.remove(&"x"));
        assert!(!s.contains(&"x"));
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn remove_observes_every_known_tag() {
        let mut s = ORSet::new();
        s.add("x", 1);
        s.add("x", 2);
        s.add("x", 3);
        s.remove(&"x");
        assert!(!s.contains(&"x"));
        let tuple = s.tuple(&"x").unwrap();
        assert_eq!(tuple.added(), tuple.removed());
    }

    #[test]
    fn can_readd_with_fresh_tag() {
        let mut s = ORSet::new();
        s.add("x", 1);
        s.remove(&"x");
        assert!(!s.contains(&"x"));

        assert!(s.add("x", 2));
        assert!(s.contains(&"x"));
    }

    #[test]
    fn readd_with_observed_tag_stays_removed() {
        let mut s = ORSet::new();
        s.add("x", 1);
        s.remove(&"x");
        assert!(!s.add("x", 1));
        assert!(!s.contains(&"x"));
    }

    #[test]
    fn default_tag_insert() {
        let mut s = ORSet::<&str, u32>::new();
        assert!(s.insert("x"));
        s.remove(&"x");
        assert!(!s.insert("x"));
        assert_eq!(s.tuple(&"x").map(|t| t.added().len()), Some(1));
    }

    #[test]
    fn concurrent_add_survives_remove() {
        let mut replica1 = ORSet::new();
        replica1.add("X", 1);

        let mut replica2 = ORSet::new();
        replica2.add("X", 2);
        replica2.remove(&"X"); // observes only tag 2

        replica1.merge(&replica2);
        replica2.merge(&replica1);
        assert!(replica1.contains(&"X"));
        assert!(replica2.contains(&"X"));
    }

    #[test]
    fn remove_nonexistent_returns_false() {
        let mut s = ORSet::<&str, u8>::new();
        assert!(!s.remove(&"x"));
        assert!(s.tuple(&"x").is_none());
    }

    #[test]
    fn custom_comparator_matches_tags() {
        // Tags are (clock, replica); a remove of (1, 'b') observes (1, 'a').
        let by_clock = Comparator::new(|a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
        let mut s = ORSet::with_comparator(by_clock);
        s.add("x", (1, 'a'));

        let mut other = ORSet::with_comparator(by_clock);
        other.add("x", (1, 'b'));
        other.remove(&"x");

        s.merge(&other);
        assert!(!s.contains(&"x"));
    }

    #[test]
    fn merge_keeps_receiving_comparator() {
        let by_clock = Comparator::new(|a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
        let mut coarse = ORSet::with_comparator(by_clock);
        coarse.add("x", (1, 'a'));
        let mut exact = ORSet::new();
        exact.add("x", (1, 'b'));
        exact.remove(&"x");

        let mut into_coarse = coarse.clone();
        into_coarse.merge(&exact);
        let mut into_exact = exact.clone();
        into_exact.merge(&coarse);

        // Same history on both sides, different visibility.
        assert_eq!(
            into_coarse.tuples().collect::<Vec<_>>(),
            into_exact.tuples().collect::<Vec<_>>()
        );
        assert!(!into_coarse.contains(&"x"));
        assert!(into_exact.contains(&"x"));
    }

    #[test]
    fn merge_is_commutative() {
        let mut s1 = ORSet::new();
        s1.add("x", 1);
        s1.add("y", 1);

        let mut s2 = ORSet::new();
        s2.add("y", 2);
        s2.add("z", 2);
        s2.remove(&"y");

        let mut left = s1.clone();
        left.merge(&s2);

        let mut right = s2.clone();
        right.merge(&s1);

        let left_elems: BTreeSet<_> = left.iter().collect();
        let right_elems: BTreeSet<_> = right.iter().collect();
        assert_eq!(left_elems, right_elems);
        assert_eq!(left, right);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut s1 = ORSet::new();
        s1.add("x", 1);

        let mut s2 = ORSet::new();
        s2.add("y", 1);

        s1.merge(&s2);
        let after_first = s1.clone();
        s1.merge(&s2);

        assert_eq!(s1, after_first);
    }

    #[test]
    fn tuples_from_records() {
        let s = ORSet::from_tuples([
            OperationTuple::new("A", [1], []),
            OperationTuple::new("B", [1], [1]),
            OperationTuple::new("C", [1, 2], [2, 3]),
        ]);
        assert_eq!(s.to_vec(), vec!["A", "C"]);
    }

    #[test]
    fn snapshot_round_trip_keeps_hidden_history() {
        let mut s = ORSet::new();
        s.add(1, 10);
        s.add(2, 11);
        s.remove(&2);

        let restored = ORSet::from_snapshot(s.to_snapshot());
        assert_eq!(restored, s);
        assert_eq!(restored.to_vec(), vec![1]);
        assert_eq!(restored.tuples().count(), 2);
    }
}
