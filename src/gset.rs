use alloc::vec::Vec;

use crate::snapshot::GSetSnapshot;
use crate::{Crdt, OpSet, Resolution, SetError, SetQuery};

/// A grow-only set (G-Set).
///
/// Elements can be added but never removed. Merge is simply the union
/// of both sets. This is the simplest set CRDT: it is the set engine with a
/// grow-only policy and no tags, since a single add settles membership.
///
/// # Example
///
/// ```
/// use tagset_crdt::prelude::*;
///
/// let mut s1 = GSet::new();
/// s1.insert("apple");
/// s1.insert("banana");
///
/// let mut s2 = GSet::new();
/// s2.insert("cherry");
///
/// s1.merge(&s2);
/// assert_eq!(s1.len(), 3);
/// assert!(s1.contains(&"cherry"));
/// assert!(s1.remove(&"apple").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GSet<T: Ord + Clone> {
    inner: OpSet<T, ()>,
}

impl<T: Ord + Clone> GSet<T> {
    /// Create a new empty G-Set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: OpSet::new(Resolution::GrowOnly),
        }
    }

    /// Insert an element into the set.
    ///
    /// Returns `true` if the element was newly inserted.
    pub fn insert(&mut self, value: T) -> bool {
        self.inner.add(value, ())
    }

    /// Always fails: a grow-only set cannot forget an element.
    ///
    /// The set is left untouched and the error is
    /// [`SetError::UnsupportedOperation`].
    pub fn remove(&mut self, value: &T) -> Result<(), SetError> {
        self.inner.remove(value, ()).map(|_| ())
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

    /// Get the number of elements in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over the elements in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.values()
    }

    /// Copy the elements into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.to_vec()
    }

    /// Export the elements as `{ values: [..] }`.
    #[must_use]
    pub fn to_snapshot(&self) -> GSetSnapshot<T> {
        GSetSnapshot {
            values: self.to_vec(),
        }
    }

    /// Rebuild a set from a snapshot.
    pub fn from_snapshot(snapshot: GSetSnapshot<T>) -> Self {
        snapshot.values.into_iter().collect()
    }
}

impl<T: Ord + Clone> Default for GSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Crdt for GSet<T> {
    fn merge(&mut self, other: &Self) {
        self.inner.merge_tuples(&other.inner);
    }
}

impl<T: Ord + Clone> SetQuery for GSet<T> {
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

impl<T: Ord + Clone> FromIterator<T> for GSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: Ord + Clone> Extend<T> for GSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for GSet<T>
where
    T: Ord + Clone + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_snapshot(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for GSet<T>
where
    T: Ord + Clone + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <GSetSnapshot<T> as serde::Deserialize<'de>>::deserialize(deserializer)
            .map(Self::from_snapshot)
    }
}
