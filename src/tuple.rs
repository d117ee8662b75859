use alloc::collections::BTreeSet;

/// The observed history of one value: every add tag and every remove tag a
/// replica has ever seen for it.
///
/// Both tag sets only grow. A resolution policy reads them to decide whether
/// the value is currently a member of its set.
///
/// # Example
///
/// ```
/// use tagset_crdt::OperationTuple;
///
/// let tuple = OperationTuple::new("apple", [1, 2, 2], [1]);
/// assert_eq!(tuple.value(), &"apple");
/// assert_eq!(tuple.added().len(), 2); // duplicate tags collapse
/// assert!(tuple.removed().contains(&1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperationTuple<T: Ord + Clone, Tag: Ord + Clone> {
    value: T,
    added: BTreeSet<Tag>,
    removed: BTreeSet<Tag>,
}

impl<T: Ord + Clone, Tag: Ord + Clone> OperationTuple<T, Tag> {
    /// Build a tuple from a value and its add and remove tags.
    pub fn new<A, R>(value: T, added: A, removed: R) -> Self
    where
        A: IntoIterator<Item = Tag>,
        R: IntoIterator<Item = Tag>,
    {
        Self {
            value,
            added: added.into_iter().collect(),
            removed: removed.into_iter().collect(),
        }
    }

    /// A tuple with no history yet.
    pub(crate) fn empty(value: T) -> Self {
        Self {
            value,
            added: BTreeSet::new(),
            removed: BTreeSet::new(),
        }
    }

    /// The value this history belongs to.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Tags of every observed add.
    #[must_use]
    pub fn added(&self) -> &BTreeSet<Tag> {
        &self.added
    }

    /// Tags of every observed remove.
    #[must_use]
    pub fn removed(&self) -> &BTreeSet<Tag> {
        &self.removed
    }

    /// Split into `(value, added, removed)`.
    pub fn into_parts(self) -> (T, BTreeSet<Tag>, BTreeSet<Tag>) {
        (self.value, self.added, self.removed)
    }

    pub(crate) fn record_add(&mut self, tag: Tag) -> bool {
        self.added.insert(tag)
    }

    pub(crate) fn record_remove(&mut self, tag: Tag) -> bool {
        self.removed.insert(tag)
    }

    /// Copy every known add tag into the remove tags.
    pub(crate) fn remove_observed(&mut self) -> bool {
        let before = self.removed.len();
        self.removed.extend(self.added.iter().cloned());
        self.removed.len() != before
    }

    /// Union `other`'s tags into this tuple. The caller guarantees both
    /// tuples describe the same value.
    pub(crate) fn absorb(&mut self, other: &Self) {
        debug_assert!(self.value == other.value);
        self.added.extend(other.added.iter().cloned());
        self.removed.extend(other.removed.iter().cloned());
    }
}
