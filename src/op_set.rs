use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::snapshot::SetSnapshot;
use crate::{Comparator, OperationTuple, Resolution, SetError, SetQuery};

/// The operation-based set engine shared by every set in this crate.
///
/// An `OpSet` keeps one [`OperationTuple`] per value and never forgets a tag.
/// Which values are visible is decided by the [`Resolution`] chosen at
/// construction, reading each tuple through the set's [`Comparator`].
///
/// The typed wrappers ([`GSet`](crate::GSet), [`TwoPSet`](crate::TwoPSet),
/// [`ORSet`](crate::ORSet), [`LWWSet`](crate::LWWSet)) fix the policy in the
/// type. Use `OpSet` directly when the policy is only known at runtime; then
/// merging two engines with different policies is reported as
/// [`SetError::ResolutionMismatch`].
///
/// # Example
///
/// ```
/// use tagset_crdt::{OpSet, Resolution};
///
/// let mut a = OpSet::<&str, u64>::new(Resolution::LastWriteWins);
/// a.add("doc", 10);
///
/// let mut b = OpSet::new(Resolution::LastWriteWins);
/// b.add("doc", 10);
/// b.remove(&"doc", 12).unwrap();
///
/// a.try_merge(&b).unwrap();
/// assert!(!a.contains(&"doc"));
///
/// let grow_only = OpSet::<&str, u64>::new(Resolution::GrowOnly);
/// assert!(a.try_merge(&grow_only).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct OpSet<T: Ord + Clone, Tag: Ord + Clone> {
    resolution: Resolution,
    comparator: Comparator<Tag>,
    operations: BTreeMap<T, OperationTuple<T, Tag>>,
}

impl<T: Ord + Clone, Tag: Ord + Clone> OpSet<T, Tag> {
    /// Create an empty set ordering tags by their natural order.
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self::with_comparator(resolution, Comparator::natural())
    }

    /// Create an empty set with an injected tag comparator.
    #[must_use]
    pub fn with_comparator(resolution: Resolution, comparator: Comparator<Tag>) -> Self {
        Self {
            resolution,
            comparator,
            operations: BTreeMap::new(),
        }
    }

    /// Create a set from existing tuples.
    ///
    /// Tuples for the same value are unioned, so the input may repeat values.
    pub fn from_tuples<I>(resolution: Resolution, comparator: Comparator<Tag>, tuples: I) -> Self
    where
        I: IntoIterator<Item = OperationTuple<T, Tag>>,
    {
        let mut set = Self::with_comparator(resolution, comparator);
        for tuple in tuples {
            set.insert_tuple(tuple);
        }
        set
    }

    /// Restore a set from a snapshot produced by [`OpSet::to_snapshot`].
    pub fn from_snapshot(
        resolution: Resolution,
        comparator: Comparator<Tag>,
        snapshot: SetSnapshot<T, Tag>,
    ) -> Self {
        tracing::debug!(
            %resolution,
            tuples = snapshot.values.len(),
            "restoring set from snapshot"
        );
        Self::from_tuples(resolution, comparator, snapshot.values)
    }

    /// The policy deciding membership.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The tag comparator handed to the policy.
    #[must_use]
    pub fn comparator(&self) -> Comparator<Tag> {
        self.comparator
    }

    /// Record an add of `value` under `tag`.
    ///
    /// Returns `true` if the value was not visible before and is now.
    pub fn add(&mut self, value: T, tag: Tag) -> bool {
        let resolution = self.resolution;
        let comparator = self.comparator;
        let tuple = self
            .operations
            .entry(value)
            .or_insert_with_key(|v| OperationTuple::empty(v.clone()));

        let before = resolution.resolve(tuple.added(), tuple.removed(), &comparator);
        tuple.record_add(tag);
        !before && resolution.resolve(tuple.added(), tuple.removed(), &comparator)
    }

    /// Record a remove of `value`.
    ///
    /// What gets recorded depends on the policy:
    /// - grow-only: nothing, the call fails with
    ///   [`SetError::UnsupportedOperation`];
    /// - two-phase: `tag`, but only if the value has been added;
    /// - observed-remove: every add tag currently known for the value
    ///   (`tag` itself is not recorded);
    /// - last-write-wins: `tag`.
    ///
    /// Removing a value this replica has never seen is a no-op. Returns
    /// `Ok(true)` if the value was visible before and is not now.
    pub fn remove(&mut self, value: &T, tag: Tag) -> Result<bool, SetError> {
        let resolution = self.resolution;
        if !resolution.supports_remove() {
            tracing::warn!(%resolution, "rejected remove on a grow-only set");
            return Err(SetError::UnsupportedOperation { resolution });
        }
        Ok(self.remove_tagged(value, tag))
    }

    /// Record a remove under a policy known to support it. Under the
    /// grow-only policy nothing is recorded.
    pub(crate) fn remove_tagged(&mut self, value: &T, tag: Tag) -> bool {
        let resolution = self.resolution;
        let comparator = self.comparator;
        let Some(tuple) = self.operations.get_mut(value) else {
            return false;
        };

        let before = resolution.resolve(tuple.added(), tuple.removed(), &comparator);
        match resolution {
            Resolution::GrowOnly => return false,
            Resolution::TwoPhase => {
                if tuple.added().is_empty() {
                    return false;
                }
                tuple.record_remove(tag);
            }
            Resolution::ObservedRemove => {
                tuple.remove_observed();
            }
            Resolution::LastWriteWins => {
                tuple.record_remove(tag);
            }
        }
        before && !resolution.resolve(tuple.added(), tuple.removed(), &comparator)
    }

    /// Observed-remove without a tag argument. Returns `true` if the value
    /// stopped being visible.
    pub(crate) fn remove_observed(&mut self, value: &T) -> bool {
        let resolution = self.resolution;
        let comparator = self.comparator;
        let Some(tuple) = self.operations.get_mut(value) else {
            return false;
        };
        let before = resolution.resolve(tuple.added(), tuple.removed(), &comparator);
        tuple.remove_observed();
        before && !resolution.resolve(tuple.added(), tuple.removed(), &comparator)
    }

    /// Merge another engine's history into this one.
    ///
    /// Fails without touching `self` if the two engines use different
    /// policies.
    pub fn try_merge(&mut self, other: &Self) -> Result<(), SetError> {
        if self.resolution != other.resolution {
            tracing::warn!(
                ours = %self.resolution,
                theirs = %other.resolution,
                "rejected merge across resolution policies"
            );
            return Err(SetError::ResolutionMismatch {
                ours: self.resolution,
                theirs: other.resolution,
            });
        }
        self.merge_tuples(other);
        Ok(())
    }

    /// Union every tuple of `other` into `self`, regardless of policy.
    pub(crate) fn merge_tuples(&mut self, other: &Self) {
        for (value, theirs) in &other.operations {
            match self.operations.get_mut(value) {
                Some(ours) => ours.absorb(theirs),
                None => {
                    self.operations.insert(value.clone(), theirs.clone());
                }
            }
        }
        tracing::trace!(
            resolution = %self.resolution,
            incoming = other.operations.len(),
            tuples = self.operations.len(),
            "merged set state"
        );
    }

    fn insert_tuple(&mut self, tuple: OperationTuple<T, Tag>) {
        match self.operations.get_mut(tuple.value()) {
            Some(ours) => ours.absorb(&tuple),
            None => {
                self.operations.insert(tuple.value().clone(), tuple);
            }
        }
    }

    fn is_visible(&self, tuple: &OperationTuple<T, Tag>) -> bool {
        self.resolution
            .resolve(tuple.added(), tuple.removed(), &self.comparator)
    }

    /// Iterate over the visible values in ascending order.
    ///
    /// The iterator borrows the set; call `values()` again to restart.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.operations
            .values()
            .filter(|tuple| self.is_visible(tuple))
            .map(OperationTuple::value)
    }

    /// Check whether `value` is visible.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.operations
            .get(value)
            .is_some_and(|tuple| self.is_visible(tuple))
    }

    /// Check whether every value of `values` is visible.
    ///
    /// An empty input is trivially contained.
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    /// Number of visible values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values().count()
    }

    /// Whether no value is visible. Hidden history may still exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().next().is_none()
    }

    /// Copy the visible values into a vector, in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.values().cloned().collect()
    }

    /// The recorded history for `value`, visible or not.
    #[must_use]
    pub fn tuple(&self, value: &T) -> Option<&OperationTuple<T, Tag>> {
        self.operations.get(value)
    }

    /// Every recorded history, including values that are no longer visible.
    pub fn tuples(&self) -> impl Iterator<Item = &OperationTuple<T, Tag>> {
        self.operations.values()
    }

    /// Export the full history.
    #[must_use]
    pub fn to_snapshot(&self) -> SetSnapshot<T, Tag> {
        SetSnapshot {
            values: self.operations.values().cloned().collect(),
        }
    }
}

/// Equal when both engines use the same policy and hold the same history.
/// Comparators are not compared.
impl<T: Ord + Clone, Tag: Ord + Clone> PartialEq for OpSet<T, Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.resolution == other.resolution && self.operations == other.operations
    }
}

impl<T: Ord + Clone, Tag: Ord + Clone> Eq for OpSet<T, Tag> {}

impl<T: Ord + Clone, Tag: Ord + Clone> SetQuery for OpSet<T, Tag> {
    type Value = T;

    fn contains(&self, value: &T) -> bool {
        OpSet::contains(self, value)
    }

    fn len(&self) -> usize {
        OpSet::len(self)
    }

    fn to_vec(&self) -> Vec<T> {
        OpSet::to_vec(self)
    }
}
