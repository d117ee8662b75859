use alloc::collections::BTreeSet;
use alloc::vec::Vec;

/// Read-only view over the visible contents of a replicated set.
///
/// Every set type implements this, so equality and difference work across
/// types that share a value type. Both look only at visible values, never at
/// hidden tag history.
///
/// # Example
///
/// ```
/// use tagset_crdt::prelude::*;
///
/// let a: GSet<i32> = [1, 2, 3].into_iter().collect();
/// let mut b = TwoPSet::new();
/// b.insert(1);
///
/// assert_eq!(a.difference(&b).into_iter().collect::<Vec<_>>(), vec![2, 3]);
/// assert!(b.difference(&a).is_empty());
/// assert!(!a.is_equal(&b));
/// ```
pub trait SetQuery {
    /// Element type of the set.
    type Value: Ord + Clone;

    /// Whether `value` is currently a member.
    fn contains(&self, value: &Self::Value) -> bool;

    /// Number of visible values.
    fn len(&self) -> usize;

    /// Owned copy of the visible values.
    fn to_vec(&self) -> Vec<Self::Value>;

    /// Whether no value is visible.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every value of `values` is a member. Trivially true for an
    /// empty input.
    fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a Self::Value>,
        Self::Value: 'a,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    /// Same visible values: equal cardinality and mutual containment.
    fn is_equal<S>(&self, other: &S) -> bool
    where
        S: SetQuery<Value = Self::Value> + ?Sized,
    {
        self.len() == other.len() && self.contains_all(other.to_vec().iter())
    }

    /// Values visible here but not visible in `other`.
    fn difference<S>(&self, other: &S) -> BTreeSet<Self::Value>
    where
        S: SetQuery<Value = Self::Value> + ?Sized,
    {
        self.to_vec()
            .into_iter()
            .filter(|v| !other.contains(v))
            .collect()
    }
}
