//! Injectable ordering over operation tags.
//!
//! Set engines never compare tags directly. They go through a [`Comparator`],
//! a plain function pointer with the usual three-way convention, so that
//! callers can supply logical clocks or any other tag type with its own notion
//! of "later".
//!
//! ```
//! use core::cmp::Ordering;
//! use tagset_crdt::Comparator;
//!
//! // Newest-first: a smaller number means a later write.
//! let reversed = Comparator::new(|a: &u64, b: &u64| b.cmp(a));
//! assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
//! assert_eq!(reversed.max([3, 1, 2].iter()), Some(&1));
//! ```

use core::cmp::Ordering;
use core::fmt;

/// A three-way comparison over tags.
///
/// The wrapped function must describe a total preorder. Breaking
/// transitivity does not cause undefined behavior, but resolution results
/// become unpredictable.
pub struct Comparator<Tag> {
    compare_fn: fn(&Tag, &Tag) -> Ordering,
}

fn natural_order<Tag: Ord>(a: &Tag, b: &Tag) -> Ordering {
    a.cmp(b)
}

impl<Tag> Comparator<Tag> {
    /// Wrap a comparison function.
    pub const fn new(compare_fn: fn(&Tag, &Tag) -> Ordering) -> Self {
        Self { compare_fn }
    }

    /// Compare two tags.
    #[inline]
    pub fn compare(&self, a: &Tag, b: &Tag) -> Ordering {
        (self.compare_fn)(a, b)
    }

    /// Whether two tags are equal under this comparator.
    #[inline]
    pub fn matches(&self, a: &Tag, b: &Tag) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// The greatest tag of `tags`, or `None` if there are none.
    ///
    /// Among tags that compare equal the last one wins, same as
    /// [`Iterator::max_by`].
    pub fn max<'a, I>(&self, tags: I) -> Option<&'a Tag>
    where
        I: IntoIterator<Item = &'a Tag>,
        Tag: 'a,
    {
        tags.into_iter().max_by(|a, b| self.compare(a, b))
    }
}

impl<Tag: Ord> Comparator<Tag> {
    /// Order tags by their own [`Ord`] implementation.
    ///
    /// For integer tags this is plain numeric order.
    pub fn natural() -> Self {
        Self::new(natural_order::<Tag>)
    }
}

impl<Tag: Ord> Default for Comparator<Tag> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<Tag> Clone for Comparator<Tag> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag> Copy for Comparator<Tag> {}

impl<Tag> fmt::Debug for Comparator<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator").finish_non_exhaustive()
    }
}
