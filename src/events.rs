//! Operation-based application of set mutations.
//!
//! Sets in this crate are state-based: replicas converge by merging whole
//! tag histories. The layer that replicates them often keeps a log of the
//! individual mutations instead. [`OpCrdt`] lets such a log be folded back
//! into a set, one [`SetOp`] at a time:
//!
//! ```text
//!   local mutation -> SetOp -> log / broadcast
//!   remote SetOp   -> apply_op() -> set state
//! ```
//!
//! Because every operation only adds a tag to an append-only history,
//! applying the same operation twice has no additional effect. Replay needs
//! causal delivery: an add must arrive before any remove that observed it.
//! A remove for a value the replica has not seen yet is dropped, exactly as
//! a local `remove` of an unknown value is.
//!
//! # Example
//!
//! ```
//! use tagset_crdt::events::{OpCrdt, SetOp};
//! use tagset_crdt::prelude::*;
//!
//! let log = [
//!     SetOp::add("A", 1),
//!     SetOp::add("B", 2),
//!     SetOp::remove("A", 3),
//! ];
//!
//! let mut replica = LWWSet::new();
//! replica.replay(&log).unwrap();
//! assert_eq!(replica.to_vec(), vec!["B"]);
//! ```

use crate::{Crdt, GSet, LWWSet, ORSet, SetError, TwoPSet};

/// A single set mutation, as stored in an operation log.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "lowercase"))]
pub enum SetOp<T, Tag> {
    /// `value` was added at `tag`.
    Add {
        /// The element.
        value: T,
        /// The add tag.
        tag: Tag,
    },
    /// `value` was removed at `tag`.
    Remove {
        /// The element.
        value: T,
        /// The remove tag.
        tag: Tag,
    },
}

impl<T, Tag> SetOp<T, Tag> {
    /// An add operation.
    pub fn add(value: T, tag: Tag) -> Self {
        Self::Add { value, tag }
    }

    /// A remove operation.
    pub fn remove(value: T, tag: Tag) -> Self {
        Self::Remove { value, tag }
    }

    /// The element this operation targets.
    pub fn value(&self) -> &T {
        match self {
            Self::Add { value, .. } | Self::Remove { value, .. } => value,
        }
    }

    /// The tag carried by this operation.
    pub fn tag(&self) -> &Tag {
        match self {
            Self::Add { tag, .. } | Self::Remove { tag, .. } => tag,
        }
    }

    /// Whether this is a remove.
    pub fn is_remove(&self) -> bool {
        matches!(self, Self::Remove { .. })
    }
}

/// A CRDT that can express its mutations as discrete operations.
///
/// `apply_op` is idempotent: applying the same op twice has no additional
/// effect. Concurrent operations may arrive in any order, but causally
/// related ones must not: an add has to be applied before a remove that
/// observed it, or the remove is dropped.
pub trait OpCrdt: Crdt {
    /// The operation type this CRDT consumes.
    type Op;

    /// Why an operation could not be applied.
    type Error;

    /// Apply an operation to the current state.
    ///
    /// Returns `true` if the operation changed the visible contents.
    fn apply_op(&mut self, op: &Self::Op) -> Result<bool, Self::Error>;

    /// Apply every operation of `ops` in order.
    ///
    /// Stops at the first rejected operation; operations before it stay
    /// applied. Returns how many operations changed the visible contents.
    fn replay<'a, I>(&mut self, ops: I) -> Result<usize, Self::Error>
    where
        I: IntoIterator<Item = &'a Self::Op>,
        Self::Op: 'a,
    {
        let mut changed = 0;
        for op in ops {
            if self.apply_op(op)? {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

impl<T: Ord + Clone> OpCrdt for GSet<T> {
    type Op = SetOp<T, ()>;
    type Error = SetError;

    fn apply_op(&mut self, op: &Self::Op) -> Result<bool, SetError> {
        match op {
            SetOp::Add { value, .. } => Ok(self.insert(value.clone())),
            SetOp::Remove { value, .. } => self.remove(value).map(|()| false),
        }
    }
}

impl<T: Ord + Clone> OpCrdt for TwoPSet<T> {
    type Op = SetOp<T, ()>;
    type Error = SetError;

    fn apply_op(&mut self, op: &Self::Op) -> Result<bool, SetError> {
        Ok(match op {
            SetOp::Add { value, .. } => self.insert(value.clone()),
            SetOp::Remove { value, .. } => self.remove(value),
        })
    }
}

impl<T: Ord + Clone, Tag: Ord + Clone> OpCrdt for ORSet<T, Tag> {
    type Op = SetOp<T, Tag>;
    type Error = SetError;

    /// A remove hides the tags observed so far; its own tag is not stored.
    fn apply_op(&mut self, op: &Self::Op) -> Result<bool, SetError> {
        Ok(match op {
            SetOp::Add { value, tag } => self.add(value.clone(), tag.clone()),
            SetOp::Remove { value, .. } => self.remove(value),
        })
    }
}

impl<T: Ord + Clone, Tag: Ord + Clone> OpCrdt for LWWSet<T, Tag> {
    type Op = SetOp<T, Tag>;
    type Error = SetError;

    fn apply_op(&mut self, op: &Self::Op) -> Result<bool, SetError> {
        Ok(match op {
            SetOp::Add { value, tag } => self.add(value.clone(), tag.clone()),
            SetOp::Remove { value, tag } => self.remove(value, tag.clone()),
        })
    }
}
