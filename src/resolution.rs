use alloc::collections::BTreeSet;
use core::cmp::Ordering;
use core::fmt;

use crate::Comparator;

/// Rule that maps a value's accumulated add and remove tags to membership.
///
/// A policy holds no state of its own. Everything it looks at lives in the
/// monotone tag sets of an [`OperationTuple`](crate::OperationTuple), which is
/// why any policy stays convergent under the engine's union merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Resolution {
    /// Present once added. Removing is rejected.
    GrowOnly,
    /// Present once added and never removed. A removal is permanent.
    TwoPhase,
    /// Present while some add tag has not been observed by a remove.
    ObservedRemove,
    /// Present while the latest add is not older than the latest remove.
    LastWriteWins,
}

impl Resolution {
    /// Decide membership from a value's tag history.
    pub fn resolve<Tag>(
        self,
        added: &BTreeSet<Tag>,
        removed: &BTreeSet<Tag>,
        comparator: &Comparator<Tag>,
    ) -> bool {
        match self {
            Self::GrowOnly => !added.is_empty(),
            Self::TwoPhase => !added.is_empty() && removed.is_empty(),
            Self::ObservedRemove => added
                .iter()
                .any(|add| !removed.iter().any(|rm| comparator.matches(rm, add))),
            Self::LastWriteWins => match (comparator.max(added), comparator.max(removed)) {
                (None, _) => false,
                (Some(_), None) => true,
                // Ties go to the add.
                (Some(add), Some(rm)) => comparator.compare(add, rm) != Ordering::Less,
            },
        }
    }

    /// Whether sets under this policy accept `remove`.
    #[must_use]
    pub fn supports_remove(self) -> bool {
        !matches!(self, Self::GrowOnly)
    }

    /// Short kebab-case name, as used in error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GrowOnly => "grow-only",
            Self::TwoPhase => "two-phase",
            Self::ObservedRemove => "observed-remove",
            Self::LastWriteWins => "last-write-wins",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
