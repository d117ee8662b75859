use crate::Resolution;

/// Errors returned by set operations that a resolution policy rejects.
///
/// Removing a value that was never added, re-adding a known tag, or merging an
/// already merged replica are not errors; those calls are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SetError {
    /// The policy does not support this operation (removing from a grow-only set).
    #[error("{resolution} sets do not support removing values")]
    UnsupportedOperation {
        /// Policy of the set that rejected the call.
        resolution: Resolution,
    },
    /// Two engines with different resolution policies cannot be merged.
    #[error("resolution mismatch: {ours} set cannot merge {theirs} state")]
    ResolutionMismatch {
        /// Policy of the receiving set.
        ours: Resolution,
        /// Policy of the set being merged in.
        theirs: Resolution,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_policies() {
        let err = SetError::UnsupportedOperation {
            resolution: Resolution::GrowOnly,
        };
        assert_eq!(err.to_string(), "grow-only sets do not support removing values");

        let err = SetError::ResolutionMismatch {
            ours: Resolution::LastWriteWins,
            theirs: Resolution::ObservedRemove,
        };
        assert_eq!(
            err.to_string(),
            "resolution mismatch: last-write-wins set cannot merge observed-remove state"
        );
    }
}
