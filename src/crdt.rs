/// Core trait that all CRDTs must implement.
///
/// A CRDT (Conflict-free Replicated Data Type) guarantees that concurrent
/// updates on different replicas will converge to the same state after merging,
/// without requiring coordination.
///
/// # Properties
///
/// All implementations must satisfy:
/// - **Commutativity:** `a.merge(b) == b.merge(a)`
/// - **Associativity:** `a.merge(b.merge(c)) == a.merge(b).merge(c)`
/// - **Idempotency:** `a.merge(a) == a`
///
/// For the set types, "equal" means equal visible contents; the merge itself
/// is a union of append-only tag histories, so the laws hold for the
/// underlying state as well.
pub trait Crdt {
    /// Merge another replica's state into this one.
    ///
    /// After merging, `self` contains the least upper bound of both states.
    /// `other` is only read; nothing it owns is shared with `self`
    /// afterwards.
    fn merge(&mut self, other: &Self);
}
