//! Property-based tests for the merge laws.
//!
//! For every type:
//! - Merge is associative: (a ⊔ b) ⊔ c = a ⊔ (b ⊔ c)
//! - Merge is commutative: a ⊔ b = b ⊔ a
//! - Merge is idempotent: a ⊔ a = a
//! - The empty replica is the identity: a ⊔ ⊥ = a
//!
//! Sets additionally never lose a tag through a merge or a local
//! add/remove, and survive a snapshot round trip.

use proptest::prelude::*;
use tagset_crdt::events::{OpCrdt, SetOp};
use tagset_crdt::prelude::*;

type Ops = Vec<(u8, bool, u16)>;

fn arb_ops() -> impl Strategy<Value = Ops> {
    prop::collection::vec((0u8..8, any::<bool>(), 0u16..64), 0..24)
}

fn or_set(ops: &Ops) -> ORSet<u8, u16> {
    let mut s = ORSet::new();
    for &(value, is_add, tag) in ops {
        if is_add {
            s.add(value, tag);
        } else {
            s.remove(&value);
        }
    }
    s
}

fn lww_set(ops: &Ops) -> LWWSet<u8, u16> {
    let mut s = LWWSet::new();
    for &(value, is_add, tag) in ops {
        if is_add {
            s.add(value, tag);
        } else {
            s.remove(&value, tag);
        }
    }
    s
}

fn twop_set(ops: &Ops) -> TwoPSet<u8> {
    let mut s = TwoPSet::new();
    for &(value, is_add, _) in ops {
        if is_add {
            s.insert(value);
        } else {
            s.remove(&value);
        }
    }
    s
}

fn g_set(ops: &Ops) -> GSet<u8> {
    ops.iter().map(|&(value, _, _)| value).collect()
}

fn g_counter(id: &str, ops: &Ops) -> GCounter {
    let mut c = GCounter::new(id);
    for &(_, _, n) in ops {
        c.increment_by(u64::from(n));
    }
    c
}

fn pn_counter(id: &str, ops: &Ops) -> PNCounter {
    let mut c = PNCounter::new(id);
    for &(_, is_add, n) in ops {
        if is_add {
            c.increment_by(u64::from(n));
        } else {
            c.decrement_by(u64::from(n));
        }
    }
    c
}

fn merged<C: Crdt + Clone>(a: &C, b: &C) -> C {
    let mut out = a.clone();
    out.merge(b);
    out
}

macro_rules! merge_laws {
    ($name:ident, $build:expr, $empty:expr) => {
        mod $name {
            use super::*;

            proptest! {
                #[test]
                fn merge_is_commutative(a in arb_ops(), b in arb_ops()) {
                    let (a, b) = ($build(&a), $build(&b));
                    prop_assert_eq!(merged(&a, &b), merged(&b, &a));
                }

                #[test]
                fn merge_is_associative(a in arb_ops(), b in arb_ops(), c in arb_ops()) {
                    let (a, b, c) = ($build(&a), $build(&b), $build(&c));
                    prop_assert_eq!(
                        merged(&merged(&a, &b), &c),
                        merged(&a, &merged(&b, &c))
                    );
                }

                #[test]
                fn merge_is_idempotent(a in arb_ops()) {
                    let a = $build(&a);
                    prop_assert_eq!(merged(&a, &a), a);
                }

                #[test]
                fn empty_is_identity(a in arb_ops()) {
                    let a = $build(&a);
                    let empty = $empty;
                    prop_assert_eq!(merged(&a, &empty), a.clone());
                    prop_assert_eq!(merged(&empty, &a), a);
                }
            }
        }
    };
}

merge_laws!(or_set_laws, or_set, ORSet::new());
merge_laws!(lww_set_laws, lww_set, LWWSet::new());
merge_laws!(twop_set_laws, twop_set, TwoPSet::new());
merge_laws!(g_set_laws, g_set, GSet::new());

proptest! {
    #[test]
    fn g_counter_merge_is_commutative(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (g_counter("a", &a), g_counter("b", &b));
        let (ab, ba) = (merged(&a, &b), merged(&b, &a));
        prop_assert_eq!(ab.counters(), ba.counters());
        prop_assert_eq!(ab.value(), ba.value());
    }

    #[test]
    fn g_counter_merge_is_associative(a in arb_ops(), b in arb_ops(), c in arb_ops()) {
        let (a, b, c) = (g_counter("a", &a), g_counter("b", &b), g_counter("c", &c));
        prop_assert_eq!(
            merged(&merged(&a, &b), &c),
            merged(&a, &merged(&b, &c))
        );
    }

    #[test]
    fn g_counter_merge_is_idempotent(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (g_counter("a", &a), g_counter("b", &b));
        prop_assert_eq!(merged(&a, &a), a.clone());
        let once = merged(&a, &b);
        prop_assert_eq!(merged(&once, &b), once);
    }

    #[test]
    fn g_counter_empty_is_identity(a in arb_ops(), b in arb_ops()) {
        let mut a = g_counter("a", &a);
        a.merge(&g_counter("b", &b));
        prop_assert_eq!(merged(&a, &GCounter::new("a")), a.clone());
    }

    #[test]
    fn g_counter_merge_never_decreases(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (g_counter("a", &a), g_counter("b", &b));
        let m = merged(&a, &b);
        prop_assert!(m.value() >= a.value());
        prop_assert!(m.value() >= b.value());
        prop_assert_eq!(m.value(), a.value() + b.value());
    }

    #[test]
    fn pn_counter_merge_is_associative(a in arb_ops(), b in arb_ops(), c in arb_ops()) {
        let (a, b, c) = (pn_counter("a", &a), pn_counter("b", &b), pn_counter("c", &c));
        let left = merged(&merged(&a, &b), &c);
        let right = merged(&a, &merged(&b, &c));
        prop_assert_eq!(&left, &right);
        prop_assert_eq!(left.value(), a.value() + b.value() + c.value());
    }

    #[test]
    fn pn_counter_merge_is_commutative(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (pn_counter("a", &a), pn_counter("b", &b));
        prop_assert_eq!(merged(&a, &b).value(), merged(&b, &a).value());
    }

    #[test]
    fn pn_counter_merge_is_idempotent(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (pn_counter("a", &a), pn_counter("b", &b));
        let once = merged(&a, &b);
        prop_assert_eq!(merged(&once, &b), once);
    }

    #[test]
    fn pn_counter_value_is_sum_of_replicas(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (pn_counter("a", &a), pn_counter("b", &b));
        prop_assert_eq!(merged(&a, &b).value(), a.value() + b.value());
    }

    #[test]
    fn merge_never_drops_tags(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (or_set(&a), or_set(&b));
        let m = merged(&a, &b);
        for side in [&a, &b] {
            for tuple in side.tuples() {
                let after = m.tuple(tuple.value());
                prop_assert!(after.is_some());
                let after = after.unwrap();
                prop_assert!(after.added().is_superset(tuple.added()));
                prop_assert!(after.removed().is_superset(tuple.removed()));
            }
        }
    }

    #[test]
    fn or_set_history_only_grows(ops in arb_ops()) {
        let mut s = ORSet::new();
        for &(value, is_add, tag) in &ops {
            let before = s.clone();
            if is_add {
                s.add(value, tag);
            } else {
                s.remove(&value);
            }
            for old in before.tuples() {
                let now = s.tuple(old.value());
                prop_assert!(now.is_some());
                let now = now.unwrap();
                prop_assert!(now.added().is_superset(old.added()));
                prop_assert!(now.removed().is_superset(old.removed()));
            }
        }
    }

    #[test]
    fn lww_set_history_only_grows(ops in arb_ops()) {
        let mut s = LWWSet::new();
        for &(value, is_add, tag) in &ops {
            let before = s.clone();
            if is_add {
                s.add(value, tag);
            } else {
                s.remove(&value, tag);
            }
            for old in before.tuples() {
                let now = s.tuple(old.value());
                prop_assert!(now.is_some());
                let now = now.unwrap();
                prop_assert!(now.added().is_superset(old.added()));
                prop_assert!(now.removed().is_superset(old.removed()));
            }
        }
    }

    #[test]
    fn twop_set_halves_only_grow(ops in arb_ops()) {
        let mut s = TwoPSet::new();
        for &(value, is_add, _) in &ops {
            let added_before: Vec<u8> = s.added().copied().collect();
            let removed_before: Vec<u8> = s.removed().copied().collect();
            if is_add {
                s.insert(value);
            } else {
                s.remove(&value);
            }
            prop_assert!(added_before.iter().all(|v| s.added().any(|now| now == v)));
            prop_assert!(removed_before.iter().all(|v| s.removed().any(|now| now == v)));
        }
    }

    #[test]
    fn or_set_merge_shows_unremoved_add_tags(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (or_set(&a), or_set(&b));
        let m = merged(&a, &b);
        // Visible after the merge iff some add tag from either side was not
        // removed on either side.
        for value in a.tuples().chain(b.tuples()).map(|t| t.value()) {
            let sides: Vec<_> = [&a, &b].iter().filter_map(|s| s.tuple(value)).collect();
            let survives = sides
                .iter()
                .flat_map(|t| t.added())
                .any(|tag| sides.iter().all(|t| !t.removed().contains(tag)));
            prop_assert_eq!(m.contains(value), survives);
        }
    }

    #[test]
    fn twop_set_removed_values_stay_removed(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (twop_set(&a), twop_set(&b));
        let m = merged(&a, &b);
        for value in a.removed().chain(b.removed()) {
            prop_assert!(!m.contains(value));
        }
    }

    #[test]
    fn lww_snapshot_round_trip(a in arb_ops()) {
        let a = lww_set(&a);
        prop_assert_eq!(LWWSet::from_snapshot(a.to_snapshot()), a);
    }

    #[test]
    fn or_snapshot_round_trip(a in arb_ops()) {
        let a = or_set(&a);
        prop_assert_eq!(ORSet::from_snapshot(a.to_snapshot()), a);
    }

    #[test]
    fn twop_snapshot_keeps_contents(a in arb_ops()) {
        let a = twop_set(&a);
        let restored = TwoPSet::from_snapshot(a.to_snapshot());
        prop_assert!(restored.is_equal(&a));
        prop_assert_eq!(restored.removed().collect::<Vec<_>>(), a.removed().collect::<Vec<_>>());
    }

    #[test]
    fn lww_replay_matches_direct_calls(a in arb_ops()) {
        let log: Vec<SetOp<u8, u16>> = a
            .iter()
            .map(|&(value, is_add, tag)| {
                if is_add {
                    SetOp::add(value, tag)
                } else {
                    SetOp::remove(value, tag)
                }
            })
            .collect();

        let mut replayed = LWWSet::new();
        prop_assert!(replayed.replay(&log).is_ok());
        prop_assert_eq!(replayed, lww_set(&a));
    }

    #[test]
    fn difference_is_disjoint_from_other(a in arb_ops(), b in arb_ops()) {
        let (a, b) = (or_set(&a), lww_set(&b));
        let diff = a.difference(&b);
        prop_assert!(diff.iter().all(|v| a.contains(v) && !b.contains(v)));
        prop_assert_eq!(
            diff.len(),
            a.iter().filter(|v| !b.contains(v)).count()
        );
    }
}
