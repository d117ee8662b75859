#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! # tagset-crdt
//!
//! Counters and tagged sets that converge without coordination.
//!
//! A CRDT (Conflict-free Replicated Data Type) is a data structure that can be
//! replicated across multiple devices and updated independently. When replicas
//! are merged, they are guaranteed to converge to the same state without
//! requiring coordination or consensus.
//!
//! ## Quick Start
//!
//! ```
//! use tagset_crdt::prelude::*;
//!
//! // Grow-only counter
//! let mut c1 = GCounter::new("device-1");
//! c1.increment();
//!
//! let mut c2 = GCounter::new("device-2");
//! c2.increment();
//!
//! c1.merge(&c2);
//! assert_eq!(c1.value(), 2);
//!
//! // Observed-remove set with numeric tags
//! let mut s1 = ORSet::new();
//! s1.add("apple", 1);
//! let mut s2 = s1.clone();
//!
//! s1.remove(&"apple");
//! s2.add("apple", 2);
//!
//! s1.merge(&s2);
//! assert!(s1.contains(&"apple"));
//! ```
//!
//! ## Available CRDTs
//!
//! ### Counters
//! - [`GCounter`] - Grow-only counter (increment only)
//! - [`PNCounter`] - Positive-negative counter (increment and decrement)
//!
//! ### Sets
//! Every set keeps, per element, the tags of the adds and removes it has
//! seen (an [`OperationTuple`]). A [`Resolution`] policy decides from those
//! tags whether the element is visible:
//! - [`GSet`] - Grow-only set (add only)
//! - [`TwoPSet`] - Two-phase set (add and remove, remove is permanent)
//! - [`ORSet`] - Observed-remove set (add and remove freely)
//! - [`LWWSet`] - Last-writer-wins set (latest tag decides)
//!
//! [`OpSet`] is the engine behind all four, usable directly when the policy
//! is only known at runtime.
//!
//! ## The `Crdt` Trait
//!
//! All types implement the [`Crdt`] trait, which provides the [`Crdt::merge`]
//! method. Merge is guaranteed to be commutative, associative, and idempotent.
//!
//! ## Features
//!
//! - `std` (default): link the standard library. Without it the crate is
//!   `no_std` and needs `alloc`.
//! - `serde`: `Serialize`/`Deserialize` for every type, through the
//!   [`snapshot`] shapes.

extern crate alloc;

mod comparator;
mod crdt;
mod error;
mod gcounter;
mod gset;
mod lww_set;
mod op_set;
mod or_set;
mod pncounter;
mod query;
mod resolution;
mod tuple;
mod twop_set;

pub mod clock;
pub mod events;
pub mod prelude;
pub mod snapshot;

pub use comparator::Comparator;
pub use crdt::Crdt;
pub use error::SetError;
pub use gcounter::GCounter;
pub use gset::GSet;
pub use lww_set::LWWSet;
pub use op_set::OpSet;
pub use or_set::ORSet;
pub use pncounter::PNCounter;
pub use query::SetQuery;
pub use resolution::Resolution;
pub use tuple::OperationTuple;
pub use twop_set::TwoPSet;
