//! Convenient re-exports for common usage.
//!
//! ```
//! use tagset_crdt::prelude::*;
//! ```

pub use crate::Comparator;
pub use crate::Crdt;
pub use crate::GCounter;
pub use crate::GSet;
pub use crate::LWWSet;
pub use crate::ORSet;
pub use crate::OpSet;
pub use crate::OperationTuple;
pub use crate::PNCounter;
pub use crate::Resolution;
pub use crate::SetError;
pub use crate::SetQuery;
pub use crate::TwoPSet;
