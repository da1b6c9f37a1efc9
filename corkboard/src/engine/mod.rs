//! Ordering and stacking engines.
//!
//! Both engines work on plain `Task` values and know nothing about boards,
//! templates or storage. The task being moved is passed separately from the
//! tasks it is ordered against.

mod ordering;
mod slots;
mod stacking;

pub use ordering::{OrderingEngine, FIRST_SLOT};
pub use slots::first_free_slot;
pub use stacking::{StackEngine, BASE_Z_INDEX};
