//! # Ordered Containers Subsystem
//!
//! In-memory ordered-container primitives the rest of the core is built on.
//!
//! ## Containers
//!
//! | Type | Discipline | Used by |
//! |------|------------|---------|
//! | [`OrderedSequence`] | insertion order, head/tail biased, positional access | module-sequence cache |
//! | [`SortedPriorityQueue`] | comparator order, minimum-only access | submission processing queue |
//!
//! ## Node Storage
//!
//! Both containers keep their singly linked chain in an arena of slots
//! addressed by stable `u32` indices. The container holds the head index
//! and owns every slot; links point forward only, so there are no
//! back-reference cycles. Freed slots are recycled through a free list.
//!
//! ## Thread Safety
//!
//! Containers are plain owned values (`Send` / `Sync` when `T` is). Shared
//! use goes through the lock of the owning service.
//!
//! ```
//! use oc_01_collections::{OrderedSequence, SortedPriorityQueue};
//!
//! let mut modules: OrderedSequence<&str> = ["intro", "basics"].into_iter().collect();
//! modules.add("advanced");
//! assert_eq!(modules.to_string(), "[intro, basics, advanced]");
//!
//! let mut queue = SortedPriorityQueue::natural();
//! queue.enqueue(3);
//! queue.enqueue(1);
//! assert_eq!(queue.dequeue(), Ok(1));
//! ```

pub mod domain;

pub use domain::*;
