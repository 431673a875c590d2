//! # Sorted Priority Queue
//!
//! Linked insertion-sort queue. The chain is non-decreasing under the
//! comparator at all times, so the head is always a minimum.
//!
//! ## Insertion Rule
//!
//! A value becomes the new head when the queue is empty or the value is
//! strictly less than the head. Otherwise the scan advances past every node
//! the value is not less than and splices the value in after the last one.
//! Equal elements therefore dequeue in insertion order.
//!
//! The queue deliberately exposes no iteration; only the minimum is
//! reachable.

use std::cmp::Ordering;
use std::fmt;

use super::arena::{NodeArena, NodeIndex};
use super::errors::{CollectionError, CollectionResult};

/// Comparator type used by [`SortedPriorityQueue::natural`].
pub type NaturalOrder<T> = fn(&T, &T) -> Ordering;

/// Comparator-ordered linked queue.
///
/// The comparator is fixed for the lifetime of the queue and must be a
/// total preorder.
pub struct SortedPriorityQueue<T, C = NaturalOrder<T>> {
    arena: NodeArena<T>,
    head: Option<NodeIndex>,
    len: usize,
    comparator: C,
}

impl<T: Ord> SortedPriorityQueue<T, NaturalOrder<T>> {
    /// Queue ordered by `T`'s `Ord`.
    pub fn natural() -> Self {
        Self::new(<T as Ord>::cmp)
    }
}

impl<T: Ord> Default for SortedPriorityQueue<T, NaturalOrder<T>> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T, C> SortedPriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty queue ordered by `comparator`.
    pub fn new(comparator: C) -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            len: 0,
            comparator,
        }
    }

    /// Inserts `value` at its sorted position. O(n), O(1) for a new minimum.
    pub fn enqueue(&mut self, value: T) {
        let head = match self.head {
            Some(head) if (self.comparator)(&value, self.arena.value(head)) != Ordering::Less => {
                head
            }
            _ => {
                self.head = Some(self.arena.alloc(value, self.head));
                self.len += 1;
                return;
            }
        };

        let mut cursor = head;
        while let Some(next) = self.arena.next(cursor) {
            if (self.comparator)(&value, self.arena.value(next)) == Ordering::Less {
                break;
            }
            cursor = next;
        }

        let after = self.arena.next(cursor);
        let node = self.arena.alloc(value, after);
        self.arena.set_next(cursor, Some(node));
        self.len += 1;
    }

    /// Removes and returns the minimum. O(1).
    pub fn dequeue(&mut self) -> CollectionResult<T> {
        let head = self.head.ok_or(CollectionError::EmptyContainer)?;
        let (value, next) = self.arena.free(head);
        self.head = next;
        self.len -= 1;
        Ok(value)
    }

    /// The minimum, without removing it.
    pub fn peek(&self) -> CollectionResult<&T> {
        self.head
            .map(|head| self.arena.value(head))
            .ok_or(CollectionError::EmptyContainer)
    }
}

impl<T, C> SortedPriorityQueue<T, C> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SortedPriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedPriorityQueue")
            .field("len", &self.len)
            .field("chain", &ChainDebug(self))
            .finish()
    }
}

struct ChainDebug<'a, T, C>(&'a SortedPriorityQueue<T, C>);

impl<T: fmt::Debug, C> fmt::Debug for ChainDebug<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.arena.chain(self.0.head))
            .finish()
    }
}

/// Renders the chain head first, e.g. `[1, 2, 3]`.
impl<T: fmt::Display, C> fmt::Display for SortedPriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (position, value) in self.arena.chain(self.head).enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}
