//! # Ordered Sequence
//!
//! Insertion-ordered, singly linked, mutable container.
//!
//! | Operation       | Cost                          |
//! |-----------------|-------------------------------|
//! | `add`           | O(1), tail index maintained   |
//! | `add_first`     | O(1)                          |
//! | `remove_first`  | O(1)                          |
//! | `remove_last`   | O(n), walks to second-to-last |
//! | `get` / `set`   | O(i), walks `i` links         |
//!
//! ## Iteration
//!
//! `iter()` is a lazy, finite, forward-only walk that cannot be restarted;
//! call `iter()` again for a fresh pass. The iterator borrows the sequence,
//! so mutating the sequence while an iteration is in progress does not
//! compile.

use std::fmt;

use super::arena::{Chain, NodeArena, NodeIndex};
use super::errors::{CollectionError, CollectionResult};

/// Generic singly linked sequence.
#[derive(Clone)]
pub struct OrderedSequence<T> {
    arena: NodeArena<T>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
    len: usize,
}

impl<T> Default for OrderedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedSequence<T> {
    /// Creates an empty sequence.
    pub const fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Appends `value` at the tail.
    pub fn add(&mut self, value: T) {
        let index = self.arena.alloc(value, None);
        match self.tail {
            Some(tail) => self.arena.set_next(tail, Some(index)),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// Inserts `value` as the new head.
    pub fn add_first(&mut self, value: T) {
        let index = self.arena.alloc(value, self.head);
        if self.tail.is_none() {
            self.tail = Some(index);
        }
        self.head = Some(index);
        self.len += 1;
    }

    /// Removes and returns the head value.
    pub fn remove_first(&mut self) -> CollectionResult<T> {
        let head = self.head.ok_or(CollectionError::EmptyContainer)?;
        let (value, next) = self.arena.free(head);
        self.head = next;
        if next.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Ok(value)
    }

    /// Removes and returns the tail value.
    ///
    /// Links are forward only, so this walks from the head to the
    /// second-to-last node.
    pub fn remove_last(&mut self) -> CollectionResult<T> {
        let tail = self.tail.ok_or(CollectionError::EmptyContainer)?;
        if self.len == 1 {
            return self.remove_first();
        }

        let new_tail = self.node_at(self.len - 2);
        let (value, _) = self.arena.free(tail);
        self.arena.set_next(new_tail, None);
        self.tail = Some(new_tail);
        self.len -= 1;
        Ok(value)
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> CollectionResult<&T> {
        let node = self.locate(index)?;
        Ok(self.arena.value(node))
    }

    /// Mutable element at `index`.
    pub fn get_mut(&mut self, index: usize) -> CollectionResult<&mut T> {
        let node = self.locate(index)?;
        Ok(self.arena.value_mut(node))
    }

    /// Replaces the element at `index`, returning the previous value.
    pub fn set(&mut self, index: usize, value: T) -> CollectionResult<T> {
        let node = self.locate(index)?;
        Ok(std::mem::replace(self.arena.value_mut(node), value))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Forward iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            chain: self.arena.chain(self.head),
            remaining: self.len,
        }
    }

    /// Copies the elements into a `Vec`, head first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    fn locate(&self, index: usize) -> CollectionResult<NodeIndex> {
        if index >= self.len {
            return Err(CollectionError::IndexOutOfRange {
                index,
                size: self.len,
            });
        }
        Ok(self.node_at(index))
    }

    /// Walks `index` links from the head. Caller guarantees `index < len`.
    fn node_at(&self, index: usize) -> NodeIndex {
        let mut cursor = self.head;
        for _ in 0..index {
            cursor = cursor.and_then(|node| self.arena.next(node));
        }
        match cursor {
            Some(node) => node,
            None => unreachable!("chain shorter than len {}", self.len),
        }
    }
}

/// Borrowing iterator returned by [`OrderedSequence::iter`].
pub struct Iter<'a, T> {
    chain: Chain<'a, T>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.chain.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Owning iterator, drains from the head.
pub struct IntoIter<T> {
    sequence: OrderedSequence<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.sequence.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.sequence.len, Some(self.sequence.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for OrderedSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { sequence: self }
    }
}

impl<'a, T> IntoIterator for &'a OrderedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> FromIterator<T> for OrderedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Self::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T> Extend<T> for OrderedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: PartialEq> PartialEq for OrderedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for OrderedSequence<T> {}

impl<T: fmt::Debug> fmt::Debug for OrderedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders as `[a, b, c]`.
impl<T: fmt::Display> fmt::Display for OrderedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (position, value) in self.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[i32]) -> OrderedSequence<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_add_appends_at_tail() {
        let mut s = OrderedSequence::new();
        s.add(1);
        s.add(2);
        s.add(3);
        assert_eq!(s.size(), 3);
        assert_eq!(s.get(s.size() - 1), Ok(&3));
        assert_eq!(s.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_add_first_on_empty_sets_tail() {
        let mut s = OrderedSequence::new();
        s.add_first(2);
        s.add(3);
        s.add_first(1);
        assert_eq!(s.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_first_exposes_second() {
        let mut s = seq(&[10, 20, 30]);
        assert_eq!(s.remove_first(), Ok(10));
        assert_eq!(s.get(0), Ok(&20));
        assert_eq!(s.size(), 2);
    }

    #[test]
    fn test_remove_last_walks_to_new_tail() {
        let mut s = seq(&[1, 2, 3]);
        assert_eq!(s.remove_last(), Ok(3));
        s.add(4);
        assert_eq!(s.to_vec(), vec![1, 2, 4]);
    }

    #[test]
    fn test_remove_last_on_singleton_empties() {
        let mut s = seq(&[7]);
        assert_eq!(s.remove_last(), Ok(7));
        assert!(s.is_empty());
        assert_eq!(
            s.get(0),
            Err(CollectionError::IndexOutOfRange { index: 0, size: 0 })
        );
    }

    #[test]
    fn test_remove_on_empty_fails() {
        let mut s: OrderedSequence<i32> = OrderedSequence::new();
        assert_eq!(s.remove_first(), Err(CollectionError::EmptyContainer));
        assert_eq!(s.remove_last(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn test_set_returns_previous() {
        let mut s = seq(&[1, 2, 3]);
        assert_eq!(s.set(1, 20), Ok(2));
        assert_eq!(s.to_vec(), vec![1, 20, 3]);
        assert_eq!(
            s.set(3, 0),
            Err(CollectionError::IndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut s = seq(&[1, 2]);
        if let Ok(v) = s.get_mut(0) {
            *v = 100;
        }
        assert_eq!(s.to_vec(), vec![100, 2]);
    }

    #[test]
    fn test_clear_resets() {
        let mut s = seq(&[1, 2, 3]);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.size(), 0);
        s.add(9);
        assert_eq!(s.to_vec(), vec![9]);
    }

    #[test]
    fn test_iter_is_exact_and_restartable_by_new_call() {
        let s = seq(&[1, 2, 3]);
        let mut first = s.iter();
        assert_eq!(first.len(), 3);
        assert_eq!(first.next(), Some(&1));
        assert_eq!(first.len(), 2);

        let total: i32 = s.iter().sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_into_iter_drains_in_order() {
        let s = seq(&[3, 1, 2]);
        let drained: Vec<_> = s.into_iter().collect();
        assert_eq!(drained, vec![3, 1, 2]);
    }

    #[test]
    fn test_display_and_debug() {
        let s = seq(&[1, 2, 3]);
        assert_eq!(s.to_string(), "[1, 2, 3]");
        assert_eq!(format!("{s:?}"), "[1, 2, 3]");
        assert_eq!(OrderedSequence::<i32>::new().to_string(), "[]");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = seq(&[1, 2]);
        let mut copy = original.clone();
        copy.add(3);
        assert_eq!(original.size(), 2);
        assert_eq!(copy.size(), 3);
        assert_ne!(original, copy);
    }

    #[test]
    fn test_slots_reused_after_removal() {
        let mut s = seq(&[1, 2, 3]);
        s.remove_first().unwrap();
        s.remove_last().unwrap();
        s.add(4);
        s.add_first(0);
        assert_eq!(s.to_vec(), vec![0, 2, 4]);
        assert_eq!(s.size(), 3);
    }
}
