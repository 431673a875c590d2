//! Singly-linked node storage shared by both containers.
//!
//! Nodes live in a `Vec` of slots addressed by stable `u32` indices. Freed
//! slots are threaded onto a free list and reused before the vector grows.
//! Links point forward only; the owning container holds the head (and
//! optionally the tail) index and is the sole owner of every slot.

/// Stable address of a node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeIndex(u32);

impl NodeIndex {
    #[inline]
    fn slot(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied { value: T, next: Option<NodeIndex> },
    Vacant { next_free: Option<NodeIndex> },
}

#[derive(Debug, Clone)]
pub(crate) struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<NodeIndex>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
        }
    }

    /// Stores `value` with a forward link to `next` and returns its index.
    pub(crate) fn alloc(&mut self, value: T, next: Option<NodeIndex>) -> NodeIndex {
        let node = Slot::Occupied { value, next };

        match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index.slot()];
                if let Slot::Vacant { next_free } = *slot {
                    self.free_head = next_free;
                }
                *slot = node;
                index
            }
            None => {
                debug_assert!(self.slots.len() < u32::MAX as usize, "node arena exhausted");
                let index = NodeIndex(self.slots.len() as u32);
                self.slots.push(node);
                index
            }
        }
    }

    /// Releases the node at `index`, returning its value and forward link.
    pub(crate) fn free(&mut self, index: NodeIndex) -> (T, Option<NodeIndex>) {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(&mut self.slots[index.slot()], vacant) {
            Slot::Occupied { value, next } => {
                self.free_head = Some(index);
                (value, next)
            }
            Slot::Vacant { .. } => unreachable!("double free of node {}", index.0),
        }
    }

    #[inline]
    pub(crate) fn value(&self, index: NodeIndex) -> &T {
        match &self.slots[index.slot()] {
            Slot::Occupied { value, .. } => value,
            Slot::Vacant { .. } => unreachable!("dangling link to node {}", index.0),
        }
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, index: NodeIndex) -> &mut T {
        match &mut self.slots[index.slot()] {
            Slot::Occupied { value, .. } => value,
            Slot::Vacant { .. } => unreachable!("dangling link to node {}", index.0),
        }
    }

    #[inline]
    pub(crate) fn next(&self, index: NodeIndex) -> Option<NodeIndex> {
        match &self.slots[index.slot()] {
            Slot::Occupied { next, .. } => *next,
            Slot::Vacant { .. } => unreachable!("dangling link to node {}", index.0),
        }
    }

    #[inline]
    pub(crate) fn set_next(&mut self, index: NodeIndex, link: Option<NodeIndex>) {
        match &mut self.slots[index.slot()] {
            Slot::Occupied { next, .. } => *next = link,
            Slot::Vacant { .. } => unreachable!("dangling link to node {}", index.0),
        }
    }

    /// Drops every node and releases the backing storage.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
    }

    /// Forward walk of the chain starting at `head`.
    pub(crate) fn chain(&self, head: Option<NodeIndex>) -> Chain<'_, T> {
        Chain {
            arena: self,
            cursor: head,
        }
    }
}

/// Borrowing walk along forward links.
pub(crate) struct Chain<'a, T> {
    arena: &'a NodeArena<T>,
    cursor: Option<NodeIndex>,
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        self.cursor = self.arena.next(index);
        Some(self.arena.value(index))
    }
}
