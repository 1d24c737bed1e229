//! Booking-order timeline with conflict enforcement.
//!
//! The timeline is a doubly linked list laid out in a slot arena: nodes
//! live in a `Vec`, linkage is by slot index, and a `PerformanceId → slot`
//! map gives O(1) access to any node. Freed slots are recycled.
//!
//! # Operations
//!
//! | Operation | Cost | Notes |
//! |-----------|------|-------|
//! | `insert` | O(n) | full conflict scan, then append at tail |
//! | `remove` | O(1) | unlink by id |
//! | `exchange_positions` | O(1) | swaps payloads, nodes stay linked in place |
//! | `iter` | O(n) | lazy, restartable, non-mutating |
//!
//! Order is booking order, not chronological order of the slots.

use std::collections::HashMap;

use crate::error::{EngineError, Result};
use crate::models::{Performance, PerformanceId, TimeSlot};

#[derive(Debug, Clone)]
struct Node {
    performance: Performance,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Ordered, conflict-free sequence of performances.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    index: HashMap<PerformanceId, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of booked performances.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is booked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` is booked.
    pub fn contains(&self, id: PerformanceId) -> bool {
        self.index.contains_key(&id)
    }

    /// Looks up a performance by id.
    pub fn get(&self, id: PerformanceId) -> Option<&Performance> {
        self.index
            .get(&id)
            .and_then(|&slot| self.node(slot))
            .map(|node| &node.performance)
    }

    /// Zero-based position of a performance in the current order.
    pub fn position_of(&self, id: PerformanceId) -> Option<usize> {
        self.iter().position(|p| p.id() == id)
    }

    /// Returns the first booked performance whose slot overlaps `slot`.
    pub fn find_conflict(&self, slot: &TimeSlot) -> Option<&Performance> {
        self.iter().find(|existing| existing.slot().overlaps(slot))
    }

    /// Appends a performance at the tail.
    ///
    /// Fails with [`EngineError::Conflict`] naming the first overlapping
    /// entry, or [`EngineError::DuplicatePerformance`] if the id is already
    /// booked; the timeline is left unchanged in both cases.
    pub fn insert(&mut self, performance: Performance) -> Result<PerformanceId> {
        let id = performance.id();
        if self.index.contains_key(&id) {
            return Err(EngineError::DuplicatePerformance(id));
        }
        if let Some(existing) = self.find_conflict(&performance.slot()) {
            return Err(EngineError::Conflict {
                conflicting: existing.id(),
            });
        }

        let node = Node {
            performance,
            prev: self.tail,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(tail_node) = self.node_mut(tail) {
                    tail_node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.index.insert(id, slot);
        self.len += 1;
        Ok(id)
    }

    /// Unlinks a performance and hands it back.
    pub fn remove(&mut self, id: PerformanceId) -> Result<Performance> {
        let slot = self
            .index
            .remove(&id)
            .ok_or(EngineError::PerformanceNotFound(id))?;
        let node = self.slots[slot]
            .take()
            .ok_or(EngineError::PerformanceNotFound(id))?;

        match node.prev {
            Some(prev) => {
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(next_node) = self.node_mut(next) {
                    next_node.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        self.free.push(slot);
        self.len -= 1;
        Ok(node.performance)
    }

    /// Swaps the positions of two performances.
    ///
    /// The payloads trade places at their existing nodes, so every other
    /// element keeps its order and neighbours. Slots and artists are not
    /// touched and no conflict check runs. Swapping a performance with
    /// itself is a no-op.
    pub fn exchange_positions(&mut self, a: PerformanceId, b: PerformanceId) -> Result<()> {
        let slot_a = *self
            .index
            .get(&a)
            .ok_or(EngineError::PerformanceNotFound(a))?;
        let slot_b = *self
            .index
            .get(&b)
            .ok_or(EngineError::PerformanceNotFound(b))?;
        if slot_a == slot_b {
            return Ok(());
        }

        let (lo, hi) = if slot_a < slot_b {
            (slot_a, slot_b)
        } else {
            (slot_b, slot_a)
        };
        let (left, right) = self.slots.split_at_mut(hi);
        if let (Some(x), Some(y)) = (left[lo].as_mut(), right[0].as_mut()) {
            std::mem::swap(&mut x.performance, &mut y.performance);
        }

        self.index.insert(a, slot_b);
        self.index.insert(b, slot_a);
        Ok(())
    }

    /// Iterates performances in timeline order.
    ///
    /// Each call starts a fresh traversal from the head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            timeline: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, slot: usize) -> Option<&Node> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }
}

/// Borrowing iterator over a [`Timeline`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    timeline: &'a Timeline,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Performance;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.timeline.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.performance)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Performance;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
