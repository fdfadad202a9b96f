// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Misuse of an [IndexedMinHeap].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// [IndexedMinHeap::push] was called with an id which is already in the heap.
    #[error("node {0} is already queued")]
    AlreadyQueued(i64),

    /// [IndexedMinHeap::decrease_key] was called with an id which is not in the heap.
    #[error("node {0} is not queued")]
    NotQueued(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    id: i64,
    distance: f64,
}

/// Binary min-heap of (node id, distance) pairs, with an index of node positions
/// to support decrease-key operations.
///
/// Every id may be present at most once. [push](IndexedMinHeap::push),
/// [pop_min](IndexedMinHeap::pop_min) and [decrease_key](IndexedMinHeap::decrease_key)
/// run in O(log n), [contains](IndexedMinHeap::contains) in O(1).
/// Entries with equal distances are popped in a deterministic order.
#[derive(Debug, Default, Clone)]
pub struct IndexedMinHeap {
    heap: Vec<Entry>,
    index: HashMap<i64, usize>,
}

impl IndexedMinHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Checks if a node with the given id is currently in the heap.
    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the current distance of a queued node.
    pub fn get(&self, id: i64) -> Option<f64> {
        self.index.get(&id).map(|&i| self.heap[i].distance)
    }

    /// Returns the entry with the smallest distance, without removing it.
    pub fn peek(&self) -> Option<(i64, f64)> {
        self.heap.first().map(|e| (e.id, e.distance))
    }

    /// Inserts a new node into the heap.
    ///
    /// Nodes already in the heap must be updated with [decrease_key](IndexedMinHeap::decrease_key).
    pub fn push(&mut self, id: i64, distance: f64) -> Result<(), QueueError> {
        if self.index.contains_key(&id) {
            return Err(QueueError::AlreadyQueued(id));
        }

        let i = self.heap.len();
        self.heap.push(Entry { id, distance });
        self.index.insert(id, i);
        self.sift_up(i);
        Ok(())
    }

    /// Removes and returns the entry with the smallest distance,
    /// or `None` if the heap is empty.
    pub fn pop_min(&mut self) -> Option<(i64, f64)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let top = self.heap.pop()?;
        self.index.remove(&top.id);

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Some((top.id, top.distance))
    }

    /// Lowers the distance of a queued node.
    ///
    /// Returns `Ok(true)` if the distance was updated, and `Ok(false)` if `distance`
    /// is not smaller than the current one - distances are never increased.
    pub fn decrease_key(&mut self, id: i64, distance: f64) -> Result<bool, QueueError> {
        let i = *self.index.get(&id).ok_or(QueueError::NotQueued(id))?;

        if distance < self.heap[i].distance {
            self.heap[i].distance = distance;
            self.sift_up(i);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.index.insert(self.heap[a].id, a);
        self.index.insert(self.heap[b].id, b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[parent].distance <= self.heap[i].distance {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;

            if left < len && self.heap[left].distance < self.heap[smallest].distance {
                smallest = left;
            }
            if right < len && self.heap[right].distance < self.heap[smallest].distance {
                smallest = right;
            }

            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    /// Checks that every parent is not greater than its children,
    /// and that the index points at the exact position of every entry.
    #[cfg(test)]
    fn check_invariants(&self) {
        assert_eq!(self.heap.len(), self.index.len(), "index size drifted");

        for (i, entry) in self.heap.iter().enumerate() {
            assert_eq!(
                self.index.get(&entry.id),
                Some(&i),
                "index of node {} drifted",
                entry.id
            );

            if i > 0 {
                let parent = &self.heap[(i - 1) / 2];
                assert!(
                    parent.distance <= entry.distance,
                    "heap order violated at {}: {} > {}",
                    i,
                    parent.distance,
                    entry.distance
                );
            }
        }
    }
}
