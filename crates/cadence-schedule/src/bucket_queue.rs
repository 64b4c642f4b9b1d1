//! Bucketed priority queue over small non-negative integer keys
//!
//! Keys index directly into a deque of FIFO buckets, so enqueue and dequeue
//! are O(1) amortized as long as the key range stays dense (slot indices in a
//! schedule).

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// FIFO-per-key priority queue, smallest key first.
///
/// With duplicate suppression on, a `(key, value)` pair that is already
/// pending is dropped on enqueue. The same pair may be enqueued again once it
/// has been dequeued.
#[derive(Clone, Debug)]
pub struct BucketPriorityQueue<T> {
    buckets: VecDeque<VecDeque<T>>,
    /// Key of `buckets[0]`
    offset: usize,
    len: usize,
    pending: Option<HashSet<(usize, T)>>,
}

impl<T: Clone + Eq + Hash> BucketPriorityQueue<T> {
    /// Create an empty queue
    pub fn new(drop_duplicates: bool) -> Self {
        Self {
            buckets: VecDeque::new(),
            offset: 0,
            len: 0,
            pending: drop_duplicates.then(HashSet::new),
        }
    }

    /// Check if duplicate suppression is on
    pub fn drops_duplicates(&self) -> bool {
        self.pending.is_some()
    }

    /// Add a value under `key`. Returns false if it was suppressed as a
    /// duplicate.
    pub fn enqueue(&mut self, key: usize, value: T) -> bool {
        if let Some(pending) = &mut self.pending {
            if !pending.insert((key, value.clone())) {
                return false;
            }
        }

        if self.buckets.is_empty() {
            self.offset = key;
        }
        if key < self.offset {
            for _ in key..self.offset {
                self.buckets.push_front(VecDeque::new());
            }
            self.offset = key;
        }

        let index = key - self.offset;
        while self.buckets.len() <= index {
            self.buckets.push_back(VecDeque::new());
        }
        self.buckets[index].push_back(value);
        self.len += 1;
        true
    }

    /// Remove and return the earliest value under the smallest key
    pub fn dequeue(&mut self) -> Option<(usize, T)> {
        while self.buckets.front().is_some_and(VecDeque::is_empty) {
            self.buckets.pop_front();
            self.offset += 1;
        }

        let value = self.buckets.front_mut()?.pop_front()?;
        let key = self.offset;
        self.len -= 1;
        if self.len == 0 {
            self.buckets.clear();
        }

        if let Some(pending) = &mut self.pending {
            pending.remove(&(key, value.clone()));
        }
        Some((key, value))
    }

    /// Smallest pending key
    pub fn peek_key(&self) -> Option<usize> {
        self.buckets
            .iter()
            .position(|bucket| !bucket.is_empty())
            .map(|index| index + self.offset)
    }

    /// Number of pending values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate by dequeuing until empty
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { queue: self }
    }
}

/// Draining iterator, see [`BucketPriorityQueue::drain`]
pub struct Drain<'a, T: Clone + Eq + Hash> {
    queue: &'a mut BucketPriorityQueue<T>,
}

impl<T: Clone + Eq + Hash> Iterator for Drain<'_, T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T: Clone + Eq + Hash> IntoIterator for BucketPriorityQueue<T> {
    type Item = (usize, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

/// Owning iterator in dequeue order
pub struct IntoIter<T: Clone + Eq + Hash> {
    queue: BucketPriorityQueue<T>,
}

impl<T: Clone + Eq + Hash> Iterator for IntoIter<T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.dequeue()
    }
}
