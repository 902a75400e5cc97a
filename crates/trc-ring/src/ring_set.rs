use crate::Ring;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Maps an arbitrary category string to a [`Ring<T>`], all sharing one
/// capacity.
///
/// A category never disappears once created: `resize` narrows or widens
/// every existing buffer but never drops a category, keeping stats
/// continuity across capacity changes.
pub struct RingSet<T> {
    capacity: Mutex<usize>,
    buffers: Mutex<HashMap<String, Arc<Ring<T>>>>,
}

impl<T> RingSet<T> {
    /// Creates a set whose buffers default to `capacity` on first use.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: Mutex::new(capacity),
            buffers: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the buffer for `category`, creating one at the set's current
    /// capacity on first use. Idempotent.
    pub fn get_or_create(&self, category: &str) -> Arc<Ring<T>> {
        let mut buffers = self.buffers.lock().unwrap();
        if let Some(ring) = buffers.get(category) {
            return Arc::clone(ring);
        }
        let capacity = *self.capacity.lock().unwrap();
        let ring = Arc::new(Ring::new(capacity));
        buffers.insert(category.to_string(), Arc::clone(&ring));
        tracing::debug!(category, capacity, "created ring for new category");
        ring
    }

    /// A snapshot copy of the category -> buffer mapping. Buffers are shared
    /// (`Arc`-cloned), not deep-copied. Iteration order is unspecified.
    pub fn get_all(&self) -> HashMap<String, Arc<Ring<T>>> {
        self.buffers.lock().unwrap().clone()
    }

    /// Updates the set's default capacity for future `get_or_create` calls
    /// and resizes every existing buffer, returning everything each buffer
    /// dropped (concatenated in unspecified order across buffers).
    pub fn resize(&self, new_capacity: usize) -> Vec<T> {
        *self.capacity.lock().unwrap() = new_capacity;
        let buffers = self.buffers.lock().unwrap();
        let mut dropped = Vec::new();
        for (category, ring) in buffers.iter() {
            let mut evicted = ring.resize(new_capacity);
            if !evicted.is_empty() {
                tracing::debug!(
                    category,
                    new_capacity,
                    evicted = evicted.len(),
                    "resized ring, evicted oldest entries"
                );
            }
            dropped.append(&mut evicted);
        }
        dropped
    }

    /// Current default capacity applied to new categories.
    pub fn capacity(&self) -> usize {
        *self.capacity.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_is_idempotent() {
        let set: RingSet<i32> = RingSet::new(4);
        let a = set.get_or_create("foo");
        let b = set.get_or_create("foo");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn categories_never_disappear_on_resize() {
        let set: RingSet<i32> = RingSet::new(4);
        set.get_or_create("foo");
        set.get_or_create("bar");
        set.resize(2);
        let all = set.get_all();
        assert!(all.contains_key("foo"));
        assert!(all.contains_key("bar"));
    }

    #[test]
    fn resize_retargets_capacity_for_new_categories() {
        let set: RingSet<i32> = RingSet::new(4);
        set.resize(10);
        let ring = set.get_or_create("foo");
        assert_eq!(ring.capacity(), 10);
    }
}
