use std::sync::Mutex;

/// Fixed-capacity, newest-first retention buffer.
///
/// `Ring<T>` keeps the most recent `capacity` items written to it. Once full,
/// each `add` displaces the oldest surviving item. A single [`Mutex`] guards
/// the backing storage; `add` is the hot path and does no allocation once the
/// backing `Vec` has been sized.
///
/// When `capacity == 0` every operation degrades to a no-op: `add` reports
/// its argument as immediately displaced, `walk` visits nothing, and `stats`
/// reports an empty buffer.
pub struct Ring<T> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    buf: Vec<Option<T>>,
    capacity: usize,
    /// Index the next `add` will write to.
    cursor: usize,
    count: usize,
}

impl<T> Ring<T> {
    /// Creates a ring with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                buf: (0..capacity).map(|_| None).collect(),
                capacity,
                cursor: 0,
                count: 0,
            }),
        }
    }

    /// Returns the ring's configured capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().unwrap().capacity
    }

    /// Returns the number of items currently retained.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `value`, returning the item it displaced (if the ring was full)
    /// and whether a displacement occurred.
    ///
    /// At `capacity == 0` the value can never be stored: it is reported back
    /// as displaced immediately.
    pub fn add(&self, value: T) -> (Option<T>, bool) {
        let mut inner = self.inner.lock().unwrap();
        if inner.capacity == 0 {
            return (Some(value), true);
        }
        let idx = inner.cursor;
        let displaced = inner.buf[idx].take();
        let did_displace = displaced.is_some();
        inner.buf[idx] = Some(value);
        inner.cursor = (inner.cursor + 1) % inner.capacity;
        if inner.count < inner.capacity {
            inner.count += 1;
        }
        (displaced, did_displace)
    }

    /// Walks retained items newest-to-oldest, invoking `f` on each.
    ///
    /// `f` returning `Some(_)` aborts the walk and that value is returned.
    /// The walk holds the ring's lock for its duration: callers doing
    /// expensive work inside `f` accept contention with concurrent `add`s.
    pub fn walk<R>(&self, mut f: impl FnMut(&T) -> Option<R>) -> Option<R> {
        let inner = self.inner.lock().unwrap();
        if inner.capacity == 0 || inner.count == 0 {
            return None;
        }
        let mut idx = (inner.cursor + inner.capacity - 1) % inner.capacity;
        for _ in 0..inner.count {
            if let Some(item) = &inner.buf[idx] {
                if let Some(r) = f(item) {
                    return Some(r);
                }
            }
            idx = (idx + inner.capacity - 1) % inner.capacity;
        }
        None
    }

    /// Convenience over [`Ring::walk`]: clones every retained item,
    /// newest-first.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        self.walk(|item| {
            out.push(item.clone());
            None::<()>
        });
        out
    }

    /// Resizes the ring to `new_capacity`, retaining the
    /// `min(count, new_capacity)` newest items and returning everything
    /// dropped, newest-first.
    pub fn resize(&self, new_capacity: usize) -> Vec<T> {
        let mut inner = self.inner.lock().unwrap();

        let mut newest_first = Vec::with_capacity(inner.count);
        if inner.capacity > 0 {
            let mut idx = (inner.cursor + inner.capacity - 1) % inner.capacity;
            for _ in 0..inner.count {
                if let Some(item) = inner.buf[idx].take() {
                    newest_first.push(item);
                }
                idx = (idx + inner.capacity - 1) % inner.capacity;
            }
        }

        let keep = newest_first.len().min(new_capacity);
        let dropped = newest_first.split_off(keep);

        inner.buf = (0..new_capacity).map(|_| None).collect();
        inner.capacity = new_capacity;
        inner.cursor = 0;
        inner.count = 0;

        for item in newest_first.into_iter().rev() {
            let idx = inner.cursor;
            inner.buf[idx] = Some(item);
            inner.cursor = (inner.cursor + 1) % new_capacity.max(1);
            inner.count += 1;
        }

        dropped
    }

    /// Returns `(newest, oldest, count)` in O(1), without walking.
    pub fn stats(&self) -> (Option<T>, Option<T>, usize)
    where
        T: Clone,
    {
        let inner = self.inner.lock().unwrap();
        if inner.count == 0 || inner.capacity == 0 {
            return (None, None, inner.count);
        }
        let newest_idx = (inner.cursor + inner.capacity - 1) % inner.capacity;
        let oldest_idx = (inner.cursor + inner.capacity - inner.count) % inner.capacity;
        (
            inner.buf[newest_idx].clone(),
            inner.buf[oldest_idx].clone(),
            inner.count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_walk() {
        let ring = Ring::new(3);
        ring.add(1);
        ring.add(2);
        ring.add(3);
        ring.add(4);
        assert_eq!(ring.snapshot(), vec![4, 3, 2]);

        ring.add(5);
        ring.add(6);
        assert_eq!(ring.snapshot(), vec![6, 5, 4]);
    }

    #[test]
    fn add_past_capacity_displaces_oldest() {
        let ring = Ring::new(3);
        ring.add(1);
        ring.add(2);
        ring.add(3);
        let (displaced, did_displace) = ring.add(4);
        assert_eq!(displaced, Some(1));
        assert!(did_displace);
    }

    #[test]
    fn walk_abort_returns_verbatim() {
        let ring = Ring::new(4);
        for v in 1..=4 {
            ring.add(v);
        }
        let found = ring.walk(|v| if *v == 2 { Some(*v) } else { None });
        assert_eq!(found, Some(2));
    }

    #[test]
    fn resize_preserves_newest_and_returns_dropped_newest_first() {
        let ring = Ring::new(5);
        for v in 1..=5 {
            ring.add(v);
        }
        let dropped = ring.resize(3);
        assert_eq!(dropped, vec![3, 2, 1]);
        assert_eq!(ring.snapshot(), vec![5, 4]);

        ring.add(6);
        ring.add(7);
        assert_eq!(ring.snapshot(), vec![7, 6, 5]);
    }

    #[test]
    fn resize_grow_preserves_all() {
        let ring = Ring::new(2);
        ring.add(1);
        ring.add(2);
        let dropped = ring.resize(4);
        assert!(dropped.is_empty());
        assert_eq!(ring.snapshot(), vec![2, 1]);
    }

    #[test]
    fn zero_capacity_is_a_no_op() {
        let ring: Ring<i32> = Ring::new(0);
        let (displaced, did_displace) = ring.add(1);
        assert_eq!(displaced, Some(1));
        assert!(did_displace);
        assert!(ring.snapshot().is_empty());
    }

    #[test]
    fn stats_is_o1_and_matches_walk() {
        let ring = Ring::new(3);
        for v in 1..=3 {
            ring.add(v);
        }
        let (newest, oldest, count) = ring.stats();
        assert_eq!(newest, Some(3));
        assert_eq!(oldest, Some(1));
        assert_eq!(count, 3);
    }
}
