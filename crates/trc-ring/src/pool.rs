use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Read-only counters exposed by a [`Pool`] for diagnostics.
///
/// All counters use `Ordering::Relaxed`: they are purely statistical and no
/// control flow in the pool depends on them being up to date.
#[derive(Debug, Default)]
pub struct PoolMetrics {
    gets: AtomicU64,
    allocs: AtomicU64,
    puts: AtomicU64,
    lost: AtomicU64,
}

impl PoolMetrics {
    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    pub fn allocs(&self) -> u64 {
        self.allocs.load(Ordering::Relaxed)
    }

    pub fn puts(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }

    /// Entries dropped instead of returned to the pool (pool was at capacity).
    pub fn lost(&self) -> u64 {
        self.lost.load(Ordering::Relaxed)
    }

    /// Fraction of `get`s served from a recycled entry rather than a fresh
    /// allocation, in `[0.0, 1.0]`.
    pub fn reuse_rate(&self) -> f64 {
        let gets = self.gets();
        if gets == 0 {
            return 0.0;
        }
        let reused = gets.saturating_sub(self.allocs());
        reused as f64 / gets as f64
    }
}

/// A small, bounded, mutex-backed object pool.
///
/// Reuse is never visible to callers: a value taken from the pool is reset
/// via `F` before being handed out, so no field of a prior occupant leaks
/// into the next holder.
pub struct Pool<T> {
    free: Mutex<Vec<T>>,
    capacity: usize,
    reset: Box<dyn Fn(&mut T) + Send + Sync>,
    alloc: Box<dyn Fn() -> T + Send + Sync>,
    metrics: PoolMetrics,
}

impl<T> Pool<T> {
    /// Creates a pool that keeps at most `capacity` idle entries, allocating
    /// fresh ones with `alloc` and scrubbing recycled ones with `reset`.
    pub fn new(
        capacity: usize,
        alloc: impl Fn() -> T + Send + Sync + 'static,
        reset: impl Fn(&mut T) + Send + Sync + 'static,
    ) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            reset: Box::new(reset),
            alloc: Box::new(alloc),
            metrics: PoolMetrics::default(),
        }
    }

    /// Takes an entry from the pool, allocating a fresh one if none is idle.
    pub fn get(&self) -> T {
        self.metrics.gets.fetch_add(1, Ordering::Relaxed);
        let recycled = self.free.lock().unwrap().pop();
        match recycled {
            Some(mut value) => {
                (self.reset)(&mut value);
                value
            }
            None => {
                self.metrics.allocs.fetch_add(1, Ordering::Relaxed);
                (self.alloc)()
            }
        }
    }

    /// Returns an entry to the pool. If the pool is already at capacity the
    /// entry is dropped and counted as lost.
    pub fn put(&self, value: T) {
        self.metrics.puts.fetch_add(1, Ordering::Relaxed);
        let mut free = self.free.lock().unwrap();
        if free.len() < self.capacity {
            free.push(value);
        } else {
            self.metrics.lost.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn metrics(&self) -> &PoolMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuse_resets_before_handing_out() {
        let pool: Pool<Vec<i32>> = Pool::new(2, Vec::new, |v| v.clear());
        let mut a = pool.get();
        a.push(1);
        pool.put(a);

        let b = pool.get();
        assert!(b.is_empty(), "recycled value must be reset");
        assert_eq!(pool.metrics().allocs(), 1);
        assert_eq!(pool.metrics().gets(), 2);
    }

    #[test]
    fn over_capacity_puts_are_lost() {
        let pool: Pool<i32> = Pool::new(1, || 0, |_| {});
        pool.put(1);
        pool.put(2);
        assert_eq!(pool.metrics().lost(), 1);
    }
}
