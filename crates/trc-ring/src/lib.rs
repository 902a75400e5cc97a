//! Fixed-capacity retention buffers.
//!
//! A [`Ring<T>`] holds the most recently added `C` items and walks them
//! newest-to-oldest. A [`RingSet<T>`] maps an arbitrary category string to a
//! `Ring<T>`, so a collector can keep a bounded history per category without
//! pre-declaring the set of categories. [`Pool`] is a small instrumented
//! object pool available for avoiding per-trace/per-event allocation on a
//! hot path, with metrics exposed for diagnostics (§5); pooling itself is
//! optional and not wired into the default trace-construction path.

mod pool;
mod ring;
mod ring_set;

pub use pool::{Pool, PoolMetrics};
pub use ring::Ring;
pub use ring_set::RingSet;
