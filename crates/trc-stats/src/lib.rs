//! Duration-bucketed per-category counters.
//!
//! [`StatsBuilder`] folds a stream of [`trc_trace::SnapshotTrace`]s into
//! [`Stats`], one [`CategoryStats`] per category seen. Merging two `Stats`
//! built from the same [`Bucketing`] is associative and commutative, which
//! is what lets a collector and a federating searcher fold partial results
//! together without re-walking anything.

mod builder;
mod bucketing;
mod category;
mod stats;

pub use builder::StatsBuilder;
pub use bucketing::{default_bucketing, Bucketing};
pub use category::CategoryStats;
pub use stats::{BucketingMismatch, Stats};
