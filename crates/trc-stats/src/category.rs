use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Per-category duration-bucketed counters.
///
/// `num_bucket[i]` counts finished, non-errored traces whose duration is
/// `>= bucketing[i]`; it is non-increasing in `i` by construction, and
/// `num_bucket[0]` equals the total count of finished-ok traces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub name: String,
    pub num_active: u64,
    pub num_bucket: Vec<u64>,
    pub num_failed: u64,
    #[serde(with = "trc_trace::timestamp_wire::option", default)]
    pub oldest: Option<SystemTime>,
    #[serde(with = "trc_trace::timestamp_wire::option", default)]
    pub newest: Option<SystemTime>,
}

impl CategoryStats {
    pub fn new(name: impl Into<String>, num_buckets: usize) -> Self {
        Self {
            name: name.into(),
            num_active: 0,
            num_bucket: vec![0; num_buckets],
            num_failed: 0,
            oldest: None,
            newest: None,
        }
    }

    /// `num_active + num_finished_ok + num_failed`.
    pub fn total_count(&self) -> u64 {
        self.num_active + self.num_bucket.first().copied().unwrap_or(0) + self.num_failed
    }

    pub(crate) fn observe_started(&mut self, started: SystemTime) {
        self.oldest = Some(match self.oldest {
            Some(existing) => existing.min(started),
            None => started,
        });
        self.newest = Some(match self.newest {
            Some(existing) => existing.max(started),
            None => started,
        });
    }

    /// Merges `other` into `self`, element-wise for bucket counts and
    /// min/max for `oldest`/`newest`. Associative and commutative, given
    /// both share the same bucket count.
    pub(crate) fn merge(&mut self, other: &CategoryStats) {
        self.num_active += other.num_active;
        self.num_failed += other.num_failed;
        for (a, b) in self.num_bucket.iter_mut().zip(other.num_bucket.iter()) {
            *a += b;
        }
        self.oldest = min_opt(self.oldest, other.oldest);
        self.newest = max_opt(self.newest, other.newest);
    }
}

fn min_opt(a: Option<SystemTime>, b: Option<SystemTime>) -> Option<SystemTime> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

fn max_opt(a: Option<SystemTime>, b: Option<SystemTime>) -> Option<SystemTime> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
