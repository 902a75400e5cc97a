use crate::category::CategoryStats;
use crate::Bucketing;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Emitted by [`crate::StatsBuilder::stats`]: categories sorted by name
/// ascending, all built against the same `bucketing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    #[serde(with = "trc_trace::duration_wire::vec")]
    pub bucketing: Vec<Duration>,
    pub categories: Vec<CategoryStats>,
}

/// Merging two [`Stats`] whose bucketing differs is a programmer error:
/// the library never corrupts the aggregate — it skips the offending merge
/// and the caller reports a "bad merge" problem.
#[derive(Debug, Clone, Error)]
#[error("bucketing mismatch: cannot merge stats built with different bucketing")]
pub struct BucketingMismatch;

impl Stats {
    pub fn empty(bucketing: &Bucketing) -> Self {
        Self {
            bucketing: bucketing.as_slice().to_vec(),
            categories: Vec::new(),
        }
    }

    fn same_bucketing(&self, other: &Stats) -> bool {
        self.bucketing == other.bucketing
    }

    /// Merges `other` into `self` by category name. Associative and
    /// commutative. Fails without mutating `self` if the bucketing differs.
    pub fn merge(&mut self, other: &Stats) -> Result<(), BucketingMismatch> {
        if !self.same_bucketing(other) {
            return Err(BucketingMismatch);
        }
        for incoming in &other.categories {
            match self
                .categories
                .iter_mut()
                .find(|c| c.name == incoming.name)
            {
                Some(existing) => existing.merge(incoming),
                None => self.categories.push(incoming.clone()),
            }
        }
        self.categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(())
    }

    /// Folds every category into one synthetic `"overall"` category.
    pub fn overall(&self) -> CategoryStats {
        let mut overall = CategoryStats::new("overall", self.bucketing.len());
        for category in &self.categories {
            overall.merge(category);
        }
        overall
    }
}
