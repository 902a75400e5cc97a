use crate::category::CategoryStats;
use crate::stats::Stats;
use crate::Bucketing;
use std::collections::BTreeMap;
use trc_trace::SnapshotTrace;

/// Accumulates [`CategoryStats`] across a sequence of observed traces.
///
/// `observe` routes each trace to its category (creating one on first
/// sight) and classifies it: active, finished-ok (bucketed by duration), or
/// finished-errored.
pub struct StatsBuilder {
    bucketing: Bucketing,
    categories: BTreeMap<String, CategoryStats>,
}

impl StatsBuilder {
    pub fn new(bucketing: Bucketing) -> Self {
        Self {
            bucketing,
            categories: BTreeMap::new(),
        }
    }

    pub fn observe(&mut self, trace: &SnapshotTrace) {
        let category = self
            .categories
            .entry(trace.category.clone())
            .or_insert_with(|| CategoryStats::new(trace.category.clone(), self.bucketing.len()));

        category.observe_started(trace.started);

        if trace.active() {
            category.num_active += 1;
        } else if trace.errored {
            category.num_failed += 1;
        } else {
            for (bucket, threshold_met) in category
                .num_bucket
                .iter_mut()
                .zip(self.bucketing.bucket_flags(trace.duration))
            {
                if threshold_met {
                    *bucket += 1;
                }
            }
        }
    }

    /// Emits the accumulated stats, categories sorted by name ascending.
    pub fn stats(&self) -> Stats {
        tracing::trace!(categories = self.categories.len(), "built stats");
        Stats {
            bucketing: self.bucketing.as_slice().to_vec(),
            categories: self.categories.values().cloned().collect(),
        }
    }
}
