use serde::{Deserialize, Serialize};
use std::time::Duration;
use trc_stats::Stats;
use trc_trace::SnapshotTrace;

/// What a [`crate::Collector::search`] (or a federating searcher) produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub stats: Stats,
    #[serde(alias = "origins")]
    pub sources: Vec<String>,
    pub total: usize,
    pub matched: usize,
    pub selected: Vec<SnapshotTrace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
    #[serde(with = "trc_trace::duration_wire")]
    pub duration: Duration,
}

impl SearchResponse {
    pub fn empty(sources: Vec<String>, bucketing: &trc_stats::Bucketing) -> Self {
        Self {
            stats: Stats::empty(bucketing),
            sources,
            total: 0,
            matched: 0,
            selected: Vec::new(),
            problems: Vec::new(),
            duration: Duration::ZERO,
        }
    }
}
