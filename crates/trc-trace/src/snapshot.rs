use crate::event::EventSnapshot;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// An immutable, serializable copy of a [`crate::Trace`] at a moment in
/// time.
///
/// Holds no reference to the live trace or any pool entry — it is safe to
/// keep indefinitely. `via` records the chain of sources a snapshot
/// traversed through aggregators (populated by a federating searcher as it
/// folds peer responses into its own).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTrace {
    pub source: String,
    pub id: String,
    pub category: String,
    #[serde(with = "humantime_serde")]
    pub started: SystemTime,
    pub finished: bool,
    pub errored: bool,
    #[serde(with = "crate::duration_wire")]
    pub duration: Duration,
    pub events: Vec<EventSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub via: Vec<String>,
}

impl SnapshotTrace {
    pub fn active(&self) -> bool {
        !self.finished
    }

    /// Returns a copy with `source` pushed onto the `via` chain, as when an
    /// aggregator folds this snapshot into its own response.
    pub fn via(mut self, source: impl Into<String>) -> Self {
        self.via.push(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_mirrors_finished() {
        let snap = SnapshotTrace {
            source: "a".into(),
            id: "1".into(),
            category: "foo".into(),
            started: SystemTime::now(),
            finished: false,
            errored: false,
            duration: Duration::from_secs(0),
            events: vec![],
            via: vec![],
        };
        assert!(snap.active());
    }
}
