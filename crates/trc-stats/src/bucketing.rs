use std::time::Duration;

/// A strictly increasing list of durations starting at zero, used to tally
/// finished, non-errored traces by how slow they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucketing(Vec<Duration>);

/// `[0, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s, 5s, 10s]` — the library
/// default used whenever a caller doesn't supply its own.
pub fn default_bucketing() -> Bucketing {
    Bucketing(vec![
        Duration::from_millis(0),
        Duration::from_millis(1),
        Duration::from_millis(5),
        Duration::from_millis(10),
        Duration::from_millis(50),
        Duration::from_millis(100),
        Duration::from_millis(500),
        Duration::from_secs(1),
        Duration::from_secs(5),
        Duration::from_secs(10),
    ])
}

impl Default for Bucketing {
    fn default() -> Self {
        default_bucketing()
    }
}

impl Bucketing {
    /// Builds a bucketing from arbitrary durations, sorting ascending and
    /// prepending a mandatory leading zero if one isn't already present.
    pub fn normalize(mut thresholds: Vec<Duration>) -> Self {
        thresholds.sort_unstable();
        thresholds.dedup();
        if thresholds.first().copied() != Some(Duration::ZERO) {
            thresholds.insert(0, Duration::ZERO);
        }
        Bucketing(thresholds)
    }

    pub fn as_slice(&self) -> &[Duration] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the bucket a finished duration falls into: the count of
    /// thresholds that are `<= duration`.
    pub fn bucket_flags(&self, duration: Duration) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().map(move |threshold| *threshold <= duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_sorts_and_prepends_zero() {
        let b = Bucketing::normalize(vec![
            Duration::from_millis(10),
            Duration::from_millis(1),
        ]);
        assert_eq!(
            b.as_slice(),
            &[Duration::ZERO, Duration::from_millis(1), Duration::from_millis(10)]
        );
    }

    #[test]
    fn normalize_does_not_duplicate_zero() {
        let b = Bucketing::normalize(vec![Duration::ZERO, Duration::from_millis(5)]);
        assert_eq!(b.len(), 2);
    }
}
