use thiserror::Error;

/// A peer's failure to answer a [`trc_collector::SearchRequest`].
///
/// Never fatal to a [`crate::MultiSearcher::search`]: the aggregate is
/// still returned, with this peer's text appended to `problems` instead.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("peer timed out")]
    Timeout,
}
