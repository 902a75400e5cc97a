//! In-process store of recent traces, keyed by category, and the search
//! facade over them.
//!
//! [`Collector`] mints [`trc_trace::Trace`]s under a category, retains the
//! most recent `category_capacity` per category, and answers
//! [`SearchRequest`]s with a [`SearchResponse`] — filtered, stats-bucketed,
//! sorted newest-first, and limited. It never fails: bad input is
//! sanitized and reported in `problems` instead.

mod collector;
mod config;
mod request;
mod response;
mod url;

pub use collector::Collector;
pub use config::{CollectorConfig, TraceConstructor};
pub use request::{CompiledQuery, SearchRequest, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use response::SearchResponse;
pub use url::{from_params, to_params};
