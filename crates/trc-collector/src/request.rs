use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trc_stats::{default_bucketing, Bucketing};
use trc_trace::SnapshotTrace;

fn is_false(b: &bool) -> bool {
    !*b
}

/// A query over a collector's (or a fleet's) recent traces.
///
/// Every populated field narrows the match set by AND; an empty request
/// matches every trace. Bad input (an unparseable regex, an out-of-range
/// limit) is never fatal — [`SearchRequest::normalize`] sanitizes it and
/// records a problem string instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_active: bool,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "trc_trace::duration_wire::vec"
    )]
    pub bucketing: Vec<Duration>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "trc_trace::duration_wire::option"
    )]
    pub min_duration: Option<Duration>,

    #[serde(default, skip_serializing_if = "is_false", alias = "is_failed")]
    pub is_errored: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
}

/// The regex compiled from `SearchRequest::query` by [`SearchRequest::normalize`].
///
/// Kept out of `SearchRequest` itself since `Regex` isn't `Serialize`.
#[derive(Default)]
pub struct CompiledQuery(pub(crate) Option<Regex>);

pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 250;
pub const DEFAULT_LIMIT: usize = 10;

impl SearchRequest {
    /// Sanitizes `self` in place and returns the compiled query. Never
    /// fatal: invalid input is clamped or dropped and described in
    /// `self.problems`.
    ///
    /// Idempotent: normalizing an already-normalized request is a no-op
    /// (bucketing stays sorted-with-leading-zero, limit stays clamped,
    /// a valid query stays compiled).
    pub fn normalize(&mut self) -> CompiledQuery {
        let bucketing = if self.bucketing.is_empty() {
            default_bucketing()
        } else {
            Bucketing::normalize(std::mem::take(&mut self.bucketing))
        };
        self.bucketing = bucketing.as_slice().to_vec();

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT);
        self.limit = Some(limit);

        let compiled = match self.query.as_deref() {
            Some(pattern) if !pattern.is_empty() => match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(err) => {
                    self.problems
                        .push(format!("invalid query {pattern:?}: {err}"));
                    self.query = None;
                    None
                }
            },
            _ => None,
        };

        CompiledQuery(compiled)
    }

    /// The AND-of-populated-fields predicate (§4.6).
    pub fn allow(&self, query: &CompiledQuery, trace: &SnapshotTrace) -> bool {
        if !self.ids.is_empty() && !self.ids.iter().any(|id| id == &trace.id) {
            return false;
        }
        if let Some(category) = &self.category {
            if category != &trace.category {
                return false;
            }
        }
        if self.is_active && trace.finished {
            return false;
        }
        if let Some(min) = self.min_duration {
            if !(trace.finished && !trace.errored && trace.duration >= min) {
                return false;
            }
        }
        if self.is_errored && !(trace.finished && trace.errored) {
            return false;
        }
        if let Some(re) = &query.0 {
            if !matches_query(re, trace) {
                return false;
            }
        }
        true
    }
}

fn matches_query(re: &Regex, trace: &SnapshotTrace) -> bool {
    re.is_match(&trace.id)
        || re.is_match(&trace.category)
        || trace.events.iter().any(|event| {
            re.is_match(&event.what)
                || event
                    .stack
                    .iter()
                    .any(|call| re.is_match(&call.function) || re.is_match(&call.file_line))
        })
}
