//! Pure data-shape marshaling between [`SearchRequest`] and the
//! query-string form used by HTTP search endpoints (§6). No HTTP framework
//! is involved — this module only encodes/decodes plain key-value pairs.

use crate::request::SearchRequest;
use std::time::Duration;

/// Encodes `req` as `(key, value)` query-string pairs. Default values are
/// omitted, matching `Normalize`'s idempotence: encode -> decode ->
/// normalize round-trips.
pub fn to_params(req: &SearchRequest) -> Vec<(String, String)> {
    let mut params = Vec::new();

    for id in &req.ids {
        params.push(("id".to_string(), id.clone()));
    }
    if let Some(category) = &req.category {
        params.push(("category".to_string(), category.clone()));
    }
    if req.is_active {
        params.push(("active".to_string(), String::new()));
    }
    for bucket in &req.bucketing {
        params.push(("b".to_string(), humantime::format_duration(*bucket).to_string()));
    }
    if let Some(min) = req.min_duration {
        params.push(("min".to_string(), humantime::format_duration(min).to_string()));
    }
    if req.is_errored {
        params.push(("errored".to_string(), String::new()));
    }
    if let Some(query) = &req.query {
        params.push(("q".to_string(), query.clone()));
    }
    if let Some(limit) = req.limit {
        params.push(("n".to_string(), limit.to_string()));
    }

    params
}

/// Decodes query-string pairs into a [`SearchRequest`]. Unparseable
/// durations/limits are dropped silently here and caught by
/// [`SearchRequest::normalize`] instead, which is the single place bad
/// input becomes a recorded problem.
pub fn from_params<'a, I>(params: I) -> SearchRequest
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut req = SearchRequest::default();

    for (key, value) in params {
        match key {
            "id" => req.ids.push(value.to_string()),
            "category" => req.category = Some(value.to_string()),
            "active" => req.is_active = true,
            "b" => {
                if let Ok(d) = humantime::parse_duration(value) {
                    req.bucketing.push(d);
                }
            }
            "min" => {
                req.min_duration = humantime::parse_duration(value)
                    .ok()
                    .or_else(|| value.parse::<u64>().ok().map(Duration::from_nanos));
            }
            "errored" | "failed" => req.is_errored = true,
            "q" => req.query = Some(value.to_string()),
            "n" => req.limit = value.parse().ok(),
            _ => {}
        }
    }

    req
}
