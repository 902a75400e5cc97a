use crate::config::CollectorConfig;
use crate::request::SearchRequest;
use crate::response::SearchResponse;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use trc_ring::RingSet;
use trc_stats::{Bucketing, StatsBuilder};
use trc_trace::{SnapshotTrace, Trace, TraceContext};

/// In-process store of recent traces, keyed by category, and the canonical
/// local [`crate::Searcher`]-equivalent: answers [`SearchRequest`]s against
/// what it currently retains.
pub struct Collector {
    rings: RingSet<Arc<Trace>>,
    source: Mutex<String>,
    trace_constructor: crate::config::TraceConstructor,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            rings: RingSet::new(config.category_capacity),
            source: Mutex::new(config.source),
            trace_constructor: config.trace_constructor,
        }
    }

    /// Either returns `ctx` unchanged (annotating its existing trace with a
    /// `"(+ category)"` event, per §4.6.1) or mints a new trace under
    /// `category`, stores it in that category's ring, and returns a
    /// context carrying it.
    pub fn new_trace(&self, ctx: &TraceContext, category: &str) -> (TraceContext, Arc<Trace>) {
        if let Some(existing) = ctx.trace() {
            trc_trace::tracef!(existing, "(+ {category})");
            return (ctx.clone(), Arc::clone(existing));
        }

        let source = self.source.lock().unwrap().clone();
        let trace = Arc::new((self.trace_constructor)(&source, category));
        let ring = self.rings.get_or_create(category);
        ring.add(Arc::clone(&trace));
        tracing::debug!(category, id = trace.id(), "created trace");

        let new_ctx = ctx.with_trace(Arc::clone(&trace));
        (new_ctx, trace)
    }

    /// Resizes every category's retention buffer (and the default applied
    /// to categories created afterward).
    pub fn resize(&self, new_capacity: usize) {
        self.rings.resize(new_capacity);
    }

    /// Changes the source label attached to newly minted traces.
    /// Already-running traces keep the source they were created with.
    pub fn set_source(&self, source: impl Into<String>) {
        *self.source.lock().unwrap() = source.into();
    }

    pub fn source(&self) -> String {
        self.source.lock().unwrap().clone()
    }

    /// Runs `req` against everything currently retained (§4.6).
    pub fn search(&self, req: &SearchRequest) -> SearchResponse {
        let start = Instant::now();
        let mut req = req.clone();
        let compiled_query = req.normalize();
        let bucketing = Bucketing::normalize(req.bucketing.clone());

        let mut total: Vec<SnapshotTrace> = Vec::new();
        for (_, ring) in self.rings.get_all() {
            for trace in ring.snapshot() {
                total.push(trace.snapshot());
            }
        }

        let mut builder = StatsBuilder::new(bucketing);
        for trace in &total {
            builder.observe(trace);
        }
        let stats = builder.stats();

        let mut matched: Vec<SnapshotTrace> = total
            .iter()
            .filter(|trace| req.allow(&compiled_query, trace))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.started.cmp(&a.started));

        let limit = req.limit.unwrap_or(crate::request::DEFAULT_LIMIT);
        let selected: Vec<SnapshotTrace> = matched.iter().take(limit).cloned().collect();

        SearchResponse {
            stats,
            sources: vec![self.source()],
            total: total.len(),
            matched: matched.len(),
            selected,
            problems: req.problems,
            duration: start.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trace_under_live_context_annotates_instead_of_creating() {
        let collector = Collector::new(CollectorConfig::default());
        let ctx = TraceContext::new();
        let (ctx, trace) = collector.new_trace(&ctx, "foo");
        let (_, trace2) = collector.new_trace(&ctx, "bar");
        assert!(Arc::ptr_eq(&trace, &trace2));
        let events = trace.events();
        assert_eq!(events.last().unwrap().what, "(+ bar)");
    }

    #[test]
    fn resize_then_search_reflects_new_capacity() {
        let collector = Collector::new(CollectorConfig::default().with_category_capacity(32));
        for _ in 0..64 {
            let ctx = TraceContext::new();
            let (_, trace) = collector.new_trace(&ctx, "foo");
            trace.finish();
        }
        let mut req = SearchRequest {
            limit: Some(64),
            ..Default::default()
        };
        req.category = Some("foo".to_string());
        let resp = collector.search(&req);
        assert_eq!(resp.selected.len(), 32);

        collector.resize(16);
        let resp = collector.search(&req);
        assert_eq!(resp.selected.len(), 16);
    }

    #[test]
    fn query_matches_event_text() {
        let collector = Collector::new(CollectorConfig::default());
        let ctx = TraceContext::new();
        let (_, trace) = collector.new_trace(&ctx, "foo");
        trc_trace::tracef!(trace, "trace 7");
        trace.finish();

        let req = SearchRequest {
            query: Some("trace 7".to_string()),
            ..Default::default()
        };
        assert_eq!(collector.search(&req).matched, 1);

        let req = SearchRequest {
            query: Some("trace 8".to_string()),
            ..Default::default()
        };
        assert_eq!(collector.search(&req).matched, 0);
    }

    #[test]
    fn search_is_never_fatal_on_bad_input() {
        let collector = Collector::new(CollectorConfig::default());
        let req = SearchRequest {
            query: Some("(unclosed".to_string()),
            limit: Some(99_999),
            ..Default::default()
        };
        let resp = collector.search(&req);
        assert_eq!(resp.problems.len(), 1);
    }
}
