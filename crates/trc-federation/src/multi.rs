use crate::searcher::SearcherBoxed;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use trc_collector::SearchRequest;
use trc_trace::TraceContext;

/// Scatters a [`SearchRequest`] across a fixed set of peers and gathers the
/// answers into one [`trc_collector::SearchResponse`].
///
/// A peer is anything behind a [`SearcherBoxed`] — an in-process
/// [`trc_collector::Collector`] and a remote transport look identical from
/// here. A failing peer never fails the whole query: its error text is
/// appended to the aggregate's `problems` and the rest of the fleet still
/// answers.
pub struct MultiSearcher {
    searchers: Vec<Arc<dyn SearcherBoxed>>,
}

impl MultiSearcher {
    pub fn new(searchers: Vec<Arc<dyn SearcherBoxed>>) -> Self {
        Self { searchers }
    }

    pub fn len(&self) -> usize {
        self.searchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.searchers.is_empty()
    }

    /// Fans `req` out to every peer concurrently and merges the results.
    ///
    /// Each peer sees a context tagged `<i>` (1-indexed) so that events it
    /// records against the ambient trace, if any, stay attributable after
    /// the merge. A peer that errors or panics contributes nothing but a
    /// problem string; a bucketing mismatch on merge does the same rather
    /// than corrupting the aggregate.
    pub async fn search(&self, ctx: &TraceContext, req: &SearchRequest) -> trc_collector::SearchResponse {
        let started = Instant::now();
        let mut req = req.clone();
        let _ = req.normalize();
        let limit = req.limit.unwrap_or(trc_collector::DEFAULT_LIMIT);

        let mut joins = JoinSet::new();
        for (i, searcher) in self.searchers.iter().enumerate() {
            let searcher = Arc::clone(searcher);
            let peer_ctx = ctx.prefix(format!("<{}>", i + 1));
            let peer_req = req.clone();
            if let Some(trace) = peer_ctx.trace() {
                trc_trace::tracef!(trace, "scatter to peer {}", i + 1);
            }
            joins.spawn(async move { searcher.search_boxed(peer_ctx, peer_req).await });
        }

        let bucketing = trc_stats::Bucketing::normalize(req.bucketing.clone());
        let mut response = trc_collector::SearchResponse::empty(Vec::new(), &bucketing);

        while let Some(joined) = joins.join_next().await {
            match joined {
                Ok(Ok(peer_response)) => {
                    if let Err(_mismatch) = response.stats.merge(&peer_response.stats) {
                        response
                            .problems
                            .push("bad merge: peer stats used a different bucketing".to_string());
                    }
                    response.sources.extend(peer_response.sources);
                    response.total += peer_response.total;
                    response.matched += peer_response.matched;
                    response.selected.extend(peer_response.selected);
                    response.problems.extend(peer_response.problems);
                }
                Ok(Err(search_err)) => {
                    tracing::warn!(error = %search_err, "peer search failed");
                    response.problems.push(search_err.to_string());
                }
                Err(join_err) => {
                    tracing::warn!(error = %join_err, "peer search task did not complete");
                    response
                        .problems
                        .push(format!("peer task did not complete: {join_err}"));
                }
            }
        }

        response.sources.sort();
        response
            .selected
            .sort_by(|a, b| b.started.cmp(&a.started));
        response.selected.truncate(limit);
        response.duration = started.elapsed();
        tracing::debug!(
            peers = self.searchers.len(),
            total = response.total,
            problems = response.problems.len(),
            "fleet search complete"
        );
        response
    }
}
