use crate::error::SearchError;
use std::future::Future;
use std::pin::Pin;
use trc_collector::{Collector, SearchRequest, SearchResponse};
use trc_trace::TraceContext;

/// Anything that can answer a [`SearchRequest`]. A [`crate::Collector`] is
/// the canonical local implementation; a remote transport (out of scope
/// here — see the crate root) implements the same trait over the wire.
///
/// Uses a native `async fn` in a trait, matching `trc-collector`'s exporter
/// trait split: this form isn't object-safe, so [`SearcherBoxed`] supplies
/// the boxed-future version [`crate::MultiSearcher`] actually stores.
pub trait Searcher: Send + Sync {
    fn search(
        &self,
        ctx: &TraceContext,
        req: &SearchRequest,
    ) -> impl Future<Output = Result<SearchResponse, SearchError>> + Send;
}

/// Object-safe version of [`Searcher`] for dynamic dispatch over a list of
/// heterogeneous peers.
pub trait SearcherBoxed: Send + Sync {
    fn search_boxed(
        &self,
        ctx: TraceContext,
        req: SearchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SearchResponse, SearchError>> + Send + '_>>;
}

impl<T: Searcher> SearcherBoxed for T {
    fn search_boxed(
        &self,
        ctx: TraceContext,
        req: SearchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SearchResponse, SearchError>> + Send + '_>> {
        Box::pin(async move { <T as Searcher>::search(self, &ctx, &req).await })
    }
}

impl Searcher for Collector {
    async fn search(
        &self,
        _ctx: &TraceContext,
        req: &SearchRequest,
    ) -> Result<SearchResponse, SearchError> {
        Ok(Collector::search(self, req))
    }
}
