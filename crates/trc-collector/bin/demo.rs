//! Minimal demo: mints a spread of traces across a few categories, then
//! runs a search and prints the response.
//!
//! Installing a global `tracing_subscriber` is a binary's job, not the
//! library's — `trc-collector` itself only emits `tracing` events.

use std::time::Duration;
use trc_collector::{Collector, CollectorConfig, SearchRequest};
use trc_trace::TraceContext;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let collector = Collector::new(CollectorConfig::default().with_source("demo-host"));

    let categories = ["api", "db", "cache"];
    for (i, category) in categories.iter().cycle().take(30).enumerate() {
        let ctx = TraceContext::new();
        let (_, trace) = collector.new_trace(&ctx, category);
        trc_trace::tracef!(trace, "handling request {i}");
        if i % 7 == 0 {
            trc_trace::errorf!(trace, "timeout after {} attempts", i % 3 + 1);
        }
        trace.finish();
    }

    let mut req = SearchRequest {
        limit: Some(5),
        ..Default::default()
    };
    req.category = Some("api".to_string());
    let response = collector.search(&req);

    println!("{}", serde_json::to_string_pretty(&response).unwrap());
    std::thread::sleep(Duration::from_millis(1));
}
