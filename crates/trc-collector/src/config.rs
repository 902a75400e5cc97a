use std::sync::Arc;
use trc_trace::Trace;

/// A trace constructor hook: given `(source, category)`, mints a new trace.
///
/// Overriding this lets a caller inject a custom identity scheme, clock, or
/// decoration without the collector needing to know about it.
pub type TraceConstructor = Arc<dyn Fn(&str, &str) -> Trace + Send + Sync>;

/// Configuration consumed by [`crate::Collector::new`].
#[derive(Clone)]
pub struct CollectorConfig {
    /// Per-category ring buffer capacity.
    pub category_capacity: usize,
    /// Process identity attached to newly minted traces.
    pub source: String,
    /// Hook used to mint new traces; defaults to [`Trace::new`].
    pub trace_constructor: TraceConstructor,
}

impl std::fmt::Debug for CollectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorConfig")
            .field("category_capacity", &self.category_capacity)
            .field("source", &self.source)
            .field("trace_constructor", &"<fn>")
            .finish()
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            category_capacity: 1000,
            source: default_source(),
            trace_constructor: Arc::new(|source, category| Trace::new(source, category)),
        }
    }
}

impl CollectorConfig {
    pub fn with_category_capacity(mut self, capacity: usize) -> Self {
        self.category_capacity = capacity;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_trace_constructor(mut self, constructor: TraceConstructor) -> Self {
        self.trace_constructor = constructor;
        self
    }
}

fn default_source() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "local".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_sane_capacity() {
        let cfg = CollectorConfig::default();
        assert_eq!(cfg.category_capacity, 1000);
        assert!(!cfg.source.is_empty());
    }

    #[test]
    fn builder_setters_compose() {
        let cfg = CollectorConfig::default()
            .with_category_capacity(32)
            .with_source("test-host");
        assert_eq!(cfg.category_capacity, 32);
        assert_eq!(cfg.source, "test-host");
    }
}
