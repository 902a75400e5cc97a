use crate::Trace;
use std::sync::Arc;

/// An ambient value slot carrying at most one live [`Trace`] through a call
/// chain, plus an optional prefix applied to events recorded through this
/// context.
///
/// `TraceContext` is an ordinary value, threaded explicitly by callers
/// (rather than a thread-local), so that dispatching many concurrent
/// children — as [`crate::TraceContext::prefix`] does for scatter/gather —
/// is just passing a distinct clone to each task.
#[derive(Clone, Default)]
pub struct TraceContext {
    trace: Option<Arc<Trace>>,
    prefix: Option<String>,
}

impl TraceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The trace carried by this context, if any.
    pub fn trace(&self) -> Option<&Arc<Trace>> {
        self.trace.as_ref()
    }

    /// Whether this context already carries a live trace.
    pub fn has_trace(&self) -> bool {
        self.trace.is_some()
    }

    /// Derives a context carrying `trace`.
    pub fn with_trace(&self, trace: Arc<Trace>) -> Self {
        Self {
            trace: Some(trace),
            prefix: self.prefix.clone(),
        }
    }

    /// Derives a context whose trace events are prefixed with the formatted
    /// tag, for all descendants. Used by a scatter/gather searcher to make
    /// per-peer tags (`<1>`, `<2>`, ...) unambiguous in merged logs.
    pub fn prefix(&self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let prefix = match &self.prefix {
            Some(existing) => format!("{existing}{tag}"),
            None => tag,
        };
        Self {
            trace: self.trace.clone(),
            prefix: Some(prefix),
        }
    }

    fn tag(&self, what: &str) -> String {
        match &self.prefix {
            Some(p) => format!("{p} {what}"),
            None => what.to_string(),
        }
    }

    /// Appends a non-error event to this context's trace, applying the
    /// prefix if one is set. No-op if the context carries no trace.
    pub fn tracef_at(&self, what: String, function: &str, file: &str, line: u32) {
        if let Some(trace) = &self.trace {
            trace.tracef_at(self.tag(&what), function, file, line);
        }
    }

    /// Error variant of [`TraceContext::tracef_at`]; also marks the
    /// context's trace errored.
    pub fn errorf_at(&self, what: String, function: &str, file: &str, line: u32) {
        if let Some(trace) = &self.trace {
            trace.errorf_at(self.tag(&what), function, file, line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_tags_events_for_descendants() {
        let trace = Arc::new(Trace::new("host-a", "foo"));
        let ctx = TraceContext::new().with_trace(Arc::clone(&trace));
        let child = ctx.prefix("<1>");
        child.tracef_at("scatter".to_string(), "m", "f.rs", 1);
        let events = trace.events();
        assert_eq!(events[0].what, "<1> scatter");
    }

    #[test]
    fn context_without_trace_is_a_no_op() {
        let ctx = TraceContext::new();
        ctx.tracef_at("dropped".to_string(), "m", "f.rs", 1);
        assert!(!ctx.has_trace());
    }

    #[test]
    fn nested_prefixes_compose() {
        let trace = Arc::new(Trace::new("host-a", "foo"));
        let ctx = TraceContext::new().with_trace(Arc::clone(&trace));
        let grandchild = ctx.prefix("<1>").prefix("<2>");
        grandchild.tracef_at("leaf".to_string(), "m", "f.rs", 1);
        assert_eq!(trace.events()[0].what, "<1><2> leaf");
    }
}
