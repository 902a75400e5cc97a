use crate::event::EventSnapshot;
use crate::snapshot::SnapshotTrace;
use crate::{id, Call, Event};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

struct State {
    finished: bool,
    errored: bool,
    finish_time: Option<SystemTime>,
    events: Vec<Event>,
}

/// A live, append-only event log for one unit of work.
///
/// Created by a collector, handed to the caller and (usually) attached to
/// its ambient [`crate::TraceContext`]. Multiple observers may append
/// events concurrently; a single mutex around the mutable tail keeps the
/// event list append-ordered by `when` and makes `finish` idempotent.
pub struct Trace {
    id: String,
    source: String,
    category: String,
    started: SystemTime,
    state: Mutex<State>,
}

impl Trace {
    /// Mints a new trace under `category`, attributed to `source`.
    pub fn new(source: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id::generate(),
            source: source.into(),
            category: category.into(),
            started: SystemTime::now(),
            state: Mutex::new(State {
                finished: false,
                errored: false,
                finish_time: None,
                events: Vec::new(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn started(&self) -> SystemTime {
        self.started
    }

    pub fn finished(&self) -> bool {
        self.state.lock().unwrap().finished
    }

    pub fn active(&self) -> bool {
        !self.finished()
    }

    pub fn errored(&self) -> bool {
        self.state.lock().unwrap().errored
    }

    /// Finished duration if `finish`ed, else elapsed time since `started`.
    pub fn duration(&self) -> Duration {
        let state = self.state.lock().unwrap();
        match state.finish_time {
            Some(finish) => finish.duration_since(self.started).unwrap_or_default(),
            None => SystemTime::now()
                .duration_since(self.started)
                .unwrap_or_default(),
        }
    }

    /// A stable snapshot of the current event list, resolved and cloned.
    pub fn events(&self) -> Vec<EventSnapshot> {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .map(Event::snapshot)
            .collect()
    }

    /// Appends a non-error event, formatted eagerly. No-op once finished.
    pub fn tracef_at(&self, what: String, function: &str, file: &str, line: u32) {
        self.append(Event::eager(
            what,
            vec![Call::new(function, file, line)],
            false,
        ));
    }

    /// Appends an error event, formatted eagerly, and marks the trace
    /// errored. No-op once finished.
    pub fn errorf_at(&self, what: String, function: &str, file: &str, line: u32) {
        self.mark_errored();
        self.append(Event::eager(
            what,
            vec![Call::new(function, file, line)],
            true,
        ));
    }

    /// Appends a non-error event whose text is formatted lazily, on first
    /// observation. No-op once finished.
    pub fn lazy_tracef_at(
        &self,
        what: Box<dyn FnOnce() -> String + Send>,
        function: &str,
        file: &str,
        line: u32,
    ) {
        self.append(Event::lazy(what, vec![Call::new(function, file, line)], false));
    }

    /// Lazy-formatted error variant of [`Trace::lazy_tracef_at`].
    pub fn lazy_errorf_at(
        &self,
        what: Box<dyn FnOnce() -> String + Send>,
        function: &str,
        file: &str,
        line: u32,
    ) {
        self.mark_errored();
        self.append(Event::lazy(what, vec![Call::new(function, file, line)], true));
    }

    /// Marks the trace errored without appending an event. May be called
    /// before or concurrently with `finish`.
    pub fn mark_errored(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.errored {
            state.errored = true;
            tracing::warn!(id = %self.id, category = %self.category, "trace marked errored");
        }
    }

    /// Terminates the trace, freezing its duration. Idempotent: only the
    /// first call has any effect.
    pub fn finish(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.finished {
            state.finished = true;
            state.finish_time = Some(SystemTime::now());
            tracing::debug!(id = %self.id, category = %self.category, errored = state.errored, "trace finished");
        }
    }

    fn append(&self, event: Event) {
        let mut state = self.state.lock().unwrap();
        if state.finished {
            return;
        }
        state.events.push(event);
    }

    /// An immutable, serializable copy of this trace as observed right now.
    pub fn snapshot(&self) -> SnapshotTrace {
        let state = self.state.lock().unwrap();
        SnapshotTrace {
            source: self.source.clone(),
            id: self.id.clone(),
            category: self.category.clone(),
            started: self.started,
            finished: state.finished,
            errored: state.errored,
            duration: match state.finish_time {
                Some(finish) => finish.duration_since(self.started).unwrap_or_default(),
                None => SystemTime::now()
                    .duration_since(self.started)
                    .unwrap_or_default(),
            },
            events: state.events.iter().map(Event::snapshot).collect(),
            via: vec![self.source.clone()],
        }
    }
}

/// Appends a non-error, eagerly-formatted event, capturing the call site.
#[macro_export]
macro_rules! tracef {
    ($trace:expr, $($arg:tt)*) => {{
        $trace.tracef_at(format!($($arg)*), module_path!(), file!(), line!())
    }};
}

/// Appends an error, eagerly-formatted event, capturing the call site.
#[macro_export]
macro_rules! errorf {
    ($trace:expr, $($arg:tt)*) => {{
        $trace.errorf_at(format!($($arg)*), module_path!(), file!(), line!())
    }};
}

/// Appends a non-error event whose text is produced by `$closure` only if
/// and when the event is observed.
#[macro_export]
macro_rules! lazy_tracef {
    ($trace:expr, $closure:expr) => {{
        $trace.lazy_tracef_at(Box::new($closure), module_path!(), file!(), line!())
    }};
}

/// Lazy-formatted error variant of [`tracef!`].
#[macro_export]
macro_rules! lazy_errorf {
    ($trace:expr, $closure:expr) => {{
        $trace.lazy_errorf_at(Box::new($closure), module_path!(), file!(), line!())
    }};
}
