use crate::Call;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::SystemTime;

/// Deferred formatting for `LazyTracef`/`LazyErrorf`.
///
/// The closure is invoked at most once, on first observation, and the
/// result is cached so later observers see the same string. Callers of the
/// lazy constructors accept the contract that anything the closure
/// captures must not mutate between the call and that first observation.
enum What {
    Eager(String),
    Lazy(Mutex<LazyState>),
}

enum LazyState {
    Pending(Box<dyn FnOnce() -> String + Send>),
    Resolved(String),
}

impl What {
    fn resolve(&self) -> String {
        match self {
            What::Eager(s) => s.clone(),
            What::Lazy(cell) => {
                let mut state = cell.lock().unwrap();
                if let LazyState::Pending(_) = &*state {
                    let LazyState::Pending(f) =
                        std::mem::replace(&mut *state, LazyState::Resolved(String::new()))
                    else {
                        unreachable!()
                    };
                    *state = LazyState::Resolved(f());
                }
                match &*state {
                    LazyState::Resolved(s) => s.clone(),
                    LazyState::Pending(_) => unreachable!(),
                }
            }
        }
    }
}

impl std::fmt::Debug for What {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.resolve())
    }
}

/// A single timestamped observation appended to a [`crate::Trace`].
///
/// Immutable after construction. Attaches to exactly one trace.
pub struct Event {
    when: SystemTime,
    what: What,
    stack: Vec<Call>,
    is_error: bool,
}

impl Event {
    pub(crate) fn eager(what: String, stack: Vec<Call>, is_error: bool) -> Self {
        Self {
            when: SystemTime::now(),
            what: What::Eager(what),
            stack,
            is_error,
        }
    }

    pub(crate) fn lazy(
        what: Box<dyn FnOnce() -> String + Send>,
        stack: Vec<Call>,
        is_error: bool,
    ) -> Self {
        Self {
            when: SystemTime::now(),
            what: What::Lazy(Mutex::new(LazyState::Pending(what))),
            stack,
            is_error,
        }
    }

    pub fn when(&self) -> SystemTime {
        self.when
    }

    /// Resolves (formatting lazily if needed) and returns the event text.
    pub fn what(&self) -> String {
        self.what.resolve()
    }

    pub fn stack(&self) -> &[Call] {
        &self.stack
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// An immutable, fully-resolved copy suitable for serialization.
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            when: self.when,
            what: self.what(),
            stack: self.stack.clone(),
            is_error: self.is_error,
        }
    }
}

/// The wire/serializable form of an [`Event`]: `what` is always already
/// resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSnapshot {
    #[serde(with = "humantime_serde")]
    pub when: SystemTime,
    pub what: String,
    pub stack: Vec<Call>,
    pub is_error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn lazy_event_formats_at_most_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = Arc::clone(&calls);
        let event = Event::lazy(
            Box::new(move || {
                calls2.fetch_add(1, Ordering::SeqCst);
                "formatted".to_string()
            }),
            vec![],
            false,
        );
        assert_eq!(event.what(), "formatted");
        assert_eq!(event.what(), "formatted");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn eager_event_is_immediately_available() {
        let event = Event::eager("hello".to_string(), vec![], false);
        assert_eq!(event.what(), "hello");
        assert!(!event.is_error());
    }
}
