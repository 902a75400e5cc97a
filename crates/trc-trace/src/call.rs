use serde::{Deserialize, Serialize};

/// One program point: the enclosing function and its file/line.
///
/// Captured either eagerly at event creation (`Tracef`/`Errorf`) or lazily
/// on first observation (`LazyTracef`/`LazyErrorf`) — either way the value
/// is the same shape once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub function: String,
    pub file_line: String,
}

impl Call {
    pub fn new(function: impl Into<String>, file: &str, line: u32) -> Self {
        Self {
            function: function.into(),
            file_line: format!("{file}:{line}"),
        }
    }
}

/// Captures the call site of the macro invocation.
///
/// Expands to a `Call` built from `module_path!()` (the closest stable
/// stand-in for a fully qualified function name — Rust has no runtime
/// introspection for the enclosing function) and `file!()`/`line!()`, which
/// are free at compile time.
#[macro_export]
macro_rules! call_here {
    () => {
        $crate::Call::new(module_path!(), file!(), line!())
    };
}
