//! Live traces, their event logs, and the immutable snapshot copy used in
//! search responses.
//!
//! A [`Trace`] is an append-only, concurrency-safe event log for one unit of
//! work: create it, append [`Event`]s with `tracef!`/`errorf!` (or their
//! lazy-formatting counterparts), `finish()` it exactly once. A
//! [`SnapshotTrace`] is the immutable, serializable copy of a trace that a
//! search response actually carries.

mod call;
mod context;
pub mod duration_wire;
mod event;
mod id;
mod snapshot;
pub mod timestamp_wire;
mod trace;

pub use call::Call;
pub use context::TraceContext;
pub use event::{Event, EventSnapshot};
pub use snapshot::SnapshotTrace;
pub use trace::Trace;

pub use id::generate as generate_id;
