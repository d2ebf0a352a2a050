//! Session log and orchestration.
//!
//! Entries are committed in two ways: by stopping a freeform run with a task
//! name and category, or automatically when a focus period counts down to
//! zero. The log lives in memory only.

mod entry;
mod inflight;
mod log;
mod orchestrator;

pub use entry::{EntryId, LogEntry};
pub use inflight::InFlight;
pub use log::TaskLog;
pub use orchestrator::{SessionEvent, SessionOrchestrator, StopOutcome};
