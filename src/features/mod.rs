//! Feature implementations for focuslog.
//!
//! - Timer engine with freeform, focus and break modes
//! - Session log and orchestration
//! - Report and spreadsheet export collaborators

pub mod report;
pub mod session;
pub mod timer;
