//! The timer engine.
//!
//! One clock, three modes:
//! - Freeform stopwatch counting up
//! - Focus and Break countdowns with an end-of-period notification
//! - Cancellable one-second tick source

mod engine;
mod format;
mod tick;

pub use engine::{Direction, Durations, PeriodEnded, SessionMode, TimerEngine, TimerPhase};
pub use format::{format_clock, format_duration, parse_duration};
pub use tick::{TickHandle, TickSource, TICK_PERIOD};
