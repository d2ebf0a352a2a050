//! Wall-clock driver for the timer engine.
//!
//! Converts elapsed real time into one-second ticks for whichever tick
//! handle is live. A new handle restarts the cadence, so a restart never
//! inherits a partial second from the previous run.

use std::time::Instant;

use crate::features::timer::{TickHandle, TICK_PERIOD};

/// Tracks when the next tick for the live handle is due.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    live: Option<TickHandle>,
    next_at: Option<Instant>,
}

impl Ticker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            live: None,
            next_at: None,
        }
    }

    /// Return the next due tick, if any.
    ///
    /// Call repeatedly until it returns `None`, passing the engine's
    /// current handle each time. When the handle differs from the last one
    /// seen, the cadence is re-phased to start at `now` and nothing is due.
    pub fn poll(&mut self, live: Option<TickHandle>, now: Instant) -> Option<TickHandle> {
        if live != self.live {
            self.live = live;
            self.next_at = live.map(|_| now + TICK_PERIOD);
            return None;
        }

        let due = self.next_at?;
        if now < due {
            return None;
        }
        self.next_at = Some(due + TICK_PERIOD);
        self.live
    }
}
