//! Cancellable periodic tick source.
//!
//! Scheduling returns a [`TickHandle`]. A tick is only honored when it carries
//! the handle that is currently live, so cancelling (or rescheduling) makes
//! every tick of the old source unobservable, including one that was already
//! in flight when the cancel happened.

use std::time::Duration;

/// Cadence of the engine clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Token identifying one scheduled tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Generation number of this handle. Strictly increases per schedule.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Holds at most one live tick handle.
#[derive(Debug, Default)]
pub struct TickSource {
    next_generation: u64,
    live: Option<TickHandle>,
}

impl TickSource {
    /// Create a source with nothing scheduled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_generation: 0,
            live: None,
        }
    }

    /// Schedule a new repeating tick, cancelling whatever was live before.
    pub fn schedule(&mut self) -> TickHandle {
        self.cancel();
        self.next_generation += 1;
        let handle = TickHandle(self.next_generation);
        self.live = Some(handle);
        handle
    }

    /// Cancel the live tick, if any. Returns true if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.live.take().is_some()
    }

    /// The currently live handle.
    #[must_use]
    pub const fn live(&self) -> Option<TickHandle> {
        self.live
    }

    /// Whether `handle` is the live one.
    #[must_use]
    pub fn is_live(&self, handle: TickHandle) -> bool {
        self.live == Some(handle)
    }
}
