//! The timer engine.
//!
//! Owns the single clock of the application: its mode, its phase and the
//! tick source driving it. Callers feed ticks in with [`TimerEngine::tick`]
//! and react to the [`PeriodEnded`] notification of bounded modes.

use serde::{Deserialize, Serialize};

use super::tick::{TickHandle, TickSource};

/// Session mode chosen when the timer is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Open-ended stopwatch counting up from zero.
    #[default]
    Freeform,
    /// Fixed-length work period counting down.
    Focus,
    /// Fixed-length rest period counting down.
    Break,
}

impl SessionMode {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Freeform => "Stopwatch",
            Self::Focus => "Focus",
            Self::Break => "Break",
        }
    }

    /// Check if this mode counts down from a fixed duration.
    #[must_use]
    pub const fn is_countdown(&self) -> bool {
        matches!(self, Self::Focus | Self::Break)
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Counting direction of a running clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Elapsed time grows without bound.
    Up,
    /// Remaining time shrinks towards zero.
    Down,
}

/// Phase of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum TimerPhase {
    /// Nothing on the clock.
    Idle,
    /// Clock holds a value, whether ticking or paused.
    Counting {
        /// Which way the value moves on each tick.
        direction: Direction,
        /// Elapsed seconds (up) or remaining seconds (down).
        value: u64,
        /// Full length of the period in seconds, 0 when unbounded.
        total: u64,
    },
}

impl TimerPhase {
    /// Seconds currently shown on the clock.
    #[must_use]
    pub const fn value(&self) -> u64 {
        match self {
            Self::Idle => 0,
            Self::Counting { value, .. } => *value,
        }
    }
}

/// Lengths of the bounded modes, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    /// Length of a focus period.
    pub focus_seconds: u64,
    /// Length of a break period.
    pub break_seconds: u64,
}

impl Durations {
    /// Raise zero-length periods to one second.
    ///
    /// A countdown always ends after at least one tick, so a finished focus
    /// period is never logged with a zero duration.
    #[must_use]
    pub const fn positive(self) -> Self {
        Self {
            focus_seconds: if self.focus_seconds == 0 { 1 } else { self.focus_seconds },
            break_seconds: if self.break_seconds == 0 { 1 } else { self.break_seconds },
        }
    }

    /// Fixed duration of a countdown mode, 0 for freeform.
    #[must_use]
    pub const fn for_mode(&self, mode: SessionMode) -> u64 {
        match mode {
            SessionMode::Freeform => 0,
            SessionMode::Focus => self.focus_seconds,
            SessionMode::Break => self.break_seconds,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus_seconds: 25 * 60,
            break_seconds: 5 * 60,
        }
    }
}

/// Raised exactly once when a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodEnded {
    /// Mode that was running when the period ended.
    pub mode: SessionMode,
    /// Full length of the period that just ended.
    pub duration: u64,
}

/// Single-clock timer engine.
#[derive(Debug)]
pub struct TimerEngine {
    durations: Durations,
    phase: TimerPhase,
    mode: SessionMode,
    running: bool,
    ticks: TickSource,
}

impl TimerEngine {
    /// Create an idle engine. Zero lengths are raised to one second.
    #[must_use]
    pub const fn new(durations: Durations) -> Self {
        Self {
            durations: durations.positive(),
            phase: TimerPhase::Idle,
            mode: SessionMode::Freeform,
            running: false,
            ticks: TickSource::new(),
        }
    }

    /// Start the clock in `mode`, replacing any tick source that was live.
    ///
    /// A stopwatch value left on the clock by a previous freeform run carries
    /// over; countdowns always begin at their full duration.
    pub fn start(&mut self, mode: SessionMode) -> TickHandle {
        self.ticks.cancel();

        self.phase = if mode.is_countdown() {
            let total = self.durations.for_mode(mode);
            TimerPhase::Counting {
                direction: Direction::Down,
                value: total,
                total,
            }
        } else {
            let carried = if self.mode == SessionMode::Freeform {
                self.phase.value()
            } else {
                0
            };
            TimerPhase::Counting {
                direction: Direction::Up,
                value: carried,
                total: 0,
            }
        };
        self.mode = mode;
        self.running = true;

        let handle = self.ticks.schedule();
        tracing::debug!(%mode, value = self.time(), generation = handle.generation(), "timer started");
        handle
    }

    /// Pause the clock, keeping its value.
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.ticks.cancel();
        self.running = false;
        tracing::debug!(mode = %self.mode, value = self.time(), "timer paused");
    }

    /// Resume a paused clock in its current mode.
    ///
    /// Returns the new tick handle, or `None` if there is nothing to resume.
    pub fn resume(&mut self) -> Option<TickHandle> {
        if self.running || self.phase == TimerPhase::Idle {
            return None;
        }
        if self.mode.is_countdown() && self.phase.value() == 0 {
            return None;
        }
        self.running = true;
        let handle = self.ticks.schedule();
        tracing::debug!(mode = %self.mode, value = self.time(), "timer resumed");
        Some(handle)
    }

    /// Stop the clock and reset it.
    ///
    /// Returns the value as of this call. The engine forgets it afterwards.
    pub fn stop(&mut self) -> u64 {
        let value = self.phase.value();
        self.ticks.cancel();
        self.running = false;
        self.phase = TimerPhase::Idle;
        self.mode = SessionMode::Freeform;
        tracing::debug!(value, "timer stopped");
        value
    }

    /// Advance the clock by one second.
    ///
    /// Ticks carrying a handle that is no longer live are ignored. Returns
    /// the end-of-period notification when a countdown reaches zero.
    pub fn tick(&mut self, handle: TickHandle) -> Option<PeriodEnded> {
        if !self.running || !self.ticks.is_live(handle) {
            return None;
        }

        let TimerPhase::Counting {
            direction,
            value,
            total,
        } = self.phase
        else {
            return None;
        };

        match direction {
            Direction::Up => {
                self.phase = TimerPhase::Counting {
                    direction,
                    value: value + 1,
                    total,
                };
                None
            }
            Direction::Down => {
                let remaining = value.saturating_sub(1);
                self.phase = TimerPhase::Counting {
                    direction,
                    value: remaining,
                    total,
                };
                if remaining > 0 {
                    return None;
                }

                self.ticks.cancel();
                self.running = false;
                tracing::info!(mode = %self.mode, duration = total, "period ended");
                Some(PeriodEnded {
                    mode: self.mode,
                    duration: total,
                })
            }
        }
    }

    /// Seconds on the clock: elapsed for the stopwatch, remaining for countdowns.
    #[must_use]
    pub const fn time(&self) -> u64 {
        self.phase.value()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Check if the clock is ticking.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Live tick handle, if the clock is ticking.
    #[must_use]
    pub const fn tick_handle(&self) -> Option<TickHandle> {
        self.ticks.live()
    }

    /// Configured lengths of the bounded modes.
    #[must_use]
    pub const fn durations(&self) -> Durations {
        self.durations
    }

    /// Get progress of a countdown as a fraction (0.0 - 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        match self.phase {
            TimerPhase::Counting {
                direction: Direction::Down,
                value,
                total,
            } if total > 0 => 1.0 - (value as f64 / total as f64),
            _ => 0.0,
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}
