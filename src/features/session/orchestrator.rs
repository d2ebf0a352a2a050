//! Session orchestration.
//!
//! Turns timer events into log entries: commits finished focus periods and
//! chains them into a break, validates freeform stops, and gates report and
//! export requests.

use chrono::Utc;

use super::entry::LogEntry;
use super::inflight::InFlight;
use super::log::TaskLog;
use crate::config::LabelsConfig;
use crate::error::{CollaboratorError, FocuslogError, LogAction, ValidationError};
use crate::features::report::{ExportInput, ExportRow, Report, SummaryInput};
use crate::features::timer::{Durations, PeriodEnded, SessionMode, TickHandle, TimerEngine};

/// Something the orchestrator did in response to a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A focus period was logged and the break was started.
    FocusLogged {
        /// The new entry.
        entry: LogEntry,
        /// Tick handle of the break that was started.
        break_handle: TickHandle,
    },
    /// A break ran out. Nothing is logged.
    BreakEnded,
}

/// Result of an explicit stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// Nothing had been measured.
    Nothing,
    /// A freeform entry was appended.
    Logged(LogEntry),
    /// A focus or break period was cut short and dropped.
    Discarded {
        /// Mode that was running.
        mode: SessionMode,
        /// Seconds left on the clock when it was stopped.
        remaining: u64,
    },
}

/// Glue between the timer engine and the session log.
#[derive(Debug)]
pub struct SessionOrchestrator {
    engine: TimerEngine,
    log: TaskLog,
    labels: LabelsConfig,
    task_name: String,
    category: String,
    in_flight: InFlight,
}

impl SessionOrchestrator {
    /// Create an orchestrator with an idle timer and an empty log.
    #[must_use]
    pub fn new(durations: Durations, labels: LabelsConfig) -> Self {
        Self {
            engine: TimerEngine::new(durations),
            log: TaskLog::new(),
            labels,
            task_name: String::new(),
            category: String::new(),
            in_flight: InFlight::default(),
        }
    }

    /// Read-only view of the timer.
    #[must_use]
    pub const fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    /// Read-only view of the log.
    #[must_use]
    pub const fn log(&self) -> &TaskLog {
        &self.log
    }

    /// Seconds logged so far.
    #[must_use]
    pub fn total_tracked(&self) -> u64 {
        self.log.total_seconds()
    }

    #[must_use]
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_task_name(&mut self, task_name: impl Into<String>) {
        self.task_name = task_name.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Start the timer in `mode`.
    pub fn start(&mut self, mode: SessionMode) -> TickHandle {
        self.engine.start(mode)
    }

    /// Pause the timer.
    pub fn pause(&mut self) {
        self.engine.pause();
    }

    /// Resume a paused timer in its current mode.
    pub fn resume(&mut self) -> Option<TickHandle> {
        self.engine.resume()
    }

    /// Deliver one tick to the timer and react to the end of a period.
    pub fn tick(&mut self, handle: TickHandle) -> Option<SessionEvent> {
        let ended = self.engine.tick(handle)?;
        Some(self.on_period_end(ended))
    }

    /// React to an end-of-period notification.
    ///
    /// A finished focus period is logged with fallback labels for blank
    /// inputs, then a break starts. A finished break logs nothing.
    pub fn on_period_end(&mut self, ended: PeriodEnded) -> SessionEvent {
        match ended.mode {
            SessionMode::Focus => {
                let task_name = or_default(&self.task_name, &self.labels.default_task_name);
                let category = or_default(&self.category, &self.labels.default_category);
                let entry = self
                    .log
                    .commit(task_name, category, ended.duration, Utc::now())
                    .clone();
                let break_handle = self.engine.start(SessionMode::Break);
                SessionEvent::FocusLogged {
                    entry,
                    break_handle,
                }
            }
            SessionMode::Break | SessionMode::Freeform => {
                tracing::info!("break finished");
                SessionEvent::BreakEnded
            }
        }
    }

    /// The validation error a stop would raise right now, if any.
    ///
    /// Lets the caller warn before the measured time is thrown away.
    #[must_use]
    pub fn pending_stop_issue(&self) -> Option<ValidationError> {
        if self.engine.mode() != SessionMode::Freeform || self.engine.time() == 0 {
            return None;
        }
        ValidationError::check(&self.task_name, &self.category)
    }

    /// Stop the timer and commit a freeform entry if one was measured.
    ///
    /// The clock is reset before the inputs are validated, so on a
    /// validation failure the measured time is gone.
    ///
    /// # Errors
    ///
    /// Returns `FocuslogError::Validation` when a freeform run with elapsed
    /// time has a blank task name or category.
    pub fn stop(&mut self) -> Result<StopOutcome, FocuslogError> {
        let mode = self.engine.mode();
        let value = self.engine.stop();

        if mode.is_countdown() {
            tracing::info!(%mode, remaining = value, "period discarded");
            return Ok(StopOutcome::Discarded {
                mode,
                remaining: value,
            });
        }
        if value == 0 {
            return Ok(StopOutcome::Nothing);
        }

        if let Some(err) = ValidationError::check(&self.task_name, &self.category) {
            tracing::warn!(lost_seconds = value, "stop rejected: {err}");
            return Err(err.into());
        }

        let task_name = std::mem::take(&mut self.task_name);
        let category = std::mem::take(&mut self.category);
        let entry = self.log.commit(task_name, category, value, Utc::now()).clone();
        Ok(StopOutcome::Logged(entry))
    }

    /// Whether a report or export call is outstanding.
    #[must_use]
    pub const fn is_in_flight(&self, action: LogAction) -> bool {
        self.in_flight.is_active(action)
    }

    fn begin(&mut self, action: LogAction) -> Result<(), FocuslogError> {
        if self.log.is_empty() {
            return Err(FocuslogError::EmptyLog(action));
        }
        self.in_flight.begin(action)?;
        tracing::debug!(%action, entries = self.log.len(), "collaborator call started");
        Ok(())
    }

    fn finish<T>(
        &mut self,
        action: LogAction,
        result: Result<T, CollaboratorError>,
    ) -> Result<T, FocuslogError> {
        self.in_flight.finish(action);
        result.map_err(|e| {
            tracing::error!(%action, error = %e, "collaborator call failed");
            FocuslogError::collaborator(action, e)
        })
    }

    /// Snapshot the log for the summarizer and mark the report in flight.
    ///
    /// # Errors
    ///
    /// Returns `FocuslogError::EmptyLog` for an empty log and
    /// `FocuslogError::InFlight` while a report is outstanding.
    pub fn begin_report(&mut self) -> Result<Vec<SummaryInput>, FocuslogError> {
        self.begin(LogAction::Report)?;
        Ok(self.log.entries().iter().map(SummaryInput::from).collect())
    }

    /// Accept the summarizer result and clear the in-flight flag.
    ///
    /// # Errors
    ///
    /// Returns `FocuslogError::Collaborator` if the call failed or the report
    /// is malformed.
    pub fn finish_report(
        &mut self,
        result: Result<Report, CollaboratorError>,
    ) -> Result<Report, FocuslogError> {
        let checked = result.and_then(|report| report.validate().map(|()| report));
        self.finish(LogAction::Report, checked)
    }

    /// Snapshot the log for the exporter and mark the export in flight.
    ///
    /// # Errors
    ///
    /// Returns `FocuslogError::EmptyLog` for an empty log and
    /// `FocuslogError::InFlight` while an export is outstanding.
    pub fn begin_export(&mut self) -> Result<Vec<ExportInput>, FocuslogError> {
        self.begin(LogAction::Export)?;
        Ok(self.log.entries().iter().map(ExportInput::from).collect())
    }

    /// Accept the exporter result and clear the in-flight flag.
    ///
    /// # Errors
    ///
    /// Returns `FocuslogError::Collaborator` if the call failed or a row is
    /// malformed.
    pub fn finish_export(
        &mut self,
        result: Result<Vec<ExportRow>, CollaboratorError>,
    ) -> Result<Vec<ExportRow>, FocuslogError> {
        let checked = result.and_then(|rows| {
            rows.iter().try_for_each(ExportRow::validate)?;
            Ok(rows)
        });
        self.finish(LogAction::Export, checked)
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
