//! Application state for the TUI.

use std::path::PathBuf;
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{CollaboratorError, FocuslogError, LogAction};
use crate::features::report::{save_csv, Collaborators, ExportRow, Exporter, Report, Summarizer};
use crate::features::session::{SessionEvent, SessionOrchestrator, StopOutcome};
use crate::features::timer::{format_clock, format_duration, SessionMode, TickHandle, TimerPhase};
use crate::tui::ticker::Ticker;

type Pending<T> = Option<JoinHandle<Result<T, CollaboratorError>>>;

/// Widget that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TaskName,
    Category,
    Controls,
}

impl Field {
    const fn next(self) -> Self {
        match self {
            Self::TaskName => Self::Category,
            Self::Category => Self::Controls,
            Self::Controls => Self::TaskName,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::TaskName => Self::Controls,
            Self::Category => Self::TaskName,
            Self::Controls => Self::Category,
        }
    }
}

/// Application state.
pub struct App {
    /// Timer, log and in-flight state.
    pub orchestrator: SessionOrchestrator,
    collaborators: Collaborators,
    runtime: Handle,
    ticker: Ticker,
    export_path: PathBuf,
    /// Start launches a focus period instead of the stopwatch.
    pub pomodoro: bool,
    /// Focused widget.
    pub focus: Field,
    /// Most recent report.
    pub report: Option<Report>,
    /// Status message to display.
    pub status: Option<String>,
    /// Error banner, cleared on dismiss.
    pub error: Option<String>,
    /// A stop that would lose time is waiting for confirmation.
    pub confirm_stop: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    pending_report: Pending<Report>,
    pending_export: Pending<Vec<ExportRow>>,
}

impl App {
    /// Create a new app instance.
    #[must_use]
    pub fn new(
        orchestrator: SessionOrchestrator,
        collaborators: Collaborators,
        runtime: Handle,
        export_path: PathBuf,
        pomodoro: bool,
    ) -> Self {
        Self {
            orchestrator,
            collaborators,
            runtime,
            ticker: Ticker::new(),
            export_path,
            pomodoro,
            focus: Field::TaskName,
            report: None,
            status: Some("Tab: next field | Enter: start/pause | Esc: controls".to_string()),
            error: None,
            confirm_stop: false,
            should_quit: false,
            pending_report: None,
            pending_export: None,
        }
    }

    /// Task name and category are read-only while a Pomodoro period runs.
    #[must_use]
    pub fn inputs_locked(&self) -> bool {
        let engine = self.orchestrator.engine();
        engine.is_running() && engine.mode().is_countdown()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Type a character into the focused input.
    pub fn input_char(&mut self, c: char) {
        if self.inputs_locked() {
            return;
        }
        match self.focus {
            Field::TaskName => {
                let mut value = self.orchestrator.task_name().to_string();
                value.push(c);
                self.orchestrator.set_task_name(value);
            }
            Field::Category => {
                let mut value = self.orchestrator.category().to_string();
                value.push(c);
                self.orchestrator.set_category(value);
            }
            Field::Controls => {}
        }
        self.confirm_stop = false;
    }

    /// Delete the last character of the focused input.
    pub fn backspace(&mut self) {
        if self.inputs_locked() {
            return;
        }
        match self.focus {
            Field::TaskName => {
                let mut value = self.orchestrator.task_name().to_string();
                value.pop();
                self.orchestrator.set_task_name(value);
            }
            Field::Category => {
                let mut value = self.orchestrator.category().to_string();
                value.pop();
                self.orchestrator.set_category(value);
            }
            Field::Controls => {}
        }
    }

    /// A paused clock that Enter would resume rather than restart.
    fn is_resumable(&self) -> bool {
        let engine = self.orchestrator.engine();
        !engine.is_running()
            && matches!(engine.phase(), TimerPhase::Counting { .. })
            && (!engine.mode().is_countdown() || engine.time() > 0)
    }

    /// Flip the Pomodoro toggle. Refused while the clock runs or is paused.
    pub fn toggle_pomodoro(&mut self) {
        if self.orchestrator.engine().is_running() || self.is_resumable() {
            self.status = Some("Stop the timer before switching modes".to_string());
            return;
        }
        self.pomodoro = !self.pomodoro;
        self.status = Some(format!(
            "Pomodoro {}",
            if self.pomodoro { "on" } else { "off" }
        ));
    }

    /// Start, pause or resume depending on the clock state.
    pub fn start_or_pause(&mut self) {
        self.confirm_stop = false;
        if self.orchestrator.engine().is_running() {
            self.orchestrator.pause();
            self.status = Some("Paused".to_string());
            return;
        }

        if self.is_resumable() && self.orchestrator.resume().is_some() {
            self.status = Some("Resumed".to_string());
            return;
        }

        let mode = if self.pomodoro {
            SessionMode::Focus
        } else {
            SessionMode::Freeform
        };
        self.orchestrator.start(mode);
        self.status = Some(format!("{mode} started"));
    }

    /// Stop the clock, asking for confirmation first if the stop would lose time.
    pub fn stop(&mut self) {
        if !self.confirm_stop {
            if let Some(issue) = self.orchestrator.pending_stop_issue() {
                self.confirm_stop = true;
                self.error = Some(format!(
                    "{issue} Stopping now discards {}. Press s again to stop anyway.",
                    format_clock(self.orchestrator.engine().time())
                ));
                return;
            }
        }
        self.confirm_stop = false;

        match self.orchestrator.stop() {
            Ok(StopOutcome::Nothing) => self.status = Some("Stopped".to_string()),
            Ok(StopOutcome::Logged(entry)) => {
                self.error = None;
                self.status = Some(format!(
                    "Logged {} ({})",
                    entry.task_name(),
                    format_duration(entry.duration())
                ));
            }
            Ok(StopOutcome::Discarded { mode, .. }) => {
                self.status = Some(format!("{mode} stopped, nothing logged"));
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Live tick handle of the engine.
    #[must_use]
    pub fn live_tick(&self) -> Option<TickHandle> {
        self.orchestrator.engine().tick_handle()
    }

    /// Deliver every tick that is due at `now`.
    pub fn drive_clock(&mut self, now: Instant) {
        while let Some(handle) = self.ticker.poll(self.live_tick(), now) {
            self.on_tick(handle);
        }
    }

    /// Deliver one tick.
    pub fn on_tick(&mut self, handle: TickHandle) {
        match self.orchestrator.tick(handle) {
            Some(SessionEvent::FocusLogged { entry, .. }) => {
                self.status = Some(format!(
                    "Focus complete: logged {}. Break started.",
                    entry.task_name()
                ));
            }
            Some(SessionEvent::BreakEnded) => {
                self.status = Some("Break over. Press Enter for the next focus period.".to_string());
            }
            None => {}
        }
    }

    /// Button label for an action, reflecting in-flight state.
    #[must_use]
    pub fn action_label(&self, action: LogAction) -> &'static str {
        match (action, self.orchestrator.is_in_flight(action)) {
            (LogAction::Report, false) => "Generate Report",
            (LogAction::Report, true) => "Generating...",
            (LogAction::Export, false) => "Download CSV",
            (LogAction::Export, true) => "Preparing...",
        }
    }

    /// Ask the summarizer for a report in the background.
    pub fn request_report(&mut self) {
        let inputs = match self.orchestrator.begin_report() {
            Ok(inputs) => inputs,
            Err(e) => return self.show_error(&e),
        };
        self.error = None;
        self.report = None;
        let summarizer = self.collaborators.summarizer.clone();
        self.pending_report = Some(
            self.runtime
                .spawn(async move { summarizer.summarize(inputs).await }),
        );
    }

    /// Ask the exporter for rows in the background.
    pub fn request_export(&mut self) {
        let inputs = match self.orchestrator.begin_export() {
            Ok(inputs) => inputs,
            Err(e) => return self.show_error(&e),
        };
        self.error = None;
        let exporter = self.collaborators.exporter.clone();
        self.pending_export = Some(
            self.runtime
                .spawn(async move { exporter.export(inputs).await }),
        );
    }

    /// Collect finished background calls.
    pub fn poll_tasks(&mut self) {
        if let Some(result) = self.take_finished_report() {
            match self.orchestrator.finish_report(result) {
                Ok(report) => {
                    self.status = Some("Report ready".to_string());
                    self.report = Some(report);
                }
                Err(e) => self.show_error(&e),
            }
        }

        if let Some(result) = self.take_finished_export() {
            let saved = self
                .orchestrator
                .finish_export(result)
                .and_then(|rows| save_csv(&self.export_path, &rows).map(|()| rows.len()));
            match saved {
                Ok(count) => {
                    self.status = Some(format!(
                        "Saved {count} rows to {}",
                        self.export_path.display()
                    ));
                }
                Err(e) => self.show_error(&e),
            }
        }
    }

    fn take_finished_report(&mut self) -> Option<Result<Report, CollaboratorError>> {
        take_finished(&self.runtime, &mut self.pending_report)
    }

    fn take_finished_export(&mut self) -> Option<Result<Vec<ExportRow>, CollaboratorError>> {
        take_finished(&self.runtime, &mut self.pending_export)
    }

    /// Whether any background call is outstanding.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending_report.is_some() || self.pending_export.is_some()
    }

    fn show_error(&mut self, err: &FocuslogError) {
        self.error = Some(err.to_string());
    }

    /// Dismiss the error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
        self.confirm_stop = false;
    }
}

fn take_finished<T>(
    runtime: &Handle,
    pending: &mut Pending<T>,
) -> Option<Result<T, CollaboratorError>> {
    if !pending.as_ref()?.is_finished() {
        return None;
    }
    let handle = pending.take()?;
    Some(
        runtime
            .block_on(handle)
            .unwrap_or_else(|e| Err(CollaboratorError::Task(e.to_string()))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelsConfig;
    use crate::features::timer::Durations;
    use std::time::Duration;
    use tempfile::TempDir;

    fn app(runtime: &tokio::runtime::Runtime, dir: &TempDir) -> App {
        let orchestrator = SessionOrchestrator::new(Durations::default(), LabelsConfig::default());
        App::new(
            orchestrator,
            Collaborators::local(),
            runtime.handle().clone(),
            dir.path().join("out.csv"),
            false,
        )
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.input_char(c);
        }
    }

    fn wait_for_tasks(app: &mut App) {
        for _ in 0..200 {
            app.poll_tasks();
            if !app.has_pending() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("background task did not finish");
    }

    fn tick_n(app: &mut App, n: u64) {
        for _ in 0..n {
            if let Some(handle) = app.live_tick() {
                app.on_tick(handle);
            }
        }
    }

    #[test]
    fn test_typing_and_freeform_log() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&runtime, &dir);

        type_str(&mut app, "Draft chapterx");
        app.backspace();
        app.focus_next();
        type_str(&mut app, "Docs");
        assert_eq!(app.orchestrator.task_name(), "Draft chapter");

        app.start_or_pause();
        tick_n(&mut app, 90);
        app.stop();

        assert_eq!(app.orchestrator.log().len(), 1);
        assert!(app.status.as_deref().unwrap().contains("1 minute"));
    }

    #[test]
    fn test_stop_needs_confirmation_when_time_would_be_lost() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&runtime, &dir);

        app.start_or_pause();
        tick_n(&mut app, 65);
        app.stop();
        assert!(app.confirm_stop);
        assert!(app.error.as_deref().unwrap().contains("01:05"));
        assert!(app.orchestrator.engine().is_running());

        app.stop();
        assert!(!app.confirm_stop);
        assert_eq!(app.orchestrator.engine().time(), 0);
        assert!(app.orchestrator.log().is_empty());
    }

    #[test]
    fn test_pomodoro_locks_inputs() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&runtime, &dir);

        app.toggle_pomodoro();
        app.start_or_pause();
        assert_eq!(app.orchestrator.engine().mode(), SessionMode::Focus);
        assert!(app.inputs_locked());

        type_str(&mut app, "late");
        assert_eq!(app.orchestrator.task_name(), "");

        app.toggle_pomodoro();
        assert!(app.pomodoro);

        app.start_or_pause();
        assert!(!app.inputs_locked());
        app.start_or_pause();
        assert!(app.orchestrator.engine().is_running());
        assert_eq!(app.orchestrator.engine().mode(), SessionMode::Focus);
    }

    #[test]
    fn test_toggle_refused_while_paused() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&runtime, &dir);

        app.start_or_pause();
        tick_n(&mut app, 20);
        app.start_or_pause();
        assert!(!app.orchestrator.engine().is_running());

        app.toggle_pomodoro();
        assert!(!app.pomodoro);
        assert!(app.status.as_deref().unwrap().contains("Stop the timer"));

        // Enter resumes the stopwatch the toggle still shows.
        app.start_or_pause();
        assert_eq!(app.orchestrator.engine().mode(), SessionMode::Freeform);
        assert_eq!(app.orchestrator.engine().time(), 20);

        app.stop();
        app.stop();
        app.toggle_pomodoro();
        assert!(app.pomodoro);
        app.start_or_pause();
        assert_eq!(app.orchestrator.engine().mode(), SessionMode::Focus);
    }

    #[test]
    fn test_focus_completion_status() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&runtime, &dir);

        app.toggle_pomodoro();
        app.start_or_pause();
        tick_n(&mut app, 1500);

        assert_eq!(app.orchestrator.log().len(), 1);
        assert_eq!(app.orchestrator.engine().mode(), SessionMode::Break);
        assert!(app.status.as_deref().unwrap().contains("Break started"));
    }

    #[test]
    fn test_drive_clock_uses_wall_time() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&runtime, &dir);

        let t0 = Instant::now();
        app.start_or_pause();
        app.drive_clock(t0);
        app.drive_clock(t0 + Duration::from_millis(2500));

        assert_eq!(app.orchestrator.engine().time(), 2);
    }

    #[test]
    fn test_report_on_empty_log_shows_error() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&runtime, &dir);

        app.request_report();
        assert_eq!(
            app.error.as_deref(),
            Some("There are no tasks logged to generate a report.")
        );
        assert!(!app.has_pending());
    }

    #[test]
    fn test_report_and_export_round_trip() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&runtime, &dir);

        type_str(&mut app, "Draft chapter");
        app.focus_next();
        type_str(&mut app, "Docs");
        app.start_or_pause();
        tick_n(&mut app, 120);
        app.stop();

        app.request_report();
        assert_eq!(app.action_label(LogAction::Report), "Generating...");
        app.request_export();
        wait_for_tasks(&mut app);

        let report = app.report.as_ref().unwrap();
        assert_eq!(report.top_category, "Docs");
        assert_eq!(report.total_minutes, 2);
        assert_eq!(app.action_label(LogAction::Report), "Generate Report");

        let csv = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert!(csv.starts_with("Task Name,Category,Duration (Minutes),Date,Time\n"));
        assert!(csv.contains("\"Draft chapter\",\"Docs\",\"2\""));
    }
}
