//! Terminal User Interface (TUI) for focuslog.
//!
//! Provides the interactive tracker: inputs, live clock, task log and
//! report panel. Built with ratatui and crossterm; collaborator calls run
//! on a tokio runtime while the clock keeps ticking.

mod app;
mod event;
mod ticker;
mod ui;

pub use app::{App, Field};
pub use ticker::Ticker;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::FocuslogError;
use crate::features::report::{Collaborators, Report};
use crate::features::session::{LogEntry, SessionOrchestrator};

/// Poll interval for terminal events. Ticks are driven from wall time, so
/// this only bounds how late a tick can be drawn.
const FRAME: Duration = Duration::from_millis(100);

/// What a TUI run produced.
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    /// Entries logged during the run.
    pub entries: Vec<LogEntry>,
    /// Last report generated, if any.
    pub report: Option<Report>,
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(
    orchestrator: SessionOrchestrator,
    collaborators: Collaborators,
    export_path: PathBuf,
    pomodoro: bool,
) -> Result<SessionSummary, FocuslogError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| FocuslogError::Terminal(format!("Failed to start runtime: {e}")))?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| FocuslogError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| FocuslogError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FocuslogError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(
        orchestrator,
        collaborators,
        runtime.handle().clone(),
        export_path,
        pomodoro,
    );
    tracing::info!(pomodoro, "tracker started");
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result?;
    // Abandon outstanding collaborator calls.
    runtime.shutdown_background();
    tracing::info!(entries = app.orchestrator.log().len(), "tracker closed");

    Ok(SessionSummary {
        entries: app.orchestrator.log().snapshot(),
        report: app.report,
    })
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), FocuslogError> {
    loop {
        app.drive_clock(Instant::now());
        app.poll_tasks();

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FocuslogError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle events
        if let Some(action) = event::handle_events(app, FRAME)? {
            match action {
                event::Action::Quit => app.should_quit = true,
                event::Action::StartPause => app.start_or_pause(),
                event::Action::Stop => app.stop(),
                event::Action::TogglePomodoro => app.toggle_pomodoro(),
                event::Action::Report => app.request_report(),
                event::Action::Export => app.request_export(),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
