//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::FocuslogError;
use crate::tui::app::{App, Field};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start, pause or resume the clock.
    StartPause,
    /// Stop the clock.
    Stop,
    /// Flip the Pomodoro toggle.
    TogglePomodoro,
    /// Request a report.
    Report,
    /// Request a spreadsheet export.
    Export,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<Option<Action>, FocuslogError> {
    // Poll for events with a small timeout so the clock keeps moving
    if event::poll(timeout)
        .map_err(|e| FocuslogError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| FocuslogError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Map one key press to an action, editing inputs in place.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Tab => {
            app.focus_next();
            return None;
        }
        KeyCode::BackTab => {
            app.focus_previous();
            return None;
        }
        KeyCode::Enter => return Some(Action::StartPause),
        _ => {}
    }

    if app.focus == Field::Controls {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char(' ') => Some(Action::StartPause),
            KeyCode::Char('s') => Some(Action::Stop),
            KeyCode::Char('p') => Some(Action::TogglePomodoro),
            KeyCode::Char('r') => Some(Action::Report),
            KeyCode::Char('d') => Some(Action::Export),
            KeyCode::Char('x') => {
                app.dismiss_error();
                None
            }
            KeyCode::Char('?') => {
                app.status = Some(
                    "Space:start/pause | s:stop | p:pomodoro | r:report | d:download | x:dismiss | q:quit"
                        .to_string(),
                );
                None
            }
            _ => None,
        };
    }

    // Text input
    match key.code {
        KeyCode::Esc => app.focus = Field::Controls,
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelsConfig;
    use crate::features::report::Collaborators;
    use crate::features::session::SessionOrchestrator;
    use crate::features::timer::Durations;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(runtime: &tokio::runtime::Runtime) -> App {
        App::new(
            SessionOrchestrator::new(Durations::default(), LabelsConfig::default()),
            Collaborators::local(),
            runtime.handle().clone(),
            std::path::PathBuf::from("unused.csv"),
            false,
        )
    }

    #[test]
    fn test_letters_type_into_fields() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime);

        assert_eq!(handle_key(&mut app, press(KeyCode::Char('s'))), None);
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), None);
        assert_eq!(app.orchestrator.task_name(), "sq");

        handle_key(&mut app, press(KeyCode::Tab));
        handle_key(&mut app, press(KeyCode::Char('d')));
        assert_eq!(app.orchestrator.category(), "d");
    }

    #[test]
    fn test_controls_shortcuts() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime);

        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.focus, Field::Controls);

        assert_eq!(handle_key(&mut app, press(KeyCode::Char('s'))), Some(Action::Stop));
        assert_eq!(
            handle_key(&mut app, press(KeyCode::Char('p'))),
            Some(Action::TogglePomodoro)
        );
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('r'))), Some(Action::Report));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('d'))), Some(Action::Export));
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn test_enter_and_ctrl_c_work_everywhere() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime);

        assert_eq!(
            handle_key(&mut app, press(KeyCode::Enter)),
            Some(Action::StartPause)
        );
        assert_eq!(
            handle_key(
                &mut app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(Action::Quit)
        );
    }
}
