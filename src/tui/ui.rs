//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::error::LogAction;
use crate::features::timer::{format_clock, format_duration};
use crate::tui::app::{App, Field};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let error_height = if app.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(3),            // Inputs
            Constraint::Length(5),            // Timer
            Constraint::Min(6),               // Log and report
            Constraint::Length(error_height), // Error banner
            Constraint::Length(1),            // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_inputs(frame, app, chunks[1]);
    render_timer(frame, app, chunks[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[3]);
    render_log(frame, app, body[0]);
    render_report(frame, app, body[1]);

    if let Some(error) = &app.error {
        render_error(frame, error, chunks[4]);
    }
    render_status_bar(frame, app, chunks[5]);
}

fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let toggle = if app.pomodoro {
        Span::styled(
            " Pomodoro ON ",
            Style::default().fg(Color::Black).bg(Color::Red),
        )
    } else {
        Span::styled(" Pomodoro OFF ", Style::default().fg(Color::DarkGray))
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " focuslog  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        toggle,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

fn input<'a>(title: &'a str, value: &'a str, focused: bool, locked: bool) -> Paragraph<'a> {
    let border = match (focused, locked) {
        (_, true) => Style::default().fg(Color::DarkGray),
        (true, false) => Style::default().fg(Color::Yellow),
        (false, false) => Style::default().fg(Color::White),
    };
    let text = if focused && !locked {
        format!("{value}_")
    } else {
        value.to_string()
    };

    Paragraph::new(text).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border),
    )
}

fn render_inputs(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    let locked = app.inputs_locked();

    frame.render_widget(
        input(
            " Task Name ",
            app.orchestrator.task_name(),
            app.focus == Field::TaskName,
            locked,
        ),
        chunks[0],
    );
    frame.render_widget(
        input(
            " Category ",
            app.orchestrator.category(),
            app.focus == Field::Category,
            locked,
        ),
        chunks[1],
    );
}

fn render_timer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let engine = app.orchestrator.engine();
    let color = if engine.is_running() {
        Color::Green
    } else {
        Color::Yellow
    };
    let border = if app.focus == Field::Controls {
        Color::Yellow
    } else {
        Color::White
    };
    let block = Block::default()
        .title(format!(" {} ", engine.mode().display_name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let clock = Paragraph::new(format_clock(engine.time()))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(clock, rows[0]);

    if engine.mode().is_countdown() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(engine.progress().clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, rows[1]);
    }

    let state = if engine.is_running() { "pause" } else { "start" };
    let hint = Paragraph::new(format!(
        "Enter:{state}  s:stop  p:pomodoro  r:{}  d:{}",
        app.action_label(LogAction::Report),
        app.action_label(LogAction::Export)
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(hint, rows[2]);
}

fn render_log(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let log = app.orchestrator.log();
    let items: Vec<ListItem<'_>> = log
        .entries()
        .iter()
        .rev()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.created_at_local().format("%H:%M")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:>7} ", format_clock(entry.duration())),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    entry.task_name(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{}]", entry.category()),
                    Style::default().fg(Color::Blue),
                ),
            ]))
        })
        .collect();

    let title = format!(
        " Task Log ({}, {}) ",
        log.len(),
        format_duration(app.orchestrator.total_tracked())
    );
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    frame.render_widget(list, area);
}

fn render_report(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let lines = match &app.report {
        Some(report) => vec![
            Line::from(vec![
                Span::styled("Total Time: ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{}h {}m", report.total_hours, report.total_minutes)),
            ]),
            Line::from(vec![
                Span::styled("Top Category: ", Style::default().fg(Color::DarkGray)),
                Span::styled(&report.top_category, Style::default().fg(Color::Cyan)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                &report.summary,
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ],
        None if app.orchestrator.is_in_flight(LogAction::Report) => {
            vec![Line::from("Generating...")]
        }
        None => vec![Line::from(Span::styled(
            "Press r on the controls to summarize the session.",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Report ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    frame.render_widget(panel, area);
}

fn render_error(frame: &mut Frame<'_>, error: &str, area: Rect) {
    let banner = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Error (x to dismiss) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(banner, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("Tab:next field | Esc:controls | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelsConfig;
    use crate::features::report::Collaborators;
    use crate::features::session::SessionOrchestrator;
    use crate::features::timer::Durations;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_shows_clock_and_inputs() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = App::new(
            SessionOrchestrator::new(Durations::default(), LabelsConfig::default()),
            Collaborators::local(),
            runtime.handle().clone(),
            std::path::PathBuf::from("unused.csv"),
            true,
        );
        app.orchestrator.set_task_name("Draft chapter");
        app.start_or_pause();
        app.error = Some("Something failed".to_string());

        let text = screen(&app);
        assert!(text.contains("25:00"));
        assert!(text.contains("Draft chapter"));
        assert!(text.contains("Pomodoro ON"));
        assert!(text.contains("Focus"));
        assert!(text.contains("Something failed"));
    }
}
