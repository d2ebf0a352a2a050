//! End-to-end behavior of the timer, orchestrator and collaborators.

use focuslog::config::LabelsConfig;
use focuslog::error::{FocuslogError, LogAction};
use focuslog::features::report::{
    to_csv_string, Exporter, ExportRow, LocalCollaborator, Summarizer,
};
use focuslog::features::session::{SessionEvent, SessionOrchestrator, StopOutcome};
use focuslog::features::timer::{Durations, SessionMode, TimerPhase};

fn orchestrator() -> SessionOrchestrator {
    SessionOrchestrator::new(Durations::default(), LabelsConfig::default())
}

fn run_ticks(orch: &mut SessionOrchestrator, n: u64) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        if let Some(handle) = orch.engine().tick_handle() {
            events.extend(orch.tick(handle));
        }
    }
    events
}

#[test]
fn freeform_session_is_logged_with_elapsed_seconds() {
    let mut orch = orchestrator();
    orch.set_task_name("Draft chapter");
    orch.set_category("Docs");
    orch.start(SessionMode::Freeform);
    run_ticks(&mut orch, 125);

    let StopOutcome::Logged(entry) = orch.stop().unwrap() else {
        panic!("expected a logged entry");
    };
    assert_eq!(entry.duration(), 125);
    assert_eq!(orch.log().entries(), &[entry]);
}

#[test]
fn pomodoro_cycle_logs_focus_only() {
    let mut orch = orchestrator();
    orch.start(SessionMode::Focus);

    let events = run_ticks(&mut orch, 1500);
    assert!(matches!(events.as_slice(), [SessionEvent::FocusLogged { .. }]));
    let entry = &orch.log().entries()[0];
    assert_eq!(entry.task_name(), "Pomodoro Session");
    assert_eq!(entry.category(), "Uncategorized");
    assert_eq!(entry.duration(), 1500);
    assert_eq!(orch.engine().mode(), SessionMode::Break);
    assert_eq!(orch.engine().time(), 300);

    let events = run_ticks(&mut orch, 300);
    assert_eq!(events, vec![SessionEvent::BreakEnded]);
    assert_eq!(orch.log().len(), 1);
}

#[test]
fn stale_handles_are_ignored_after_restart() {
    let mut orch = orchestrator();
    let first = orch.start(SessionMode::Freeform);
    orch.tick(first);
    let second = orch.start(SessionMode::Freeform);

    // Only the live handle advances the clock.
    orch.tick(first);
    orch.tick(second);
    assert_eq!(orch.engine().time(), 2);
}

#[test]
fn invalid_stop_leaves_log_untouched() {
    let mut orch = orchestrator();
    orch.set_task_name("Draft chapter");
    orch.start(SessionMode::Freeform);
    run_ticks(&mut orch, 40);

    assert!(orch.pending_stop_issue().is_some());
    let err = orch.stop().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Task Name and Category are required to log an entry."
    );
    assert!(orch.log().is_empty());
    assert_eq!(orch.engine().phase(), TimerPhase::Idle);
}

#[test]
fn pause_and_resume_keep_the_value() {
    let mut orch = orchestrator();
    orch.start(SessionMode::Focus);
    run_ticks(&mut orch, 100);
    orch.pause();
    assert!(run_ticks(&mut orch, 50).is_empty());
    assert_eq!(orch.engine().time(), 1400);

    orch.resume().unwrap();
    run_ticks(&mut orch, 10);
    assert_eq!(orch.engine().time(), 1390);
}

#[tokio::test]
async fn local_report_and_export() {
    let mut orch = orchestrator();
    for (task, category, seconds) in [("A,B", "X", 90), ("Review", "Code", 30)] {
        orch.set_task_name(task);
        orch.set_category(category);
        orch.start(SessionMode::Freeform);
        run_ticks(&mut orch, seconds);
        orch.stop().unwrap();
    }

    let inputs = orch.begin_report().unwrap();
    assert!(orch.is_in_flight(LogAction::Report));
    let result = LocalCollaborator.summarize(inputs).await;
    let report = orch.finish_report(result).unwrap();
    assert_eq!(report.total_hours, 0);
    assert_eq!(report.total_minutes, 2);
    assert_eq!(report.top_category, "X");

    let inputs = orch.begin_export().unwrap();
    let result = LocalCollaborator.export(inputs).await;
    let rows: Vec<ExportRow> = orch.finish_export(result).unwrap();
    let csv = to_csv_string(&rows).unwrap();

    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Task Name,Category,Duration (Minutes),Date,Time")
    );
    assert!(lines.next().unwrap().starts_with("\"A,B\",\"X\",\"1.5\",\""));
    assert!(lines.next().unwrap().starts_with("\"Review\",\"Code\",\"0.5\",\""));
}

#[test]
fn empty_log_blocks_report_and_export() {
    let mut orch = orchestrator();
    assert!(matches!(
        orch.begin_report(),
        Err(FocuslogError::EmptyLog(LogAction::Report))
    ));
    assert!(matches!(
        orch.begin_export(),
        Err(FocuslogError::EmptyLog(LogAction::Export))
    ));
}
