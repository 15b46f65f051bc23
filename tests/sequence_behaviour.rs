// tests/sequence_behaviour.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;

use fixkit::runner::{RunEvent, ScriptTask};
use fixkit::sequence::{run_sequence, SequenceOptions};
use fixkit_test_utils::scripts::write_script;

type TestResult = Result<(), Box<dyn Error>>;

fn no_delay() -> SequenceOptions {
    SequenceOptions {
        settle_delay: Duration::ZERO,
    }
}

async fn drain(rx: &mut mpsc::Receiver<RunEvent>) -> Vec<RunEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// The concrete scenario from the runner's contract: Flush DNS runs, the
/// missing entry is skipped, Clear Temp runs, and completion fires once.
#[tokio::test]
async fn missing_entry_is_skipped_and_the_rest_run_in_order() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let flush = write_script(dir.path(), "flush_dns.sh", &["flushed"], 0);
        let clear = write_script(dir.path(), "clear_temp.sh", &["cleared"], 0);

        let tasks = vec![
            ScriptTask::new(flush, "Flush DNS"),
            ScriptTask::new(dir.path().join("missing.sh"), "Missing"),
            ScriptTask::new(clear, "Clear Temp"),
        ];

        let (tx, mut rx) = mpsc::channel::<RunEvent>(64);
        let summary = run_sequence(tasks, tx, no_delay()).await;

        let events = drain(&mut rx).await;

        // Advance(Flush DNS) … Finished … Skipped(Missing) … Advance(Clear
        // Temp) … Finished … Complete, in that order.
        let markers: Vec<String> = events
            .iter()
            .filter_map(|e| match e {
                RunEvent::SequenceAdvance { label, .. } => Some(format!("advance:{label}")),
                RunEvent::SequenceSkipped { label } => Some(format!("skip:{label}")),
                RunEvent::Finished(o) => Some(format!("finished:{}", o.succeeded)),
                RunEvent::SequenceComplete { .. } => Some("complete".to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(
            markers,
            vec![
                "advance:Flush DNS",
                "finished:true",
                "skip:Missing",
                "advance:Clear Temp",
                "finished:true",
                "complete",
            ]
        );

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].label, "Flush DNS");
        assert!(summary[0].outcome.as_ref().is_some_and(|o| o.succeeded));
        assert!(summary[1].outcome.is_none());
        assert!(summary[2].outcome.as_ref().is_some_and(|o| o.succeeded));

        Ok(())
    })
    .await
}

#[tokio::test]
async fn a_failing_step_never_halts_the_sequence() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let failing = write_script(dir.path(), "network_reset.sh", &["resetting"], 2);
        let passing = write_script(dir.path(), "audio_restart.sh", &["restarted"], 0);

        let tasks = vec![
            ScriptTask::new(failing, "Reset Network Stack"),
            ScriptTask::new(passing, "Restart Audio Services"),
        ];

        let (tx, mut rx) = mpsc::channel::<RunEvent>(64);
        let summary = run_sequence(tasks, tx, no_delay()).await;

        let events = drain(&mut rx).await;

        let completes = events
            .iter()
            .filter(|e| matches!(e, RunEvent::SequenceComplete { .. }))
            .count();
        assert_eq!(completes, 1);

        let first = summary[0].outcome.as_ref().expect("step ran");
        assert!(!first.succeeded);
        assert_eq!(first.exit_code, Some(2));

        let second = summary[1].outcome.as_ref().expect("step ran");
        assert!(second.succeeded);

        Ok(())
    })
    .await
}

#[tokio::test]
async fn step_outcome_is_delivered_before_the_next_step_starts() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let a = write_script(dir.path(), "a.sh", &["a"], 0);
        let b = write_script(dir.path(), "b.sh", &["b"], 0);

        let tasks = vec![ScriptTask::new(a, "A"), ScriptTask::new(b, "B")];

        let (tx, mut rx) = mpsc::channel::<RunEvent>(64);
        run_sequence(tasks, tx, no_delay()).await;

        let events = drain(&mut rx).await;

        let first_finished = events
            .iter()
            .position(|e| matches!(e, RunEvent::Finished(_)))
            .expect("first step finished");
        let second_advance = events
            .iter()
            .position(|e| matches!(e, RunEvent::SequenceAdvance { index: 1, .. }))
            .expect("second step advanced");
        assert!(first_finished < second_advance);

        Ok(())
    })
    .await
}

#[tokio::test]
async fn all_missing_entries_still_complete_the_sequence() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let tasks = vec![
            ScriptTask::new(dir.path().join("x.sh"), "X"),
            ScriptTask::new(dir.path().join("y.sh"), "Y"),
        ];

        let (tx, mut rx) = mpsc::channel::<RunEvent>(64);
        let summary = run_sequence(tasks, tx, no_delay()).await;

        let events = drain(&mut rx).await;
        assert!(summary.iter().all(|s| s.outcome.is_none()));
        assert!(matches!(
            events.last(),
            Some(RunEvent::SequenceComplete { .. })
        ));

        Ok(())
    })
    .await
}
