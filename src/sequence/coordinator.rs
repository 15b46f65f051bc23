// src/sequence/coordinator.rs

//! Serial sequence coordinator.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use crate::runner::process::run_script;
use crate::runner::{RunEvent, ScriptTask, StepReport};

/// Options for a sequence run.
#[derive(Debug, Clone, Copy)]
pub struct SequenceOptions {
    /// Pause between steps, purely so interleaved output stays readable.
    pub settle_delay: Duration,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(500),
        }
    }
}

impl SequenceOptions {
    pub fn with_settle_delay_ms(ms: u64) -> Self {
        Self {
            settle_delay: Duration::from_millis(ms),
        }
    }
}

/// Run an ordered list of tasks one after another.
///
/// - Entries whose script file is missing are skipped with a
///   `SequenceSkipped` event and no settling delay.
/// - A failing script never halts the sequence; its outcome is recorded in
///   the summary and the coordinator advances after the settling delay.
/// - Step N's `Finished` event is fully delivered before step N+1 begins;
///   consecutive runs never overlap.
/// - `SequenceComplete` fires exactly once, after the last entry, carrying
///   the per-step summary that is also returned to the caller.
pub async fn run_sequence(
    tasks: Vec<ScriptTask>,
    events: mpsc::Sender<RunEvent>,
    options: SequenceOptions,
) -> Vec<StepReport> {
    let total = tasks.len();
    let mut summary = Vec::with_capacity(total);

    for (index, task) in tasks.into_iter().enumerate() {
        if !task.path.exists() {
            warn!(script = %task.label, path = %task.path.display(), "script not found; skipping");
            let _ = events
                .send(RunEvent::SequenceSkipped {
                    label: task.label.clone(),
                })
                .await;
            summary.push(StepReport {
                label: task.label,
                outcome: None,
            });
            continue;
        }

        info!(script = %task.label, step = index + 1, total, "sequence step starting");
        let _ = events
            .send(RunEvent::SequenceAdvance {
                index,
                total,
                label: task.label.clone(),
            })
            .await;

        // The sender must stay alive for the whole run; dropping it counts
        // as a cancellation.
        let (_cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let label = task.label.clone();
        let outcome = run_script(task, events.clone(), cancel_rx).await;
        summary.push(StepReport { label, outcome });

        if index + 1 < total && !options.settle_delay.is_zero() {
            tokio::time::sleep(options.settle_delay).await;
        }
    }

    info!(total, "sequence complete");
    let _ = events
        .send(RunEvent::SequenceComplete {
            summary: summary.clone(),
        })
        .await;

    summary
}
