// src/runner/active.rs

//! Single-active-run management.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::errors::{FixkitError, Result};
use crate::runner::process::run_script;
use crate::runner::{RunEvent, ScriptTask};

/// Handle for the currently-running script process.
///
/// - `cancel` requests that the process be killed.
/// - `handle` is the Tokio task driving the run.
struct ActiveRun {
    label: String,
    cancel: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

/// Starts script processes and enforces that at most one is active.
///
/// The caller supplies the event channel once; each `start` returns
/// immediately, with output, progress and the terminal outcome delivered as
/// [`RunEvent`]s. A second `start` while a run is in flight is rejected with
/// [`FixkitError::RunnerBusy`] instead of relying on caller discipline.
pub struct ScriptRunner {
    events: mpsc::Sender<RunEvent>,
    active: Option<ActiveRun>,
}

impl ScriptRunner {
    pub fn new(events: mpsc::Sender<RunEvent>) -> Self {
        Self {
            events,
            active: None,
        }
    }

    /// Launch `task` on its own Tokio task and return without blocking.
    ///
    /// The caller is expected to have checked that `task.path` exists; a
    /// missing file surfaces as a launch failure in the `Finished` event.
    pub fn start(&mut self, task: ScriptTask) -> Result<()> {
        if let Some(active) = &self.active {
            if !active.handle.is_finished() {
                return Err(FixkitError::RunnerBusy(active.label.clone()));
            }
        }

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let events = self.events.clone();
        let label = task.label.clone();
        let spawn_label = label.clone();

        let handle = tokio::spawn(async move {
            let _ = run_script(task, events, cancel_rx).await;
            debug!(script = %spawn_label, "script runner future finished");
        });

        self.active = Some(ActiveRun {
            label,
            cancel: Some(cancel_tx),
            handle,
        });
        Ok(())
    }

    /// Request forcible termination of the active run, if any.
    ///
    /// Best-effort and asynchronous: the kill happens on the worker, and no
    /// `Finished` event is emitted for a cancelled run.
    pub fn cancel(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if let Some(cancel) = active.cancel.take() {
            info!(script = %active.label, "cancelling active script");
            if cancel.send(()).is_err() {
                debug!(script = %active.label, "script already finished while cancelling");
            }
        }
    }

    /// Whether a run is still in flight.
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.handle.is_finished())
    }

    /// Wait for the active run's worker to wind down.
    pub async fn join(&mut self) {
        if let Some(active) = self.active.take() {
            let _ = active.handle.await;
        }
    }
}
