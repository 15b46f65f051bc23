// src/runner/mod.rs

//! Script execution layer.
//!
//! This module is responsible for actually running catalog scripts, using
//! `tokio::process::Command`, and reporting back to the caller via
//! [`RunEvent`]s over an mpsc channel.
//!
//! - [`process`] handles one script process from spawn to terminal outcome.
//! - [`active`] provides [`ScriptRunner`], which owns the single active run
//!   and rejects a second `start` while one is in flight.

pub mod active;
pub mod process;

pub use active::ScriptRunner;
pub use process::run_script;

use std::path::PathBuf;

/// One invocable unit: a resolved script path plus the name used in status
/// and log messages.
///
/// The path is resolved by the caller against a known scripts root before a
/// task is constructed; the runner never searches for files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTask {
    pub path: PathBuf,
    pub label: String,
}

impl ScriptTask {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// Terminal result of one script execution, produced exactly once per run.
///
/// `exit_code` is present only when the process actually ran to completion;
/// a launch failure carries the error text in `message` and no code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub succeeded: bool,
    pub message: String,
    pub exit_code: Option<i32>,
}

/// Coarse progress estimate for a run. Display hint only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Estimate in [0, 100].
    Percent(u8),
    /// No reliable estimate available. The runner itself always reports
    /// percentages; this sentinel is reserved for consumers that need an
    /// "unknown" state (e.g. a spinner before the first event arrives).
    Indeterminate,
}

/// Per-step entry in a sequence summary. `outcome` is `None` for steps that
/// were skipped because their script file was missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub label: String,
    pub outcome: Option<RunOutcome>,
}

/// Events flowing from the runner and the sequence coordinator to the caller.
///
/// For a single run, `Finished` is always the last event; no output or
/// progress event follows it. A cancelled run emits no `Finished` at all.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// One line of combined stdout/stderr, in read order.
    OutputLine(String),
    /// Updated progress estimate.
    Progress(Progress),
    /// Terminal outcome of the run.
    Finished(RunOutcome),
    /// A sequence entry was skipped because its script file is missing.
    SequenceSkipped { label: String },
    /// The sequence coordinator is about to run entry `index` of `total`.
    SequenceAdvance {
        index: usize,
        total: usize,
        label: String,
    },
    /// The sequence finished; fires exactly once, after the last entry.
    SequenceComplete { summary: Vec<StepReport> },
}

/// Progress estimate after `lines_seen` output lines: 10 at launch, climbing
/// 5 points per line, capped at 90 until the terminal outcome arrives.
pub fn progress_for_lines(lines_seen: usize) -> u8 {
    10usize.saturating_add(lines_seen.saturating_mul(5)).min(90) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_starts_at_ten_and_caps_at_ninety() {
        assert_eq!(progress_for_lines(0), 10);
        assert_eq!(progress_for_lines(1), 15);
        assert_eq!(progress_for_lines(16), 90);
        assert_eq!(progress_for_lines(1_000), 90);
        assert_eq!(progress_for_lines(usize::MAX), 90);
    }
}
