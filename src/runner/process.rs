// src/runner/process.rs

//! Individual script process runner.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::runner::{progress_for_lines, Progress, RunEvent, RunOutcome, ScriptTask};

/// Run a single script process, streaming output and progress events and
/// emitting one terminal `Finished` event.
///
/// - Stdout and stderr are captured together; each line becomes an
///   `OutputLine` event as soon as it is read, and the `Finished` event is
///   always the last one emitted for the run.
/// - Spawn/IO errors never propagate; they become a failed `RunOutcome`
///   with no exit code.
/// - If the cancel channel fires, the child process is killed and **no**
///   `Finished` event is sent for that run. Callers treat "cancelled" as
///   their own state; the return value is `None` in that case.
pub async fn run_script(
    task: ScriptTask,
    events: mpsc::Sender<RunEvent>,
    cancel_rx: oneshot::Receiver<()>,
) -> Option<RunOutcome> {
    let label = task.label.clone();
    match run_script_inner(task, &events, cancel_rx).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(script = %label, error = %err, "script execution error");
            let outcome = RunOutcome {
                succeeded: false,
                message: format!("error running {label}: {err:#}"),
                exit_code: None,
            };
            let _ = events.send(RunEvent::Finished(outcome.clone())).await;
            Some(outcome)
        }
    }
}

async fn run_script_inner(
    task: ScriptTask,
    events: &mpsc::Sender<RunEvent>,
    mut cancel_rx: oneshot::Receiver<()>,
) -> Result<Option<RunOutcome>> {
    info!(script = %task.label, path = %task.path.display(), "starting script process");

    // Absolutise before changing the working directory, otherwise a relative
    // script path would resolve against its own parent twice.
    let path = std::path::absolute(&task.path)
        .with_context(|| format!("resolving path for '{}'", task.label))?;

    let mut cmd = interpreter_for(&path);
    if let Some(dir) = path.parent() {
        cmd.current_dir(dir);
    }
    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for '{}'", task.label))?;

    // Merge both pipes into one line stream; the channel closes once both
    // readers hit EOF.
    let (line_tx, mut line_rx) = mpsc::channel::<String>(64);
    if let Some(stdout) = child.stdout.take() {
        forward_lines(stdout, line_tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        forward_lines(stderr, line_tx.clone());
    }
    drop(line_tx);

    // The process launched; seed the progress estimate.
    let _ = events.send(RunEvent::Progress(Progress::Percent(10))).await;

    let mut lines_seen = 0usize;
    loop {
        tokio::select! {
            line = line_rx.recv() => match line {
                Some(text) => {
                    lines_seen += 1;
                    let _ = events.send(RunEvent::OutputLine(text)).await;
                    let percent = progress_for_lines(lines_seen);
                    let _ = events
                        .send(RunEvent::Progress(Progress::Percent(percent)))
                        .await;
                }
                // Both pipes are at EOF; the process is exiting or gone.
                None => break,
            },

            cancel = &mut cancel_rx => {
                match cancel {
                    Ok(()) => {
                        info!(
                            script = %task.label,
                            "cancellation requested; killing script process"
                        );
                        if let Err(e) = child.kill().await {
                            warn!(
                                script = %task.label,
                                error = %e,
                                "failed to kill child process on cancellation"
                            );
                        }
                    }
                    Err(e) => {
                        debug!(
                            script = %task.label,
                            error = %e,
                            "cancel channel closed; abandoning run"
                        );
                        // Child is killed on drop via kill_on_drop(true).
                    }
                }
                // Do NOT send Finished for this cancelled instance.
                return Ok(None);
            }
        }
    }

    let status = wait_with_cancel(&mut child, &mut cancel_rx, &task.label).await?;
    let Some(status) = status else {
        return Ok(None);
    };

    // Terminal progress is always 100, even for zero-output scripts.
    let _ = events.send(RunEvent::Progress(Progress::Percent(100))).await;

    let code = status.code().unwrap_or(-1);
    let outcome = if status.success() {
        RunOutcome {
            succeeded: true,
            message: format!("{} completed successfully", task.label),
            exit_code: Some(code),
        }
    } else {
        RunOutcome {
            succeeded: false,
            message: format!("{} failed with exit code {code}", task.label),
            exit_code: Some(code),
        }
    };

    info!(
        script = %task.label,
        exit_code = code,
        success = status.success(),
        "script process exited"
    );

    // A caller that dropped its receiver still gets the real outcome as the
    // return value; the send is best-effort like every other event.
    let _ = events.send(RunEvent::Finished(outcome.clone())).await;

    Ok(Some(outcome))
}

/// Wait for the child to exit, still honouring a late cancellation request.
/// Returns `None` when the run was cancelled.
async fn wait_with_cancel(
    child: &mut Child,
    cancel_rx: &mut oneshot::Receiver<()>,
    label: &str,
) -> Result<Option<std::process::ExitStatus>> {
    tokio::select! {
        status = child.wait() => {
            let status = status
                .with_context(|| format!("waiting for process of '{label}'"))?;
            Ok(Some(status))
        }
        cancel = cancel_rx => {
            if cancel.is_ok() {
                info!(script = %label, "cancellation requested; killing script process");
                if let Err(e) = child.kill().await {
                    warn!(script = %label, error = %e, "failed to kill child process on cancellation");
                }
            }
            Ok(None)
        }
    }
}

/// Forward each line read from a child pipe into the merged line channel.
/// The reader task ends at EOF or when the channel is closed.
fn forward_lines(pipe: impl AsyncRead + Unpin + Send + 'static, tx: mpsc::Sender<String>) {
    tokio::spawn(async move {
        let reader = BufReader::new(pipe);
        let mut lines = reader.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });
}

/// Build the interpreter command for a script based on its extension.
///
/// Batch files go through `cmd /C`, PowerShell scripts through
/// `powershell -File`; anything else runs under `sh`.
fn interpreter_for(path: &Path) -> Command {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let mut cmd = match ext.as_deref() {
        Some("bat" | "cmd") => {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(path);
            c
        }
        Some("ps1") => {
            let mut c = Command::new("powershell");
            c.arg("-NoProfile")
                .arg("-ExecutionPolicy")
                .arg("Bypass")
                .arg("-File")
                .arg(path);
            c
        }
        _ => {
            let mut c = Command::new("sh");
            c.arg(path);
            c
        }
    };

    // No interactive console window for spawned scripts.
    #[cfg(windows)]
    {
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    cmd.stdin(Stdio::null());
    cmd
}
