// src/lib.rs

pub mod catalog;
pub mod cli;
pub mod errors;
pub mod logbook;
pub mod logging;
pub mod runner;
pub mod sequence;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::catalog::{load_or_default, Catalog, Category};
use crate::cli::CliArgs;
use crate::logbook::Logbook;
use crate::runner::{Progress, RunEvent, ScriptRunner};
use crate::sequence::{run_sequence, SequenceOptions};
use crate::stats::RunStatistics;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - catalog loading (file or built-in)
/// - the script runner / sequence coordinator
/// - the event consumer that prints output and keeps statistics
/// - Ctrl-C handling for the active run
/// - transcript export
pub async fn run(args: CliArgs) -> Result<()> {
    let mut catalog = load_or_default(args.config.as_deref().map(Path::new))?;

    if let Some(dir) = &args.scripts_dir {
        catalog.config.scripts_dir = PathBuf::from(dir);
    }
    if let Some(ms) = args.settle_delay_ms {
        catalog.config.settle_delay_ms = ms;
    }

    if args.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let mut logbook = Logbook::new();

    let outcome = if let Some(tool) = &args.tool {
        run_single(&catalog, tool, args.yes, &mut logbook).await
    } else if let Some(seq) = &args.sequence {
        run_suite(&catalog, seq, args.yes, &mut logbook).await
    } else {
        print_catalog(&catalog);
        Ok(())
    };

    if let Some(path) = &args.log_file {
        if !logbook.is_empty() {
            let path = Path::new(path);
            logbook.export(path)?;
            println!("logs exported to {}", path.display());
        }
    }

    outcome?;
    Ok(())
}

/// Run one catalog tool to completion, printing its output as it arrives.
async fn run_single(
    catalog: &Catalog,
    name: &str,
    assume_yes: bool,
    logbook: &mut Logbook,
) -> errors::Result<()> {
    let task = catalog.task_for(name)?;

    // Existence is checked once here, before start; the runner would treat
    // a missing file as a launch failure.
    if !task.path.exists() {
        let line = logbook.record(&format!("script not found: {}", task.path.display()));
        println!("{line}");
        return Ok(());
    }

    if !assume_yes && !confirm(&format!("Run '{}'?", task.label))? {
        println!("{}", logbook.record("aborted"));
        return Ok(());
    }

    let (events_tx, mut events_rx) = mpsc::channel::<RunEvent>(64);
    let mut runner = ScriptRunner::new(events_tx);
    let mut stats = RunStatistics::default();

    println!("{}", logbook.record(&format!("starting: {}", task.label)));
    stats.record_start();
    runner.start(task)?;

    // Ctrl-C → emergency stop for the active run.
    let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_tx.send(()).await;
        }
    });

    loop {
        tokio::select! {
            event = events_rx.recv() => match event {
                Some(event) => {
                    let done = matches!(event, RunEvent::Finished(_));
                    handle_event(event, logbook, &mut stats);
                    if done {
                        break;
                    }
                }
                None => break,
            },
            _ = stop_rx.recv() => {
                println!("{}", logbook.record("emergency stop: cancelling active script"));
                runner.cancel();
                runner.join().await;
                // Cancelled runs report no outcome.
                stats.reset_active();
                break;
            }
        }
    }

    println!("{}", logbook.record(&status_line(&stats)));
    Ok(())
}

/// Run a named sequence, forwarding every coordinator event.
async fn run_suite(
    catalog: &Catalog,
    name: &str,
    assume_yes: bool,
    logbook: &mut Logbook,
) -> errors::Result<()> {
    let label = catalog.sequence_config(name)?.label.clone();
    let tasks = catalog.tasks_for_sequence(name)?;
    let options = SequenceOptions::with_settle_delay_ms(catalog.config.settle_delay_ms);

    if !assume_yes
        && !confirm(&format!(
            "This will run {} scripts ({label}). Continue?",
            tasks.len()
        ))?
    {
        println!("{}", logbook.record("aborted"));
        return Ok(());
    }

    println!("{}", logbook.record(&format!("starting suite: {label}")));

    let (events_tx, mut events_rx) = mpsc::channel::<RunEvent>(64);
    let mut stats = RunStatistics::default();

    let coordinator = tokio::spawn(run_sequence(tasks, events_tx, options));

    while let Some(event) = events_rx.recv().await {
        handle_event(event, logbook, &mut stats);
    }

    coordinator.await.context("joining sequence worker")?;

    println!("{}", logbook.record(&status_line(&stats)));
    Ok(())
}

/// Render one runner/coordinator event as console output, keeping the
/// statistics current.
fn handle_event(event: RunEvent, logbook: &mut Logbook, stats: &mut RunStatistics) {
    match event {
        RunEvent::OutputLine(line) => {
            println!("{}", logbook.record(&line));
        }
        RunEvent::Progress(Progress::Percent(percent)) => {
            debug!(percent, "progress update");
        }
        RunEvent::Progress(Progress::Indeterminate) => {
            debug!("progress indeterminate");
        }
        RunEvent::Finished(outcome) => {
            stats.record_outcome(&outcome);
            if !outcome.succeeded {
                warn!(message = %outcome.message, "script reported failure");
            }
            println!("{}", logbook.record(&outcome.message));
        }
        RunEvent::SequenceSkipped { label } => {
            println!(
                "{}",
                logbook.record(&format!("skipping {label}: script not found"))
            );
        }
        RunEvent::SequenceAdvance {
            index,
            total,
            label,
        } => {
            stats.record_start();
            println!(
                "{}",
                logbook.record(&format!("running: {label} ({}/{total})", index + 1))
            );
        }
        RunEvent::SequenceComplete { summary } => {
            let succeeded = summary
                .iter()
                .filter(|s| s.outcome.as_ref().is_some_and(|o| o.succeeded))
                .count();
            let skipped = summary.iter().filter(|s| s.outcome.is_none()).count();
            println!(
                "{}",
                logbook.record(&format!(
                    "suite complete: {succeeded}/{} succeeded, {skipped} skipped",
                    summary.len()
                ))
            );
        }
    }
}

/// Prompt on stdout and read one answer line; anything but an explicit yes
/// declines.
fn confirm(question: &str) -> errors::Result<bool> {
    use std::io::Write;

    print!("{question} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn status_line(stats: &RunStatistics) -> String {
    format!(
        "scripts: {} | success rate: {}% | active: {}",
        stats.scripts_run,
        stats.success_rate(),
        stats.active
    )
}

/// Catalog listing for `--list` (and for invocations with nothing to run).
fn print_catalog(catalog: &Catalog) {
    println!("fixkit catalog");
    println!("  scripts_dir = {}", catalog.config.scripts_dir.display());
    println!("  settle_delay_ms = {}", catalog.config.settle_delay_ms);
    println!();

    for category in Category::all() {
        let tools: Vec<_> = catalog.tools_in(category).collect();
        if tools.is_empty() {
            continue;
        }
        println!("{}:", category.title());
        for (name, tool) in tools {
            println!("  - {name}: {} ({})", tool.label, tool.script);
        }
        println!();
    }

    if !catalog.sequence.is_empty() {
        println!("sequences:");
        for (name, seq) in &catalog.sequence {
            println!("  - {name}: {} [{}]", seq.label, seq.tools.join(", "));
        }
    }
}
