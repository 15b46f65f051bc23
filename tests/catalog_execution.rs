// tests/catalog_execution.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;

use fixkit::catalog::Category;
use fixkit::runner::RunEvent;
use fixkit::sequence::{run_sequence, SequenceOptions};
use fixkit_test_utils::builders::{CatalogBuilder, ToolBuilder};
use fixkit_test_utils::scripts::write_script;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn a_catalog_sequence_runs_end_to_end() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        write_script(dir.path(), "flush_dns.sh", &["flushed"], 0);
        write_script(dir.path(), "clear_temp.sh", &["cleared"], 0);

        let catalog = CatalogBuilder::new()
            .scripts_dir(dir.path())
            .with_tool(
                "flush_dns",
                ToolBuilder::new("Flush DNS Cache", "flush_dns.sh").build(),
            )
            .with_tool(
                "clear_temp",
                ToolBuilder::new("Clear Temp Files", "clear_temp.sh")
                    .category(Category::Storage)
                    .build(),
            )
            .with_sequence("basic", "Basic Fixes", &["flush_dns", "clear_temp"])
            .build();

        let tasks = catalog.tasks_for_sequence("basic")?;
        let (tx, mut rx) = mpsc::channel::<RunEvent>(64);
        let summary = run_sequence(
            tasks,
            tx,
            SequenceOptions {
                settle_delay: Duration::ZERO,
            },
        )
        .await;

        assert_eq!(summary.len(), 2);
        assert!(summary
            .iter()
            .all(|s| s.outcome.as_ref().is_some_and(|o| o.succeeded)));

        let mut lines = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let RunEvent::OutputLine(line) = event {
                lines.push(line);
            }
        }
        assert_eq!(lines, vec!["flushed", "cleared"]);

        Ok(())
    })
    .await
}

#[tokio::test]
async fn single_tool_resolution_matches_scripts_dir() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        write_script(dir.path(), "memory_check.sh", &["ok"], 0);

        let catalog = CatalogBuilder::new()
            .scripts_dir(dir.path())
            .with_tool(
                "memory_check",
                ToolBuilder::new("Memory Usage Check", "memory_check.sh")
                    .category(Category::Performance)
                    .build(),
            )
            .build();

        let task = catalog.task_for("memory_check")?;
        assert_eq!(task.path, dir.path().join("memory_check.sh"));
        assert!(task.path.exists());

        Ok(())
    })
    .await
}
