// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `fixkit`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fixkit",
    version,
    about = "Run system-repair scripts from a catalog, one at a time or as a suite.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the catalog file (TOML).
    ///
    /// Falls back to `Fixkit.toml` in the current working directory, then to
    /// the built-in catalog.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Directory containing the script files (overrides the catalog).
    #[arg(long, value_name = "DIR")]
    pub scripts_dir: Option<String>,

    /// List categories, tools and sequences, then exit.
    #[arg(long)]
    pub list: bool,

    /// Run a single tool by its catalog name.
    #[arg(long, value_name = "NAME", conflicts_with = "sequence")]
    pub tool: Option<String>,

    /// Run a named sequence of tools (e.g. "basic_fixes").
    #[arg(long, value_name = "NAME")]
    pub sequence: Option<String>,

    /// Skip the confirmation prompt before running a tool or sequence.
    #[arg(long)]
    pub yes: bool,

    /// Pause between sequence steps, in milliseconds (overrides the catalog).
    #[arg(long, value_name = "MS")]
    pub settle_delay_ms: Option<u64>,

    /// Export a timestamped transcript of the session to PATH on exit.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FIXKIT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
