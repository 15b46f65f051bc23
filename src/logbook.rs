// src/logbook.rs

//! Session transcript: timestamped log lines and text export.

use std::fs;
use std::path::Path;

use chrono::Local;

use crate::errors::Result;

/// Collects the console-style lines of one session so they can be exported
/// to a text file afterwards.
#[derive(Debug, Default)]
pub struct Logbook {
    entries: Vec<String>,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message and return the timestamped `[HH:MM:SS] message`
    /// form for immediate display.
    pub fn record(&mut self, message: &str) -> String {
        let stamped = format!("[{}] {message}", Local::now().format("%H:%M:%S"));
        self.entries.push(stamped.clone());
        stamped
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Write the transcript to `path` with a small header.
    pub fn export(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        out.push_str("Fixkit Log Export\n");
        out.push_str(&"=".repeat(50));
        out.push('\n');
        out.push_str(&format!(
            "Generated: {}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        for entry in &self.entries {
            out.push_str(entry);
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }
}
