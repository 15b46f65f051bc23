//! On-disk script fixtures for runner and sequence tests.
//!
//! Fixtures are plain `sh` scripts, which the runner picks for any
//! non-batch, non-PowerShell extension.

use std::fs;
use std::path::{Path, PathBuf};

/// Write a script fixture with the given body.
pub fn write_script_body(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write script fixture");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("chmod script fixture");
    }

    path
}

/// Write a script that echoes `lines` one per line, then exits with
/// `exit_code`.
pub fn write_script(dir: &Path, name: &str, lines: &[&str], exit_code: i32) -> PathBuf {
    let mut body = String::new();
    for line in lines {
        body.push_str(&format!("echo '{line}'\n"));
    }
    body.push_str(&format!("exit {exit_code}\n"));
    write_script_body(dir, name, &body)
}

/// Write a script that sleeps for `seconds` before exiting cleanly. Used by
/// cancellation and busy-runner tests.
pub fn write_sleep_script(dir: &Path, name: &str, seconds: u32) -> PathBuf {
    write_script_body(dir, name, &format!("sleep {seconds}\nexit 0\n"))
}
