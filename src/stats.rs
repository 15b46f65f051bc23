// src/stats.rs

//! Caller-owned run statistics.
//!
//! The runner never sees these; callers update them from `Finished` events
//! and render them however they like (the CLI prints a status line).

use crate::runner::RunOutcome;

/// Running counters for a session: scripts run, successes, runs in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub scripts_run: u32,
    pub successful: u32,
    pub active: u32,
}

impl RunStatistics {
    pub fn record_start(&mut self) {
        self.active += 1;
    }

    pub fn record_outcome(&mut self, outcome: &RunOutcome) {
        self.scripts_run += 1;
        if outcome.succeeded {
            self.successful += 1;
        }
        self.active = self.active.saturating_sub(1);
    }

    /// Clears the in-flight counter after an emergency stop, since cancelled
    /// runs report no outcome.
    pub fn reset_active(&mut self) {
        self.active = 0;
    }

    /// Percentage of completed runs that succeeded; 100 when nothing ran yet.
    pub fn success_rate(&self) -> u32 {
        if self.scripts_run == 0 {
            100
        } else {
            self.successful * 100 / self.scripts_run
        }
    }
}
