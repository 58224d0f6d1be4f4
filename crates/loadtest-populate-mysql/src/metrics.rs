//! Run counters and throughput.

use std::time::Duration;

/// Counters for one load run.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Rows in committed batches.
    pub rows_succeeded: u64,
    /// Rows in rolled-back batches.
    pub rows_failed: u64,
    /// Number of committed batches.
    pub batches_committed: u64,
    /// Wall-clock time from the first batch to the end of the run.
    pub total_duration: Duration,
    /// Time spent generating records.
    pub generation_duration: Duration,
    /// Time spent executing statements, commits and rollbacks included.
    pub insert_duration: Duration,
}

impl RunMetrics {
    pub fn record_success(&mut self, rows: usize) {
        self.rows_succeeded += rows as u64;
        self.batches_committed += 1;
    }

    pub fn record_failure(&mut self, rows: usize) {
        self.rows_failed += rows as u64;
    }

    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_succeeded as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// One-line run summary.
    pub fn summary(&self) -> String {
        format!(
            "Wrote {} rows ({} failed) in {:.3}s ({:.2} rows/sec)",
            self.rows_succeeded,
            self.rows_failed,
            self.total_duration.as_secs_f64(),
            self.rows_per_second()
        )
    }
}
