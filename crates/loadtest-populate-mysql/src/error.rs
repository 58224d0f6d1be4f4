//! Error types for the MySQL loader.

use crate::metrics::RunMetrics;
use loadtest_generator::GeneratorError;
use thiserror::Error;

/// Errors that can occur during MySQL population.
#[derive(Error, Debug)]
pub enum MySQLPopulatorError {
    /// MySQL query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// The initial connection could not be established.
    #[error("Failed to connect to MySQL at {address}: {error}")]
    Connect {
        address: String,
        error: mysql_async::Error,
    },

    /// Connection unusable (closed, lost).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Clearing the target table failed; its state is unknown.
    #[error("Failed to truncate table '{table}': {error}")]
    Reset {
        table: String,
        error: Box<MySQLPopulatorError>,
    },

    /// A batch write failed and was rolled back.
    #[error("Batch {index} at offset {offset} ({rows} rows) rolled back: {error}")]
    Batch {
        index: u64,
        offset: u64,
        rows: usize,
        error: Box<MySQLPopulatorError>,
    },

    /// Generator error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MySQLPopulatorError {
    /// Whether the error happened before any row was written.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            MySQLPopulatorError::Connect { .. }
                | MySQLPopulatorError::Reset { .. }
                | MySQLPopulatorError::Config(_)
        )
    }
}

/// A run that stopped on its first failure.
///
/// Carries the counters accumulated up to and including the failed batch.
#[derive(Error, Debug)]
#[error("Load aborted after {} committed rows: {error}", .metrics.rows_succeeded)]
pub struct RunAborted {
    pub metrics: RunMetrics,
    pub error: MySQLPopulatorError,
}
