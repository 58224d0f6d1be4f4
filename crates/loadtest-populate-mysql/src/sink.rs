//! Batch destinations.
//!
//! `BatchSink` is the seam between the load loop and the database: it owns
//! the connection and gives each batch its own transaction.

use crate::config::{mask_connection_password, MySQLConnectionConfig};
use crate::error::MySQLPopulatorError;
use crate::insert::{generate_count_rows, generate_truncate_table, BatchStatement};
use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, Params, TxOpts};
use tracing::{debug, info, warn};

/// Destination for batches of generated rows.
#[async_trait]
pub trait BatchSink: Send {
    /// Remove every row from `table`.
    async fn truncate(&mut self, table: &str) -> Result<(), MySQLPopulatorError>;

    /// Execute one multi-row statement in its own transaction.
    ///
    /// Commits and returns the row count on success. On failure the
    /// transaction is rolled back before the error is returned.
    async fn write_batch(&mut self, statement: BatchStatement) -> Result<u64, MySQLPopulatorError>;

    /// Count the rows currently in `table`.
    async fn row_count(&mut self, table: &str) -> Result<u64, MySQLPopulatorError>;

    /// Release the connection. Further calls fail.
    async fn close(&mut self) -> Result<(), MySQLPopulatorError>;
}

/// Single-connection MySQL sink.
pub struct MySQLSink {
    conn: Option<Conn>,
}

impl MySQLSink {
    /// Open a connection using explicit settings.
    pub async fn connect(config: &MySQLConnectionConfig) -> Result<Self, MySQLPopulatorError> {
        let address = config.display_address();
        Self::connect_with(config.opts(), address).await
    }

    /// Open a connection from a `mysql://` URL.
    pub async fn connect_url(url: &str) -> Result<Self, MySQLPopulatorError> {
        let opts = Opts::from_url(url)
            .map_err(|e| MySQLPopulatorError::Config(format!("Invalid MySQL URL: {e}")))?;
        Self::connect_with(opts, mask_connection_password(url)).await
    }

    async fn connect_with(opts: Opts, address: String) -> Result<Self, MySQLPopulatorError> {
        info!("Connecting to MySQL at {}", address);
        let conn = Conn::new(opts)
            .await
            .map_err(|error| MySQLPopulatorError::Connect { address, error })?;
        Ok(Self::from_conn(conn))
    }

    /// Wrap an already open connection.
    pub fn from_conn(conn: Conn) -> Self {
        Self { conn: Some(conn) }
    }

    fn conn(&mut self) -> Result<&mut Conn, MySQLPopulatorError> {
        self.conn
            .as_mut()
            .ok_or_else(|| MySQLPopulatorError::Connection("connection already closed".to_string()))
    }
}

#[async_trait]
impl BatchSink for MySQLSink {
    async fn truncate(&mut self, table: &str) -> Result<(), MySQLPopulatorError> {
        let sql = generate_truncate_table(table);
        debug!("SQL: {}", sql);
        self.conn()?.query_drop(sql).await?;
        Ok(())
    }

    async fn write_batch(&mut self, statement: BatchStatement) -> Result<u64, MySQLPopulatorError> {
        let BatchStatement { sql, params, rows } = statement;
        let mut tx = self.conn()?.start_transaction(TxOpts::default()).await?;

        match tx.exec_drop(sql, Params::Positional(params)).await {
            Ok(()) => {
                tx.commit().await?;
                Ok(rows as u64)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                Err(e.into())
            }
        }
    }

    async fn row_count(&mut self, table: &str) -> Result<u64, MySQLPopulatorError> {
        let count: Option<u64> = self.conn()?.query_first(generate_count_rows(table)).await?;
        Ok(count.unwrap_or(0))
    }

    async fn close(&mut self) -> Result<(), MySQLPopulatorError> {
        if let Some(conn) = self.conn.take() {
            debug!("Disconnecting from MySQL");
            conn.disconnect().await?;
        }
        Ok(())
    }
}
