//! MySQL loader driving the generate/write/commit loop.

use crate::config::MySQLConnectionConfig;
use crate::error::{MySQLPopulatorError, RunAborted};
use crate::insert::{build_batch_statement, MAX_PLACEHOLDERS};
use crate::metrics::RunMetrics;
use crate::sink::{BatchSink, MySQLSink};
use loadtest_generator::{RecordGenerator, RecordProfile, SyntheticRecord};
use loadtest_populate::PopulatePlan;
use std::time::Instant;
use tracing::{debug, error, info};

/// Check that a plan can be executed before touching the database.
///
/// Besides the table and batch shape, the whole planned key range
/// `start_offset + batch_count * batch_size` must fit the profile, so a run
/// never stops part-way on an exhausted key space.
pub fn validate_plan(plan: &PopulatePlan) -> Result<(), MySQLPopulatorError> {
    validate_target(plan.profile, &plan.table, plan.batch_size)?;

    let rows = plan
        .batch_count
        .checked_mul(plan.batch_size as u64)
        .ok_or_else(|| {
            MySQLPopulatorError::Config(format!(
                "{} batches of {} rows overflow the row counter",
                plan.batch_count, plan.batch_size
            ))
        })?;
    RecordGenerator::new(plan.profile, plan.seed)
        .check_rows(plan.start_offset, rows)
        .map_err(|e| MySQLPopulatorError::Config(e.to_string()))
}

fn validate_target(
    profile: RecordProfile,
    table: &str,
    batch_size: usize,
) -> Result<(), MySQLPopulatorError> {
    if table.trim().is_empty() {
        return Err(MySQLPopulatorError::Config(
            "table name must not be empty".to_string(),
        ));
    }
    if batch_size == 0 {
        return Err(MySQLPopulatorError::Config(
            "batch size must be at least 1".to_string(),
        ));
    }
    let placeholders = batch_size.saturating_mul(profile.arity());
    if placeholders > MAX_PLACEHOLDERS {
        return Err(MySQLPopulatorError::Config(format!(
            "batch size {} needs {} placeholders for {} columns, MySQL allows {}",
            batch_size,
            placeholders,
            profile.arity(),
            MAX_PLACEHOLDERS
        )));
    }
    Ok(())
}

/// Loader that generates synthetic records and writes them batch by batch.
///
/// Owns one sink (one connection) and one generator. Batches are written
/// strictly in sequence; the first failed batch ends the run.
pub struct MySQLPopulator<S: BatchSink = MySQLSink> {
    sink: S,
    generator: RecordGenerator,
    table: String,
    batch_size: usize,
}

impl MySQLPopulator<MySQLSink> {
    /// Connect to MySQL and prepare a loader for the given plan.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let plan = PopulatePlan::for_profile(RecordProfile::Thing);
    /// let populator = MySQLPopulator::connect(&config, &plan).await?;
    /// ```
    pub async fn connect(
        config: &MySQLConnectionConfig,
        plan: &PopulatePlan,
    ) -> Result<Self, MySQLPopulatorError> {
        validate_plan(plan)?;
        let sink = MySQLSink::connect(config).await?;
        Ok(Self::new(sink, plan))
    }
}

impl<S: BatchSink> MySQLPopulator<S> {
    /// Create a loader writing to an existing sink.
    pub fn new(sink: S, plan: &PopulatePlan) -> Self {
        let generator =
            RecordGenerator::new(plan.profile, plan.seed).with_start_offset(plan.start_offset);
        Self {
            sink,
            generator,
            table: plan.table.clone(),
            batch_size: plan.batch_size,
        }
    }

    /// Replace the record generator, e.g. to pin its creation timestamp.
    #[cfg(test)]
    fn with_generator(mut self, generator: RecordGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn profile(&self) -> RecordProfile {
        self.generator.profile()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Offset of the next record to be generated.
    pub fn current_offset(&self) -> u64 {
        self.generator.next_offset()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Remove all rows from the target table.
    ///
    /// Any failure leaves the table in an unknown state and is reported as
    /// a `Reset` error.
    pub async fn reset_table(&mut self) -> Result<(), MySQLPopulatorError> {
        info!("Truncating table: {}", self.table);
        self.sink.truncate(&self.table).await.map_err(|e| {
            error!("Failed to truncate table '{}': {}", self.table, e);
            MySQLPopulatorError::Reset {
                table: self.table.clone(),
                error: Box::new(e),
            }
        })
    }

    /// Write one batch as a single multi-row statement in one transaction.
    ///
    /// Updates `metrics`: committed rows count as succeeded, rolled-back rows
    /// as failed.
    pub async fn execute_batch(
        &mut self,
        metrics: &mut RunMetrics,
        index: u64,
        records: Vec<SyntheticRecord>,
    ) -> Result<u64, MySQLPopulatorError> {
        let rows = records.len();
        if rows == 0 {
            return Ok(0);
        }
        let offset = records[0].offset;
        let profile = self.profile();

        let statement =
            build_batch_statement(profile.write_mode(), &self.table, profile.columns(), records);
        debug!(
            "Executing {} of {} rows ({} parameters)",
            profile.write_mode(),
            rows,
            statement.params.len()
        );

        let insert_start = Instant::now();
        let result = self.sink.write_batch(statement).await;
        metrics.insert_duration += insert_start.elapsed();

        match result {
            Ok(written) => {
                metrics.record_success(rows);
                info!(
                    "Batch {} committed: offset {}, {} rows written",
                    index, offset, metrics.rows_succeeded
                );
                Ok(written)
            }
            Err(e) => {
                metrics.record_failure(rows);
                error!(
                    "Batch {} at offset {} rolled back ({} rows): {}",
                    index, offset, rows, e
                );
                Err(MySQLPopulatorError::Batch {
                    index,
                    offset,
                    rows,
                    error: Box::new(e),
                })
            }
        }
    }

    /// Generate and write `batch_count` batches.
    ///
    /// Stops at the first failed batch. The returned metrics (or the ones in
    /// `RunAborted`) cover every batch attempted.
    pub async fn run(&mut self, batch_count: u64) -> Result<RunMetrics, RunAborted> {
        let start_time = Instant::now();
        let mut metrics = RunMetrics::default();

        if let Err(error) = validate_target(self.profile(), &self.table, self.batch_size) {
            return Err(RunAborted { metrics, error });
        }

        info!(
            "Loading {} batches of {} rows into '{}' ({} profile, starting at offset {})",
            batch_count,
            self.batch_size,
            self.table,
            self.profile(),
            self.current_offset()
        );

        for index in 0..batch_count {
            if let Err(e) = self
                .generator
                .check_range(self.current_offset(), self.batch_size)
            {
                metrics.total_duration = start_time.elapsed();
                return Err(RunAborted {
                    metrics,
                    error: e.into(),
                });
            }

            let gen_start = Instant::now();
            let records = self.generator.next_batch(self.batch_size);
            metrics.generation_duration += gen_start.elapsed();

            if let Err(error) = self.execute_batch(&mut metrics, index, records).await {
                metrics.total_duration = start_time.elapsed();
                return Err(RunAborted { metrics, error });
            }
        }

        metrics.total_duration = start_time.elapsed();
        info!(
            "Load complete: {} rows in {:?} ({:.2} rows/sec)",
            metrics.rows_succeeded,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }

    /// Get the row count of the target table.
    pub async fn row_count(&mut self) -> Result<u64, MySQLPopulatorError> {
        self.sink.row_count(&self.table).await
    }

    /// Release the connection.
    pub async fn close(&mut self) -> Result<(), MySQLPopulatorError> {
        self.sink.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insert::BatchStatement;
    use async_trait::async_trait;
    use mysql_async::Value;
    use tokio_test::{assert_err, assert_ok};

    /// In-memory sink recording every call.
    #[derive(Default)]
    struct MemorySink {
        /// 1-based batch number whose write fails.
        fail_on_batch: Option<usize>,
        fail_truncate: bool,
        writes: usize,
        committed: Vec<BatchStatement>,
        rolled_back: Vec<BatchStatement>,
        rows: u64,
        truncated: bool,
        closed: bool,
    }

    #[async_trait]
    impl BatchSink for MemorySink {
        async fn truncate(&mut self, _table: &str) -> Result<(), MySQLPopulatorError> {
            if self.fail_truncate {
                return Err(MySQLPopulatorError::Connection(
                    "table is locked".to_string(),
                ));
            }
            self.rows = 0;
            self.truncated = true;
            Ok(())
        }

        async fn write_batch(
            &mut self,
            statement: BatchStatement,
        ) -> Result<u64, MySQLPopulatorError> {
            if self.closed {
                return Err(MySQLPopulatorError::Connection("closed".to_string()));
            }
            self.writes += 1;
            if self.fail_on_batch == Some(self.writes) {
                self.rolled_back.push(statement);
                return Err(MySQLPopulatorError::Connection(
                    "Duplicate entry".to_string(),
                ));
            }
            let rows = statement.rows as u64;
            self.rows += rows;
            self.committed.push(statement);
            Ok(rows)
        }

        async fn row_count(&mut self, _table: &str) -> Result<u64, MySQLPopulatorError> {
            Ok(self.rows)
        }

        async fn close(&mut self) -> Result<(), MySQLPopulatorError> {
            self.closed = true;
            Ok(())
        }
    }

    fn plan(profile: RecordProfile, batch_size: usize) -> PopulatePlan {
        PopulatePlan {
            batch_size,
            ..PopulatePlan::for_profile(profile)
        }
    }

    #[tokio::test]
    async fn test_all_batches_succeed() {
        let mut populator =
            MySQLPopulator::new(MemorySink::default(), &plan(RecordProfile::User, 10));

        let metrics = assert_ok!(populator.run(5).await);

        assert_eq!(metrics.rows_succeeded, 50);
        assert_eq!(metrics.rows_failed, 0);
        assert_eq!(metrics.batches_committed, 5);
        assert_eq!(populator.sink().committed.len(), 5);
        assert!(populator.sink().rolled_back.is_empty());
        assert_eq!(populator.current_offset(), 50);
    }

    #[tokio::test]
    async fn test_failure_stops_run() {
        let sink = MemorySink {
            fail_on_batch: Some(3),
            ..Default::default()
        };
        let mut populator = MySQLPopulator::new(sink, &plan(RecordProfile::Thing, 20));

        let aborted = assert_err!(populator.run(10).await);

        assert_eq!(aborted.metrics.rows_succeeded, 40);
        assert_eq!(aborted.metrics.rows_failed, 20);
        assert_eq!(aborted.metrics.batches_committed, 2);
        assert!(matches!(
            aborted.error,
            MySQLPopulatorError::Batch {
                index: 2,
                offset: 40,
                rows: 20,
                ..
            }
        ));

        let sink = populator.sink();
        assert_eq!(sink.writes, 3, "no batch after the failed one");
        assert_eq!(sink.committed.len(), 2);
        assert_eq!(sink.rolled_back.len(), 1);
        assert_eq!(sink.rows, 40);
    }

    #[tokio::test]
    async fn test_reset_then_load_row_count() {
        let sink = MemorySink {
            rows: 1234,
            ..Default::default()
        };
        let mut populator = MySQLPopulator::new(sink, &plan(RecordProfile::Thing, 100));

        assert_ok!(populator.reset_table().await);
        let metrics = assert_ok!(populator.run(7).await);

        assert!(populator.sink().truncated);
        assert_eq!(populator.row_count().await.unwrap(), 700);
        assert_eq!(metrics.rows_succeeded, 700);
    }

    #[tokio::test]
    async fn test_reset_failure_is_fatal() {
        let sink = MemorySink {
            fail_truncate: true,
            ..Default::default()
        };
        let mut populator = MySQLPopulator::new(sink, &plan(RecordProfile::Thing, 100));

        let err = assert_err!(populator.reset_table().await);
        assert!(matches!(err, MySQLPopulatorError::Reset { .. }));
        assert!(err.is_setup_error());
    }

    #[tokio::test]
    async fn test_statements_carry_increasing_keys() {
        let mut populator =
            MySQLPopulator::new(MemorySink::default(), &plan(RecordProfile::User, 3));

        assert_ok!(populator.run(2).await);

        let ids: Vec<Value> = populator
            .sink()
            .committed
            .iter()
            .flat_map(|s| s.params.chunks(9).map(|row| row[0].clone()))
            .collect();
        let expected: Vec<Value> = (1..=6).map(Value::Int).collect();
        assert_eq!(ids, expected);

        let sql = &populator.sink().committed[0].sql;
        assert!(sql.starts_with("REPLACE INTO `user`"));
    }

    #[tokio::test]
    async fn test_start_offset_continues_keys() {
        let plan = PopulatePlan {
            start_offset: 1000,
            ..plan(RecordProfile::Thing, 2)
        };
        let mut populator = MySQLPopulator::new(MemorySink::default(), &plan);

        assert_ok!(populator.run(1).await);

        let params = &populator.sink().committed[0].params;
        assert_eq!(params[2], Value::Bytes(b"WDDUX5268F1001000".to_vec()));
        assert_eq!(params[9 + 2], Value::Bytes(b"WDDUX5268F1001001".to_vec()));
    }

    #[tokio::test]
    async fn test_invalid_batch_size_rejected() {
        let mut populator =
            MySQLPopulator::new(MemorySink::default(), &plan(RecordProfile::User, 0));

        let aborted = assert_err!(populator.run(3).await);
        assert!(matches!(aborted.error, MySQLPopulatorError::Config(_)));
        assert_eq!(populator.sink().writes, 0);
    }

    #[tokio::test]
    async fn test_zero_batches() {
        let mut populator =
            MySQLPopulator::new(MemorySink::default(), &plan(RecordProfile::User, 10));

        let metrics = assert_ok!(populator.run(0).await);
        assert_eq!(metrics.rows_succeeded, 0);
        assert!(metrics.rows_per_second().is_finite());
    }

    #[tokio::test]
    async fn test_close_releases_sink() {
        let mut populator =
            MySQLPopulator::new(MemorySink::default(), &plan(RecordProfile::User, 10));

        assert_ok!(populator.close().await);
        assert!(populator.sink().closed);

        let aborted = assert_err!(populator.run(1).await);
        assert_eq!(aborted.metrics.rows_failed, 10);
    }

    #[test]
    fn test_validate_plan_rejects_overflowing_range() {
        let at_end = PopulatePlan {
            start_offset: u64::MAX,
            ..PopulatePlan::for_profile(RecordProfile::Thing)
        };
        let err = validate_plan(&at_end).unwrap_err();
        assert!(matches!(err, MySQLPopulatorError::Config(_)));
        assert!(err.to_string().contains("Offset overflow"));

        // The first batches fit, the later ones would not.
        let max_offset = (i64::MAX - 13_100_000_001) as u64;
        let part_way = PopulatePlan {
            start_offset: max_offset - 1000,
            batch_count: 20,
            ..plan(RecordProfile::User, 100)
        };
        assert!(matches!(
            validate_plan(&part_way),
            Err(MySQLPopulatorError::Config(_))
        ));

        let fits = PopulatePlan {
            batch_count: 10,
            ..part_way
        };
        assert!(validate_plan(&fits).is_ok());

        let huge = PopulatePlan {
            batch_count: u64::MAX,
            ..plan(RecordProfile::User, 100)
        };
        let err = validate_plan(&huge).unwrap_err();
        assert!(err.to_string().contains("overflow the row counter"));
    }

    #[tokio::test]
    async fn test_with_generator_pins_timestamp() {
        let created_at = chrono::NaiveDate::from_ymd_opt(2024, 5, 4)
            .unwrap()
            .and_hms_opt(3, 2, 1)
            .unwrap();
        let generator = RecordGenerator::new(RecordProfile::User, 42).with_created_at(created_at);
        let mut populator =
            MySQLPopulator::new(MemorySink::default(), &plan(RecordProfile::User, 2))
                .with_generator(generator);

        assert_ok!(populator.run(1).await);

        let params = &populator.sink().committed[0].params;
        assert_eq!(params[8], Value::Date(2024, 5, 4, 3, 2, 1, 0));
        assert_eq!(params[17], Value::Date(2024, 5, 4, 3, 2, 1, 0));
    }

    #[test]
    fn test_validate_plan() {
        assert!(validate_plan(&PopulatePlan::for_profile(RecordProfile::Thing)).is_ok());
        assert!(validate_plan(&PopulatePlan::for_profile(RecordProfile::User)).is_ok());

        let too_big = plan(RecordProfile::User, 8000);
        let err = validate_plan(&too_big).unwrap_err();
        assert!(err.to_string().contains("65535"));

        let no_table = PopulatePlan {
            table: " ".to_string(),
            ..PopulatePlan::for_profile(RecordProfile::User)
        };
        assert!(validate_plan(&no_table).is_err());
    }
}
