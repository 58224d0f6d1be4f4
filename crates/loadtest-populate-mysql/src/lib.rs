//! MySQL bulk loader for load testing.
//!
//! This crate writes batches produced by `loadtest-generator` into a MySQL
//! table, one multi-row `INSERT`/`REPLACE` statement per transaction. A failed
//! batch is rolled back and ends the run.
//!
//! # Example
//!
//! ```ignore
//! use loadtest_populate::PopulatePlan;
//! use loadtest_populate_mysql::{MySQLConnectionConfig, MySQLPopulator};
//! use loadtest_generator::RecordProfile;
//!
//! let plan = PopulatePlan::for_profile(RecordProfile::User);
//! let mut populator = MySQLPopulator::connect(&config, &plan).await?;
//! let metrics = populator.run(plan.batch_count).await?;
//! populator.close().await?;
//! println!("{}", metrics.summary());
//! ```

pub mod args;
pub mod config;
mod error;
pub mod insert;
mod metrics;
mod populator;
pub mod sink;
pub mod value;

pub use args::{CommonPopulateArgs, MySQLPopulateArgs};
pub use config::MySQLConnectionConfig;
pub use error::{MySQLPopulatorError, RunAborted};
pub use metrics::RunMetrics;
pub use populator::{validate_plan, MySQLPopulator};
pub use sink::{BatchSink, MySQLSink};
