//! MySQL loader integration tests.

use loadtest_generator::RecordProfile;
use loadtest_populate::PopulatePlan;
use loadtest_populate_mysql::{MySQLPopulator, MySQLPopulatorError, MySQLSink};
use mysql_async::prelude::*;

const BATCH_SIZE: usize = 25;
const BATCH_COUNT: u64 = 4;

fn mysql_test_url() -> Option<String> {
    match std::env::var("MYSQL_TEST_URL") {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("MYSQL_TEST_URL not set, skipping MySQL loader test");
            None
        }
    }
}

fn create_table_sql(profile: RecordProfile, table: &str) -> String {
    match profile {
        RecordProfile::Thing => format!(
            "CREATE TABLE `{table}` (
                thingserialno VARCHAR(64) NOT NULL,
                prethingaes128key VARCHAR(32) NOT NULL,
                thingid VARCHAR(32) NOT NULL PRIMARY KEY,
                iccid VARCHAR(32) NOT NULL,
                imsi VARCHAR(32) NOT NULL,
                status INT NOT NULL,
                bid INT NOT NULL,
                thingaes128key VARCHAR(32) NOT NULL,
                eventcreationtime BIGINT NOT NULL
            )"
        ),
        RecordProfile::User => format!(
            "CREATE TABLE `{table}` (
                id BIGINT NOT NULL PRIMARY KEY,
                last_name VARCHAR(32) NOT NULL,
                first_name VARCHAR(32) NOT NULL,
                sex CHAR(1) NOT NULL,
                age INT NOT NULL,
                phone BIGINT NOT NULL,
                address VARCHAR(64) NOT NULL,
                password VARCHAR(32) NOT NULL,
                create_time DATETIME NOT NULL
            )"
        ),
    }
}

async fn recreate_table(
    url: &str,
    profile: RecordProfile,
    table: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = mysql_async::Conn::from_url(url).await?;
    conn.query_drop(format!("DROP TABLE IF EXISTS `{table}`")).await?;
    conn.query_drop(create_table_sql(profile, table)).await?;
    conn.disconnect().await?;
    Ok(())
}

async fn drop_table(url: &str, table: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = mysql_async::Conn::from_url(url).await?;
    conn.query_drop(format!("DROP TABLE IF EXISTS `{table}`")).await?;
    conn.disconnect().await?;
    Ok(())
}

fn plan(profile: RecordProfile, table: &str) -> PopulatePlan {
    PopulatePlan {
        table: table.to_string(),
        batch_size: BATCH_SIZE,
        batch_count: BATCH_COUNT,
        ..PopulatePlan::for_profile(profile)
    }
}

/// Truncate then load: the table holds exactly the rows written.
#[tokio::test]
async fn test_mysql_truncate_and_insert() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("loadtest_populate_mysql=info")
        .try_init()
        .ok();

    let Some(url) = mysql_test_url() else {
        return Ok(());
    };
    let table = "bulkload_test_things";
    recreate_table(&url, RecordProfile::Thing, table).await?;

    // Leftover rows from an earlier run
    let plan = plan(RecordProfile::Thing, table);
    let mut populator = MySQLPopulator::new(MySQLSink::connect_url(&url).await?, &plan);
    populator.run(1).await?;
    populator.close().await?;

    let mut populator = MySQLPopulator::new(MySQLSink::connect_url(&url).await?, &plan);
    populator.reset_table().await?;
    let metrics = populator.run(plan.batch_count).await?;

    assert_eq!(metrics.rows_succeeded, BATCH_SIZE as u64 * BATCH_COUNT);
    assert_eq!(metrics.rows_failed, 0);
    assert_eq!(populator.row_count().await?, metrics.rows_succeeded);

    populator.close().await?;
    drop_table(&url, table).await?;
    Ok(())
}

/// A duplicate key on plain INSERT rolls back the batch and ends the run.
#[tokio::test]
async fn test_mysql_duplicate_insert_rolls_back() -> Result<(), Box<dyn std::error::Error>> {
    let Some(url) = mysql_test_url() else {
        return Ok(());
    };
    let table = "bulkload_test_things_dup";
    recreate_table(&url, RecordProfile::Thing, table).await?;

    let plan = plan(RecordProfile::Thing, table);
    let mut populator = MySQLPopulator::new(MySQLSink::connect_url(&url).await?, &plan);
    populator.run(2).await?;
    populator.close().await?;

    // Same offsets again without truncating: the first batch collides.
    let mut populator = MySQLPopulator::new(MySQLSink::connect_url(&url).await?, &plan);
    let aborted = populator
        .run(plan.batch_count)
        .await
        .expect_err("duplicate thing ids must fail");

    assert_eq!(aborted.metrics.rows_succeeded, 0);
    assert_eq!(aborted.metrics.rows_failed, BATCH_SIZE as u64);
    assert!(matches!(aborted.error, MySQLPopulatorError::Batch { index: 0, .. }));
    assert_eq!(populator.row_count().await?, 2 * BATCH_SIZE as u64);

    populator.close().await?;
    drop_table(&url, table).await?;
    Ok(())
}

/// REPLACE over existing keys leaves the row count unchanged.
#[tokio::test]
async fn test_mysql_replace_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let Some(url) = mysql_test_url() else {
        return Ok(());
    };
    let table = "bulkload_test_users";
    recreate_table(&url, RecordProfile::User, table).await?;

    let plan = plan(RecordProfile::User, table);
    for _ in 0..2 {
        let mut populator = MySQLPopulator::new(MySQLSink::connect_url(&url).await?, &plan);
        let metrics = populator.run(plan.batch_count).await?;
        assert_eq!(metrics.rows_succeeded, plan.total_rows());
        assert_eq!(populator.row_count().await?, plan.total_rows());
        populator.close().await?;
    }

    drop_table(&url, table).await?;
    Ok(())
}
