//! Populate command runner.

use anyhow::Context;
use loadtest_generator::RecordGenerator;
use loadtest_populate::PopulatePlan;
use loadtest_populate_mysql::{
    validate_plan, BatchSink, MySQLPopulateArgs, MySQLPopulator, RunMetrics,
};

/// Run the populate command: connect, optionally truncate, load, report.
///
/// The connection is closed on both the success and the failure path.
pub async fn run_populate(args: MySQLPopulateArgs) -> anyhow::Result<()> {
    let plan = args.common.plan();
    let config = args.connection_config();
    validate_plan(&plan).context("Invalid populate settings")?;

    if args.common.dry_run {
        tracing::info!(
            "[DRY-RUN] Would {} {} batches of {} rows into '{}' ({} rows, profile={}, seed={})",
            plan.profile.write_mode(),
            plan.batch_count,
            plan.batch_size,
            plan.table,
            plan.total_rows(),
            plan.profile,
            plan.seed
        );
        tracing::info!("[DRY-RUN] Connection: {}", config.display_address());
        tracing::info!("[DRY-RUN] Truncate first: {}", plan.truncate);
        let sample =
            RecordGenerator::new(plan.profile, plan.seed).generate_batch(plan.start_offset, 1);
        if let Some(record) = sample.first() {
            tracing::info!("[DRY-RUN] First record: {}", record);
        }
        return Ok(());
    }

    let mut populator = MySQLPopulator::connect(&config, &plan)
        .await
        .context("Failed to connect to MySQL")?;

    let metrics = load_and_close(&mut populator, &plan).await?;
    println!("{}", metrics.summary());
    Ok(())
}

/// Load the plan, then release the connection whatever the outcome.
async fn load_and_close<S: BatchSink>(
    populator: &mut MySQLPopulator<S>,
    plan: &PopulatePlan,
) -> anyhow::Result<RunMetrics> {
    let result = load(populator, plan).await;

    if let Err(e) = populator.close().await {
        tracing::warn!("Failed to close MySQL connection: {}", e);
    }

    result
}

async fn load<S: BatchSink>(
    populator: &mut MySQLPopulator<S>,
    plan: &PopulatePlan,
) -> anyhow::Result<RunMetrics> {
    if plan.truncate {
        populator
            .reset_table()
            .await
            .context("Refusing to load into a table in unknown state")?;
    }

    let metrics = match populator.run(plan.batch_count).await {
        Ok(metrics) => metrics,
        Err(aborted) => {
            if aborted.error.is_setup_error() {
                tracing::error!("Load refused before writing any row: {}", aborted.error);
            } else {
                tracing::error!("{}", aborted.metrics.summary());
            }
            return Err(aborted.into());
        }
    };

    if plan.truncate {
        let count = populator
            .row_count()
            .await
            .with_context(|| format!("Failed to count rows in '{}'", plan.table))?;
        if count != metrics.rows_succeeded {
            tracing::warn!(
                "Table '{}' holds {} rows after writing {}",
                plan.table,
                count,
                metrics.rows_succeeded
            );
        } else {
            tracing::info!("Table '{}' holds {} rows", plan.table, count);
        }
    }

    Ok(metrics)
}
