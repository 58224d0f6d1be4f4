//! Command-line interface for mysql-bulkload
//!
//! # Usage Examples
//!
//! ## Populate
//! ```bash
//! # Device rows, table truncated first, 100 batches of 1000 rows
//! mysql-bulkload populate --profile thing \
//!   --mysql-host localhost --mysql-user root --mysql-database iotdb
//!
//! # User rows written with REPLACE, smaller run
//! MYSQL_PASSWORD=secret mysql-bulkload populate --profile user \
//!   --mysql-database example --batch-size 100 --batch-count 50
//!
//! # Validate settings and show a sample record without connecting
//! mysql-bulkload populate --profile user --mysql-database example --dry-run
//! ```
//!
//! ## Generate
//! ```bash
//! # Print the first 5 user records as JSON lines
//! mysql-bulkload generate --profile user --count 5
//! ```

use clap::{Parser, Subcommand};
use loadtest_generator::RecordProfile;
use loadtest_populate_mysql::MySQLPopulateArgs;

mod loadtest;

#[derive(Parser)]
#[command(name = "mysql-bulkload")]
#[command(about = "Generate synthetic rows and bulk-load them into a MySQL table")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write batches of synthetic records into a MySQL table
    Populate {
        #[command(flatten)]
        args: MySQLPopulateArgs,
    },

    /// Print synthetic records as JSON lines without touching a database
    Generate {
        /// Record profile to generate (thing, user)
        #[arg(long, default_value = "user")]
        profile: RecordProfile,

        /// Number of records to print
        #[arg(long, default_value = "10")]
        count: usize,

        /// Random seed for the filler fields
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Offset of the first record
        #[arg(long, default_value = "0")]
        start_offset: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Populate { args } => loadtest::populate::run_populate(args).await?,
        Commands::Generate {
            profile,
            count,
            seed,
            start_offset,
        } => loadtest::generate::run_generate(profile, count, seed, start_offset)?,
    }

    Ok(())
}
