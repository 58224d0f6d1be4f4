//! Common CLI argument definitions shared by all populators.

use clap::Args;
use loadtest_generator::RecordProfile;

/// Common arguments shared by all populators.
///
/// Options left unset fall back to the selected profile's defaults, see
/// [`CommonPopulateArgs::plan`].
#[derive(Args, Clone, Debug)]
pub struct CommonPopulateArgs {
    /// Record profile to generate (thing, user)
    #[arg(long, env = "BULKLOAD_PROFILE", default_value = "user")]
    pub profile: RecordProfile,

    /// Target table (defaults to the profile's table)
    #[arg(long, env = "BULKLOAD_TABLE")]
    pub table: Option<String>,

    /// Number of rows per INSERT/REPLACE statement (defaults to the profile's batch size)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Number of batches to write (defaults to the profile's batch count)
    #[arg(long)]
    pub batch_count: Option<u64>,

    /// Random seed for the filler fields (same seed = same data)
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Offset of the first generated record; use to append after an earlier run
    #[arg(long, default_value = "0")]
    pub start_offset: u64,

    /// Truncate the target table before loading
    #[arg(long, conflicts_with = "no_truncate")]
    pub truncate: bool,

    /// Keep existing rows in the target table
    #[arg(long)]
    pub no_truncate: bool,

    /// Dry-run mode: validate configuration and show a sample record without touching the database
    #[arg(long)]
    pub dry_run: bool,
}

/// Fully resolved run parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopulatePlan {
    pub profile: RecordProfile,
    pub table: String,
    pub batch_size: usize,
    pub batch_count: u64,
    pub seed: u64,
    pub start_offset: u64,
    pub truncate: bool,
}

impl PopulatePlan {
    /// Default plan for a profile.
    pub fn for_profile(profile: RecordProfile) -> Self {
        Self {
            profile,
            table: profile.default_table().to_string(),
            batch_size: profile.default_batch_size(),
            batch_count: profile.default_batch_count(),
            seed: 42,
            start_offset: 0,
            truncate: profile.truncate_by_default(),
        }
    }

    /// Total rows the run writes when every batch succeeds.
    pub fn total_rows(&self) -> u64 {
        self.batch_count.saturating_mul(self.batch_size as u64)
    }
}

impl CommonPopulateArgs {
    /// Resolve the arguments against the profile defaults.
    pub fn plan(&self) -> PopulatePlan {
        let defaults = PopulatePlan::for_profile(self.profile);
        let truncate = if self.truncate {
            true
        } else if self.no_truncate {
            false
        } else {
            defaults.truncate
        };

        PopulatePlan {
            table: self.table.clone().unwrap_or(defaults.table),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            batch_count: self.batch_count.unwrap_or(defaults.batch_count),
            seed: self.seed,
            start_offset: self.start_offset,
            truncate,
            profile: self.profile,
        }
    }
}
