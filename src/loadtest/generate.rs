//! Generate command handler.

use anyhow::Context;
use loadtest_generator::{RecordGenerator, RecordProfile};
use std::io::Write;

/// Print `count` records of `profile` to stdout, one JSON object per line.
pub fn run_generate(
    profile: RecordProfile,
    count: usize,
    seed: u64,
    start_offset: u64,
) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    write_records(&mut out, profile, count, seed, start_offset)
}

/// Write records as JSON lines, generating at most one profile batch at a
/// time.
fn write_records<W: Write>(
    out: &mut W,
    profile: RecordProfile,
    count: usize,
    seed: u64,
    start_offset: u64,
) -> anyhow::Result<()> {
    let mut generator = RecordGenerator::new(profile, seed).with_start_offset(start_offset);
    generator
        .check_range(start_offset, count)
        .context("Invalid record range")?;

    tracing::debug!(
        "Generating {} {} records from offset {} (seed={})",
        count,
        profile,
        start_offset,
        seed
    );

    let columns = profile.columns();
    let chunk = profile.default_batch_size();
    let mut remaining = count;
    while remaining > 0 {
        let size = remaining.min(chunk);
        for record in generator.next_batch(size) {
            writeln!(out, "{}", serde_json::to_string(&record.named(columns))?)?;
        }
        remaining -= size;
    }
    out.flush()?;

    Ok(())
}
