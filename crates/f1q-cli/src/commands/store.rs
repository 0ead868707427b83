//! Store command for persisting drivers and lap times.

use std::io::Write;

use anyhow::{Context, Result};
use f1q_db::Database;

use super::util::load_report;
use crate::{Config, StoreArgs};

/// Counts of newly inserted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub drivers: usize,
    pub laps: usize,
}

/// Opens the configured database, creating its parent directory.
fn open_database(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))
}

/// Runs the store command.
pub fn run<W: Write>(writer: &mut W, args: &StoreArgs, config: &Config) -> Result<StoreSummary> {
    let report = load_report(args.files.as_deref(), config)?;
    let mut db = open_database(config)?;

    let drivers = db
        .store_drivers(&report.roster)
        .context("failed to store drivers")?;
    let laps = db.store_laps(&report.laps).context("failed to store laps")?;
    tracing::info!(drivers, laps, "stored qualification data");

    writeln!(
        writer,
        "Stored {drivers} drivers and {laps} laps in {}",
        config.database_path.display()
    )?;
    Ok(StoreSummary { drivers, laps })
}
