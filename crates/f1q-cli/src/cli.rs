//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Qualification session reports.
///
/// Reads `abbreviations.txt`, `start.log` and `end.log` from a data directory
/// and ranks every driver by lap time.
#[derive(Debug, Parser)]
#[command(name = "f1q", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the qualification ranking.
    Report(ReportArgs),

    /// List drivers, or show one driver's result.
    Drivers(DriversArgs),

    /// Save drivers and lap times to the database.
    Store(StoreArgs),
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Directory with the timing files (defaults to `data_dir` from config).
    #[arg(short, long)]
    pub files: Option<PathBuf>,

    /// Fastest lap first (default).
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Slowest lap first.
    #[arg(long)]
    pub desc: bool,

    /// Show only the driver with this full name.
    #[arg(short, long, num_args = 1..)]
    pub driver: Vec<String>,

    /// Output JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Output XML instead of a table.
    #[arg(long, conflicts_with = "json")]
    pub xml: bool,
}

impl ReportArgs {
    /// The driver name given as one or more words.
    pub fn driver_name(&self) -> Option<String> {
        if self.driver.is_empty() {
            None
        } else {
            Some(self.driver.join(" "))
        }
    }
}

#[derive(Debug, Args)]
pub struct DriversArgs {
    /// Directory with the timing files (defaults to `data_dir` from config).
    #[arg(short, long)]
    pub files: Option<PathBuf>,

    /// Sort by code in descending order.
    #[arg(long)]
    pub desc: bool,

    /// Show the result of the driver with this code.
    #[arg(long)]
    pub code: Option<String>,

    /// Output JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Output XML instead of a table.
    #[arg(long, conflicts_with = "json")]
    pub xml: bool,
}

#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Directory with the timing files (defaults to `data_dir` from config).
    #[arg(short, long)]
    pub files: Option<PathBuf>,
}
