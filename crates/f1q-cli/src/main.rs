use std::io::Write;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use f1q_cli::commands::{drivers, report, store};
use f1q_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so report output stays clean on stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();
    match &cli.command {
        Some(Commands::Report(args)) => report::run(&mut stdout, args, &config)?,
        Some(Commands::Drivers(args)) => drivers::run(&mut stdout, args, &config)?,
        Some(Commands::Store(args)) => {
            store::run(&mut stdout, args, &config)?;
        }
        None => {
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }
    stdout.flush()?;
    Ok(())
}
