//! Qualification report CLI library.
//!
//! This crate provides the command-line interface over `f1q-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, DriversArgs, ReportArgs, StoreArgs};
pub use config::Config;
