//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use f1q_core::Report;

use crate::Config;

/// Builds the report for `--files` or the configured data directory.
pub fn load_report(files: Option<&Path>, config: &Config) -> Result<Report> {
    let dir = config.data_dir_or(files);
    tracing::debug!(dir = %dir.display(), filter = config.filter_unreliable, "building report");
    f1q_core::build_report_with(dir, config.filter_unreliable)
        .with_context(|| format!("failed to build report from {}", dir.display()))
}
