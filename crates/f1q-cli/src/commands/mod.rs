//! CLI subcommand implementations.

pub mod drivers;
pub mod report;
pub mod store;
mod util;
pub mod xml;
