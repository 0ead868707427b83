//! Report command for printing the qualification ranking.
//!
//! Renders `f1q report` as a fixed-width table (with the Q2 elimination cut
//! marked) or as JSON, ascending or descending, optionally for one driver.

use std::fmt::{Display, Write as _};
use std::io::Write;

use anyhow::Result;
use f1q_core::{RankedEntry, UnreliableEntry};
use serde::Serialize;

use super::util::load_report;
use super::xml;
use crate::{Config, ReportArgs};

/// Drivers from this position on do not progress to Q2.
pub const Q2_CUTOFF: usize = 16;

/// Message printed when `--driver` matches nobody.
pub const DRIVER_NOT_FOUND: &str = "Cannot find driver. Please check driver name";

const SEPARATOR_WIDTH: usize = 60;

/// Row order of the rendered ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Fastest first.
    Ascending,
    /// Slowest first.
    Descending,
}

impl Order {
    pub const fn from_desc(desc: bool) -> Self {
        if desc { Self::Descending } else { Self::Ascending }
    }
}

/// Formats one table row as `POS.DRIVER|CAR|Q1`.
pub fn format_row(
    position: impl Display,
    driver: impl Display,
    car: impl Display,
    time: impl Display,
) -> String {
    let row = format!("{position:>3}.{driver:<20}|{car:<26}|{time:<6}");
    row.trim_end().to_string()
}

pub(super) fn header() -> String {
    format_row("POS", "DRIVER", "CAR", "Q1")
}

pub(super) fn ranked_row(entry: &RankedEntry) -> String {
    format_row(entry.position, &entry.driver, &entry.car, &entry.time)
}

/// Formats an unreliable result in the table layout.
pub fn unreliable_row(entry: &UnreliableEntry) -> String {
    format_row(&entry.status, &entry.driver, &entry.car, &entry.time)
}

/// Formats the full ranking with the Q2 cut line.
pub fn format_report(ranked: &[RankedEntry], order: Order) -> String {
    let mut output = String::new();
    let separator = "-".repeat(SEPARATOR_WIDTH);

    writeln!(output, "{}", header()).unwrap();
    for entry in ordered(ranked, order) {
        let at_cut = entry.position == Q2_CUTOFF;
        if at_cut && order == Order::Ascending {
            writeln!(output, "{separator}").unwrap();
        }
        writeln!(output, "{}", ranked_row(entry)).unwrap();
        if at_cut && order == Order::Descending {
            writeln!(output, "{separator}").unwrap();
        }
    }
    output
}

/// Formats the row of a single driver, looked up by full name.
pub fn format_driver(ranked: &[RankedEntry], name: &str) -> String {
    let mut output = String::new();
    writeln!(output, "{}", header()).unwrap();
    match ranked.iter().find(|entry| entry.driver == name) {
        Some(entry) => writeln!(output, "{}", ranked_row(entry)).unwrap(),
        None => writeln!(output, "{DRIVER_NOT_FOUND}").unwrap(),
    }
    output
}

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub results: Vec<&'a RankedEntry>,
    pub unreliable: &'a [UnreliableEntry],
}

/// Formats ranked results (in `order`) and unreliable results as JSON.
pub fn format_report_json(
    ranked: &[RankedEntry],
    unreliable: &[UnreliableEntry],
    order: Order,
    driver: Option<&str>,
) -> Result<String> {
    let results = ordered(ranked, order)
        .filter(|entry| driver.is_none_or(|name| entry.driver == name))
        .collect();
    let report = JsonReport {
        results,
        unreliable,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Formats ranked results (in `order`) as a `MonacoQ1Report` XML document.
pub fn format_report_xml(
    ranked: &[RankedEntry],
    order: Order,
    driver: Option<&str>,
) -> Result<String> {
    xml::format_ranking(
        ordered(ranked, order).filter(|entry| driver.is_none_or(|name| entry.driver == name)),
    )
}

fn ordered(ranked: &[RankedEntry], order: Order) -> Box<dyn Iterator<Item = &RankedEntry> + '_> {
    match order {
        Order::Ascending => Box::new(ranked.iter()),
        Order::Descending => Box::new(ranked.iter().rev()),
    }
}

/// Runs the report command.
pub fn run<W: Write>(writer: &mut W, args: &ReportArgs, config: &Config) -> Result<()> {
    let report = load_report(args.files.as_deref(), config)?;
    let order = Order::from_desc(args.desc);
    let driver = args.driver_name();

    if args.json {
        let output =
            format_report_json(&report.ranked, &report.unreliable, order, driver.as_deref())?;
        writeln!(writer, "{output}")?;
    } else if args.xml {
        let output = format_report_xml(&report.ranked, order, driver.as_deref())?;
        writeln!(writer, "{output}")?;
    } else if let Some(name) = driver {
        write!(writer, "{}", format_driver(&report.ranked, &name))?;
    } else {
        write!(writer, "{}", format_report(&report.ranked, order))?;
    }

    Ok(())
}
