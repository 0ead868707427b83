//! Drivers command for listing the roster and single-driver results.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Result, bail};
use f1q_core::{DriverResult, Participant, Report};

use super::report::{header, ranked_row, unreliable_row};
use super::util::load_report;
use super::xml;
use crate::{Config, DriversArgs};

/// Sorts drivers by code, reversed when `desc` is set.
pub fn sorted_drivers(roster: &[Participant], desc: bool) -> Vec<&Participant> {
    let mut drivers: Vec<_> = roster.iter().collect();
    drivers.sort_by(|a, b| a.code.cmp(&b.code));
    if desc {
        drivers.reverse();
    }
    drivers
}

/// Formats drivers as `CODE|Name|CAR` lines.
pub fn format_drivers(drivers: &[&Participant]) -> String {
    let mut output = String::new();
    for driver in drivers {
        writeln!(output, "{}|{}|{}", driver.code, driver.name, driver.car).unwrap();
    }
    output
}

/// Looks up the result of the driver with `code`.
fn driver_result<'a>(report: &'a Report, code: &str) -> Result<DriverResult<'a>> {
    if report.participant(code).is_none() {
        bail!("unknown driver code: {code}");
    }
    match report.result_for_code(code) {
        Some(result) => Ok(result),
        None => bail!("no lap recorded for driver {code}"),
    }
}

/// Formats the result of the driver with `code` as a table row.
pub fn format_driver_result(report: &Report, code: &str) -> Result<String> {
    let row = match driver_result(report, code)? {
        DriverResult::Ranked(entry) => ranked_row(entry),
        DriverResult::Unreliable(entry) => unreliable_row(entry),
    };

    let mut output = String::new();
    writeln!(output, "{}", header()).unwrap();
    writeln!(output, "{row}").unwrap();
    Ok(output)
}

/// Runs the drivers command.
pub fn run<W: Write>(writer: &mut W, args: &DriversArgs, config: &Config) -> Result<()> {
    let report = load_report(args.files.as_deref(), config)?;

    if let Some(code) = &args.code {
        if args.json {
            let result = driver_result(&report, code)?;
            writeln!(writer, "{}", serde_json::to_string_pretty(&result)?)?;
        } else if args.xml {
            let result = driver_result(&report, code)?;
            writeln!(writer, "{}", xml::format_result(result)?)?;
        } else {
            write!(writer, "{}", format_driver_result(&report, code)?)?;
        }
        return Ok(());
    }

    let drivers = sorted_drivers(&report.roster, args.desc);
    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&drivers)?)?;
    } else if args.xml {
        writeln!(writer, "{}", xml::format_pilots(&drivers)?)?;
    } else {
        write!(writer, "{}", format_drivers(&drivers))?;
    }
    Ok(())
}
