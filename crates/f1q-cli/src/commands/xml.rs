//! XML rendering of rankings and rosters.
//!
//! Element names follow the layout consumers of the Monaco reports already
//! read: `MonacoQ1Report/position/{position_number,pilot,car,time}` and
//! `MonacoPilotsQ1Report/pilot/{code,name,car}`.

use anyhow::Result;
use f1q_core::{DriverResult, Participant, RankedEntry};
use serde::Serialize;

const REPORT_ROOT: &str = "MonacoQ1Report";
const PILOTS_ROOT: &str = "MonacoPilotsQ1Report";

#[derive(Serialize)]
struct XmlReport<'a> {
    position: Vec<XmlPosition<'a>>,
}

#[derive(Serialize)]
struct XmlPosition<'a> {
    position_number: String,
    pilot: &'a str,
    car: &'a str,
    time: &'a str,
}

impl<'a> From<&'a RankedEntry> for XmlPosition<'a> {
    fn from(entry: &'a RankedEntry) -> Self {
        Self {
            position_number: entry.position.to_string(),
            pilot: &entry.driver,
            car: &entry.car,
            time: &entry.time,
        }
    }
}

impl<'a> From<DriverResult<'a>> for XmlPosition<'a> {
    fn from(result: DriverResult<'a>) -> Self {
        match result {
            DriverResult::Ranked(entry) => entry.into(),
            DriverResult::Unreliable(entry) => Self {
                position_number: entry.status.clone(),
                pilot: &entry.driver,
                car: &entry.car,
                time: &entry.time,
            },
        }
    }
}

#[derive(Serialize)]
struct XmlPilots<'a> {
    pilot: Vec<&'a Participant>,
}

/// Renders ranked entries, in the given order, as a `MonacoQ1Report`.
pub fn format_ranking<'a>(entries: impl IntoIterator<Item = &'a RankedEntry>) -> Result<String> {
    let report = XmlReport {
        position: entries.into_iter().map(XmlPosition::from).collect(),
    };
    Ok(quick_xml::se::to_string_with_root(REPORT_ROOT, &report)?)
}

/// Renders one driver's result as a single-position `MonacoQ1Report`.
pub fn format_result(result: DriverResult<'_>) -> Result<String> {
    let report = XmlReport {
        position: vec![result.into()],
    };
    Ok(quick_xml::se::to_string_with_root(REPORT_ROOT, &report)?)
}

/// Renders drivers as a `MonacoPilotsQ1Report`.
pub fn format_pilots(drivers: &[&Participant]) -> Result<String> {
    let pilots = XmlPilots {
        pilot: drivers.to_vec(),
    };
    Ok(quick_xml::se::to_string_with_root(PILOTS_ROOT, &pilots)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use f1q_core::UnreliableEntry;

    fn entry(position: usize, driver: &str, car: &str, time: &str) -> RankedEntry {
        RankedEntry {
            position,
            driver: driver.to_string(),
            car: car.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn ranking_uses_position_elements() {
        let ranked = [
            entry(1, "Romain Grosjean", "HAAS FERRARI", "1:4.360"),
            entry(2, "Kimi Räikkönen", "FERRARI", "1:5.444"),
        ];

        let output = format_ranking(&ranked).unwrap();

        assert_eq!(
            output,
            "<MonacoQ1Report>\
             <position><position_number>1</position_number><pilot>Romain Grosjean</pilot><car>HAAS FERRARI</car><time>1:4.360</time></position>\
             <position><position_number>2</position_number><pilot>Kimi Räikkönen</pilot><car>FERRARI</car><time>1:5.444</time></position>\
             </MonacoQ1Report>"
        );
    }

    #[test]
    fn unreliable_result_shows_status_as_position() {
        let unreliable = UnreliableEntry {
            status: "Unknown".to_string(),
            driver: "Daniel Ricciardo".to_string(),
            car: "RED BULL RACING TAG HEUER".to_string(),
            time: "Unreliable".to_string(),
        };

        let output = format_result(DriverResult::Unreliable(&unreliable)).unwrap();

        assert_eq!(
            output,
            "<MonacoQ1Report><position><position_number>Unknown</position_number>\
             <pilot>Daniel Ricciardo</pilot><car>RED BULL RACING TAG HEUER</car>\
             <time>Unreliable</time></position></MonacoQ1Report>"
        );
    }

    #[test]
    fn pilots_use_code_name_and_car() {
        let driver = Participant {
            code: "SVF".to_string(),
            name: "Sebastian Vettel".to_string(),
            car: "FERRARI".to_string(),
        };

        let output = format_pilots(&[&driver]).unwrap();

        assert_eq!(
            output,
            "<MonacoPilotsQ1Report><pilot><code>SVF</code><name>Sebastian Vettel</name>\
             <car>FERRARI</car></pilot></MonacoPilotsQ1Report>"
        );
    }

    #[test]
    fn ranking_escapes_markup_in_names() {
        let ranked = [entry(1, "A & B", "<CAR>", "1:0.000")];
        let output = format_ranking(&ranked).unwrap();
        assert!(output.contains("<pilot>A &amp; B</pilot>"));
        assert!(output.contains("<car>&lt;CAR"));
    }
}
