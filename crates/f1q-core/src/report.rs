//! The single entry point: building a report from a data directory.

use std::path::Path;

use serde::Serialize;

use crate::error::ReportError;
use crate::laps;
use crate::model::{
    EventKind, LapResult, Participant, RankedEntry, UnmatchedEvent, UnreliableEntry,
};
use crate::parse;
use crate::paths::{self, Artifact, ArtifactPaths};
use crate::ranking::{self, Ranking};

/// Everything produced by one report build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Reliable laps in ranking order.
    pub ranked: Vec<RankedEntry>,
    /// All drivers from the roster, in first-seen order.
    pub roster: Vec<Participant>,
    /// Negative laps, when filtering is enabled.
    pub unreliable: Vec<UnreliableEntry>,
    /// Every joined lap in start-log order.
    pub laps: Vec<LapResult>,
    /// Samples that appear in only one timing log.
    pub unmatched: Vec<UnmatchedEvent>,
}

/// A single driver's outcome in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DriverResult<'a> {
    Ranked(&'a RankedEntry),
    Unreliable(&'a UnreliableEntry),
}

impl Report {
    /// Looks up a roster entry by driver code.
    pub fn participant(&self, code: &str) -> Option<&Participant> {
        self.roster.iter().find(|p| p.code == code)
    }

    /// Finds the ranked row of the driver with this full name.
    pub fn find_ranked_by_driver(&self, name: &str) -> Option<&RankedEntry> {
        self.ranked.iter().find(|entry| entry.driver == name)
    }

    /// The result of the driver with this code, ranked or unreliable.
    ///
    /// Returns `None` for unknown codes and for drivers without a complete lap.
    pub fn result_for_code(&self, code: &str) -> Option<DriverResult<'_>> {
        let name = &self.participant(code)?.name;
        self.find_ranked_by_driver(name)
            .map(DriverResult::Ranked)
            .or_else(|| {
                self.unreliable
                    .iter()
                    .find(|entry| entry.driver == *name)
                    .map(DriverResult::Unreliable)
            })
    }
}

/// Builds a report from `dir` with unreliable laps filtered out of the ranking.
pub fn build_report(dir: impl AsRef<Path>) -> Result<Report, ReportError> {
    build_report_with(dir, true)
}

/// Builds a report from `dir`, choosing whether negative laps are filtered.
pub fn build_report_with(
    dir: impl AsRef<Path>,
    filtering_enabled: bool,
) -> Result<Report, ReportError> {
    let paths = paths::resolve(dir)?;
    build_from_paths(&paths, filtering_enabled)
}

pub(crate) fn build_from_paths(
    paths: &ArtifactPaths,
    filtering_enabled: bool,
) -> Result<Report, ReportError> {
    let roster = parse::parse_roster(paths.get(Artifact::Abbreviations))?;
    let start = parse::parse_events(paths.get(Artifact::StartLog), EventKind::Start)?;
    let stop = parse::parse_events(paths.get(Artifact::EndLog), EventKind::Stop)?;

    let laps = laps::compute(&start, &stop, &roster)?;
    let unmatched = laps::unmatched(&start, &stop);
    let Ranking { ranked, unreliable } = ranking::rank(&laps, filtering_enabled);

    Ok(Report {
        ranked,
        roster: roster.into_participants(),
        unreliable,
        laps,
        unmatched,
    })
}
