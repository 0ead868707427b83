//! Report-building engine for qualification timing logs.
//!
//! This crate turns the three timing artifacts of a qualification session
//! (`abbreviations.txt`, `start.log`, `end.log`) into:
//! - Ranking: drivers ordered by lap time with 1-based positions
//! - Roster: every driver listed in the abbreviations file
//! - Unreliable results: laps whose stop time precedes their start time
//!
//! Building a report is a pure, synchronous pass over the artifacts. Callers
//! that want to avoid rebuilding on every access can opt into [`ReportCache`].

mod cache;
mod error;
pub mod laps;
mod model;
pub mod parse;
pub mod paths;
pub mod ranking;
mod report;

pub use cache::ReportCache;
pub use error::{ParseReason, ReportError};
pub use model::{
    EventKind, LapResult, Participant, RankedEntry, TimingEvent, UnmatchedEvent,
    UnreliableEntry,
};
pub use paths::{Artifact, ArtifactPaths, resolve};
pub use ranking::{Ranking, format_lap_time, rank};
pub use report::{DriverResult, Report, build_report, build_report_with};
