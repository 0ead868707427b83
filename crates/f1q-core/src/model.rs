//! Records flowing through a report build.
//!
//! Every record is a plain named struct so its field order stays stable across
//! any serializer or storage schema.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::paths::Artifact;

/// A driver listed in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    /// Short driver code, e.g. `SVF`.
    pub code: String,
    /// Full driver name.
    pub name: String,
    /// Team / car label.
    pub car: String,
}

/// Which timing log an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Stop,
}

impl EventKind {
    /// The artifact events of this kind are read from.
    pub const fn artifact(self) -> Artifact {
        match self {
            Self::Start => Artifact::StartLog,
            Self::Stop => Artifact::EndLog,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Stop => "stop",
        };
        write!(f, "{s}")
    }
}

/// A single timing sample for one driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingEvent {
    pub code: String,
    pub timestamp: NaiveDateTime,
    pub kind: EventKind,
}

/// A driver's lap, joined from the start and stop logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapResult {
    pub code: String,
    pub driver: String,
    pub car: String,
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
    /// `stop - start` in seconds. Negative when the logs are inconsistent.
    pub elapsed: f64,
}

impl LapResult {
    /// Whether the lap has a negative duration.
    pub fn is_negative(&self) -> bool {
        self.elapsed < 0.0
    }
}

/// A ranked row of the qualification report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1-based position among ranked laps.
    pub position: usize,
    pub driver: String,
    pub car: String,
    /// Lap time as `minutes:seconds.millis`, e.g. `1:4.415`.
    pub time: String,
}

/// A lap excluded from the ranking because its duration is negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreliableEntry {
    /// Placeholder in place of a position.
    pub status: String,
    pub driver: String,
    pub car: String,
    /// Always `Unreliable`.
    pub time: String,
}

/// A timing sample whose counterpart is missing from the other log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedEvent {
    pub code: String,
    /// The log the lone sample was found in.
    pub kind: EventKind,
}
