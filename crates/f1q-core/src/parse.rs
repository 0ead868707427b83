//! Decoding the fixed-format artifact lines.
//!
//! Roster lines are `CODE_Full Name_CAR`. Timing lines carry the driver code in
//! their first three characters followed by a `YYYY-MM-DD_HH:MM:SS.ffffff`
//! timestamp. Blank lines are skipped in both.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{ParseReason, ReportError};
use crate::model::{EventKind, Participant, TimingEvent};
use crate::paths::Artifact;

/// Timestamp pattern of the timing logs.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S%.f";

/// Width of the driver code prefix on timing lines.
pub const CODE_WIDTH: usize = 3;

/// Most fractional-second digits a timestamp may carry.
pub const MAX_FRACTION_DIGITS: usize = 9;

const ROSTER_DELIMITER: char = '_';

/// Drivers keyed by code, in first-seen order.
///
/// A code listed twice keeps its first position but takes the later name and
/// car.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Looks up a driver by code.
    pub fn get(&self, code: &str) -> Option<&Participant> {
        self.index.get(code).map(|&idx| &self.participants[idx])
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn into_participants(self) -> Vec<Participant> {
        self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Returns the replaced entry when `participant.code` was already present.
    fn insert(&mut self, participant: Participant) -> Option<Participant> {
        if let Some(&idx) = self.index.get(&participant.code) {
            return Some(std::mem::replace(&mut self.participants[idx], participant));
        }
        self.index
            .insert(participant.code.clone(), self.participants.len());
        self.participants.push(participant);
        None
    }
}

/// Timestamps of one timing log keyed by driver code, in first-seen order.
///
/// A code logged twice keeps its first position but takes the later timestamp.
#[derive(Debug, Clone)]
pub struct TimingLog {
    kind: EventKind,
    events: Vec<TimingEvent>,
    index: HashMap<String, usize>,
}

impl TimingLog {
    fn new(kind: EventKind) -> Self {
        Self {
            kind,
            events: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Timestamp logged for `code`, if any.
    pub fn get(&self, code: &str) -> Option<NaiveDateTime> {
        self.index.get(code).map(|&idx| self.events[idx].timestamp)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn events(&self) -> &[TimingEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn insert(&mut self, code: &str, timestamp: NaiveDateTime) -> Option<NaiveDateTime> {
        if let Some(&idx) = self.index.get(code) {
            return Some(std::mem::replace(&mut self.events[idx].timestamp, timestamp));
        }
        self.index.insert(code.to_string(), self.events.len());
        self.events.push(TimingEvent {
            code: code.to_string(),
            timestamp,
            kind: self.kind,
        });
        None
    }
}

/// Reads and decodes the roster at `path`.
pub fn parse_roster(path: &Path) -> Result<Roster, ReportError> {
    let content = read_artifact(path, Artifact::Abbreviations)?;
    roster_from_str(&content)
}

/// Reads and decodes the timing log of `kind` at `path`.
pub fn parse_events(path: &Path, kind: EventKind) -> Result<TimingLog, ReportError> {
    let content = read_artifact(path, kind.artifact())?;
    events_from_str(&content, kind)
}

/// Decodes roster lines.
pub fn roster_from_str(content: &str) -> Result<Roster, ReportError> {
    let mut roster = Roster::default();
    for (line_number, line) in numbered_lines(content) {
        let participant = parse_roster_line(line)
            .map_err(|reason| malformed(Artifact::Abbreviations, line_number, line, reason))?;
        if let Some(previous) = roster.insert(participant) {
            tracing::warn!(
                code = %previous.code,
                line_number,
                "duplicate driver code in roster, keeping the later entry"
            );
        }
    }
    tracing::debug!(drivers = roster.len(), "parsed roster");
    Ok(roster)
}

/// Decodes timing log lines.
pub fn events_from_str(content: &str, kind: EventKind) -> Result<TimingLog, ReportError> {
    let mut log = TimingLog::new(kind);
    for (line_number, line) in numbered_lines(content) {
        let (code, timestamp) = parse_event_line(line)
            .map_err(|reason| malformed(kind.artifact(), line_number, line, reason))?;
        if log.insert(code, timestamp).is_some() {
            tracing::warn!(
                code,
                line_number,
                log = %kind.artifact(),
                "duplicate driver code in timing log, keeping the later timestamp"
            );
        }
    }
    tracing::debug!(events = log.len(), log = %kind.artifact(), "parsed timing log");
    Ok(log)
}

fn read_artifact(path: &Path, artifact: Artifact) -> Result<String, ReportError> {
    fs::read_to_string(path).map_err(|source| ReportError::Read {
        artifact,
        path: path.to_path_buf(),
        source,
    })
}

/// Non-blank lines with their 1-based line numbers, trailing whitespace and
/// any byte order mark removed.
fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end()))
        .filter(|(_, line)| !line.trim_start().is_empty())
}

fn parse_roster_line(line: &str) -> Result<Participant, ParseReason> {
    let fields: Vec<&str> = line.split(ROSTER_DELIMITER).collect();
    let [code, name, car] = fields[..] else {
        return Err(ParseReason::FieldCount {
            found: fields.len(),
        });
    };
    if code.is_empty() {
        return Err(ParseReason::EmptyField { field: "code" });
    }
    Ok(Participant {
        code: code.to_string(),
        name: name.to_string(),
        car: car.to_string(),
    })
}

fn parse_event_line(line: &str) -> Result<(&str, NaiveDateTime), ParseReason> {
    let split = line
        .char_indices()
        .nth(CODE_WIDTH)
        .map_or(line.len(), |(idx, _)| idx);
    let (code, rest) = line.split_at(split);
    if code.chars().count() < CODE_WIDTH {
        return Err(ParseReason::LineTooShort { width: CODE_WIDTH });
    }
    let value = rest.trim();
    let timestamp = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        ParseReason::Timestamp {
            value: value.to_string(),
            source,
        }
    })?;
    // `%.f` alone also accepts a missing or overlong fraction
    if !has_valid_fraction(value) {
        return Err(ParseReason::FractionalSeconds {
            value: value.to_string(),
        });
    }
    Ok((code, timestamp))
}

fn has_valid_fraction(value: &str) -> bool {
    value.rsplit_once('.').is_some_and(|(_, digits)| {
        (1..=MAX_FRACTION_DIGITS).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
    })
}

fn malformed(artifact: Artifact, line_number: usize, line: &str, reason: ParseReason) -> ReportError {
    ReportError::Parse {
        artifact,
        line_number,
        line: line.to_string(),
        reason,
    }
}
