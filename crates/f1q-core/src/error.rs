//! Error types for report building.

use std::path::PathBuf;

use thiserror::Error;

use crate::paths::Artifact;

/// Errors that abort a report build.
///
/// Report building is all-or-nothing: any of these means no report was
/// produced.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The data directory does not exist.
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// A required artifact is missing from the data directory.
    #[error("{artifact} not found in {}", dir.display())]
    ArtifactNotFound { artifact: Artifact, dir: PathBuf },

    /// An artifact exists but could not be read.
    #[error("failed to read {artifact} at {}", path.display())]
    Read {
        artifact: Artifact,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of an artifact does not match its fixed format.
    #[error("{artifact} line {line_number} is malformed: {line:?}")]
    Parse {
        artifact: Artifact,
        /// 1-based line number within the artifact.
        line_number: usize,
        line: String,
        #[source]
        reason: ParseReason,
    },

    /// A timing log names a driver code that the roster does not define.
    #[error("{artifact} references driver code {code} missing from {}", Artifact::Abbreviations)]
    MissingReference { code: String, artifact: Artifact },
}

impl ReportError {
    /// Whether this error means the directory or one of its artifacts is absent.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound { .. } | Self::ArtifactNotFound { .. }
        )
    }
}

/// Why a single artifact line was rejected.
#[derive(Debug, Error)]
pub enum ParseReason {
    /// A roster line did not split into code, name and car.
    #[error("expected 3 fields separated by '_', found {found}")]
    FieldCount { found: usize },

    /// A required field was empty.
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    /// A timing line is too short to hold a driver code.
    #[error("line is shorter than a {width}-character driver code")]
    LineTooShort { width: usize },

    /// The timestamp lacks a `.` followed by 1 to 9 fractional digits.
    #[error("timestamp {value:?} needs 1 to 9 fractional second digits")]
    FractionalSeconds { value: String },

    /// The timestamp did not match `YYYY-MM-DD_HH:MM:SS.ffffff`.
    #[error("invalid timestamp {value:?}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
