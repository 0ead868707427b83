//! Locating the timing artifacts inside a data directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ReportError;

/// One of the three fixed-name input files of a qualification session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    /// Driver roster, `CODE_Full Name_CAR` per line.
    Abbreviations,
    /// Lap start timestamps.
    StartLog,
    /// Lap stop timestamps.
    EndLog,
}

impl Artifact {
    /// All artifacts, in resolution order.
    pub const ALL: [Self; 3] = [Self::Abbreviations, Self::StartLog, Self::EndLog];

    /// The conventional file name of this artifact.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Abbreviations => "abbreviations.txt",
            Self::StartLog => "start.log",
            Self::EndLog => "end.log",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Locations of all three artifacts of one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    abbreviations: PathBuf,
    start: PathBuf,
    end: PathBuf,
}

impl ArtifactPaths {
    /// Path of the given artifact.
    pub fn get(&self, artifact: Artifact) -> &Path {
        match artifact {
            Artifact::Abbreviations => &self.abbreviations,
            Artifact::StartLog => &self.start,
            Artifact::EndLog => &self.end,
        }
    }

    /// Iterates over `(artifact, path)` pairs in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (Artifact, &Path)> {
        Artifact::ALL
            .into_iter()
            .map(move |artifact| (artifact, self.get(artifact)))
    }
}

/// Resolves the artifacts of `dir`.
///
/// Relative paths are taken relative to the working directory. Resolution is
/// all-or-nothing: the first missing artifact (in [`Artifact::ALL`] order)
/// fails the whole call.
pub fn resolve(dir: impl AsRef<Path>) -> Result<ArtifactPaths, ReportError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ReportError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let locate = |artifact: Artifact| {
        let path = dir.join(artifact.file_name());
        if path.is_file() {
            Ok(path)
        } else {
            Err(ReportError::ArtifactNotFound {
                artifact,
                dir: dir.to_path_buf(),
            })
        }
    };

    let paths = ArtifactPaths {
        abbreviations: locate(Artifact::Abbreviations)?,
        start: locate(Artifact::StartLog)?,
        end: locate(Artifact::EndLog)?,
    };
    tracing::debug!(dir = %dir.display(), "resolved timing artifacts");
    Ok(paths)
}
