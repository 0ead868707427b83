//! Opt-in, caller-owned caching of built reports.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::error::ReportError;
use crate::paths::{self, ArtifactPaths};
use crate::report::{Report, build_from_paths};

/// Caches the report of one data directory until its artifacts change.
///
/// An artifact counts as changed when its modification time or length
/// differs from the previous build. Nothing is shared between instances.
#[derive(Debug)]
pub struct ReportCache {
    dir: PathBuf,
    filtering_enabled: bool,
    cached: Option<Cached>,
}

#[derive(Debug)]
struct Cached {
    report: Report,
    fingerprint: Fingerprint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint(Vec<(Option<SystemTime>, u64)>);

impl Fingerprint {
    fn of(paths: &ArtifactPaths) -> Result<Self, ReportError> {
        let stamps = paths
            .iter()
            .map(|(artifact, path)| {
                let meta = fs::metadata(path).map_err(|source| ReportError::Read {
                    artifact,
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok((meta.modified().ok(), meta.len()))
            })
            .collect::<Result<Vec<_>, ReportError>>()?;
        Ok(Self(stamps))
    }
}

impl ReportCache {
    /// Creates an empty cache for `dir`.
    pub fn new(dir: impl Into<PathBuf>, filtering_enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            filtering_enabled,
            cached: None,
        }
    }

    /// Returns the cached report, rebuilding it if the artifacts changed.
    ///
    /// Any failure, including a vanished directory, leaves the cache empty.
    pub fn get(&mut self) -> Result<&Report, ReportError> {
        let previous = self.cached.take();
        let paths = paths::resolve(&self.dir)?;
        let fingerprint = Fingerprint::of(&paths)?;

        let cached = match previous {
            Some(cached) if cached.fingerprint == fingerprint => self.cached.insert(cached),
            _ => {
                tracing::debug!(dir = %self.dir.display(), "building report");
                let report = build_from_paths(&paths, self.filtering_enabled)?;
                self.cached.insert(Cached {
                    report,
                    fingerprint,
                })
            }
        };
        Ok(&cached.report)
    }

    /// Drops the cached report so the next [`get`](Self::get) rebuilds.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Whether a report is currently cached.
    pub const fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}
