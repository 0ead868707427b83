//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `abbreviations.txt`, `start.log` and `end.log`.
    pub data_dir: PathBuf,
    /// Path to the database file used by `f1q store`.
    pub database_path: PathBuf,
    /// Keep laps with a negative duration out of the ranking.
    pub filter_unreliable: bool,
}

impl Default for Config {
    fn default() -> Self {
        let state_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir: PathBuf::from("data"),
            database_path: state_dir.join("f1q.db"),
            filter_unreliable: true,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // F1Q_DATA_DIR, F1Q_DATABASE_PATH, F1Q_FILTER_UNRELIABLE
        figment = figment.merge(Env::prefixed("F1Q_"));

        figment.extract()
    }

    /// The data directory to read, preferring an explicit `--files` value.
    pub fn data_dir_or<'a>(&'a self, files: Option<&'a Path>) -> &'a Path {
        files.unwrap_or(&self.data_dir)
    }
}

/// Returns the platform-specific config directory for f1q.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("f1q"))
}

/// Returns the platform-specific data directory for f1q.
///
/// On Linux: `~/.local/share/f1q`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("f1q"))
}
