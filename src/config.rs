use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level files looked up in the source directory, in import order
pub const DEFAULT_EXPECTED_FILES: [&str; 9] = [
    "athletes.csv",
    "coaches.csv",
    "events.csv",
    "medallists.csv",
    "medals.csv",
    "nocs.csv",
    "schedules.csv",
    "teams.csv",
    "venues.csv",
];

/// Configuration for a loader run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Directory holding the CSV exports
    pub source_dir: PathBuf,
    /// SQLite file recreated on every run
    pub database_path: PathBuf,
    /// Top-level file names; absent ones are skipped
    pub expected_files: Vec<String>,
    /// Subdirectory whose files each become a prefixed table
    pub results_dir: String,
    /// Prefix for tables created from the results subdirectory
    pub results_prefix: String,
    /// Extension matched inside the results subdirectory
    pub extension: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data/olympics"),
            database_path: PathBuf::from("olympics.db"),
            expected_files: DEFAULT_EXPECTED_FILES.iter().map(|s| s.to_string()).collect(),
            results_dir: "results".to_string(),
            results_prefix: "results_".to_string(),
            extension: "csv".to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn new(source_dir: impl Into<PathBuf>, database_path: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            database_path: database_path.into(),
            ..Self::default()
        }
    }

    pub fn with_source_dir(mut self, source_dir: impl Into<PathBuf>) -> Self {
        self.source_dir = source_dir.into();
        self
    }

    pub fn with_database_path(mut self, database_path: impl Into<PathBuf>) -> Self {
        self.database_path = database_path.into();
        self
    }

    pub fn with_expected_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn results_path(&self) -> PathBuf {
        self.source_dir.join(&self.results_dir)
    }
}
