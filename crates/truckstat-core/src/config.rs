use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TruckError;

/// Files changed after this Unix timestamp (mid-November 2023) count as
/// recent activity for an author.
pub const DEFAULT_RECENT_THRESHOLD: i64 = 1_700_000_000;

/// Top-level configuration loaded from `.truckstat.toml`.
///
/// Supports layered resolution: CLI flags > local config > defaults.
///
/// # Examples
///
/// ```
/// use truckstat_core::TruckConfig;
///
/// let config = TruckConfig::default();
/// assert_eq!(config.report.top_files, 5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TruckConfig {
    /// Analyzer settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Report rendering settings.
    #[serde(default)]
    pub report: ReportConfig,
}

impl TruckConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TruckError::Io`] if the file cannot be read,
    /// [`TruckError::Toml`] if the content is not valid TOML, or
    /// [`TruckError::Config`] if a limit is out of range.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use truckstat_core::TruckConfig;
    /// use std::path::Path;
    ///
    /// let config = TruckConfig::from_file(Path::new(".truckstat.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, TruckError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`TruckError::Toml`] if parsing fails, or
    /// [`TruckError::Config`] if a list limit is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use truckstat_core::TruckConfig;
    ///
    /// let toml = r#"
    /// [report]
    /// top_directories = 12
    /// "#;
    /// let config = TruckConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.report.top_directories, 12);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, TruckError> {
        let config: Self = toml::from_str(content)?;
        config.report.validate()?;
        Ok(config)
    }
}

/// Analyzer configuration.
///
/// # Examples
///
/// ```
/// use truckstat_core::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.recent_threshold, 1_700_000_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Unix timestamp after which a change counts as recent.
    #[serde(default = "default_recent_threshold")]
    pub recent_threshold: i64,
}

fn default_recent_threshold() -> i64 {
    DEFAULT_RECENT_THRESHOLD
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            recent_threshold: default_recent_threshold(),
        }
    }
}

/// Report rendering configuration.
///
/// Every limit caps how many entries of an already-ranked list are shown;
/// the analyzers always keep the full lists.
///
/// # Examples
///
/// ```
/// use truckstat_core::ReportConfig;
///
/// let config = ReportConfig::default();
/// assert_eq!(config.top_directories, 8);
/// assert_eq!(config.shared_files_per_pair, 3);
/// assert!(!config.include_structure);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Entries in each project-wide highlight list (default: 5).
    #[serde(default = "default_top_files")]
    pub top_files: usize,
    /// Directories in the structure summary (default: 8).
    #[serde(default = "default_top_directories")]
    pub top_directories: usize,
    /// File types in the technology section (default: 10).
    #[serde(default = "default_top_file_types")]
    pub top_file_types: usize,
    /// Collaboration pairs listed (default: 5).
    #[serde(default = "default_top_pairs")]
    pub top_pairs: usize,
    /// Shared files highlighted per collaboration pair (default: 3).
    #[serde(default = "default_shared_files_per_pair")]
    pub shared_files_per_pair: usize,
    /// Entries in each per-author list (default: 5).
    #[serde(default = "default_author_top_entries")]
    pub author_top_entries: usize,
    /// Work areas listed per author (default: 8).
    #[serde(default = "default_top_directories")]
    pub author_top_directories: usize,
    /// Append the project-structure tree (default: false).
    #[serde(default)]
    pub include_structure: bool,
}

fn default_top_files() -> usize {
    5
}

fn default_top_directories() -> usize {
    8
}

fn default_top_file_types() -> usize {
    10
}

fn default_top_pairs() -> usize {
    5
}

fn default_shared_files_per_pair() -> usize {
    3
}

fn default_author_top_entries() -> usize {
    5
}

impl ReportConfig {
    fn validate(&self) -> Result<(), TruckError> {
        let limits = [
            ("top_files", self.top_files),
            ("top_directories", self.top_directories),
            ("top_file_types", self.top_file_types),
            ("top_pairs", self.top_pairs),
            ("shared_files_per_pair", self.shared_files_per_pair),
            ("author_top_entries", self.author_top_entries),
            ("author_top_directories", self.author_top_directories),
        ];
        match limits.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(TruckError::Config(format!(
                "report.{name} must be at least 1"
            ))),
            None => Ok(()),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_files: default_top_files(),
            top_directories: default_top_directories(),
            top_file_types: default_top_file_types(),
            top_pairs: default_top_pairs(),
            shared_files_per_pair: default_shared_files_per_pair(),
            author_top_entries: default_author_top_entries(),
            author_top_directories: default_top_directories(),
            include_structure: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = TruckConfig::default();
        assert_eq!(config.analysis.recent_threshold, DEFAULT_RECENT_THRESHOLD);
        assert_eq!(config.report.top_files, 5);
        assert_eq!(config.report.top_directories, 8);
        assert_eq!(config.report.top_file_types, 10);
        assert_eq!(config.report.top_pairs, 5);
        assert_eq!(config.report.shared_files_per_pair, 3);
        assert_eq!(config.report.author_top_entries, 5);
        assert_eq!(config.report.author_top_directories, 8);
        assert!(!config.report.include_structure);
    }

    #[test]
    fn parse_full_toml() {
        let toml = r#"
[analysis]
recent_threshold = 1600000000

[report]
top_files = 10
top_pairs = 2
include_structure = true
"#;
        let config = TruckConfig::from_toml(toml).unwrap();
        assert_eq!(config.analysis.recent_threshold, 1_600_000_000);
        assert_eq!(config.report.top_files, 10);
        assert_eq!(config.report.top_pairs, 2);
        assert!(config.report.include_structure);
        assert_eq!(config.report.top_directories, 8);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = TruckConfig::from_toml("").unwrap();
        assert_eq!(config.report.top_files, 5);
        assert_eq!(config.analysis.recent_threshold, DEFAULT_RECENT_THRESHOLD);
    }

    #[test]
    fn invalid_toml_returns_error() {
        let result = TruckConfig::from_toml("{{invalid}}");
        assert!(matches!(result, Err(TruckError::Toml(_))));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let result = TruckConfig::from_toml("[report]\ntop_pairs = 0\n");
        let err = result.unwrap_err();
        assert!(matches!(err, TruckError::Config(_)));
        assert!(err.to_string().contains("report.top_pairs"));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".truckstat.toml");
        std::fs::write(&path, "[report]\ntop_file_types = 3\n").unwrap();

        let config = TruckConfig::from_file(&path).unwrap();
        assert_eq!(config.report.top_file_types, 3);
    }
}
