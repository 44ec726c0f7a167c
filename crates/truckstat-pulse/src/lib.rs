//! Contribution analytics over an annotated source tree.
//!
//! Walks the tree exported by the collector to compute project-wide
//! statistics, per-author rollups, co-authorship pairs, and heuristic
//! architecture findings. Each analyzer is an independent pass over the
//! same immutable document.

pub mod architecture;
pub mod authors;
pub mod collaboration;
pub mod language;
pub mod stats;
pub mod walker;

use serde::Serialize;
use truckstat_core::{AnalysisConfig, ContributionDocument};

use crate::architecture::ArchitectureReport;
use crate::authors::AuthorSummary;
use crate::collaboration::CollaborationSummary;
use crate::stats::ProjectStats;

/// Name used when the document has no tree or an unnamed root.
pub const DEFAULT_PROJECT_NAME: &str = "Project";

/// Every analysis result for one document.
///
/// # Examples
///
/// ```
/// use truckstat_core::{AnalysisConfig, ContributionDocument};
/// use truckstat_pulse::analyze;
///
/// let report = analyze(&ContributionDocument::default(), &AnalysisConfig::default());
/// assert_eq!(report.project_name, "Project");
/// assert_eq!(report.stats.total_files, 0);
/// assert!(report.collaboration.is_empty());
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionReport {
    /// Root node name, or [`DEFAULT_PROJECT_NAME`].
    pub project_name: String,
    /// Project-wide statistics.
    pub stats: ProjectStats,
    /// Per-author rollups.
    pub authors: AuthorSummary,
    /// Co-authorship pairs.
    pub collaboration: CollaborationSummary,
    /// Architecture and tech-stack findings.
    pub architecture: ArchitectureReport,
}

/// Run every analyzer over `doc`.
pub fn analyze(doc: &ContributionDocument, config: &AnalysisConfig) -> ContributionReport {
    let stats = stats::aggregate_stats(doc);
    let authors = authors::analyze_authors(doc, config.recent_threshold);
    let collaboration = collaboration::analyze_collaboration(doc);
    let architecture = architecture::detect_architecture(&stats);

    let project_name = doc
        .project_name()
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_PROJECT_NAME)
        .to_string();
    tracing::debug!(project = %project_name, files = stats.total_files, "analysis complete");

    ContributionReport {
        project_name,
        stats,
        authors,
        collaboration,
        architecture,
    }
}
