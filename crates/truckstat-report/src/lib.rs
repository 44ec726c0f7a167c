//! Rendering of contribution reports.
//!
//! Turns a [`ContributionReport`] into either a Markdown summary
//! ([`ReportRenderer`]) or pretty-printed JSON ([`render_json`]).
//! Rendering never fails for the text form; every list limit comes from
//! [`ReportConfig`].

pub mod format;
pub mod structure;
pub mod text;

pub use text::ReportRenderer;

use truckstat_core::{ReportConfig, TruckError};
use truckstat_pulse::ContributionReport;

/// Render the Markdown summary without the project-structure section.
///
/// # Examples
///
/// ```
/// use truckstat_core::{AnalysisConfig, ContributionDocument, ReportConfig};
/// use truckstat_pulse::analyze;
/// use truckstat_report::render_text;
///
/// let report = analyze(&ContributionDocument::default(), &AnalysisConfig::default());
/// let text = render_text(&report, &ReportConfig::default());
/// assert!(text.contains("- **Files**: 0"));
/// ```
pub fn render_text(report: &ContributionReport, config: &ReportConfig) -> String {
    ReportRenderer::new(report, config).render()
}

/// Serialize the report as pretty-printed JSON with camelCase keys.
///
/// # Errors
///
/// Returns [`TruckError::Serialization`] if serialization fails.
///
/// # Examples
///
/// ```
/// use truckstat_core::{AnalysisConfig, ContributionDocument};
/// use truckstat_pulse::analyze;
/// use truckstat_report::render_json;
///
/// let report = analyze(&ContributionDocument::default(), &AnalysisConfig::default());
/// let json = render_json(&report).unwrap();
/// assert!(json.contains("\"projectName\": \"Project\""));
/// ```
pub fn render_json(report: &ContributionReport) -> Result<String, TruckError> {
    serde_json::to_string_pretty(report).map_err(TruckError::from)
}
