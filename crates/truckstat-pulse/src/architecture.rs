//! Heuristic architecture and tech-stack detection.
//!
//! Each rule is a list of matchers over the observed directory paths and
//! extensions. Rules are evaluated in declaration order and every rule
//! that matches contributes a finding. These are naming heuristics, not
//! structural analysis.

use serde::Serialize;
use truckstat_core::Tally;

use crate::stats::ProjectStats;

/// One test against the observed project layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Case-sensitive substring of a directory path with a trailing `/`
    /// appended, so `"apps/"` also matches a directory named `apps`.
    Fragment(&'static str),
    /// Case-insensitive substring of a directory path.
    Keyword(&'static str),
    /// An extension present in the file-type tally, leading dot included.
    Extension(&'static str),
}

impl Matcher {
    fn matches(&self, directories: &[&str], file_types: &Tally) -> bool {
        match self {
            Matcher::Fragment(fragment) => directories
                .iter()
                .any(|dir| format!("{dir}/").contains(fragment)),
            Matcher::Keyword(keyword) => directories
                .iter()
                .any(|dir| dir.to_lowercase().contains(keyword)),
            Matcher::Extension(ext) => file_types.contains(ext),
        }
    }
}

/// A labeled rule; it fires when any of its matchers matches.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short name of the finding.
    pub label: &'static str,
    /// One-line explanation shown next to the label.
    pub description: &'static str,
    /// Matchers, any of which triggers the rule.
    pub matchers: &'static [Matcher],
}

impl Rule {
    /// Returns `true` if any matcher matches.
    pub fn matches(&self, directories: &[&str], file_types: &Tally) -> bool {
        self.matchers
            .iter()
            .any(|matcher| matcher.matches(directories, file_types))
    }
}

/// Architecture patterns, in report order.
pub const PATTERN_RULES: &[Rule] = &[
    Rule {
        label: "Monorepo",
        description: "multiple packages in one repository",
        matchers: &[Matcher::Fragment("packages/")],
    },
    Rule {
        label: "Next.js App Router",
        description: "application built on the app directory",
        matchers: &[Matcher::Fragment("src/app")],
    },
    Rule {
        label: "Clean Architecture",
        description: "separate domain layer",
        matchers: &[Matcher::Fragment("domain")],
    },
    Rule {
        label: "Microservices",
        description: "multiple independent applications",
        matchers: &[Matcher::Fragment("apps/")],
    },
    Rule {
        label: "Component-Based",
        description: "UI organized as components",
        matchers: &[Matcher::Fragment("components")],
    },
];

/// Technologies, in report order.
pub const TECH_RULES: &[Rule] = &[
    Rule {
        label: "Firebase",
        description: "authentication / database",
        matchers: &[Matcher::Keyword("firebase")],
    },
    Rule {
        label: "Drizzle ORM",
        description: "database",
        matchers: &[Matcher::Keyword("drizzle")],
    },
    Rule {
        label: "Tailwind CSS",
        description: "styling",
        matchers: &[Matcher::Keyword("tailwind")],
    },
    Rule {
        label: "ESLint",
        description: "linting",
        matchers: &[Matcher::Keyword("eslint")],
    },
    Rule {
        label: "TypeScript",
        description: "static typing",
        matchers: &[Matcher::Keyword("typescript"), Matcher::Extension(".ts")],
    },
];

/// A rule that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Rule label.
    pub label: String,
    /// Rule description.
    pub description: String,
}

impl From<&Rule> for Finding {
    fn from(rule: &Rule) -> Self {
        Self {
            label: rule.label.to_string(),
            description: rule.description.to_string(),
        }
    }
}

/// Detected patterns and technologies.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::architecture::ArchitectureReport;
///
/// let report = ArchitectureReport::default();
/// assert!(report.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureReport {
    /// Matching [`PATTERN_RULES`], in declaration order.
    pub patterns: Vec<Finding>,
    /// Matching [`TECH_RULES`], in declaration order.
    pub tech_stack: Vec<Finding>,
}

impl ArchitectureReport {
    /// Returns `true` if no rule matched.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.tech_stack.is_empty()
    }
}

/// Evaluate `rules` in order, keeping every match.
pub fn evaluate(rules: &[Rule], directories: &[&str], file_types: &Tally) -> Vec<Finding> {
    rules
        .iter()
        .filter(|rule| rule.matches(directories, file_types))
        .map(Finding::from)
        .collect()
}

/// Detect architecture patterns and technologies from project statistics.
///
/// # Examples
///
/// ```
/// use truckstat_core::{ContributionDocument, TreeNode};
/// use truckstat_pulse::architecture::detect_architecture;
/// use truckstat_pulse::stats::aggregate_stats;
///
/// let doc = ContributionDocument::new(TreeNode::tree("repo", vec![
///     TreeNode::tree("apps", vec![TreeNode::blob("server.ts")]),
/// ]));
/// let report = detect_architecture(&aggregate_stats(&doc));
/// assert_eq!(report.patterns[0].label, "Microservices");
/// assert_eq!(report.tech_stack[0].label, "TypeScript");
/// ```
pub fn detect_architecture(stats: &ProjectStats) -> ArchitectureReport {
    let directories: Vec<&str> = stats.directories.keys().collect();
    let report = ArchitectureReport {
        patterns: evaluate(PATTERN_RULES, &directories, &stats.file_types),
        tech_stack: evaluate(TECH_RULES, &directories, &stats.file_types),
    };
    tracing::debug!(
        patterns = report.patterns.len(),
        technologies = report.tech_stack.len(),
        "architecture rules evaluated"
    );
    report
}
