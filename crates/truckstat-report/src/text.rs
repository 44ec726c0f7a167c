//! Markdown rendering of a [`ContributionReport`].
//!
//! Sections always appear in the same order and every list is taken from
//! an already-ranked analyzer result, so identical input renders to
//! identical bytes. A section with nothing to list is left out, heading
//! included. Every section ends with a blank line.

use std::fmt::Write;

use truckstat_core::{ReportConfig, TreeNode};
use truckstat_pulse::authors::AuthorStats;
use truckstat_pulse::ContributionReport;

use crate::format::{format_date, format_size, percent, with_thousands};
use crate::structure::render_structure;

/// Renders the Markdown summary for one report.
///
/// # Examples
///
/// ```
/// use truckstat_core::{AnalysisConfig, ContributionDocument, ReportConfig};
/// use truckstat_pulse::analyze;
/// use truckstat_report::ReportRenderer;
///
/// let report = analyze(&ContributionDocument::default(), &AnalysisConfig::default());
/// let config = ReportConfig::default();
/// let text = ReportRenderer::new(&report, &config).render();
/// assert!(text.starts_with("# Contribution Analysis: PROJECT"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer<'a> {
    report: &'a ContributionReport,
    config: &'a ReportConfig,
    structure: Option<&'a TreeNode>,
}

impl<'a> ReportRenderer<'a> {
    /// Create a renderer without the project-structure section.
    pub fn new(report: &'a ContributionReport, config: &'a ReportConfig) -> Self {
        Self {
            report,
            config,
            structure: None,
        }
    }

    /// Append the project-structure tree of `root` at the end of the report.
    pub fn with_structure(mut self, root: Option<&'a TreeNode>) -> Self {
        self.structure = root;
        self
    }

    /// Assemble every section into one document.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_overview(&mut out);
        self.write_languages(&mut out);
        self.write_authors(&mut out);
        self.write_collaboration(&mut out);
        self.write_distribution(&mut out);
        self.write_highlights(&mut out);
        self.write_directories(&mut out);
        self.write_architecture(&mut out);
        self.write_structure(&mut out);

        tracing::debug!(bytes = out.len(), "report rendered");
        out
    }

    fn write_overview(&self, out: &mut String) {
        let stats = &self.report.stats;
        let _ = writeln!(
            out,
            "# Contribution Analysis: {}\n",
            self.report.project_name.to_uppercase()
        );
        out.push_str("## Overview\n");
        let _ = writeln!(out, "- **Files**: {}", with_thousands(stats.total_files));
        let _ = writeln!(out, "- **Total size**: {}", format_size(stats.total_size_bytes));
        let _ = writeln!(out, "- **Commits**: {}", with_thousands(stats.total_commits));
        let _ = writeln!(out, "- **Binary files**: {}", stats.binary_files);
        let _ = writeln!(out, "- **Unique authors**: {}", stats.authors.len());
        out.push('\n');
    }

    fn write_languages(&self, out: &mut String) {
        let stats = &self.report.stats;
        if stats.languages.is_empty() && stats.file_types.is_empty() {
            return;
        }
        out.push_str("## Languages and File Types\n");

        if !stats.languages.is_empty() {
            out.push_str("\n### Languages\n");
            for (language, count) in stats.languages.most_common() {
                let _ = writeln!(
                    out,
                    "- **{language}**: {count} files ({:.1}%)",
                    percent(count as f64, stats.total_files as f64)
                );
            }
        }

        if !stats.file_types.is_empty() {
            out.push_str("\n### Most common file types\n");
            for (ext, count) in stats
                .file_types
                .most_common()
                .into_iter()
                .take(self.config.top_file_types)
            {
                let _ = writeln!(out, "- **{ext}**: {count} files");
            }
        }
        out.push('\n');
    }

    fn write_authors(&self, out: &mut String) {
        if self.report.authors.authors.is_empty() {
            return;
        }
        out.push_str("## Contributors\n\n");
        for author in &self.report.authors.authors {
            self.write_author(out, author);
        }
    }

    fn write_author(&self, out: &mut String, author: &AuthorStats) {
        let limit = self.config.author_top_entries;
        let _ = writeln!(out, "### {}\n", author.name);

        out.push_str("#### General\n");
        let _ = writeln!(
            out,
            "- **Historical lines**: {} ({:.1}% of total)",
            with_thousands(author.total_lines),
            self.report.authors.line_share(author)
        );
        let _ = writeln!(out, "- **Files touched**: {}", author.files_touched);
        let _ = writeln!(out, "- **Files owned**: {} (100% ownership)", author.files_owned);
        let _ = writeln!(out, "- **Files shared**: {} (partial ownership)", author.files_shared);
        let _ = writeln!(
            out,
            "- **Unique commits**: {} (every commit of a co-owned file is credited)",
            author.unique_commits()
        );
        let _ = writeln!(
            out,
            "- **Total size managed**: {}",
            format_size(author.total_size_bytes())
        );
        let _ = writeln!(out, "- **Average ownership**: {:.1}%", author.average_ownership());
        out.push('\n');

        if !author.languages.is_empty() {
            out.push_str("#### Languages\n");
            for (language, count) in author.languages.most_common().into_iter().take(limit) {
                let _ = writeln!(
                    out,
                    "- **{language}**: {count} files ({:.1}%)",
                    author.share_of_touched(count)
                );
            }
            out.push('\n');
        }

        if !author.directories.is_empty() {
            out.push_str("#### Work areas\n");
            for (dir, count) in author
                .directories
                .most_common()
                .into_iter()
                .take(self.config.author_top_directories)
            {
                let _ = writeln!(out, "- **{dir}**: {count} files");
            }
            out.push('\n');
        }

        if !author.biggest_contributions.is_empty() {
            out.push_str("#### Biggest contributions (by lines)\n");
            for (i, c) in author.biggest_contributions.iter().take(limit).enumerate() {
                let _ = writeln!(
                    out,
                    "{}. **{}** - {} lines ({})",
                    i + 1,
                    c.path,
                    with_thousands(c.lines),
                    format_size(c.size_in_bytes)
                );
            }
            out.push('\n');
        }

        if !author.most_changed_files.is_empty() {
            out.push_str("#### Most changed files\n");
            for (i, file) in author.most_changed_files.iter().take(limit).enumerate() {
                let _ = writeln!(out, "{}. **{}** - {} commits", i + 1, file.path, file.commits);
            }
            out.push('\n');
        }

        if !author.recent_files.is_empty() {
            out.push_str("#### Recent activity\n");
            for (i, file) in author.recent_files.iter().take(limit).enumerate() {
                let _ = writeln!(
                    out,
                    "{}. **{}** - {} ({} commits)",
                    i + 1,
                    file.path,
                    format_date(file.last_change_epoch),
                    file.commits
                );
            }
            out.push('\n');
        }

        if !author.file_types.is_empty() {
            out.push_str("#### Preferred file types\n");
            for (ext, count) in author.file_types.most_common().into_iter().take(limit) {
                let _ = writeln!(
                    out,
                    "- **{ext}**: {count} files ({:.1}%)",
                    author.share_of_touched(count)
                );
            }
            out.push('\n');
        }

        out.push_str("---\n\n");
    }

    fn write_collaboration(&self, out: &mut String) {
        let collaboration = &self.report.collaboration;
        if collaboration.is_empty() {
            return;
        }

        out.push_str("## Collaboration\n\n### Most frequent pairs\n");
        for pair in collaboration.pairs.iter().take(self.config.top_pairs) {
            let _ = writeln!(
                out,
                "- **{}**: {} shared files",
                pair.label(),
                pair.shared_count
            );
        }

        out.push_str("\n### Shared file highlights\n");
        for pair in &collaboration.pairs {
            let _ = writeln!(out, "\n#### {}", pair.label());
            for (i, file) in pair
                .shared_files
                .iter()
                .take(self.config.shared_files_per_pair)
                .enumerate()
            {
                let _ = writeln!(
                    out,
                    "{}. **{}** ({}% / {}%) - {}",
                    i + 1,
                    file.path,
                    file.first_ownership,
                    file.second_ownership,
                    format_size(file.size_in_bytes)
                );
            }
        }
        out.push('\n');
    }

    fn write_distribution(&self, out: &mut String) {
        let ownership = &self.report.stats.authors;
        if ownership.is_empty() {
            return;
        }
        let total = ownership.total();
        out.push_str("## Distribution of Work\n\n");
        out.push_str("Summed ownership percentages across all files.\n\n");
        for (author, points) in ownership.most_common() {
            let _ = writeln!(
                out,
                "- **{author}**: {points:.1} ownership points ({:.1}%)",
                percent(points, total)
            );
        }
        out.push('\n');
    }

    fn write_highlights(&self, out: &mut String) {
        let stats = &self.report.stats;
        let limit = self.config.top_files;
        if stats.biggest_files.is_empty() && stats.most_changed_files.is_empty() {
            return;
        }
        out.push_str("## Highlights\n");

        if !stats.biggest_files.is_empty() {
            out.push_str("\n### Biggest files\n");
            for (i, file) in stats.biggest_files.iter().take(limit).enumerate() {
                let _ = writeln!(
                    out,
                    "{}. **{}** - {}",
                    i + 1,
                    file.path,
                    format_size(file.size_in_bytes)
                );
            }
        }

        if !stats.most_changed_files.is_empty() {
            out.push_str("\n### Most changed files\n");
            for (i, file) in stats.most_changed_files.iter().take(limit).enumerate() {
                let _ = writeln!(out, "{}. **{}** - {} commits", i + 1, file.path, file.commits);
            }
        }
        out.push('\n');
    }

    fn write_directories(&self, out: &mut String) {
        let directories = &self.report.stats.directories;
        if directories.is_empty() {
            return;
        }
        out.push_str("## Directories\n\n");
        for (dir, count) in directories
            .most_common()
            .into_iter()
            .take(self.config.top_directories)
        {
            let _ = writeln!(out, "- **{dir}**: {count} files");
        }
        out.push('\n');
    }

    fn write_architecture(&self, out: &mut String) {
        let architecture = &self.report.architecture;
        if architecture.is_empty() {
            return;
        }
        out.push_str("## Architecture\n");

        if !architecture.patterns.is_empty() {
            out.push_str("\n### Detected patterns\n");
            for finding in &architecture.patterns {
                let _ = writeln!(out, "- **{}**: {}", finding.label, finding.description);
            }
        }

        if !architecture.tech_stack.is_empty() {
            out.push_str("\n### Tech stack\n");
            for finding in &architecture.tech_stack {
                let _ = writeln!(out, "- **{}**: {}", finding.label, finding.description);
            }
        }
        out.push('\n');
    }

    fn write_structure(&self, out: &mut String) {
        let Some(root) = self.structure else {
            return;
        };
        out.push_str("## Project Structure\n\n```text\n");
        out.push_str(&render_structure(root));
        out.push_str("```\n");
    }
}
