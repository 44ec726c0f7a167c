//! Project-wide counters and ranked file lists.
//!
//! One pass over the tree accumulates totals, extension, language and
//! directory tallies, and the candidate lists for the highlight sections.

use serde::Serialize;
use truckstat_core::{ContributionDocument, FileRecord, Tally, TreeNode};

use crate::language::{extension_of, Language};
use crate::walker::{parent_dir, walk_document, TreeVisitor};

/// Global statistics for one document.
///
/// The ranked lists keep every file; callers decide how many to show.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::stats::ProjectStats;
///
/// let stats = ProjectStats::default();
/// assert_eq!(stats.total_files, 0);
/// assert!(stats.biggest_files.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    /// Number of blobs.
    pub total_files: u64,
    /// Sum of blob sizes in bytes.
    pub total_size_bytes: u64,
    /// Sum of per-file commit counts.
    pub total_commits: u64,
    /// Number of binary blobs.
    pub binary_files: u64,
    /// Author → summed ownership percentages (not a file count).
    pub authors: Tally<f64>,
    /// Extension → file count, files without an extension excluded.
    pub file_types: Tally,
    /// Language → file count, for extensions in the language table.
    pub languages: Tally,
    /// Parent directory → file count, top-level files excluded.
    pub directories: Tally,
    /// Files with a known last change, most recent first.
    pub last_changes: Vec<FileRecord>,
    /// All files, largest first.
    pub biggest_files: Vec<FileRecord>,
    /// All files, most commits first.
    pub most_changed_files: Vec<FileRecord>,
}

/// Accumulates [`ProjectStats`] as a [`TreeVisitor`].
#[derive(Debug, Default)]
pub struct StatsAggregator {
    stats: ProjectStats,
}

impl StatsAggregator {
    /// Create an aggregator with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank the candidate lists and return the finished statistics.
    ///
    /// Sorts are stable, so equal keys stay in traversal order.
    pub fn finish(mut self) -> ProjectStats {
        let stats = &mut self.stats;
        stats
            .last_changes
            .sort_by(|a, b| b.last_change_epoch.cmp(&a.last_change_epoch));
        stats
            .biggest_files
            .sort_by(|a, b| b.size_in_bytes.cmp(&a.size_in_bytes));
        stats
            .most_changed_files
            .sort_by(|a, b| b.commits.cmp(&a.commits));

        tracing::debug!(
            files = stats.total_files,
            directories = stats.directories.len(),
            authors = stats.authors.len(),
            "project stats aggregated"
        );
        self.stats
    }
}

impl TreeVisitor for StatsAggregator {
    fn visit_blob(&mut self, node: &TreeNode, path: &str) {
        let stats = &mut self.stats;
        stats.total_files += 1;
        stats.total_size_bytes += node.size_in_bytes;
        stats.total_commits += node.no_commits;

        for (author, percentage) in node.authors.iter() {
            stats.authors.add(author, percentage);
        }

        let ext = extension_of(&node.name);
        if !ext.is_empty() {
            stats.file_types.add(&ext, 1);
            if let Some(language) = Language::from_extension(&ext) {
                stats.languages.add(language.label(), 1);
            }
        }

        let dir = parent_dir(path);
        if !dir.is_empty() {
            stats.directories.add(dir, 1);
        }

        if node.is_binary {
            stats.binary_files += 1;
        }

        let record = FileRecord {
            path: path.to_string(),
            size_in_bytes: node.size_in_bytes,
            commits: node.no_commits,
            last_change_epoch: node.last_change_epoch,
        };
        if node.last_change_epoch != 0 {
            stats.last_changes.push(record.clone());
        }
        stats.biggest_files.push(record.clone());
        stats.most_changed_files.push(record);
    }
}

/// Aggregate project-wide statistics for `doc`.
///
/// A document without a tree yields all-zero statistics.
///
/// # Examples
///
/// ```
/// use truckstat_core::{ContributionDocument, TreeNode};
/// use truckstat_pulse::stats::aggregate_stats;
///
/// let doc = ContributionDocument::new(TreeNode::tree("repo", vec![
///     TreeNode::tree("src", vec![
///         TreeNode::blob("index.ts").with_size(300).with_commits(4),
///         TreeNode::blob("logo.png").with_size(900).binary(),
///     ]),
/// ]));
/// let stats = aggregate_stats(&doc);
/// assert_eq!(stats.total_files, 2);
/// assert_eq!(stats.total_size_bytes, 1200);
/// assert_eq!(stats.binary_files, 1);
/// assert_eq!(stats.languages.get("TypeScript"), 1);
/// assert_eq!(stats.biggest_files[0].path, "src/logo.png");
/// ```
pub fn aggregate_stats(doc: &ContributionDocument) -> ProjectStats {
    let mut aggregator = StatsAggregator::new();
    walk_document(doc, &mut aggregator);
    aggregator.finish()
}
