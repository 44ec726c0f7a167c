//! Co-authorship detection.
//!
//! Identifies pairs of authors who currently share ownership of the same
//! files, which shows where knowledge is spread across people.

use std::collections::BTreeMap;

use serde::Serialize;
use truckstat_core::{ContributionDocument, TreeNode};

use crate::walker::{walk_document, TreeVisitor};

/// A file shared by both authors of a pair.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::collaboration::SharedFile;
///
/// let file = SharedFile {
///     path: "src/auth/session.ts".into(),
///     first_ownership: 40.0,
///     second_ownership: 60.0,
///     size_in_bytes: 2048,
///     commits: 7,
/// };
/// assert!(file.second_ownership > file.first_ownership);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedFile {
    /// File path.
    pub path: String,
    /// Ownership percentage of [`CollaborationEntry::first`].
    pub first_ownership: f64,
    /// Ownership percentage of [`CollaborationEntry::second`].
    pub second_ownership: f64,
    /// File size in bytes.
    pub size_in_bytes: u64,
    /// Commits touching the file.
    pub commits: u64,
}

/// Two authors who co-own at least one file.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::collaboration::CollaborationEntry;
///
/// let entry = CollaborationEntry {
///     first: "alice".into(),
///     second: "bob".into(),
///     shared_count: 4,
///     shared_files: vec![],
/// };
/// assert_eq!(entry.label(), "alice & bob");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationEntry {
    /// First author in the pair (lexicographically smaller).
    pub first: String,
    /// Second author in the pair.
    pub second: String,
    /// Number of files listing both authors.
    pub shared_count: u64,
    /// Shared files, largest first.
    pub shared_files: Vec<SharedFile>,
}

impl CollaborationEntry {
    /// `"first & second"`.
    pub fn label(&self) -> String {
        format!("{} & {}", self.first, self.second)
    }
}

/// All collaboration pairs, most shared files first.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::collaboration::CollaborationSummary;
///
/// let summary = CollaborationSummary::default();
/// assert!(summary.is_empty());
/// assert_eq!(summary.count("alice", "bob"), 0);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationSummary {
    /// Pairs by `shared_count` descending; ties in pair order.
    pub pairs: Vec<CollaborationEntry>,
}

impl CollaborationSummary {
    /// Returns `true` if no file has more than one author.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The entry for two authors, in either order.
    pub fn pair(&self, a: &str, b: &str) -> Option<&CollaborationEntry> {
        let (first, second) = normalize_pair(a, b);
        self.pairs
            .iter()
            .find(|p| p.first == first && p.second == second)
    }

    /// Shared-file count for two authors, in either order.
    pub fn count(&self, a: &str, b: &str) -> u64 {
        self.pair(a, b).map_or(0, |p| p.shared_count)
    }
}

/// Builds [`CollaborationEntry`] values as a [`TreeVisitor`].
#[derive(Debug, Default)]
pub struct CollaborationAnalyzer {
    pairs: BTreeMap<(String, String), CollaborationEntry>,
}

impl CollaborationAnalyzer {
    /// Create an analyzer with no pairs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank pairs and their shared files and return the summary.
    pub fn finish(self) -> CollaborationSummary {
        let mut pairs: Vec<CollaborationEntry> = self
            .pairs
            .into_values()
            .map(|mut entry| {
                entry
                    .shared_files
                    .sort_by(|a, b| b.size_in_bytes.cmp(&a.size_in_bytes));
                entry
            })
            .collect();
        pairs.sort_by(|a, b| b.shared_count.cmp(&a.shared_count));

        tracing::debug!(pairs = pairs.len(), "collaboration pairs found");
        CollaborationSummary { pairs }
    }
}

impl TreeVisitor for CollaborationAnalyzer {
    fn visit_blob(&mut self, node: &TreeNode, path: &str) {
        if node.authors.len() < 2 {
            return;
        }

        let authors: Vec<(&str, f64)> = node.authors.iter().collect();
        for i in 0..authors.len() {
            for j in (i + 1)..authors.len() {
                let key = normalize_pair(authors[i].0, authors[j].0);
                let (first_ownership, second_ownership) = if key.0 == authors[i].0 {
                    (authors[i].1, authors[j].1)
                } else {
                    (authors[j].1, authors[i].1)
                };

                let entry = self
                    .pairs
                    .entry(key)
                    .or_insert_with_key(|(first, second)| CollaborationEntry {
                        first: first.clone(),
                        second: second.clone(),
                        shared_count: 0,
                        shared_files: Vec::new(),
                    });
                entry.shared_count += 1;
                entry.shared_files.push(SharedFile {
                    path: path.to_string(),
                    first_ownership,
                    second_ownership,
                    size_in_bytes: node.size_in_bytes,
                    commits: node.no_commits,
                });
            }
        }
    }
}

/// Detect co-authorship between every pair of authors in `doc`.
///
/// # Examples
///
/// ```
/// use truckstat_core::{ContributionDocument, TreeNode};
/// use truckstat_pulse::collaboration::analyze_collaboration;
///
/// let doc = ContributionDocument::new(TreeNode::tree("repo", vec![
///     TreeNode::blob("a.ts").with_author("bob", 60.0).with_author("alice", 40.0),
///     TreeNode::blob("b.ts").with_author("alice", 100.0),
/// ]));
/// let summary = analyze_collaboration(&doc);
/// assert_eq!(summary.pairs.len(), 1);
/// assert_eq!(summary.count("bob", "alice"), 1);
/// ```
pub fn analyze_collaboration(doc: &ContributionDocument) -> CollaborationSummary {
    let mut analyzer = CollaborationAnalyzer::new();
    walk_document(doc, &mut analyzer);
    analyzer.finish()
}

fn normalize_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(children: Vec<TreeNode>) -> CollaborationSummary {
        analyze_collaboration(&ContributionDocument::new(TreeNode::tree("repo", children)))
    }

    #[test]
    fn single_author_files_produce_no_pairs() {
        let summary = analyze(vec![
            TreeNode::blob("a").with_author("alice", 100.0),
            TreeNode::blob("b").with_author("bob", 100.0),
        ]);
        assert!(summary.is_empty());
    }

    #[test]
    fn three_authors_produce_three_pairs() {
        let summary = analyze(vec![TreeNode::blob("shared.ts")
            .with_author("carol", 20.0)
            .with_author("alice", 30.0)
            .with_author("bob", 50.0)]);
        assert_eq!(summary.pairs.len(), 3);
        assert_eq!(summary.count("alice", "bob"), 1);
        assert_eq!(summary.count("alice", "carol"), 1);
        assert_eq!(summary.count("bob", "carol"), 1);
    }

    #[test]
    fn pair_normalization_treats_ab_same_as_ba() {
        let summary = analyze(vec![
            TreeNode::blob("one").with_author("zed", 10.0).with_author("amy", 90.0),
            TreeNode::blob("two").with_author("amy", 70.0).with_author("zed", 30.0),
        ]);
        assert_eq!(summary.pairs.len(), 1);
        let pair = &summary.pairs[0];
        assert_eq!(pair.first, "amy");
        assert_eq!(pair.second, "zed");
        assert_eq!(pair.shared_count, 2);
        assert_eq!(summary.count("zed", "amy"), summary.count("amy", "zed"));
    }

    #[test]
    fn ownership_follows_canonical_order() {
        let summary = analyze(vec![TreeNode::blob("y.ts")
            .with_size(200)
            .with_commits(5)
            .with_author("bob", 60.0)
            .with_author("alice", 40.0)]);
        let file = &summary.pair("bob", "alice").unwrap().shared_files[0];
        assert_eq!(file.path, "y.ts");
        assert_eq!(file.first_ownership, 40.0);
        assert_eq!(file.second_ownership, 60.0);
        assert_eq!(file.size_in_bytes, 200);
        assert_eq!(file.commits, 5);
    }

    #[test]
    fn pairs_rank_by_count_and_files_by_size() {
        let summary = analyze(vec![
            TreeNode::blob("small").with_size(10).with_author("a", 50.0).with_author("b", 50.0),
            TreeNode::blob("big").with_size(90).with_author("a", 50.0).with_author("b", 50.0),
            TreeNode::blob("solo").with_size(50).with_author("c", 50.0).with_author("d", 50.0),
        ]);
        assert_eq!(summary.pairs[0].label(), "a & b");
        assert_eq!(summary.pairs[1].label(), "c & d");

        let files: Vec<&str> = summary.pairs[0]
            .shared_files
            .iter()
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(files, vec!["big", "small"]);
    }

    #[test]
    fn count_matches_files_containing_both() {
        let summary = analyze(vec![
            TreeNode::blob("1").with_author("a", 50.0).with_author("b", 50.0),
            TreeNode::blob("2")
                .with_author("a", 30.0)
                .with_author("b", 30.0)
                .with_author("c", 40.0),
            TreeNode::blob("3").with_author("b", 50.0).with_author("c", 50.0),
        ]);
        assert_eq!(summary.count("a", "b"), 2);
        assert_eq!(summary.count("b", "c"), 2);
        assert_eq!(summary.count("a", "c"), 1);
        assert_eq!(summary.count("a", "z"), 0);
    }
}
