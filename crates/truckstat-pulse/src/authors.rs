//! Per-author contribution rollups.
//!
//! Combines current ownership (`authors`), historical line counts
//! (`unionedAuthors.HISTORICAL`), and commit ids into one record per
//! author. The two author maps are independent: an author may have
//! history on a file without current ownership, or the reverse.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use truckstat_core::{ContributionDocument, FileRecord, Tally, TreeNode};

use crate::language::{extension_of, Language};
use crate::walker::{parent_dir, walk_document, TreeVisitor};

/// Historical lines an author holds in one file.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::authors::Contribution;
///
/// let c = Contribution {
///     path: "src/db/schema.ts".into(),
///     lines: 240,
///     size_in_bytes: 8192,
///     commits: 9,
/// };
/// assert_eq!(c.lines, 240);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    /// File path.
    pub path: String,
    /// Historical lines attributed to the author.
    pub lines: u64,
    /// File size in bytes.
    pub size_in_bytes: u64,
    /// Commits touching the file.
    pub commits: u64,
}

/// Everything known about one author.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::authors::AuthorStats;
///
/// let stats = AuthorStats::new("alice");
/// assert_eq!(stats.files_touched, 0);
/// assert_eq!(stats.average_ownership(), 0.0);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStats {
    /// Author identifier as it appears in the document.
    pub name: String,
    /// Files listing the author in `authors`.
    pub files_touched: u64,
    /// Files where the author owns exactly 100%.
    pub files_owned: u64,
    /// Files where the author owns less than 100%.
    pub files_shared: u64,
    /// Historical lines across all files.
    pub total_lines: u64,
    /// Commit ids of every file the author currently owns part of.
    ///
    /// Files do not say which author made which commit, so each commit id
    /// is credited to every listed author of the file.
    pub commits: BTreeSet<String>,
    /// Extension → files touched.
    pub file_types: Tally,
    /// Language → files touched.
    pub languages: Tally,
    /// Parent directory → files touched.
    pub directories: Tally,
    /// Size of every file touched.
    pub file_sizes: Vec<u64>,
    /// Ownership percentage in every file touched.
    pub ownership: Vec<f64>,
    /// Touched files changed after the recency threshold, most recent first.
    pub recent_files: Vec<FileRecord>,
    /// Files by historical lines, largest first.
    pub biggest_contributions: Vec<Contribution>,
    /// Touched files with more than one commit, most commits first.
    pub most_changed_files: Vec<FileRecord>,
}

impl AuthorStats {
    /// Create an empty record for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mean ownership percentage over files touched, `0.0` when none.
    pub fn average_ownership(&self) -> f64 {
        if self.ownership.is_empty() {
            return 0.0;
        }
        self.ownership.iter().sum::<f64>() / self.ownership.len() as f64
    }

    /// Total bytes across files touched.
    pub fn total_size_bytes(&self) -> u64 {
        self.file_sizes.iter().sum()
    }

    /// Number of distinct commit ids credited to the author.
    pub fn unique_commits(&self) -> usize {
        self.commits.len()
    }

    /// Share of `count` among files touched, as a percentage.
    pub fn share_of_touched(&self, count: u64) -> f64 {
        if self.files_touched == 0 {
            0.0
        } else {
            count as f64 / self.files_touched as f64 * 100.0
        }
    }
}

/// All author records, ranked by historical lines.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::authors::AuthorSummary;
///
/// let summary = AuthorSummary::default();
/// assert!(summary.authors.is_empty());
/// assert_eq!(summary.total_lines, 0);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    /// Authors by `total_lines` descending; ties in first-sighting order.
    pub authors: Vec<AuthorStats>,
    /// Historical lines across all authors.
    pub total_lines: u64,
}

impl AuthorSummary {
    /// Look up an author by name.
    pub fn get(&self, name: &str) -> Option<&AuthorStats> {
        self.authors.iter().find(|a| a.name == name)
    }

    /// Percentage of all historical lines held by `author`.
    pub fn line_share(&self, author: &AuthorStats) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            author.total_lines as f64 / self.total_lines as f64 * 100.0
        }
    }
}

/// Builds [`AuthorStats`] records as a [`TreeVisitor`].
///
/// Records are created on first sight of an author through
/// [`AuthorAnalyzer::get_or_create`] and kept in that order.
#[derive(Debug)]
pub struct AuthorAnalyzer {
    records: Vec<AuthorStats>,
    index: HashMap<String, usize>,
    recent_threshold: i64,
}

impl AuthorAnalyzer {
    /// Create an analyzer; files changed after `recent_threshold` count as recent.
    pub fn new(recent_threshold: i64) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            recent_threshold,
        }
    }

    /// The record for `author`, inserting an empty one if this is the first sighting.
    pub fn get_or_create(&mut self, author: &str) -> &mut AuthorStats {
        let slot = match self.index.get(author).copied() {
            Some(slot) => slot,
            None => {
                self.records.push(AuthorStats::new(author));
                let slot = self.records.len() - 1;
                self.index.insert(author.to_string(), slot);
                slot
            }
        };
        &mut self.records[slot]
    }

    /// Rank every per-author list and return the summary.
    pub fn finish(self) -> AuthorSummary {
        let mut authors: Vec<AuthorStats> = self
            .records
            .into_iter()
            .map(|mut stats| {
                stats
                    .biggest_contributions
                    .sort_by(|a, b| b.lines.cmp(&a.lines));
                stats
                    .most_changed_files
                    .sort_by(|a, b| b.commits.cmp(&a.commits));
                stats
                    .recent_files
                    .sort_by(|a, b| b.last_change_epoch.cmp(&a.last_change_epoch));
                stats
            })
            .collect();
        authors.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));

        let total_lines: u64 = authors.iter().map(|a| a.total_lines).sum();
        tracing::debug!(authors = authors.len(), total_lines, "author rollups built");

        AuthorSummary {
            authors,
            total_lines,
        }
    }
}

impl TreeVisitor for AuthorAnalyzer {
    fn visit_blob(&mut self, node: &TreeNode, path: &str) {
        let record = FileRecord {
            path: path.to_string(),
            size_in_bytes: node.size_in_bytes,
            commits: node.no_commits,
            last_change_epoch: node.last_change_epoch,
        };
        let ext = extension_of(&node.name);
        let language = Language::from_extension(&ext);
        let dir = parent_dir(path);
        let is_recent = node.last_change_epoch > self.recent_threshold;

        for (author, percentage) in node.authors.iter() {
            let stats = self.get_or_create(author);
            stats.files_touched += 1;
            stats.ownership.push(percentage);
            stats.file_sizes.push(node.size_in_bytes);
            if percentage == 100.0 {
                stats.files_owned += 1;
            } else {
                stats.files_shared += 1;
            }
            if is_recent {
                stats.recent_files.push(record.clone());
            }

            stats.commits.extend(node.commits.iter().cloned());

            if !ext.is_empty() {
                stats.file_types.add(&ext, 1);
                if let Some(language) = language {
                    stats.languages.add(language.label(), 1);
                }
            }
            if !dir.is_empty() {
                stats.directories.add(dir, 1);
            }
            if node.no_commits > 1 {
                stats.most_changed_files.push(record.clone());
            }
        }

        for (author, lines) in node.unioned_authors.historical.iter() {
            let stats = self.get_or_create(author);
            stats.total_lines += lines;
            stats.biggest_contributions.push(Contribution {
                path: path.to_string(),
                lines,
                size_in_bytes: node.size_in_bytes,
                commits: node.no_commits,
            });
        }
    }
}

/// Build per-author statistics for `doc`.
///
/// # Examples
///
/// ```
/// use truckstat_core::{ContributionDocument, TreeNode};
/// use truckstat_pulse::authors::analyze_authors;
///
/// let doc = ContributionDocument::new(TreeNode::tree("repo", vec![
///     TreeNode::blob("a.py").with_author("alice", 100.0).with_history("alice", 50),
///     TreeNode::blob("b.py").with_author("alice", 40.0).with_author("bob", 60.0)
///         .with_history("alice", 10).with_history("bob", 30),
/// ]));
/// let summary = analyze_authors(&doc, 1_700_000_000);
/// let alice = summary.get("alice").unwrap();
/// assert_eq!((alice.files_touched, alice.files_owned, alice.files_shared), (2, 1, 1));
/// assert_eq!(alice.total_lines, 60);
/// assert_eq!(summary.authors[0].name, "alice");
/// ```
pub fn analyze_authors(doc: &ContributionDocument, recent_threshold: i64) -> AuthorSummary {
    let mut analyzer = AuthorAnalyzer::new(recent_threshold);
    walk_document(doc, &mut analyzer);
    analyzer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use truckstat_core::DEFAULT_RECENT_THRESHOLD;

    fn analyze(children: Vec<TreeNode>) -> AuthorSummary {
        let doc = ContributionDocument::new(TreeNode::tree("repo", children));
        analyze_authors(&doc, DEFAULT_RECENT_THRESHOLD)
    }

    #[test]
    fn get_or_create_reuses_existing_record() {
        let mut analyzer = AuthorAnalyzer::new(0);
        analyzer.get_or_create("alice").files_touched = 3;
        assert_eq!(analyzer.get_or_create("alice").files_touched, 3);
        assert_eq!(analyzer.get_or_create("bob").files_touched, 0);
        assert_eq!(analyzer.finish().authors.len(), 2);
    }

    #[test]
    fn owned_plus_shared_equals_touched() {
        let summary = analyze(vec![
            TreeNode::blob("a").with_author("alice", 100.0),
            TreeNode::blob("b").with_author("alice", 99.5),
            TreeNode::blob("c").with_author("alice", 0.0).with_author("bob", 100.0),
        ]);
        for author in &summary.authors {
            assert_eq!(author.files_owned + author.files_shared, author.files_touched);
        }
        let alice = summary.get("alice").unwrap();
        assert_eq!(alice.files_owned, 1);
        assert_eq!(alice.files_shared, 2);
    }

    #[test]
    fn history_only_author_gets_lines_but_no_touches() {
        let summary = analyze(vec![TreeNode::blob("legacy.js")
            .with_author("alice", 100.0)
            .with_history("carol", 120)]);
        let carol = summary.get("carol").unwrap();
        assert_eq!(carol.total_lines, 120);
        assert_eq!(carol.files_touched, 0);
        assert_eq!(carol.biggest_contributions.len(), 1);

        let alice = summary.get("alice").unwrap();
        assert_eq!(alice.total_lines, 0);
        assert_eq!(alice.files_touched, 1);
    }

    #[test]
    fn commits_are_credited_to_every_listed_author() {
        let summary = analyze(vec![
            TreeNode::blob("a")
                .with_author("alice", 50.0)
                .with_author("bob", 50.0)
                .with_commit_ids(["c1", "c2"]),
            TreeNode::blob("b")
                .with_author("alice", 100.0)
                .with_commit_ids(["c2", "c3"]),
        ]);
        assert_eq!(summary.get("alice").unwrap().unique_commits(), 3);
        assert_eq!(summary.get("bob").unwrap().unique_commits(), 2);
    }

    #[test]
    fn commits_are_not_credited_to_history_only_authors() {
        let summary = analyze(vec![TreeNode::blob("a")
            .with_history("carol", 5)
            .with_commit_ids(["c1"])]);
        assert_eq!(summary.get("carol").unwrap().unique_commits(), 0);
    }

    #[test]
    fn recent_files_respect_threshold() {
        let summary = analyze(vec![
            TreeNode::blob("old").with_author("alice", 100.0).with_last_change(1_650_000_000),
            TreeNode::blob("edge")
                .with_author("alice", 100.0)
                .with_last_change(DEFAULT_RECENT_THRESHOLD),
            TreeNode::blob("newer").with_author("alice", 100.0).with_last_change(1_710_000_000),
            TreeNode::blob("newest").with_author("alice", 100.0).with_last_change(1_720_000_000),
        ]);
        let recent: Vec<&str> = summary
            .get("alice")
            .unwrap()
            .recent_files
            .iter()
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(recent, vec!["newest", "newer"]);
    }

    #[test]
    fn most_changed_requires_more_than_one_commit() {
        let summary = analyze(vec![
            TreeNode::blob("once").with_author("alice", 100.0).with_commits(1),
            TreeNode::blob("twice").with_author("alice", 100.0).with_commits(2),
            TreeNode::blob("often").with_author("alice", 100.0).with_commits(9),
        ]);
        let changed: Vec<&str> = summary
            .get("alice")
            .unwrap()
            .most_changed_files
            .iter()
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(changed, vec!["often", "twice"]);
    }

    #[test]
    fn breakdowns_and_averages() {
        let summary = analyze(vec![TreeNode::tree(
            "src",
            vec![
                TreeNode::blob("a.ts").with_size(100).with_author("alice", 100.0),
                TreeNode::blob("b.ts").with_size(50).with_author("alice", 50.0),
                TreeNode::blob("c.rs").with_size(25).with_author("alice", 30.0),
            ],
        )]);
        let alice = summary.get("alice").unwrap();
        assert_eq!(alice.file_types.get(".ts"), 2);
        assert_eq!(alice.file_types.get(".rs"), 1);
        assert_eq!(alice.languages.get("TypeScript"), 2);
        assert_eq!(alice.languages.len(), 1);
        assert_eq!(alice.directories.get("src"), 3);
        assert_eq!(alice.total_size_bytes(), 175);
        assert!((alice.average_ownership() - 60.0).abs() < 1e-9);
        assert!((alice.share_of_touched(2) - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn authors_rank_by_lines_and_share_sums_to_100() {
        let summary = analyze(vec![
            TreeNode::blob("a").with_history("alice", 25).with_history("bob", 75),
            TreeNode::blob("b").with_history("carol", 100),
        ]);
        let order: Vec<&str> = summary.authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(order, vec!["carol", "bob", "alice"]);
        assert_eq!(summary.total_lines, 200);

        let total: f64 = summary.authors.iter().map(|a| summary.line_share(a)).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn equal_lines_keep_first_sighting_order() {
        let summary = analyze(vec![
            TreeNode::blob("a").with_history("zoe", 10).with_history("adam", 10),
            TreeNode::blob("b").with_author("mia", 100.0).with_history("mia", 10),
        ]);
        let order: Vec<&str> = summary.authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(order, vec!["zoe", "adam", "mia"]);
    }

    #[test]
    fn contributions_rank_by_lines() {
        let summary = analyze(vec![
            TreeNode::blob("small").with_history("alice", 5),
            TreeNode::blob("large").with_history("alice", 500),
            TreeNode::blob("medium").with_history("alice", 50),
        ]);
        let paths: Vec<&str> = summary
            .get("alice")
            .unwrap()
            .biggest_contributions
            .iter()
            .map(|c| c.path.as_str())
            .collect();
        assert_eq!(paths, vec!["large", "medium", "small"]);
    }
}
