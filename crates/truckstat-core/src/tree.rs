use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::TruckError;
use crate::types::Tally;

/// A contribution document as exported by the tree collector.
///
/// Only `simplifiedTree` is read; every other top-level key is ignored.
/// A document without a tree is valid and analyzes to all-zero statistics.
///
/// # Examples
///
/// ```
/// use truckstat_core::ContributionDocument;
///
/// let doc = ContributionDocument::from_json("{}").unwrap();
/// assert!(doc.simplified_tree.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDocument {
    /// Root of the annotated source tree.
    #[serde(default)]
    pub simplified_tree: Option<TreeNode>,
}

impl ContributionDocument {
    /// Wrap an already-built tree.
    pub fn new(root: TreeNode) -> Self {
        Self {
            simplified_tree: Some(root),
        }
    }

    /// Load a document from a JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TruckError::FileNotFound`] if `path` does not exist,
    /// [`TruckError::Io`] if it cannot be read, or
    /// [`TruckError::Malformed`] if it is not a valid document.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use truckstat_core::ContributionDocument;
    ///
    /// let doc = ContributionDocument::from_file(Path::new("contributions.json")).unwrap();
    /// println!("{:?}", doc.project_name());
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, TruckError> {
        if !path.exists() {
            return Err(TruckError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| TruckError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`TruckError::Serialization`] if the JSON is invalid.
    pub fn from_json(content: &str) -> Result<Self, TruckError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Name of the root node, if the document has a tree.
    pub fn project_name(&self) -> Option<&str> {
        self.simplified_tree.as_ref().map(|root| root.name.as_str())
    }
}

/// Discriminator of a [`TreeNode`], read from the JSON `type` field.
///
/// Anything other than `tree` or `blob` (including a missing tag) is
/// [`NodeKind::Unknown`], which the walker skips entirely.
///
/// # Examples
///
/// ```
/// use truckstat_core::NodeKind;
///
/// let kind: NodeKind = serde_json::from_str("\"blob\"").unwrap();
/// assert_eq!(kind, NodeKind::Blob);
/// let kind: NodeKind = serde_json::from_str("\"submodule\"").unwrap();
/// assert_eq!(kind, NodeKind::Unknown);
/// let kind: NodeKind = serde_json::from_str("null").unwrap();
/// assert_eq!(kind, NodeKind::Unknown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeKind {
    /// A directory with ordered children.
    Tree,
    /// A single file with metadata.
    Blob,
    /// Unrecognized tag.
    #[default]
    Unknown,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Tree => write!(f, "tree"),
            NodeKind::Blob => write!(f, "blob"),
            NodeKind::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl NodeKind {
    /// Kind named by a JSON tag; anything but the strings `tree` and `blob` is unknown.
    pub fn from_tag(tag: &Value) -> Self {
        match tag.as_str() {
            Some("tree") => NodeKind::Tree,
            Some("blob") => NodeKind::Blob,
            _ => NodeKind::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_tag(&Value::deserialize(deserializer)?))
    }
}

/// A node of the annotated source tree: a directory (`tree`) or a file (`blob`).
///
/// Every field takes its zero value when absent or of the wrong JSON type,
/// so irregular nodes never reject the document. Nodes of unknown kind keep
/// only their name. Author maps keep document order. A node's path is
/// never stored; the walker derives it from the parent chain.
///
/// # Examples
///
/// ```
/// use truckstat_core::{NodeKind, TreeNode};
///
/// let json = r#"{
///     "type": "blob",
///     "name": "main.ts",
///     "sizeInBytes": 120,
///     "noCommits": 4,
///     "authors": { "alice": 100 },
///     "unionedAuthors": { "HISTORICAL": { "alice": 37 } }
/// }"#;
/// let node: TreeNode = serde_json::from_str(json).unwrap();
/// assert_eq!(node.kind, NodeKind::Blob);
/// assert_eq!(node.unioned_authors.historical.get("alice"), 37);
/// assert!(node.commits.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Node discriminator.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// File or directory name (last path component).
    pub name: String,
    /// Ordered children of a directory.
    pub children: Vec<TreeNode>,
    /// File size in bytes.
    pub size_in_bytes: u64,
    /// Number of commits touching the file.
    pub no_commits: u64,
    /// Whether the file is binary.
    pub is_binary: bool,
    /// Unix timestamp of the last change, `0` when unknown.
    pub last_change_epoch: i64,
    /// Author → ownership percentage of the current content.
    pub authors: Tally<f64>,
    /// Author line counts over the file's full history.
    pub unioned_authors: UnionedAuthors,
    /// Identifiers of the commits touching the file.
    pub commits: Vec<String>,
}

/// Historical authorship of a file.
///
/// The key set is independent of [`TreeNode::authors`]: an author may
/// appear in one and not the other.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnionedAuthors {
    /// Author → lines attributed over the file's history.
    #[serde(rename = "HISTORICAL")]
    pub historical: Tally<u64>,
}

impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}

impl TreeNode {
    /// Build a node from loosely typed JSON.
    ///
    /// Never fails: a non-object yields an unknown node, and each field of
    /// the wrong type takes its zero value.
    ///
    /// # Examples
    ///
    /// ```
    /// use truckstat_core::{NodeKind, TreeNode};
    ///
    /// let node = TreeNode::from_value(serde_json::json!({
    ///     "type": "tree",
    ///     "name": "repo",
    ///     "children": [{"type": 5, "children": "n/a"}, {"type": "blob", "sizeInBytes": "big"}],
    /// }));
    /// assert_eq!(node.children[0].kind, NodeKind::Unknown);
    /// assert_eq!(node.children[1].size_in_bytes, 0);
    /// ```
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };
        let kind = fields.get("type").map_or(NodeKind::Unknown, NodeKind::from_tag);
        let name = match fields.remove("name") {
            Some(Value::String(name)) => name,
            _ => String::new(),
        };
        if kind == NodeKind::Unknown {
            return Self {
                name,
                ..Self::default()
            };
        }

        let children = match fields.remove("children") {
            Some(Value::Array(items)) => items.into_iter().map(Self::from_value).collect(),
            _ => Vec::new(),
        };
        let mut authors = Tally::new();
        if let Some(Value::Object(map)) = fields.get("authors") {
            for (author, share) in map {
                if let Some(share) = share.as_f64() {
                    authors.add(author, share);
                }
            }
        }
        let mut historical = Tally::new();
        if let Some(Value::Object(map)) = fields
            .get("unionedAuthors")
            .and_then(|unioned| unioned.get("HISTORICAL"))
        {
            for (author, lines) in map {
                if let Some(lines) = as_count(lines) {
                    historical.add(author, lines);
                }
            }
        }
        let commits = match fields.get("commits") {
            Some(Value::Array(ids)) => ids
                .iter()
                .filter_map(|id| id.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            kind,
            name,
            children,
            size_in_bytes: fields.get("sizeInBytes").and_then(as_count).unwrap_or(0),
            no_commits: fields.get("noCommits").and_then(as_count).unwrap_or(0),
            is_binary: fields
                .get("isBinary")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            last_change_epoch: fields
                .get("lastChangeEpoch")
                .and_then(|epoch| epoch.as_i64().or_else(|| epoch.as_f64().map(|f| f as i64)))
                .unwrap_or(0),
            authors,
            unioned_authors: UnionedAuthors { historical },
            commits,
        }
    }
}

/// Non-negative integer, accepting whole or fractional JSON numbers.
fn as_count(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
}

impl TreeNode {
    /// Create a directory node.
    pub fn tree(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            kind: NodeKind::Tree,
            name: name.into(),
            children,
            ..Self::default()
        }
    }

    /// Create a file node with zeroed metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use truckstat_core::TreeNode;
    ///
    /// let file = TreeNode::blob("lib.rs")
    ///     .with_size(2048)
    ///     .with_commits(3)
    ///     .with_author("alice", 100.0)
    ///     .with_history("alice", 80);
    /// assert!(file.is_blob());
    /// assert_eq!(file.authors.get("alice"), 100.0);
    /// ```
    pub fn blob(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Blob,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the file size in bytes.
    pub fn with_size(mut self, bytes: u64) -> Self {
        self.size_in_bytes = bytes;
        self
    }

    /// Set the commit count.
    pub fn with_commits(mut self, count: u64) -> Self {
        self.no_commits = count;
        self
    }

    /// Set the commit identifiers touching the file.
    pub fn with_commit_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commits = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the last-change timestamp.
    pub fn with_last_change(mut self, epoch: i64) -> Self {
        self.last_change_epoch = epoch;
        self
    }

    /// Add an author with an ownership percentage.
    pub fn with_author(mut self, author: &str, percentage: f64) -> Self {
        self.authors.add(author, percentage);
        self
    }

    /// Add historical lines for an author.
    pub fn with_history(mut self, author: &str, lines: u64) -> Self {
        self.unioned_authors.historical.add(author, lines);
        self
    }

    /// Mark the file as binary.
    pub fn binary(mut self) -> Self {
        self.is_binary = true;
        self
    }

    /// Returns `true` for file nodes.
    pub fn is_blob(&self) -> bool {
        self.kind == NodeKind::Blob
    }

    /// Returns `true` for directory nodes.
    pub fn is_tree(&self) -> bool {
        self.kind == NodeKind::Tree
    }
}
