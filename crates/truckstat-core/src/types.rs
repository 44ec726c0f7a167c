use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// A file descriptor carried by every ranked list.
///
/// # Examples
///
/// ```
/// use truckstat_core::FileRecord;
///
/// let record = FileRecord {
///     path: "src/app/page.tsx".into(),
///     size_in_bytes: 4096,
///     commits: 12,
///     last_change_epoch: 1_710_000_000,
/// };
/// assert_eq!(record.commits, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Path derived during traversal.
    pub path: String,
    /// File size in bytes.
    pub size_in_bytes: u64,
    /// Number of commits touching the file.
    pub commits: u64,
    /// Unix timestamp of the last change, `0` when unknown.
    pub last_change_epoch: i64,
}

/// An insertion-ordered counter.
///
/// [`Tally::most_common`] ranks entries by count, descending; equal counts
/// keep the order in which their keys were first added.
///
/// # Examples
///
/// ```
/// use truckstat_core::Tally;
///
/// let mut tally = Tally::new();
/// tally.add(".ts", 1);
/// tally.add(".md", 1);
/// tally.add(".ts", 1);
/// assert_eq!(tally.get(".ts"), 2);
/// assert_eq!(tally.most_common(), vec![(".ts", 2), (".md", 1)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<V = u64> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for Tally<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> Tally<V>
where
    V: Copy + Default + AddAssign + PartialOrd,
{
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the count for `key`, inserting it at zero first.
    pub fn add(&mut self, key: &str, amount: V) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += amount,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                let mut value = V::default();
                value += amount;
                self.entries.push((key.to_string(), value));
            }
        }
    }

    /// Count for `key`, zero when absent.
    pub fn get(&self, key: &str) -> V {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or_default()
    }

    /// Returns `true` if `key` has been added.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Entries ranked by count, descending, ties in insertion order.
    pub fn most_common(&self) -> Vec<(&str, V)> {
        let mut ranked: Vec<(&str, V)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
    }

    /// Sum of all counts.
    pub fn total(&self) -> V {
        let mut sum = V::default();
        for (_, value) in &self.entries {
            sum += *value;
        }
        sum
    }
}

impl<V: Serialize> Serialize for Tally<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, value)| (key, value)))
    }
}

/// Output format for the `report` subcommand.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument parsing.
///
/// # Examples
///
/// ```
/// use truckstat_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable Markdown summary.
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
}

impl OutputFormat {
    /// Suffix appended to the input stem when no output path is given.
    pub fn default_suffix(self) -> &'static str {
        match self {
            OutputFormat::Text => "_summary.md",
            OutputFormat::Json => "_summary.json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
