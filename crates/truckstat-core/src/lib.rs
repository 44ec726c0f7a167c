//! Core types, configuration, and error handling for truckstat.
//!
//! This crate provides the shared foundation used by the analysis and
//! report crates:
//! - [`TruckError`]: unified error type using `thiserror`
//! - [`TruckConfig`]: configuration loaded from `.truckstat.toml`
//! - The input model: [`ContributionDocument`], [`TreeNode`], [`NodeKind`]
//! - Shared value types: [`FileRecord`], [`Tally`], [`OutputFormat`]

mod config;
mod error;
mod tree;
mod types;

pub use config::{AnalysisConfig, ReportConfig, TruckConfig, DEFAULT_RECENT_THRESHOLD};
pub use error::TruckError;
pub use tree::{ContributionDocument, NodeKind, TreeNode, UnionedAuthors};
pub use types::{FileRecord, OutputFormat, Tally};

/// A convenience `Result` type for truckstat operations.
pub type Result<T> = std::result::Result<T, TruckError>;
