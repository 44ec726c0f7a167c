use std::path::PathBuf;

/// Errors that can occur while loading or reporting on a contribution document.
///
/// Library crates use this type directly; the binary crate converts to
/// `miette` diagnostics at the boundary.
///
/// # Examples
///
/// ```
/// use truckstat_core::TruckError;
///
/// let err = TruckError::Config("top_files must be positive".into());
/// assert!(err.to_string().contains("top_files"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TruckError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The input document does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input document exists but is not a valid contribution document.
    #[error("malformed document {}: {source}", path.display())]
    Malformed {
        /// Path of the rejected document.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
