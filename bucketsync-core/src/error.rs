//! Error types for the sync engine.

use std::path::PathBuf;
use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Remote storage call failed (list, upload, or delete request).
    #[error("storage operation failed: {0}")]
    Storage(String),

    /// A directory entry could not be read while walking the local tree.
    #[error("scan failed under {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The configured local root does not exist or is not a directory.
    #[error("local root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// The allow-list file could not be read while a module gate was active.
    #[error("cannot read allow-list {}: {reason}", .path.display())]
    AllowList { path: PathBuf, reason: String },

    /// The allow-list file is not valid YAML.
    #[error("allow-list parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid or incomplete run configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
