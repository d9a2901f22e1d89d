//! Local tree scanning.
//!
//! Walks the configured root and flattens it into the list of files to
//! mirror. Directories never produce entries of their own; an empty tree
//! is a valid (empty) result.

use crate::error::{SyncError, SyncResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub struct LocalScanner {
    root: PathBuf,
    follow_links: bool,
    continue_on_error: bool,
}

impl LocalScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
            continue_on_error: false,
        }
    }

    /// Follow symlinks while walking. Off by default.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Skip unreadable entries with a warning instead of aborting the scan.
    pub fn continue_on_error(mut self, skip: bool) -> Self {
        self.continue_on_error = skip;
        self
    }

    /// Returns the absolute paths of every regular file under the root.
    pub fn scan(&self) -> SyncResult<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(SyncError::InvalidRoot(self.root.clone()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(self.follow_links) {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    if self.continue_on_error {
                        warn!("skipping unreadable entry under {}: {err}", path.display());
                    } else {
                        return Err(SyncError::Scan { path, source: err });
                    }
                }
            }
        }

        debug!("scanned {} files under {}", files.len(), self.root.display());
        Ok(files)
    }
}
