//! Upload reconciliation.
//!
//! The heart of a run. Every scanned local file is mapped to its remote
//! key and uploaded, with one exception: a key under the ignore-prefix
//! that already exists remotely keeps its remote copy. Each processed
//! key is cleared from the pending-deletion set; once all files are
//! handled, keys under the ignore-prefix are exempted wholesale and the
//! rest of the pending keys are deleted in batches.

use crate::deleter::{self, DELETE_BATCH_SIZE, DeleteReport};
use crate::error::{SyncError, SyncResult};
use crate::keyset::RemoteKeySet;
use crate::store::ObjectStore;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// What one reconciliation did, key by key.
#[derive(Clone, Debug, Default)]
pub struct SyncReport {
    /// Keys uploaded this run, in processing order.
    pub uploaded: Vec<String>,
    /// Local files skipped because their key already existed under the
    /// ignore-prefix.
    pub exempted: Vec<String>,
    /// Remote-only keys under the ignore-prefix that were spared from
    /// deletion.
    pub preserved: Vec<String>,
    /// Outcome of the delete phase.
    pub delete: DeleteReport,
}

/// Maps a scanned file to its remote key: the path relative to the local
/// root, slash-separated, with the sub-prefix prepended when one is
/// configured.
pub fn object_path(root: &Path, sub_prefix: Option<&str>, file: &Path) -> SyncResult<String> {
    let rel = file.strip_prefix(root).map_err(|_| {
        SyncError::Config(format!(
            "scanned file {} is not under the local root {}",
            file.display(),
            root.display()
        ))
    })?;

    let mut segments = Vec::new();
    for component in rel.components() {
        match component {
            // Lossy conversion could collapse two distinct names onto
            // one key, so non-UTF-8 names are rejected outright.
            Component::Normal(segment) => {
                let segment = segment.to_str().ok_or_else(|| {
                    SyncError::Config(format!(
                        "file name is not valid UTF-8: {}",
                        file.display()
                    ))
                })?;
                segments.push(segment.to_string());
            }
            other => {
                return Err(SyncError::Config(format!(
                    "unexpected path component {other:?} in {}",
                    file.display()
                )));
            }
        }
    }
    let key = segments.join("/");

    Ok(match sub_prefix {
        Some(prefix) => format!("{prefix}/{key}"),
        None => key,
    })
}

pub struct Reconciler<'a> {
    store: &'a dyn ObjectStore,
    local_root: &'a Path,
    sub_prefix: Option<&'a str>,
    ignore_prefix: Option<&'a str>,
}

impl<'a> Reconciler<'a> {
    pub fn new(store: &'a dyn ObjectStore, local_root: &'a Path) -> Self {
        Self {
            store,
            local_root,
            sub_prefix: None,
            ignore_prefix: None,
        }
    }

    /// Remote sub-prefix prepended to every local file's key. An empty
    /// prefix counts as unset.
    pub fn with_sub_prefix(mut self, prefix: Option<&'a str>) -> Self {
        self.sub_prefix = prefix.filter(|prefix| !prefix.is_empty());
        self
    }

    /// Key prefix whose objects are never deleted and never re-uploaded
    /// once present. An empty prefix counts as unset; it would match
    /// every key and turn the delete phase off entirely.
    pub fn with_ignore_prefix(mut self, prefix: Option<&'a str>) -> Self {
        self.ignore_prefix = prefix.filter(|prefix| !prefix.is_empty());
        self
    }

    /// Uploads `local_files`, then deletes whatever `remote` still flags
    /// as pending. Upload errors are fatal and leave the remote side
    /// untouched past the last successful put; delete batch errors are
    /// recorded in the report instead.
    pub async fn reconcile(
        &self,
        mut remote: RemoteKeySet,
        local_files: &[PathBuf],
    ) -> SyncResult<SyncReport> {
        let mut uploaded = Vec::new();
        let mut exempted = Vec::new();

        for file in local_files {
            let key = object_path(self.local_root, self.sub_prefix, file)?;

            // The exemption only applies to keys the lister actually saw;
            // a new file under the ignore-prefix still gets its first upload.
            if remote.contains(&key)
                && self
                    .ignore_prefix
                    .is_some_and(|prefix| key.starts_with(prefix))
            {
                debug!("{key} already present under ignore prefix, keeping remote copy");
                remote.mark_kept(&key);
                exempted.push(key);
                continue;
            }

            remote.mark_kept(&key);
            debug!("uploading {}", file.display());
            self.store.put_file(&key, file).await?;
            uploaded.push(key);
        }

        // Remote-only keys under the ignore-prefix survive the run even
        // though no local file claimed them.
        let preserved = match self.ignore_prefix {
            Some(prefix) => remote.exempt_prefix(prefix),
            None => Vec::new(),
        };

        let candidates = remote.deletion_candidates();
        let delete = deleter::delete_in_batches(self.store, &candidates, DELETE_BATCH_SIZE).await;

        info!(
            "reconciled {} local files: {} uploaded, {} exempted, {} preserved, {} deleted",
            local_files.len(),
            uploaded.len(),
            exempted.len(),
            preserved.len(),
            delete.deleted.len()
        );

        Ok(SyncReport {
            uploaded,
            exempted,
            preserved,
            delete,
        })
    }
}
