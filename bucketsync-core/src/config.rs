//! Run configuration and remote path handling.

use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything one sync run needs: where to read, where to write, and
/// whether the module gate applies.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Local directory whose files are mirrored to the bucket.
    pub local_root: PathBuf,
    /// Remote key prefix exempt from deletion and from re-upload once present.
    pub ignore_prefix: Option<String>,
    /// Remote target, either `bucket` or `bucket/sub/prefix`.
    pub remote_path: String,
    /// Object-storage endpoint URL.
    pub endpoint: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    /// Signing region for the endpoint.
    #[serde(default = "default_region")]
    pub region: String,
    /// When set, the run only proceeds if this name appears in the allow-list.
    pub module_name: Option<String>,
    /// YAML allow-list consulted when `module_name` is set.
    #[serde(default = "default_allow_list_path")]
    pub allow_list_path: PathBuf,
    /// Warn and skip unreadable local entries instead of aborting the run.
    #[serde(default)]
    pub skip_scan_errors: bool,
    /// Follow symlinks while scanning the local tree.
    #[serde(default)]
    pub follow_links: bool,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_allow_list_path() -> PathBuf {
    PathBuf::from("env.yaml")
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            local_root: PathBuf::from("dist"),
            ignore_prefix: None,
            remote_path: String::new(),
            endpoint: String::new(),
            access_key_id: String::new(),
            access_key_secret: String::new(),
            region: default_region(),
            module_name: None,
            allow_list_path: default_allow_list_path(),
            skip_scan_errors: false,
            follow_links: false,
        }
    }
}

impl SyncConfig {
    /// Checks that every field a run depends on is present and well formed.
    pub fn validate(&self) -> SyncResult<()> {
        if self.local_root.as_os_str().is_empty() {
            return Err(SyncError::Config("local root is required".to_string()));
        }
        if self.endpoint.is_empty() {
            return Err(SyncError::Config("storage endpoint is required".to_string()));
        }
        if self.access_key_id.is_empty() || self.access_key_secret.is_empty() {
            return Err(SyncError::Config(
                "access key id and secret are required".to_string(),
            ));
        }
        RemotePath::parse(&self.remote_path)?;
        Ok(())
    }
}

/// A parsed remote target: the bucket name plus an optional sub-prefix
/// that scopes every operation of the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemotePath {
    pub bucket: String,
    pub prefix: Option<String>,
}

impl RemotePath {
    /// Splits `bucket/sub/prefix` at the first slash. Everything after it
    /// becomes the sub-prefix; surrounding slashes are trimmed and an empty
    /// remainder means the whole bucket is in scope.
    pub fn parse(path: &str) -> SyncResult<Self> {
        let (bucket, rest) = match path.split_once('/') {
            Some((bucket, rest)) => (bucket, Some(rest)),
            None => (path, None),
        };
        if bucket.is_empty() {
            return Err(SyncError::Config(format!(
                "remote path {path:?} has no bucket name"
            )));
        }
        let prefix = rest
            .map(|r| r.trim_matches('/'))
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        Ok(Self {
            bucket: bucket.to_string(),
            prefix,
        })
    }
}
