//! Shared test helpers: an in-memory object store and local tree builders.
#![allow(dead_code)]

use async_trait::async_trait;
use bucketsync_core::error::{SyncError, SyncResult};
use bucketsync_core::store::{ObjectPage, ObjectStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// In-memory [`ObjectStore`] that records every call and supports
/// injecting failures per operation.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    objects: BTreeMap<String, Vec<u8>>,
    puts: Vec<String>,
    verify_calls: usize,
    list_calls: usize,
    delete_calls: Vec<Vec<String>>,
    fail_delete_calls: Vec<usize>,
    fail_verify: bool,
    fail_lists: bool,
    fail_puts: bool,
    page_limit: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects(keys: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            for key in keys {
                state.objects.insert(key.to_string(), Vec::new());
            }
        }
        store
    }

    /// Makes the delete call with this zero-based index fail.
    pub fn fail_delete_call(&self, call: usize) {
        self.state.lock().unwrap().fail_delete_calls.push(call);
    }

    pub fn fail_verify(&self) {
        self.state.lock().unwrap().fail_verify = true;
    }

    pub fn fail_lists(&self) {
        self.state.lock().unwrap().fail_lists = true;
    }

    pub fn fail_puts(&self) {
        self.state.lock().unwrap().fail_puts = true;
    }

    /// Caps the number of keys per listing page below whatever the
    /// caller requests, the way a provider is free to.
    pub fn set_page_limit(&self, limit: usize) {
        self.state.lock().unwrap().page_limit = Some(limit);
    }

    pub fn puts(&self) -> Vec<String> {
        self.state.lock().unwrap().puts.clone()
    }

    pub fn verify_calls(&self) -> usize {
        self.state.lock().unwrap().verify_calls
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn delete_calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().delete_calls.clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.state.lock().unwrap().objects.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.lock().unwrap().objects.contains_key(key)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn verify(&self) -> SyncResult<()> {
        let mut state = self.state.lock().unwrap();
        state.verify_calls += 1;
        if state.fail_verify {
            return Err(SyncError::Storage(
                "bucket unreachable for this test".into(),
            ));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        prefix: &str,
        marker: Option<&str>,
        max_keys: i32,
    ) -> SyncResult<ObjectPage> {
        let mut state = self.state.lock().unwrap();
        if state.fail_lists {
            return Err(SyncError::Storage("listing disabled for this test".into()));
        }
        state.list_calls += 1;

        let requested = max_keys.max(0) as usize;
        let max = state.page_limit.map_or(requested, |limit| limit.min(requested));
        let mut keys: Vec<String> = state
            .objects
            .keys()
            .filter(|key| prefix.is_empty() || key.starts_with(prefix))
            .filter(|key| marker.is_none_or(|m| key.as_str() > m))
            .take(max + 1)
            .cloned()
            .collect();
        let is_truncated = keys.len() > max;
        keys.truncate(max);
        let next_marker = keys.last().cloned();

        Ok(ObjectPage {
            keys,
            next_marker,
            is_truncated,
        })
    }

    async fn put_file(&self, key: &str, local_path: &Path) -> SyncResult<()> {
        {
            let state = self.state.lock().unwrap();
            if state.fail_puts {
                return Err(SyncError::Storage(format!("upload refused for {key}")));
            }
        }
        let data = std::fs::read(local_path)
            .map_err(|e| SyncError::Storage(format!("read {}: {e}", local_path.display())))?;
        let mut state = self.state.lock().unwrap();
        state.puts.push(key.to_string());
        state.objects.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete_batch(&self, keys: &[String]) -> SyncResult<Vec<String>> {
        let mut state = self.state.lock().unwrap();
        let call = state.delete_calls.len();
        state.delete_calls.push(keys.to_vec());
        if state.fail_delete_calls.contains(&call) {
            return Err(SyncError::Storage(format!("delete call {call} refused")));
        }
        for key in keys {
            state.objects.remove(key);
        }
        Ok(keys.to_vec())
    }
}

/// Builds a temp directory containing `files` as `(relative path, contents)`.
pub fn temp_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for (rel, contents) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, contents).expect("write tree file");
    }
    dir
}

/// Writes an allow-list file into `dir` and returns its path.
pub fn write_allow_list(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("env.yaml");
    std::fs::write(&path, contents).expect("write allow-list");
    path
}
