// file: src/store/file.rs
// description: JSON-file backed key-value store with atomic rewrites
// reference: https://docs.rs/serde_json

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists every entry in one JSON object file.
///
/// The file is the source of truth: it is re-read on every access so that
/// two processes sharing it see each other's writes, the way tabs share
/// local storage. A file that does not parse is reported as corrupt and is
/// never overwritten.
#[derive(Debug, Clone)]
pub struct FileStore {
    storage_path: PathBuf,
}

impl FileStore {
    pub fn open(storage_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let storage_path = storage_path.into();

        if let Some(parent) = storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        Ok(Self { storage_path })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    fn read_entries(&self) -> StoreResult<BTreeMap<String, String>> {
        if !self.storage_path.exists() {
            debug!("No store file at {:?}", self.storage_path);
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.storage_path).map_err(|source| StoreError::Io {
            path: self.storage_path.clone(),
            source,
        })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            path: self.storage_path.clone(),
            message: e.to_string(),
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let contents = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Corrupt {
            path: self.storage_path.clone(),
            message: e.to_string(),
        })?;

        write_atomic(&self.storage_path, &contents).map_err(|source| StoreError::Io {
            path: self.storage_path.clone(),
            source,
        })?;

        debug!(
            "Saved {} store entries to {:?}",
            entries.len(),
            self.storage_path
        );
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// First sibling temp path that does not exist yet, so a stale or foreign
/// `.tmp` file next to the store is never clobbered.
fn unique_tmp_path(path: &Path) -> PathBuf {
    let mut candidate = path.with_extension("tmp");
    let mut counter = 1;
    while candidate.exists() {
        candidate = path.with_extension(format!("tmp{counter}"));
        counter += 1;
    }
    candidate
}

fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp_path = unique_tmp_path(path);
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    Ok(())
}
