//! File-backed KvStore implementation.
//!
//! One JSON file per key under a base directory. Filenames are the
//! hex-encoded key: hex encodes bytes in order, so a string prefix of the
//! key is a string prefix of the filename and prefix scans can filter on
//! names without opening files. Durability is best-effort only.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::warn;

use crate::error::StoreError;
use crate::store::KvStore;

const FILE_EXT: &str = "json";

pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `base_dir`, creating the directory if needed.
    pub async fn open(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}.{FILE_EXT}", hex::encode(key)))
    }

    fn key_from_path(path: &Path) -> Result<Option<String>, StoreError> {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return Ok(None);
        };
        if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXT) {
            return Ok(None);
        }
        let bytes = hex::decode(stem)
            .map_err(|_| StoreError::CorruptedKey(stem.to_owned()))?;
        let key = String::from_utf8(bytes)
            .map_err(|_| StoreError::CorruptedKey(stem.to_owned()))?;
        Ok(Some(key))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&value)?;
        fs::write(self.path_for(key), bytes).await?;
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let name_prefix = hex::encode(prefix);
        let mut hits = Vec::new();

        let mut dir = fs::read_dir(&self.base_dir).await?;
        while let Some(dirent) = dir.next_entry().await? {
            let path = dirent.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !stem.starts_with(&name_prefix) {
                continue;
            }
            // A foreign or corrupt file must not take down the whole scan;
            // skip it and keep the rest, matching the per-record discard
            // semantics further up.
            let key = match Self::key_from_path(&path) {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable key in scan");
                    continue;
                }
            };
            let value = match fs::read(&path).await {
                Ok(bytes) => match serde_json::from_slice(&bytes) {
                    Ok(value) => value,
                    Err(err) => {
                        warn!(key, error = %err, "skipping unparseable value in scan");
                        continue;
                    }
                },
                Err(err) => {
                    warn!(key, error = %err, "skipping unreadable file in scan");
                    continue;
                }
            };
            hits.push((key, value));
        }

        // read_dir order is platform-defined; sort for a stable scan order.
        hits.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(hits)
    }
}
