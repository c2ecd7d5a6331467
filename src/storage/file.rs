//! Directory-backed key-value store.
//!
//! Each key is a `<key>.json` file. Writes go to a hidden temp file first and
//! are renamed into place, so a crash never leaves a half-written record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::interfaces::kv_store::{KeyValueStore, Result, StoreError, WriteOp};

const RECORD_EXTENSION: &str = "json";

/// Key-value store keeping one file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys are restricted to `[A-Za-z0-9_-]` so they map onto file names.
    fn record_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", key, RECORD_EXTENSION)))
    }

    fn staging_path(&self, key: &str, slot: usize) -> PathBuf {
        self.dir.join(format!(".{}.{}.{}.tmp", key, RECORD_EXTENSION, slot))
    }

    async fn stage(&self, key: &str, slot: usize, value: &str) -> Result<PathBuf> {
        let staged = self.staging_path(key, slot);
        fs::write(&staged, value).await?;
        Ok(staged)
    }

    async fn discard_staged(staged: &[Option<PathBuf>]) {
        for tmp in staged.iter().flatten() {
            if let Err(e) = fs::remove_file(tmp).await {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = %tmp.display(), error = %e, "Failed to remove staged record");
                }
            }
        }
    }

    async fn remove_record(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let path = self.record_path(key)?;
        let staged = self.stage(key, 0, &value).await?;
        fs::rename(&staged, &path).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.record_path(key)?;
        self.remove_record(&path).await
    }

    /// Stages every put before touching any record, so a staging failure
    /// leaves all records as they were.
    ///
    /// The commit phase renames and removes in reverse batch order. If it
    /// fails part way, ops later in the batch may have landed but the first
    /// op never has. When a key repeats, only its last op applies.
    async fn write_batch(&self, ops: Vec<WriteOp>) -> Result<()> {
        let mut targets = Vec::with_capacity(ops.len());
        for op in &ops {
            targets.push(self.record_path(op.key())?);
        }
        let live: Vec<bool> = (0..ops.len())
            .map(|i| !ops[i + 1..].iter().any(|later| later.key() == ops[i].key()))
            .collect();

        let mut staged: Vec<Option<PathBuf>> = Vec::with_capacity(ops.len());
        for (slot, op) in ops.iter().enumerate() {
            let tmp = match op {
                WriteOp::Put { key, value } if live[slot] => {
                    match self.stage(key, slot, value).await {
                        Ok(tmp) => Some(tmp),
                        Err(e) => {
                            Self::discard_staged(&staged).await;
                            return Err(e);
                        }
                    }
                }
                _ => None,
            };
            staged.push(tmp);
        }

        for slot in (0..ops.len()).rev() {
            if !live[slot] {
                continue;
            }
            let applied = match &staged[slot] {
                Some(tmp) => fs::rename(tmp, &targets[slot]).await.map_err(StoreError::from),
                None => self.remove_record(&targets[slot]).await,
            };
            if let Err(e) = applied {
                Self::discard_staged(&staged[..=slot]).await;
                return Err(e);
            }
        }
        Ok(())
    }
}
