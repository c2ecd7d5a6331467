//! Key-value storage interface.

use async_trait::async_trait;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid record key: {0:?}")]
    InvalidKey(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// One write inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put { key: String, value: String },
    Delete { key: String },
}

impl WriteOp {
    pub fn put(key: impl Into<String>, value: impl Into<String>) -> Self {
        WriteOp::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        WriteOp::Delete { key: key.into() }
    }

    pub fn key(&self) -> &str {
        match self {
            WriteOp::Put { key, .. } | WriteOp::Delete { key } => key,
        }
    }
}

/// Interface for record persistence.
///
/// Values are opaque strings; callers serialize records themselves.
///
/// Implementations:
/// - `MemoryStore`: process memory, lost on exit
/// - `FileStore`: one file per key in a directory
/// - `SqliteStore`: a single SQLite table
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing keys are `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value.
    async fn put(&self, key: &str, value: String) -> Result<()>;

    /// Remove a key. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Apply several writes in order; a key written twice keeps its last op.
    ///
    /// `MemoryStore` and `SqliteStore` apply every op or, on error, none.
    /// `FileStore` commits in reverse order, so on error the first op is
    /// never applied. Callers put the record that marks completion first.
    async fn write_batch(&self, ops: Vec<WriteOp>) -> Result<()>;
}
