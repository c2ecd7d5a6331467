//! Storage implementations.

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageConfig, StorageType};
use crate::interfaces::{KeyValueStore, StoreError};

pub mod memory;

#[cfg(feature = "file")]
pub mod file;

#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStore;

#[cfg(feature = "file")]
pub use file::FileStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Initialize storage based on configuration.
pub async fn init_storage(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    info!("Storage: {:?} at {}", config.storage_type, config.path);

    match config.storage_type {
        StorageType::Memory => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "file")]
        StorageType::File => Ok(Arc::new(FileStore::open(&config.path).await?)),
        #[cfg(not(feature = "file"))]
        StorageType::File => {
            tracing::error!("File storage requested but 'file' feature is not enabled");
            Err(StoreError::Unavailable("file feature not enabled".to_string()))
        }
        #[cfg(feature = "sqlite")]
        StorageType::Sqlite => {
            if let Some(parent) = std::path::Path::new(&config.path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            let pool =
                sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.path)).await?;

            let store = SqliteStore::new(pool);
            store.init().await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageType::Sqlite => {
            tracing::error!("SQLite storage requested but 'sqlite' feature is not enabled");
            Err(StoreError::Unavailable("sqlite feature not enabled".to_string()))
        }
    }
}
