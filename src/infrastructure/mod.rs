//! 基础设施层：存储、数据库、日志

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
pub mod store;

use std::sync::Arc;
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};

pub use store::{FileStore, MemoryStore, ProductStore, StorageError};

/// 按配置打开存储后端；文件后端会在文档缺失时创建空文档
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn ProductStore>, StorageError> {
    match config.backend {
        StorageBackend::File => {
            let store = FileStore::new(&config.path);
            store.init().await?;
            info!("使用文件存储: {}", store.path().display());
            Ok(Arc::new(store))
        }
        #[cfg(feature = "database")]
        StorageBackend::Sqlite => {
            let store = database::SqliteStore::connect(&config.database_url).await?;
            info!("使用 SQLite 存储: {}", config.database_url);
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "database"))]
        StorageBackend::Sqlite => Err(StorageError::BackendDisabled("sqlite")),
    }
}
