//! 产品存储基础设施
//!
//! 整个产品集合作为一个 JSON 文档读写：每次请求完整读取，
//! 每次修改完整回写。不做索引，也不做局部写入。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::app::inventory::model::InventoryDocument;

/// 存储错误类型
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("数据文档不存在: {path}")]
    Missing { path: String },
    #[error("数据文档读写失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("数据文档解析失败 {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("数据文档序列化失败: {0}")]
    Serialize(serde_json::Error),
    #[error("存储后端 {0} 未启用，请使用 --features database 编译")]
    BackendDisabled(&'static str),
    #[cfg(feature = "database")]
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

/// 存储抽象：整体读取、整体回写
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn load(&self) -> Result<InventoryDocument, StorageError>;

    async fn save(&self, document: &InventoryDocument) -> Result<(), StorageError>;

    /// 存储后端名称，用于健康检查和日志
    fn backend(&self) -> &'static str;
}

/// 基于单个 JSON 文件的存储
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 启动时调用：文档不存在则创建空文档，已存在则不做任何修改
    pub async fn init(&self) -> Result<(), StorageError> {
        if tokio::fs::try_exists(&self.path).await? {
            debug!("数据文档已存在: {}", self.path.display());
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        self.save(&InventoryDocument::default()).await?;
        info!("已创建空数据文档: {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "db.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ProductStore for FileStore {
    async fn load(&self) -> Result<InventoryDocument, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::Missing {
                    path: self.path.display().to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    async fn save(&self, document: &InventoryDocument) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(document).map_err(StorageError::Serialize)?;

        // 先写临时文件再重命名，读者不会看到写了一半的文档
        let temp = self.temp_path();
        tokio::fs::write(&temp, content).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!(
            "已写入 {} 个产品到 {}",
            document.products.len(),
            self.path.display()
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

/// 内存存储，测试时替代文件存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<Option<InventoryDocument>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_document(InventoryDocument::default())
    }

    pub fn with_document(document: InventoryDocument) -> Self {
        Self {
            document: RwLock::new(Some(document)),
            saves: AtomicUsize::new(0),
        }
    }

    /// 模拟文档缺失：load 会返回 `StorageError::Missing`
    pub fn missing() -> Self {
        Self::default()
    }

    /// 成功执行的 save 次数
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn load(&self) -> Result<InventoryDocument, StorageError> {
        self.document
            .read()
            .await
            .clone()
            .ok_or_else(|| StorageError::Missing {
                path: "memory".to_string(),
            })
    }

    async fn save(&self, document: &InventoryDocument) -> Result<(), StorageError> {
        *self.document.write().await = Some(document.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::inventory::model::Product;
    use tempfile::tempdir;

    fn sample() -> Product {
        Product {
            id: 1,
            name: "Bun".to_string(),
            description: "soft".to_string(),
            category: "Bakery".to_string(),
            price: 5.5,
            quantity: 20,
        }
    }

    #[tokio::test]
    async fn test_file_store_save_load() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("db.json"));

        let doc = InventoryDocument::new(vec![sample()]);
        store.save(&doc).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, doc);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_file_store_missing_document() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Missing { .. }));
    }

    #[tokio::test]
    async fn test_file_store_malformed_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_file_store_init_creates_once() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data").join("db.json"));

        store.init().await.unwrap();
        assert!(store.load().await.unwrap().products.is_empty());

        store
            .save(&InventoryDocument::new(vec![sample()]))
            .await
            .unwrap();
        store.init().await.unwrap();
        assert_eq!(store.load().await.unwrap().products.len(), 1);
    }

    #[tokio::test]
    async fn test_file_store_preserves_extra_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, r#"{"products": [], "sales": [1, 2]}"#).unwrap();

        let store = FileStore::new(&path);
        let mut doc = store.load().await.unwrap();
        doc.products.push(sample());
        store.save(&doc).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["sales"], serde_json::json!([1, 2]));
        assert_eq!(raw["products"][0]["name"], "Bun");
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::missing();
        assert!(store.load().await.is_err());

        store.save(&InventoryDocument::default()).await.unwrap();
        assert!(store.load().await.unwrap().products.is_empty());
        assert_eq!(store.save_count(), 1);
    }
}
