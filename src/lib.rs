//! # WingsDash 库存管理
//!
//! 小型库存管理服务，包括：
//! - 基于 Axum 的产品增删改查与库存调整 HTTP 接口
//! - 以单个 JSON 文档作为存储的持久化层（可选 SQLite）
//! - 仪表盘 / 库存视图的客户端视图模型

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod ui;

pub use app::inventory::{InventoryDocument, Product, ProductService};
pub use config::Config;
pub use crate::core::error::CoreError;
pub use infrastructure::{FileStore, MemoryStore, ProductStore, StorageError};

use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 按配置启动 HTTP 服务，直到进程退出
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = infrastructure::open_store(&config.storage).await?;
    let service = ProductService::new(store);
    let app = app::router(
        service,
        Duration::from_secs(config.server.timeout_seconds),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("🚀 WingsDash 服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /products      - 获取所有产品");
    info!("   POST   /products      - 创建产品");
    info!("   PUT    /products/:id  - 更新产品");
    info!("   DELETE /products/:id  - 删除产品");
    info!("   POST   /stock/:id     - 调整库存");
    info!("   GET    /health        - 健康检查");

    axum::serve(listener, app).await?;
    Ok(())
}
