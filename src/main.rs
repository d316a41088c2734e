//! WingsDash 库存服务
//!
//! ```bash
//! wingsdash                          # 默认监听 127.0.0.1:5000，数据文件 db.json
//! wingsdash --config wingsdash.toml  # 使用配置文件
//! wingsdash --data ./data/db.json --port 5050
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use wingsdash::config::Config;
use wingsdash::infrastructure::logger::init_logging;

#[derive(Parser)]
#[command(name = "wingsdash", version, about = "WingsDash 库存管理服务")]
struct Cli {
    /// 配置文件路径（TOML）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 覆盖配置中的端口
    #[arg(long)]
    port: Option<u16>,

    /// 覆盖配置中的数据文档路径
    #[arg(long)]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(data) = cli.data {
        config.storage.path = data;
    }
    config.validate()?;

    // 初始化日志
    let _guard = init_logging(&config.logging)?;

    info!("启动 WingsDash 库存服务...");
    wingsdash::run(config).await
}
