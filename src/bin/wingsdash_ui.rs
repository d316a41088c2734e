//! WingsDash 终端客户端
//!
//! 每次运行先拉取一次产品列表，执行一个操作，然后打印对应视图。

use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use wingsdash::infrastructure::logger::init_console_logging;
use wingsdash::ui::{FormField, HttpInventoryApi, InventoryApp, View};

#[derive(Parser)]
#[command(name = "wingsdash-ui", version, about = "WingsDash 库存客户端")]
struct Cli {
    /// 服务端地址
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server: String,

    /// 日志级别
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// 仪表盘统计
    Dashboard,
    /// 库存列表
    Inventory,
    /// 销售（占位）
    Sales,
    /// 客户（占位）
    Customer,
    /// 报表（占位）
    Reporting,
    /// 新增产品
    Add(ProductFields),
    /// 编辑产品，未指定的字段保持原值
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// 删除产品
    Delete {
        id: i64,
        /// 跳过确认
        #[arg(long)]
        yes: bool,
    },
    /// 调整库存（可为负数）
    Stock {
        id: i64,
        #[arg(allow_hyphen_values = true)]
        change: i64,
    },
}

#[derive(Args)]
struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
}

impl ProductFields {
    fn apply(self, app: &mut InventoryApp<HttpInventoryApi>) {
        let fields = [
            (FormField::Name, self.name),
            (FormField::Description, self.description),
            (FormField::Category, self.category),
            (FormField::Price, self.price),
            (FormField::Quantity, self.quantity),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                app.set_field(field, value);
            }
        }
    }
}

fn confirm_delete(id: i64) -> bool {
    print!("Are you sure you want to delete product {}? [y/N] ", id);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_console_logging(&cli.log_level)?;

    let mut app = InventoryApp::new(HttpInventoryApi::new(cli.server));
    app.mount().await;

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => app.navigate(View::Dashboard),
        Command::Inventory => app.navigate(View::Inventory),
        Command::Sales => app.navigate(View::Sales),
        Command::Customer => app.navigate(View::Customer),
        Command::Reporting => app.navigate(View::Reporting),
        Command::Add(fields) => {
            app.navigate(View::Inventory);
            app.open_add_form();
            fields.apply(&mut app);
            app.submit_form().await?;
        }
        Command::Edit { id, fields } => {
            app.navigate(View::Inventory);
            app.open_edit_form(id)?;
            fields.apply(&mut app);
            app.submit_form().await?;
        }
        Command::Delete { id, yes } => {
            app.navigate(View::Inventory);
            app.delete_product(id, |id| yes || confirm_delete(id))
                .await?;
        }
        Command::Stock { id, change } => {
            app.navigate(View::Inventory);
            app.adjust_stock(id, change).await?;
        }
    }

    println!("{}", app.render());
    Ok(())
}
