//! 库存客户端：视图模型、HTTP API 和文本视图

pub mod api;
pub mod state;
pub mod view;

pub use api::{ClientError, HttpInventoryApi, InventoryApi};
pub use state::{FormField, InventoryApp, ProductForm, View};
pub use view::DashboardStats;
