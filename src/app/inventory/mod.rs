//! 库存模块：产品的增删改查与库存调整

pub mod handler;
pub mod input;
pub mod model;
pub mod service;

pub use input::{CreateProductRequest, NumericInput, StockAdjustRequest, UpdateProductRequest};
pub use model::{InventoryDocument, Product, LOW_STOCK_THRESHOLD};
pub use service::ProductService;
