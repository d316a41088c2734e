//! 库存业务服务
//!
//! 每个操作都是一次完整的 读取 → 内存修改 → 回写 周期。
//! 同一进程内的修改操作由 `write_lock` 串行化，避免相互覆盖。

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use validator::Validate;

use super::input::{CreateProductRequest, InputError, UpdateProductRequest};
use super::model::Product;
use crate::core::error::CoreError;
use crate::infrastructure::ProductStore;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    write_lock: Arc<Mutex<()>>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.store.load().await?.products)
    }

    pub async fn create_product(&self, input: CreateProductRequest) -> Result<Product, CoreError> {
        input.validate()?;
        let price = input.price.as_price()?;
        let quantity = input.quantity.as_quantity()?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let product = Product {
            id: document.next_id(chrono::Utc::now().timestamp_millis()),
            name: input.name,
            description: input.description,
            category: input.category,
            price,
            quantity,
        };
        document.products.push(product.clone());
        self.store.save(&document).await?;

        info!("创建产品 {} ({})", product.id, product.name);
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: i64,
        input: UpdateProductRequest,
    ) -> Result<Product, CoreError> {
        input.validate()?;
        let price = input.price.as_ref().map(|p| p.as_price()).transpose()?;
        let quantity = input.quantity.as_ref().map(|q| q.as_quantity()).transpose()?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let product = document
            .find_mut(id)
            .ok_or_else(|| CoreError::product_not_found(id))?;

        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(description) = input.description {
            product.description = description;
        }
        if let Some(category) = input.category {
            product.category = category;
        }
        if let Some(price) = price {
            product.price = price;
        }
        if let Some(quantity) = quantity {
            product.quantity = quantity;
        }

        let updated = product.clone();
        self.store.save(&document).await?;

        info!("更新产品 {}", id);
        Ok(updated)
    }

    /// 删除产品；id 不存在时视为成功，不回写
    pub async fn delete_product(&self, id: i64) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        if document.remove(id) {
            self.store.save(&document).await?;
            info!("删除产品 {}", id);
        } else {
            debug!("删除的产品 {} 不存在，忽略", id);
        }
        Ok(())
    }

    /// 调整库存：数量可以变为负数，不做上下限截断
    pub async fn adjust_stock(&self, id: i64, change: i64) -> Result<Product, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let product = document
            .find_mut(id)
            .ok_or_else(|| CoreError::product_not_found(id))?;

        product.quantity =
            product
                .quantity
                .checked_add(change)
                .ok_or(InputError::StockOverflow {
                    quantity: product.quantity,
                    change,
                })?;

        let updated = product.clone();
        self.store.save(&document).await?;

        info!("产品 {} 库存调整 {:+}，当前 {}", id, change, updated.quantity);
        Ok(updated)
    }
}
