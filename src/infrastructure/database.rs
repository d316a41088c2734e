//! 数据库基础设施
//!
//! SQLite 后端：同样实现整体读取 / 整体回写，回写在单个事务中完成。
//! 文档中 `products` 以外的顶层字段不会保存在数据库里。

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::store::{ProductStore, StorageError};
use crate::app::inventory::model::{InventoryDocument, Product};

type ProductRow = (i64, String, String, String, f64, i64);

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        info!("连接数据库: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // SQLite 只有一个写者；内存库也要求所有查询落在同一个连接上
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(8))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.create_tables().await?;
        Ok(store)
    }

    async fn create_tables(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY,
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                price REAL NOT NULL,
                quantity INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn load(&self) -> Result<InventoryDocument, StorageError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, category, price, quantity FROM products ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;

        let products = rows
            .into_iter()
            .map(
                |(id, name, description, category, price, quantity)| Product {
                    id,
                    name,
                    description,
                    category,
                    price,
                    quantity,
                },
            )
            .collect();

        Ok(InventoryDocument::new(products))
    }

    async fn save(&self, document: &InventoryDocument) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM products").execute(&mut *tx).await?;

        for (position, product) in document.products.iter().enumerate() {
            sqlx::query(
                "INSERT INTO products (id, position, name, description, category, price, quantity) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(product.id)
            .bind(position as i64)
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.category)
            .bind(product.price)
            .bind(product.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: "d".to_string(),
            category: "c".to_string(),
            price: 1.25,
            quantity: 4,
        }
    }

    #[tokio::test]
    async fn test_sqlite_store_round_trip_keeps_order() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        assert!(store.load().await.unwrap().products.is_empty());

        let doc = InventoryDocument::new(vec![product(30, "c"), product(10, "a"), product(20, "b")]);
        store.save(&doc).await.unwrap();
        assert_eq!(store.load().await.unwrap().products, doc.products);

        let doc = InventoryDocument::new(vec![product(10, "a")]);
        store.save(&doc).await.unwrap();
        assert_eq!(store.load().await.unwrap().products, doc.products);
    }
}
