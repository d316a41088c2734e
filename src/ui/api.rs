//! 客户端 API：视图模型通过该 trait 访问服务端

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::app::inventory::{
    CreateProductRequest, Product, StockAdjustRequest, UpdateProductRequest,
};
use crate::core::error::ErrorResponse;

/// 客户端错误类型
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("请求失败: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("服务端返回 {status}: {message}")]
    Status { status: u16, message: String },
    #[error("产品 {0} 不在本地列表中")]
    UnknownProduct(i64),
}

#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;

    async fn create_product(&self, input: &CreateProductRequest) -> Result<Product, ClientError>;

    async fn update_product(
        &self,
        id: i64,
        input: &UpdateProductRequest,
    ) -> Result<Product, ClientError>;

    async fn delete_product(&self, id: i64) -> Result<(), ClientError>;

    async fn adjust_stock(&self, id: i64, change: i64) -> Result<Product, ClientError>;
}

/// 基于 HTTP 的实现
#[derive(Debug, Clone)]
pub struct HttpInventoryApi {
    client: Client,
    base_url: String,
}

impl HttpInventoryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// 非 2xx 响应转换为 ClientError::Status，尽量取出服务端的错误信息
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.client.get(self.url("/products")).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn create_product(&self, input: &CreateProductRequest) -> Result<Product, ClientError> {
        let response = self
            .client
            .post(self.url("/products"))
            .json(input)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn update_product(
        &self,
        id: i64,
        input: &UpdateProductRequest,
    ) -> Result<Product, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/products/{}", id)))
            .json(input)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/products/{}", id)))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn adjust_stock(&self, id: i64, change: i64) -> Result<Product, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/stock/{}", id)))
            .json(&StockAdjustRequest { change })
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}
