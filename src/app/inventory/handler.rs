//! 库存处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use super::{
    input::{CreateProductRequest, StockAdjustRequest, UpdateProductRequest},
    model::Product,
    service::ProductService,
};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

/// 路径中的产品 id；无法解析为整数的 id 视为不存在的产品
fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn existing_id(raw: &str) -> Result<i64, CoreError> {
    parse_id(raw).ok_or_else(|| CoreError::NotFound(format!("产品 {} 不存在", raw)))
}

/// 获取全部产品
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = state.product_service.list_products().await?;
    Ok(Json(products))
}

/// 创建新产品
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let Json(payload) = payload?;
    let product = state.product_service.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// 更新产品（部分字段）
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    let id = existing_id(&raw)?;
    let Json(payload) = payload?;
    let product = state.product_service.update_product(id, payload).await?;
    Ok(Json(product))
}

/// 删除产品
pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<StatusCode, CoreError> {
    if let Some(id) = parse_id(&raw) {
        state.product_service.delete_product(id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// 调整库存
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    payload: Result<Json<StockAdjustRequest>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    let id = existing_id(&raw)?;
    let Json(payload) = payload?;
    let product = state
        .product_service
        .adjust_stock(id, payload.change)
        .await?;
    Ok(Json(product))
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let storage = match state.product_service.list_products().await {
        Ok(products) => serde_json::json!({
            "status": "connected",
            "type": state.product_service.backend(),
            "products_count": products.len()
        }),
        // 故障细节已由错误转换写入日志
        Err(_) => serde_json::json!({
            "status": "unavailable",
            "type": state.product_service.backend()
        }),
    };

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "storage": storage
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_numeric_id_is_absent() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);

        let err = existing_id("abc").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
