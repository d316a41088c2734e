//! 应用层：路由组装

pub mod inventory;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use inventory::handler::{self, AppState};
use inventory::ProductService;

/// 创建路由
///
/// | 方法 | 路径 | 说明 |
/// |------|------|------|
/// | GET | /products | 获取全部产品 |
/// | POST | /products | 创建产品 |
/// | PUT | /products/:id | 更新产品 |
/// | DELETE | /products/:id | 删除产品 |
/// | POST | /stock/:id | 调整库存 |
/// | GET | /health | 健康检查 |
pub fn router(product_service: ProductService, timeout: Duration) -> Router {
    let state = AppState { product_service };

    Router::new()
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/products/:id",
            put(handler::update_product).delete(handler::delete_product),
        )
        .route("/stock/:id", post(handler::adjust_stock))
        .route("/health", get(handler::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(TimeoutLayer::new(timeout))
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
