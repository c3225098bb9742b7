// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::CrawlUseCase;
use crate::presentation::handlers::crawl_handler;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `crawler` - 爬取用例
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(crawler: Arc<CrawlUseCase>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/v1/crawl", post(crawl_handler::crawl_single))
        .route("/v1/crawl/batch", post(crawl_handler::crawl_batch))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(crawler))
}

/// 健康检查端点
///
/// 独立于爬取核心，浏览器不可用时依然返回成功
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
