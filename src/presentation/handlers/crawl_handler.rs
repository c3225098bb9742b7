// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::extract::{Extension, Json};
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::dto::crawl_request::{BatchCrawlRequestDto, CrawlRequestDto},
    application::use_cases::CrawlUseCase,
    domain::models::{BatchOutcome, CrawlOutcome},
    presentation::errors::AppError,
};

/// 爬取单个URL
///
/// 请求体校验失败返回400；抓取本身从不失败整个请求，
/// 所有抓取错误都体现在返回的结果体里
pub async fn crawl_single(
    Extension(crawler): Extension<Arc<CrawlUseCase>>,
    Json(payload): Json<CrawlRequestDto>,
) -> Result<Json<CrawlOutcome>, AppError> {
    payload.validate()?;

    let outcome = crawler
        .crawl_url(&payload.url, payload.extract_mode())
        .await;

    Ok(Json(outcome))
}

/// 并发爬取一批URL（最多10个）
///
/// 批量大小超限在任何抓取发起前被拒绝并返回400
pub async fn crawl_batch(
    Extension(crawler): Extension<Arc<CrawlUseCase>>,
    Json(payload): Json<BatchCrawlRequestDto>,
) -> Result<Json<BatchOutcome>, AppError> {
    payload.validate()?;

    let batch = crawler
        .crawl_batch(&payload.urls, payload.extract_mode())
        .await?;

    Ok(Json(batch))
}
