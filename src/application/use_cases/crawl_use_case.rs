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

use crate::config::settings::CrawlerSettings;
use crate::domain::models::{BatchOutcome, CrawlOutcome, CrawlTarget, ExtractMode};
use crate::engines::traits::{EngineError, RenderContext, RenderGateway};
use crate::engines::validators;
use crate::extraction::{ContentExtractor, ExtractionError, GENERIC_STRIP_TAGS, SCRIPT_STYLE_TAGS};
use futures::future;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// 批量爬取错误
///
/// 结构性校验错误，在任何抓取发起前返回；
/// 单个URL的失败从不以错误形式上抛，而是体现在各自的结果里
#[derive(Error, Debug)]
pub enum BatchError {
    /// 批量URL数量超过上限
    #[error("Maximum {max} URLs per batch, got {actual}")]
    TooLarge { max: usize, actual: usize },
}

/// 单次抓取流水线内部错误
#[derive(Error, Debug)]
enum FetchError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Content exceeds {0} bytes")]
    ContentTooLarge(usize),
}

/// 爬取用例
///
/// 驱动单个URL走完 分类 → 渲染 → 尺寸检查 → 提取 的流水线，
/// 并将批量请求并发分发到各个独立抓取。渲染网关在构造时注入，
/// 生命周期由进程入口负责
pub struct CrawlUseCase {
    gateway: Arc<dyn RenderGateway>,
    extractor: ContentExtractor,
    settings: CrawlerSettings,
}

impl CrawlUseCase {
    /// 创建新的爬取用例
    ///
    /// # 参数
    ///
    /// * `gateway` - 进程级共享的渲染网关
    /// * `settings` - 爬取器配置
    pub fn new(gateway: Arc<dyn RenderGateway>, settings: CrawlerSettings) -> Self {
        Self {
            gateway,
            extractor: ContentExtractor::new(),
            settings,
        }
    }

    /// 爬取单个URL
    ///
    /// 从不向调用方返回错误，所有失败模式都封装为 `success=false` 的结果。
    /// 每次调用都独立执行URL安全分类，不缓存裁决
    pub async fn crawl_url(&self, raw_url: &str, extract_mode: ExtractMode) -> CrawlOutcome {
        // 每次尝试恰好计一次请求，被分类器拒绝的也算
        counter!("crawl_requests_total").increment(1);

        let verdict = validators::classify(raw_url).await;
        if !verdict.allowed {
            let reason = verdict.reason.unwrap_or_else(|| "rejected".to_string());
            warn!("Rejected unsafe URL {}: {}", raw_url, reason);
            counter!("crawl_failures_total").increment(1);
            return CrawlOutcome::failure(raw_url, format!("Unsafe URL: {}", reason));
        }

        let target = match CrawlTarget::new(raw_url, extract_mode) {
            Ok(target) => target,
            Err(e) => {
                counter!("crawl_failures_total").increment(1);
                return CrawlOutcome::failure(raw_url, format!("Invalid URL: {}", e));
            }
        };

        self.fetch_one(target).await
    }

    /// 批量爬取多个URL
    ///
    /// 所有URL并发抓取，结果顺序与输入一致，单个URL的失败或超时
    /// 不影响其他URL的结果
    ///
    /// # 返回值
    ///
    /// * `Ok(BatchOutcome)` - 聚合后的批量结果
    /// * `Err(BatchError)` - 批量大小超限，未发起任何抓取
    pub async fn crawl_batch(
        &self,
        urls: &[String],
        extract_mode: ExtractMode,
    ) -> Result<BatchOutcome, BatchError> {
        if urls.len() > self.settings.max_batch_size {
            return Err(BatchError::TooLarge {
                max: self.settings.max_batch_size,
                actual: urls.len(),
            });
        }

        counter!("crawl_batch_requests_total").increment(1);

        // join_all preserves input order regardless of completion order
        let fetches = urls.iter().map(|url| self.crawl_url(url, extract_mode));
        let results = future::join_all(fetches).await;

        Ok(BatchOutcome::from_results(results))
    }

    /// 执行单个目标的抓取流水线
    async fn fetch_one(&self, target: CrawlTarget) -> CrawlOutcome {
        let url = target.url().to_string();
        let started = Instant::now();

        let context = match self.gateway.new_context().await {
            Ok(context) => context,
            Err(e) => {
                counter!("crawl_failures_total").increment(1);
                return CrawlOutcome::failure(url, e.to_string());
            }
        };

        let rendered = tokio::time::timeout(
            self.settings.request_timeout(),
            self.render_and_extract(context.as_ref(), &target),
        )
        .await;

        // 无论成功、失败还是超时，上下文都在此处释放
        context.close().await;

        histogram!("crawl_duration_seconds").record(started.elapsed().as_secs_f64());

        let outcome = match rendered {
            Err(_elapsed) => CrawlOutcome::failure(url, "Request timed out"),
            Ok(Err(e)) => CrawlOutcome::failure(url, e.to_string()),
            Ok(Ok((title, content))) => CrawlOutcome::success(url, title, content),
        };

        if outcome.success {
            debug!(
                "Crawled {} ({} chars in {}ms)",
                outcome.url,
                outcome.content_length,
                started.elapsed().as_millis()
            );
        } else {
            counter!("crawl_failures_total").increment(1);
            debug!("Crawl of {} failed: {:?}", outcome.url, outcome.error);
        }

        outcome
    }

    /// 渲染页面并提取文本
    async fn render_and_extract(
        &self,
        context: &dyn RenderContext,
        target: &CrawlTarget,
    ) -> Result<(Option<String>, String), FetchError> {
        context.navigate(target.url().as_str()).await?;

        let html = context.html().await?;
        if html.len() > self.settings.max_content_bytes {
            return Err(FetchError::ContentTooLarge(self.settings.max_content_bytes));
        }

        // 页面标题作为后备，正文提取出的标题优先
        let mut title = context.title().await?;

        let content = match target.extract_mode() {
            ExtractMode::MainContent => match self.extractor.extract_main(&html) {
                Ok(extracted) => {
                    if extracted.title.is_some() {
                        title = extracted.title;
                    }
                    extracted.text
                }
                // 正文提取失败时显式降级为通用提取，不上抛错误
                Err(ExtractionError::NoContent) => {
                    self.extractor.strip_and_get_text(&html, GENERIC_STRIP_TAGS)
                }
            },
            ExtractMode::FullText => self.extractor.strip_and_get_text(&html, SCRIPT_STYLE_TAGS),
        };

        Ok((title, content))
    }
}
