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

use super::helpers::stub_gateway::{StubGateway, StubPage};
use super::helpers::{crawler_with, test_settings};
use axum::http::StatusCode;
use axum_test::TestServer;
use extractrs::domain::models::{BatchOutcome, CrawlOutcome};
use extractrs::presentation::routes;
use serde_json::json;
use std::sync::Arc;

const ARTICLE_HTML: &str = r#"
<html>
<head><title>API Test Page</title></head>
<body>
<nav>Top nav</nav>
<article><p>Body paragraph for the api test.</p></article>
</body>
</html>
"#;

fn test_server(gateway: StubGateway) -> TestServer {
    let crawler = Arc::new(crawler_with(Arc::new(gateway), test_settings()));
    TestServer::new(routes::routes(crawler)).expect("router should build")
}

#[tokio::test]
async fn test_crawl_single_success() {
    let server = test_server(
        StubGateway::new().with_page("http://8.8.8.8/", StubPage::with_html(ARTICLE_HTML)),
    );

    let response = server
        .post("/v1/crawl")
        .json(&json!({ "url": "http://8.8.8.8/" }))
        .await;

    response.assert_status_ok();
    let outcome: CrawlOutcome = response.json();
    assert!(outcome.success);
    assert!(outcome.error.is_none());
    assert_eq!(outcome.title.as_deref(), Some("API Test Page"));
    assert!(outcome.content.contains("Body paragraph for the api test."));
    assert_eq!(outcome.content_length, outcome.content.chars().count());
}

#[tokio::test]
async fn test_crawl_single_unsafe_url_is_failure_outcome_not_http_error() {
    let server = test_server(StubGateway::new());

    let response = server
        .post("/v1/crawl")
        .json(&json!({ "url": "http://169.254.169.254/latest/meta-data/" }))
        .await;

    // 不安全URL不是结构性错误，HTTP层面返回200，失败体现在结果体里
    response.assert_status_ok();
    let outcome: CrawlOutcome = response.json();
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().starts_with("Unsafe URL"));
    assert_eq!(outcome.content, "");
}

#[tokio::test]
async fn test_crawl_single_malformed_url_rejected_at_boundary() {
    let server = test_server(StubGateway::new());

    let response = server
        .post("/v1/crawl")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_crawl_single_full_text_mode() {
    let server = test_server(
        StubGateway::new().with_page("http://8.8.8.8/", StubPage::with_html(ARTICLE_HTML)),
    );

    let response = server
        .post("/v1/crawl")
        .json(&json!({ "url": "http://8.8.8.8/", "extract_main_content": false }))
        .await;

    response.assert_status_ok();
    let outcome: CrawlOutcome = response.json();
    assert!(outcome.success);
    assert!(outcome.content.contains("Top nav"));
}

#[tokio::test]
async fn test_crawl_batch_mixed_results() {
    let server = test_server(
        StubGateway::new().with_page("http://8.8.8.8/", StubPage::with_html(ARTICLE_HTML)),
    );

    let response = server
        .post("/v1/crawl/batch")
        .json(&json!({
            "urls": ["http://8.8.8.8/", "http://127.0.0.1/"]
        }))
        .await;

    response.assert_status_ok();
    let batch: BatchOutcome = response.json();
    assert_eq!(batch.total, 2);
    assert_eq!(batch.successful, 1);
    assert_eq!(batch.failed, 1);
    assert!(batch.results[0].success);
    assert!(!batch.results[1].success);
}

#[tokio::test]
async fn test_crawl_batch_over_cap_rejected() {
    let server = test_server(StubGateway::new());

    let urls: Vec<String> = (0..11).map(|i| format!("http://8.8.8.{}/", i)).collect();
    let response = server
        .post("/v1/crawl/batch")
        .json(&json!({ "urls": urls }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_crawl_batch_empty_returns_empty_outcome() {
    // 空URL列表是合法请求，返回空的成功结果而非400
    let server = test_server(StubGateway::new());

    let response = server
        .post("/v1/crawl/batch")
        .json(&json!({ "urls": [] }))
        .await;

    response.assert_status_ok();
    let batch: BatchOutcome = response.json();
    assert!(batch.results.is_empty());
    assert_eq!(batch.total, 0);
    assert_eq!(batch.successful, 0);
    assert_eq!(batch.failed, 0);
}
