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
use extractrs::application::use_cases::BatchError;
use extractrs::config::settings::CrawlerSettings;
use extractrs::domain::models::ExtractMode;
use std::sync::Arc;
use std::time::Duration;

const ARTICLE_HTML: &str = r#"
<html>
<head><title>Doc Title</title></head>
<body>
<nav>Navigation bar</nav>
<article><p>Readable body text.</p></article>
</body>
</html>
"#;

#[tokio::test]
async fn test_batch_preserves_order_and_isolates_failures() {
    // 第1个URL正常，第2个不安全，第3个超时
    let gateway = Arc::new(
        StubGateway::new()
            .with_page("http://8.8.8.8/", StubPage::with_html(ARTICLE_HTML))
            .with_page(
                "http://1.1.1.1/",
                StubPage::with_html("<p>slow</p>").delayed(Duration::from_secs(2)),
            ),
    );
    let crawler = crawler_with(gateway, test_settings());

    let urls = vec![
        "http://8.8.8.8/".to_string(),
        "http://127.0.0.1/".to_string(),
        "http://1.1.1.1/".to_string(),
    ];
    let batch = crawler
        .crawl_batch(&urls, ExtractMode::MainContent)
        .await
        .expect("batch within cap");

    assert_eq!(batch.total, 3);
    assert_eq!(batch.successful, 1);
    assert_eq!(batch.failed, 2);

    // 结果顺序与输入顺序一致，与完成顺序无关
    assert_eq!(batch.results[0].url, "http://8.8.8.8/");
    assert!(batch.results[0].success);
    assert!(batch.results[0].content.contains("Readable body text."));

    assert_eq!(batch.results[1].url, "http://127.0.0.1/");
    assert!(!batch.results[1].success);
    assert!(batch.results[1]
        .error
        .as_ref()
        .unwrap()
        .starts_with("Unsafe URL"));

    assert_eq!(batch.results[2].url, "http://1.1.1.1/");
    assert!(!batch.results[2].success);
    assert_eq!(batch.results[2].error.as_deref(), Some("Request timed out"));
}

#[tokio::test]
async fn test_batch_above_cap_rejected_before_dispatch() {
    let crawler = crawler_with(Arc::new(StubGateway::new()), test_settings());

    let urls: Vec<String> = (0..11).map(|i| format!("http://8.8.8.{}/", i)).collect();
    let result = crawler.crawl_batch(&urls, ExtractMode::MainContent).await;

    match result {
        Err(BatchError::TooLarge { max, actual }) => {
            assert_eq!(max, 10);
            assert_eq!(actual, 11);
        }
        other => panic!("expected BatchError::TooLarge, got {:?}", other.map(|b| b.total)),
    }
}

#[tokio::test]
async fn test_batch_at_cap_accepted() {
    let mut gateway = StubGateway::new();
    let urls: Vec<String> = (1..=10).map(|i| format!("http://8.8.8.{}/", i)).collect();
    for url in &urls {
        gateway = gateway.with_page(url, StubPage::with_html("<article><p>ok</p></article>"));
    }
    let crawler = crawler_with(Arc::new(gateway), test_settings());

    let batch = crawler
        .crawl_batch(&urls, ExtractMode::MainContent)
        .await
        .expect("10 urls is within the cap");
    assert_eq!(batch.total, 10);
    assert_eq!(batch.successful, 10);
}

#[tokio::test]
async fn test_content_size_cap_boundary() {
    let settings = CrawlerSettings {
        max_content_bytes: 100,
        ..test_settings()
    };

    // 恰好等于上限：成功
    let gateway = Arc::new(
        StubGateway::new().with_page("http://8.8.8.8/", StubPage::with_html("x".repeat(100))),
    );
    let crawler = crawler_with(gateway, settings.clone());
    let outcome = crawler
        .crawl_url("http://8.8.8.8/", ExtractMode::FullText)
        .await;
    assert!(outcome.success, "content exactly at the cap must pass");

    // 超出一个字节：失败且内容为空
    let gateway = Arc::new(
        StubGateway::new().with_page("http://8.8.8.8/", StubPage::with_html("x".repeat(101))),
    );
    let crawler = crawler_with(gateway, settings);
    let outcome = crawler
        .crawl_url("http://8.8.8.8/", ExtractMode::FullText)
        .await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Content exceeds 100 bytes"));
    assert_eq!(outcome.content, "");
}

#[tokio::test]
async fn test_browser_unavailable_surfaces_per_item() {
    let crawler = crawler_with(Arc::new(StubGateway::unavailable()), test_settings());

    let outcome = crawler
        .crawl_url("http://8.8.8.8/", ExtractMode::MainContent)
        .await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Browser not initialized"));
}

#[tokio::test]
async fn test_shutdown_makes_gateway_unavailable() {
    let gateway = Arc::new(
        StubGateway::new().with_page("http://8.8.8.8/", StubPage::with_html(ARTICLE_HTML)),
    );
    let crawler = crawler_with(gateway.clone(), test_settings());

    assert!(crawler
        .crawl_url("http://8.8.8.8/", ExtractMode::MainContent)
        .await
        .success);

    use extractrs::engines::traits::RenderGateway;
    gateway.shutdown().await;

    let outcome = crawler
        .crawl_url("http://8.8.8.8/", ExtractMode::MainContent)
        .await;
    assert_eq!(outcome.error.as_deref(), Some("Browser not initialized"));
}

#[tokio::test]
async fn test_extraction_falls_back_to_generic_strip() {
    // 没有正文候选容器，降级为整页剥离提取，不算失败
    let html = r#"
    <html><body>
    <nav>Menu items</nav>
    <div><p>Plain div content.</p></div>
    <script>var x = 1;</script>
    </body></html>
    "#;
    let gateway =
        Arc::new(StubGateway::new().with_page("http://8.8.8.8/", StubPage::with_html(html)));
    let crawler = crawler_with(gateway, test_settings());

    let outcome = crawler
        .crawl_url("http://8.8.8.8/", ExtractMode::MainContent)
        .await;
    assert!(outcome.success);
    assert!(outcome.content.contains("Plain div content."));
    // 降级提取会剥离nav和script
    assert!(!outcome.content.contains("Menu items"));
    assert!(!outcome.content.contains("var x = 1;"));
}

#[tokio::test]
async fn test_extracted_title_overrides_page_title() {
    let gateway = Arc::new(StubGateway::new().with_page(
        "http://8.8.8.8/",
        StubPage::with_html(ARTICLE_HTML).titled("Stub Title"),
    ));
    let crawler = crawler_with(gateway, test_settings());

    let outcome = crawler
        .crawl_url("http://8.8.8.8/", ExtractMode::MainContent)
        .await;
    assert_eq!(outcome.title.as_deref(), Some("Doc Title"));
}

#[tokio::test]
async fn test_page_title_used_when_extraction_degrades() {
    let gateway = Arc::new(StubGateway::new().with_page(
        "http://8.8.8.8/",
        StubPage::with_html("<div>no candidates here</div>").titled("Stub Title"),
    ));
    let crawler = crawler_with(gateway, test_settings());

    let outcome = crawler
        .crawl_url("http://8.8.8.8/", ExtractMode::MainContent)
        .await;
    assert!(outcome.success);
    assert_eq!(outcome.title.as_deref(), Some("Stub Title"));
}

#[tokio::test]
async fn test_unresolvable_host_fails_at_fetch_not_classification() {
    // DNS解析失败的主机通过分类（延迟失败策略），在导航阶段才失败
    let crawler = crawler_with(Arc::new(StubGateway::new()), test_settings());

    let outcome = crawler
        .crawl_url("http://no-such-host.invalid/", ExtractMode::MainContent)
        .await;
    assert!(!outcome.success);
    let error = outcome.error.unwrap();
    assert!(error.contains("ERR_NAME_NOT_RESOLVED"), "got: {}", error);
    assert!(!error.starts_with("Unsafe URL"));
}

#[tokio::test]
async fn test_full_text_mode_keeps_boilerplate() {
    let gateway = Arc::new(
        StubGateway::new().with_page("http://8.8.8.8/", StubPage::with_html(ARTICLE_HTML)),
    );
    let crawler = crawler_with(gateway, test_settings());

    let outcome = crawler
        .crawl_url("http://8.8.8.8/", ExtractMode::FullText)
        .await;
    assert!(outcome.success);
    assert!(outcome.content.contains("Navigation bar"));
    assert!(outcome.content.contains("Readable body text."));
}
