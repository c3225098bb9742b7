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

use extractrs::application::use_cases::CrawlUseCase;
use extractrs::config::settings::Settings;
use extractrs::engines::chromium_engine::ChromiumGateway;
use extractrs::engines::traits::RenderGateway;
use extractrs::presentation::routes;
use extractrs::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务。
/// 浏览器在对外服务前启动，在连接排空后关闭
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting extractrs...");

    // Initialize Prometheus Metrics
    extractrs::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Launch the browser before accepting traffic
    let gateway: Arc<ChromiumGateway> = Arc::new(
        ChromiumGateway::launch(settings.crawler.request_timeout())
            .await
            .map_err(|e| anyhow::anyhow!("failed to launch render gateway: {}", e))?,
    );

    // 4. Wire up the crawl use case
    let crawler = Arc::new(CrawlUseCase::new(
        gateway.clone() as Arc<dyn RenderGateway>,
        settings.crawler.clone(),
    ));

    // 5. Start HTTP server
    let app = routes::routes(crawler);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 6. Tear down the browser after drain
    gateway.shutdown().await;
    info!("extractrs stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
