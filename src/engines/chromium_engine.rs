// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, RenderContext, RenderGateway};
use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// 浏览器句柄与其事件循环任务
struct BrowserHandle {
    browser: Browser,
    event_loop: JoinHandle<()>,
}

/// Chromium渲染网关
///
/// 基于chromiumoxide的进程级浏览器句柄：启动时创建一次，停机时销毁一次，
/// 期间由各并发抓取共享只读引用，每次抓取通过 [`RenderGateway::new_context`]
/// 获取各自隔离的页面。读写锁保证上下文获取不互相串行，
/// 关闭是唯一的写操作
pub struct ChromiumGateway {
    inner: RwLock<Option<BrowserHandle>>,
}

impl ChromiumGateway {
    /// 启动浏览器并创建网关
    ///
    /// 设置 `CHROMIUM_REMOTE_DEBUGGING_URL` 时连接远程Chrome实例，
    /// 否则启动本地无头浏览器
    ///
    /// # 参数
    ///
    /// * `request_timeout` - CDP请求超时时间
    ///
    /// # 返回值
    ///
    /// * `Ok(ChromiumGateway)` - 网关已就绪
    /// * `Err(EngineError)` - 浏览器启动或连接失败
    pub async fn launch(request_timeout: Duration) -> Result<Self, EngineError> {
        let remote_debugging_url = std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok();

        let (browser, mut handler) = if let Some(ref url) = remote_debugging_url {
            tracing::info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url.as_str()).await.map_err(|e| {
                EngineError::Other(format!("Failed to connect to remote Chrome: {}", e))
            })?
        } else {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(request_timeout)
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage")
                .build()
                .map_err(EngineError::Other)?;

            Browser::launch(config)
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?
        };

        // Spawn a handler to process browser events
        let event_loop = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        tracing::info!("Chromium render gateway ready");

        Ok(Self {
            inner: RwLock::new(Some(BrowserHandle {
                browser,
                event_loop,
            })),
        })
    }
}

#[async_trait]
impl RenderGateway for ChromiumGateway {
    /// 为一次抓取打开一个隔离页面
    async fn new_context(&self) -> Result<Box<dyn RenderContext>, EngineError> {
        let guard = self.inner.read().await;
        let handle = guard.as_ref().ok_or(EngineError::BrowserUnavailable)?;

        let page = handle
            .browser
            .new_page("about:blank")
            .await
            .map_err(map_cdp_error)?;

        Ok(Box::new(ChromiumContext { page }))
    }

    /// 关闭浏览器并终止事件循环
    async fn shutdown(&self) {
        let mut guard = self.inner.write().await;
        if let Some(mut handle) = guard.take() {
            if let Err(e) = handle.browser.close().await {
                tracing::warn!("Failed to close browser cleanly: {}", e);
            }
            let _ = handle.browser.wait().await;
            handle.event_loop.abort();
            tracing::info!("Chromium render gateway shut down");
        }
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

/// 单次抓取独占的Chromium页面
struct ChromiumContext {
    page: Page,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&self, url: &str) -> Result<(), EngineError> {
        // goto waits for the frame load event before resolving
        self.page.goto(url).await.map_err(|e| match e {
            CdpError::Timeout => EngineError::Timeout,
            other => EngineError::Navigation(other.to_string()),
        })?;
        Ok(())
    }

    async fn html(&self) -> Result<String, EngineError> {
        self.page.content().await.map_err(map_cdp_error)
    }

    async fn title(&self) -> Result<Option<String>, EngineError> {
        let title = self.page.get_title().await.map_err(map_cdp_error)?;
        Ok(title.filter(|t| !t.trim().is_empty()))
    }

    async fn close(self: Box<Self>) {
        if let Err(e) = self.page.close().await {
            tracing::debug!("Failed to close page: {}", e);
        }
    }
}

fn map_cdp_error(e: CdpError) -> EngineError {
    match e {
        CdpError::Timeout => EngineError::Timeout,
        other => EngineError::Other(other.to_string()),
    }
}
