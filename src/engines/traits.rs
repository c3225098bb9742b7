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

use async_trait::async_trait;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 浏览器未初始化或已关闭
    #[error("Browser not initialized")]
    BrowserUnavailable,
    /// 超时
    #[error("Request timed out")]
    Timeout,
    /// 页面导航失败
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// 判断错误是否可重试
    ///
    /// # 返回值
    ///
    /// 如果错误是可重试的则返回true，否则返回false
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::Timeout => true,
            // Browser unavailability is a process-level health problem, retryable after backoff
            EngineError::BrowserUnavailable => true,
            EngineError::Navigation(_) => false,
            EngineError::Other(_) => false,
        }
    }
}

/// 渲染上下文特质
///
/// 每次抓取独占一个隔离的浏览器页面，抓取结束后必须释放
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// 导航到目标URL，等待DOM构建完成
    async fn navigate(&self, url: &str) -> Result<(), EngineError>;

    /// 读取渲染后的HTML
    async fn html(&self) -> Result<String, EngineError>;

    /// 读取页面标题
    async fn title(&self) -> Result<Option<String>, EngineError>;

    /// 关闭并释放页面
    async fn close(self: Box<Self>);
}

/// 渲染网关特质
///
/// 进程级共享的浏览器句柄，启动时创建、停机时销毁；
/// 并发抓取各自通过 [`RenderGateway::new_context`] 获取隔离上下文
#[async_trait]
pub trait RenderGateway: Send + Sync {
    /// 获取一个新的隔离渲染上下文
    async fn new_context(&self) -> Result<Box<dyn RenderContext>, EngineError>;

    /// 关闭浏览器，之后的上下文请求返回 [`EngineError::BrowserUnavailable`]
    async fn shutdown(&self);

    /// 引擎名称
    fn name(&self) -> &'static str;
}
