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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器和爬取器的所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 爬取器配置
    pub crawler: CrawlerSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 爬取器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 渲染内容的最大字节数
    pub max_content_bytes: usize,
    /// 单个请求的超时时间（毫秒）
    pub request_timeout_ms: u64,
    /// 批量请求的最大URL数量
    pub max_batch_size: usize,
}

impl CrawlerSettings {
    /// 单个请求的超时时间
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            max_content_bytes: 1_048_576,
            request_timeout_ms: 30_000,
            max_batch_size: 10,
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8889)?
            // Default crawler limits
            .set_default("crawler.max_content_bytes", 1_048_576)?
            .set_default("crawler.request_timeout_ms", 30_000)?
            .set_default("crawler.max_batch_size", 10)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("EXTRACTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
