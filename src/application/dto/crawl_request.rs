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

use crate::domain::models::ExtractMode;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 单个URL爬取请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CrawlRequestDto {
    /// 要爬取的网页URL
    #[validate(url)]
    pub url: String,
    /// 是否提取正文内容，否则提取全文
    #[serde(default = "default_extract_main")]
    pub extract_main_content: bool,
}

/// 批量爬取请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct BatchCrawlRequestDto {
    /// 要爬取的URL列表（最多10个，允许为空）
    #[validate(length(max = 10, message = "Maximum 10 URLs per batch"))]
    pub urls: Vec<String>,
    /// 是否提取正文内容，否则提取全文
    #[serde(default = "default_extract_main")]
    pub extract_main_content: bool,
}

fn default_extract_main() -> bool {
    true
}

impl CrawlRequestDto {
    /// 请求对应的提取模式
    pub fn extract_mode(&self) -> ExtractMode {
        mode_for(self.extract_main_content)
    }
}

impl BatchCrawlRequestDto {
    /// 请求对应的提取模式
    pub fn extract_mode(&self) -> ExtractMode {
        mode_for(self.extract_main_content)
    }
}

fn mode_for(extract_main_content: bool) -> ExtractMode {
    if extract_main_content {
        ExtractMode::MainContent
    } else {
        ExtractMode::FullText
    }
}
