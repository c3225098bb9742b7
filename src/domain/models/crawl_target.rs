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

use url::Url;

/// 文本提取模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// 提取正文内容（readability风格），失败时降级为通用提取
    MainContent,
    /// 提取全部可见文本
    FullText,
}

/// 爬取目标
///
/// 经过URL安全分类器校验后构造，构造后不可变
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    url: Url,
    extract_mode: ExtractMode,
}

impl CrawlTarget {
    /// 从已通过安全校验的URL字符串构造爬取目标
    ///
    /// # 参数
    ///
    /// * `raw_url` - 绝对URL字符串
    /// * `extract_mode` - 文本提取模式
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlTarget)` - 构造成功
    /// * `Err(url::ParseError)` - URL解析失败
    pub fn new(raw_url: &str, extract_mode: ExtractMode) -> Result<Self, url::ParseError> {
        let url = Url::parse(raw_url)?;
        Ok(Self { url, extract_mode })
    }

    /// 目标URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// 文本提取模式
    pub fn extract_mode(&self) -> ExtractMode {
        self.extract_mode
    }
}
