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

use serde::{Deserialize, Serialize};

/// 错误信息的最大长度（字符数）
const MAX_ERROR_LEN: usize = 200;

/// 单个URL的爬取结果
///
/// 构造后不可变。`success=true` 与 `error` 非空互斥：
/// 成功结果携带内容且无错误，失败结果内容为空且必有错误信息。
/// 只能通过 [`CrawlOutcome::success`] 和 [`CrawlOutcome::failure`] 构造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOutcome {
    /// 目标URL
    pub url: String,
    /// 页面标题
    pub title: Option<String>,
    /// 提取出的文本内容
    pub content: String,
    /// 内容长度（字符数）
    pub content_length: usize,
    /// 是否成功
    pub success: bool,
    /// 错误信息（最多200字符）
    pub error: Option<String>,
}

impl CrawlOutcome {
    /// 构造成功结果
    pub fn success(url: impl Into<String>, title: Option<String>, content: String) -> Self {
        let content_length = content.chars().count();
        Self {
            url: url.into(),
            title,
            content,
            content_length,
            success: true,
            error: None,
        }
    }

    /// 构造失败结果
    ///
    /// 错误信息会被截断到200字符，防止泄露超长的内部堆栈信息
    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        let message: String = error.into().chars().take(MAX_ERROR_LEN).collect();
        Self {
            url: url.into(),
            title: None,
            content: String::new(),
            content_length: 0,
            success: false,
            error: Some(message),
        }
    }
}

/// 批量爬取结果
///
/// `results` 保持与输入URL相同的顺序，`total = successful + failed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// 每个URL的结果，顺序与请求一致
    pub results: Vec<CrawlOutcome>,
    /// 总数
    pub total: usize,
    /// 成功数
    pub successful: usize,
    /// 失败数
    pub failed: usize,
}

impl BatchOutcome {
    /// 由按输入顺序排列的结果序列聚合统计
    pub fn from_results(results: Vec<CrawlOutcome>) -> Self {
        let total = results.len();
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            results,
            total,
            successful,
            failed: total - successful,
        }
    }
}
