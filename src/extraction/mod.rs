// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use thiserror::Error;

/// 正文提取失败时降级提取移除的标签
pub const GENERIC_STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// 全文提取模式下移除的标签
pub const SCRIPT_STYLE_TAGS: &[&str] = &["script", "style"];

/// 正文候选容器选择器，按优先级排列
const MAIN_CONTENT_SELECTORS: &[&str] = &["article", "main", "[role='main']", "#content"];

static CANDIDATE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    MAIN_CONTENT_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("static selector must parse"))
        .collect()
});

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("static selector must parse"));

static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("static selector must parse"));

/// 内容提取错误
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// 没有找到可读的正文内容
    #[error("No readable content found")]
    NoContent,
}

/// 提取出的内容
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// 提取到的标题，可覆盖页面标题
    pub title: Option<String>,
    /// 可读文本
    pub text: String,
}

/// 内容提取器
///
/// 提供两种提取能力：readability风格的正文提取（显式返回Result，
/// 由调用方分支决定是否降级）和基于标签剥离的通用文本提取
pub struct ContentExtractor {
    cleaner: HtmlCleaner,
}

impl ContentExtractor {
    /// 创建新的内容提取器
    pub fn new() -> Self {
        Self {
            cleaner: HtmlCleaner::new(),
        }
    }

    /// 提取页面正文内容
    ///
    /// 在候选容器（article、main等）中选取文本量最大的一个作为正文。
    /// 没有候选容器或正文为空时返回 [`ExtractionError::NoContent`]，
    /// 由调用方显式降级到 [`ContentExtractor::strip_and_get_text`]
    pub fn extract_main(&self, html: &str) -> Result<ExtractedContent, ExtractionError> {
        let document = Html::parse_document(html);

        let title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| {
                document
                    .select(&H1_SELECTOR)
                    .next()
                    .map(|el| el.text().collect::<String>().trim().to_string())
                    .filter(|t| !t.is_empty())
            });

        // 候选容器内部仍可能嵌入script/style，序列化后走同一套剥离逻辑
        let mut best_text = String::new();
        for selector in CANDIDATE_SELECTORS.iter() {
            for element in document.select(selector) {
                let text = self.cleaner.strip(&element.html(), SCRIPT_STYLE_TAGS);
                if text.chars().count() > best_text.chars().count() {
                    best_text = text;
                }
            }
        }

        if best_text.is_empty() {
            return Err(ExtractionError::NoContent);
        }

        Ok(ExtractedContent {
            title,
            text: best_text,
        })
    }

    /// 移除指定标签后提取全部可见文本
    ///
    /// # 参数
    ///
    /// * `html` - 原始HTML
    /// * `tags_to_remove` - 连同内容一起移除的标签名
    pub fn strip_and_get_text(&self, html: &str, tags_to_remove: &[&str]) -> String {
        self.cleaner.strip(html, tags_to_remove)
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// HTML清理器
///
/// 正则驱动的标签剥离：移除指定元素及其内容、HTML注释，
/// 其余标签替换为换行，最后解码实体并规范化空白
struct HtmlCleaner {
    element_regexes: HashMap<&'static str, Regex>,
    comment_regex: Regex,
    tag_regex: Regex,
    inline_space_regex: Regex,
}

impl HtmlCleaner {
    fn new() -> Self {
        let mut element_regexes = HashMap::new();
        for tag in GENERIC_STRIP_TAGS {
            element_regexes.insert(*tag, Self::element_regex(tag));
        }

        Self {
            element_regexes,
            comment_regex: Regex::new(r"(?is)<!--.*?-->").unwrap(),
            tag_regex: Regex::new(r"(?is)<[^>]+>").unwrap(),
            inline_space_regex: Regex::new(r"[ \t]+").unwrap(),
        }
    }

    fn element_regex(tag: &str) -> Regex {
        Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).unwrap()
    }

    fn strip(&self, html: &str, tags_to_remove: &[&str]) -> String {
        let mut text = html.to_string();

        // 移除指定标签及其内容
        for tag in tags_to_remove {
            match self.element_regexes.get(tag) {
                Some(regex) => text = regex.replace_all(&text, "").to_string(),
                None => text = Self::element_regex(tag).replace_all(&text, "").to_string(),
            }
        }

        // 移除HTML注释
        text = self.comment_regex.replace_all(&text, "").to_string();

        // 剩余标签替换为换行，保留文本的行结构
        text = self.tag_regex.replace_all(&text, "\n").to_string();

        // 解码HTML实体
        text = html_escape::decode_html_entities(&text).to_string();

        // 行内空白折叠，去除空行
        text.lines()
            .map(|line| self.inline_space_regex.replace_all(line, " ").to_string())
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
