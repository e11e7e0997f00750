// search-core/src/models.rs
//! 数据模型定义

use serde::{Deserialize, Serialize};

/// 内容类型
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Faq,
    Link,
    Pdf,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Faq, ContentKind::Link, ContentKind::Pdf];
}

/// FAQ 记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// 仅存储展示，不参与检索投影
    pub tags: Vec<String>,
    pub created_at: u64,
    pub updated_at: u64,
}

/// 网页链接记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub description: String,
    pub created_at: u64,
    pub updated_at: u64,
}

/// PDF 记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfRecord {
    pub id: u64,
    /// 文件名（作为标题检索与展示）
    pub file_name: String,
    pub file_path: String,
    /// 提取出的正文。提取失败时为空，此时只有标题子串回退能命中
    pub content_text: String,
    pub file_size: u64,
    pub uploaded_at: u64,
}

/// 从内容存储取回的候选行（打分前 / 打分中的中间形态）
#[derive(Debug, Clone)]
pub struct StoreRow {
    pub kind: ContentKind,
    pub id: u64,
    pub title: String,
    pub body: String,
    pub url: Option<String>,
    pub file_path: Option<String>,
    pub created_at: u64,
    pub score: f32,
}

/// 搜索结果（跨类型统一结构，不落盘）
///
/// `url` 仅链接类结果携带，`file_path` 仅 PDF 结果携带，FAQ 两者皆空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub kind: ContentKind,
    pub id: u64,
    pub title: String,
    pub url: Option<String>,
    pub file_path: Option<String>,
    pub created_at: u64,
    /// 完整正文
    pub content: String,
    /// 命中词高亮摘要
    pub highlighted_snippet: String,
    /// 纯文本截断摘要（正文前 200 字符）
    pub snippet: String,
    pub rank: f32,
}

/// 搜索响应
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchResult>,
    pub cached: bool,
}

/// 标题联想条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSuggestion {
    pub title: String,
    pub kind: ContentKind,
}

/// 联想响应
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestResponse {
    pub suggestions: Vec<TitleSuggestion>,
    pub cached: bool,
}

/// 记录列表条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub kind: ContentKind,
    pub id: u64,
    pub title: String,
    pub created_at: u64,
}

/// 分页结果
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}
