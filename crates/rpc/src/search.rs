// Wire types shared between the search server and its clients.
use serde::{Deserialize, Serialize};

/// The three indexed content kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Faq,
    Link,
    Pdf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Restrict the search to a single kind; `None` searches everything
    pub kind: Option<ContentKind>,
    /// Result cap after the cross-kind merge; non-positive or absent
    /// falls back to the server default (20)
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: ContentKind,
    pub id: u64,
    pub title: String,
    pub url: Option<String>,
    pub file_path: Option<String>,
    pub created_at: u64,
    /// Full searchable text of the record
    pub content: String,
    /// Excerpt with matched terms wrapped in `<b>` markers
    pub highlighted_snippet: String,
    /// Plain truncated excerpt, always available
    pub snippet: String,
    pub rank: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: u64,
    pub results: Vec<SearchHit>,
    pub cached: bool,
}

/// Caller-visible search failures. Everything else degrades inside the
/// server (highlight fallback, swallowed suggestion errors, cache misses).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SearchFault {
    InvalidQuery(String),
    StoreUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub kind: ContentKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
    pub cached: bool,
}

// === Record management ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFaq {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFaq {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLink {
    pub url: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLink {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqRecord {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub description: String,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfRecord {
    pub id: u64,
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub uploaded_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummary {
    pub kind: ContentKind,
    pub id: u64,
    pub title: String,
    pub created_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StoreFault {
    NotFound,
    Unavailable(String),
}
