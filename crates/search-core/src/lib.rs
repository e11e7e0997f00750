// search-core/src/lib.rs
//! 统一内容搜索核心库
//!
//! 对 FAQ、网页链接、PDF 三类内容提供：
//! - 三层回退的全文搜索（精确 / 前缀 / 子串），跨类型合并排名
//! - 命中词高亮与纯文本摘要
//! - 标题自动补全（最短标题优先）
//! - 短 TTL 的读穿透结果缓存

use std::path::Path;
use std::sync::Arc;

pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod highlight;
pub mod models;
pub mod planner;
pub mod schema;
pub mod store;
pub mod suggest;

// RPC 适配层（可选功能）
#[cfg(feature = "rpc-compat")]
pub mod rpc_compat;

// 重导出核心类型
pub use cache::{ResultCache, SEARCH_TTL_SECS, SUGGEST_TTL_SECS};
pub use config::{CacheConfig, IndexConfig, SearchConfig, SearchTuning};
pub use error::{SearchError, StoreError};
pub use models::{
    ContentKind, FaqRecord, LinkRecord, Paged, PdfRecord, RecordSummary, SearchResponse,
    SearchResult, StoreRow, SuggestResponse, TitleSuggestion,
};
pub use planner::ContentSource;
pub use store::RecordStore;

/// 搜索服务统一入口
pub struct SearchEngine {
    pub store: Arc<RecordStore>,
    pub cache: Arc<ResultCache>,
    pub config: SearchConfig,
}

impl SearchEngine {
    /// 创建搜索引擎实例
    pub fn new(config: SearchConfig) -> anyhow::Result<Self> {
        let store = Arc::new(RecordStore::open(
            Path::new(&config.index.storage_path),
            config.index.writer_memory,
        )?);
        let cache = Arc::new(ResultCache::open(Path::new(&config.cache.path))?);

        let (faqs, links, pdfs) = store.stats();
        tracing::info!("搜索引擎初始化完成: {} FAQ, {} 链接, {} PDF", faqs, links, pdfs);
        Ok(Self { store, cache, config })
    }

    /// 统一搜索入口。
    ///
    /// 校验 → 查缓存 → 执行计划器 → 高亮 → 回写缓存。空结果是合法的
    /// 可缓存结果；存储失败返回 [`SearchError::StoreUnavailable`] 且
    /// 不写缓存，避免把瞬时故障当作"无结果"固化一个 TTL 周期。
    pub fn search(
        &self,
        raw_query: &str,
        kind: Option<ContentKind>,
        limit: Option<i64>,
    ) -> Result<SearchResponse, SearchError> {
        let trimmed = raw_query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidQuery("查询不能为空".to_string()));
        }
        let parsed = query::parse_query(trimmed)
            .map_err(|e| SearchError::InvalidQuery(e.to_string()))?;

        let limit = match limit {
            Some(n) if n > 0 => n as usize,
            _ => self.config.search.default_limit,
        };

        if let Some(results) = self.cache.get_search(trimmed, kind, limit) {
            tracing::debug!("缓存命中: '{}'", trimmed);
            return Ok(SearchResponse {
                query: trimmed.to_string(),
                count: results.len(),
                results,
                cached: true,
            });
        }

        let rows = planner::plan_search(&*self.store, trimmed, &parsed, kind, limit)?;
        let results: Vec<SearchResult> = rows
            .into_iter()
            .map(|row| self.into_result(row, &parsed))
            .collect();

        self.cache.set_search(
            trimmed,
            kind,
            limit,
            &results,
            self.config.cache.search_ttl_secs,
        );

        Ok(SearchResponse {
            query: trimmed.to_string(),
            count: results.len(),
            results,
            cached: false,
        })
    }

    fn into_result(&self, row: StoreRow, parsed: &query::WebQuery) -> SearchResult {
        let excerpt = highlight::highlight(&row.body, parsed, self.config.search.snippet_length);
        SearchResult {
            kind: row.kind,
            id: row.id,
            title: row.title,
            url: row.url,
            file_path: row.file_path,
            created_at: row.created_at,
            content: row.body,
            highlighted_snippet: excerpt.highlighted,
            snippet: excerpt.snippet,
            rank: row.score,
        }
    }

    /// 标题联想。
    ///
    /// 输入过短时不触碰存储与缓存；存储失败吞掉并返回空列表（不缓存，
    /// 下次请求重新尝试）。
    pub fn suggest(&self, partial: &str) -> SuggestResponse {
        let partial = partial.trim();
        if partial.chars().count() < self.config.search.suggest_min_chars {
            return SuggestResponse { suggestions: Vec::new(), cached: false };
        }

        if let Some(suggestions) = self.cache.get_suggestions(partial) {
            return SuggestResponse { suggestions, cached: true };
        }

        match suggest::suggest_titles(&*self.store, partial, self.config.search.suggest_limit) {
            Ok(suggestions) => {
                self.cache.set_suggestions(
                    partial,
                    &suggestions,
                    self.config.cache.suggest_ttl_secs,
                );
                SuggestResponse { suggestions, cached: false }
            }
            Err(e) => {
                tracing::warn!("联想查询失败，返回空列表: {}", e);
                SuggestResponse { suggestions: Vec::new(), cached: false }
            }
        }
    }

    // ============== 记录管理 ==============

    pub fn create_faq(
        &self,
        title: String,
        content: String,
        tags: Vec<String>,
    ) -> Result<FaqRecord, StoreError> {
        self.store.create_faq(title, content, tags)
    }

    pub fn update_faq(
        &self,
        id: u64,
        title: Option<String>,
        content: Option<String>,
        tags: Option<Vec<String>>,
    ) -> Result<FaqRecord, StoreError> {
        self.store.update_faq(id, title, content, tags)
    }

    pub fn create_link(
        &self,
        url: String,
        title: String,
        description: String,
    ) -> Result<LinkRecord, StoreError> {
        self.store.create_link(url, title, description)
    }

    pub fn update_link(
        &self,
        id: u64,
        url: Option<String>,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<LinkRecord, StoreError> {
        self.store.update_link(id, url, title, description)
    }

    /// 提取 PDF 文本并入库。提取失败不阻断入库，正文置空。
    pub fn ingest_pdf(&self, path: &Path) -> Result<PdfRecord, StoreError> {
        let file_name = extract::pdf_file_name(path);
        let content_text = extract::extract_pdf_text(path);
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.store.create_pdf(
            file_name,
            canonical.to_string_lossy().to_string(),
            content_text,
            file_size,
        )
    }

    pub fn delete_record(&self, kind: ContentKind, id: u64) -> Result<bool, StoreError> {
        self.store.delete(kind, id)
    }

    pub fn list_records(
        &self,
        kind: ContentKind,
        page: u64,
        limit: u64,
    ) -> Result<Paged<RecordSummary>, StoreError> {
        self.store.list(kind, page, limit)
    }
}
