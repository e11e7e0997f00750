// search-core/src/rpc_compat.rs
//! RPC 适配层 - 在 rpc crate 的线缆类型与内部类型之间转换
//!
//! 服务端只需把请求转给这里的 handle_* 函数，保持命令层薄。

use std::path::Path;

use rpc::search as wire;

use crate::error::{SearchError, StoreError};
use crate::models;
use crate::{SearchEngine, SearchResponse, SuggestResponse};

pub fn kind_to_wire(kind: models::ContentKind) -> wire::ContentKind {
    match kind {
        models::ContentKind::Faq => wire::ContentKind::Faq,
        models::ContentKind::Link => wire::ContentKind::Link,
        models::ContentKind::Pdf => wire::ContentKind::Pdf,
    }
}

pub fn kind_from_wire(kind: wire::ContentKind) -> models::ContentKind {
    match kind {
        wire::ContentKind::Faq => models::ContentKind::Faq,
        wire::ContentKind::Link => models::ContentKind::Link,
        wire::ContentKind::Pdf => models::ContentKind::Pdf,
    }
}

fn hit_to_wire(result: models::SearchResult) -> wire::SearchHit {
    wire::SearchHit {
        kind: kind_to_wire(result.kind),
        id: result.id,
        title: result.title,
        url: result.url,
        file_path: result.file_path,
        created_at: result.created_at,
        content: result.content,
        highlighted_snippet: result.highlighted_snippet,
        snippet: result.snippet,
        rank: result.rank,
    }
}

fn store_fault(e: StoreError) -> wire::StoreFault {
    match e {
        StoreError::NotFound { .. } => wire::StoreFault::NotFound,
        other => wire::StoreFault::Unavailable(other.to_string()),
    }
}

/// 执行搜索请求
pub fn handle_search(
    engine: &SearchEngine,
    req: &wire::SearchRequest,
) -> Result<wire::SearchResponse, wire::SearchFault> {
    let kind = req.kind.map(kind_from_wire);
    match engine.search(&req.query, kind, req.limit) {
        Ok(SearchResponse { query, count, results, cached }) => Ok(wire::SearchResponse {
            query,
            count: count as u64,
            results: results.into_iter().map(hit_to_wire).collect(),
            cached,
        }),
        Err(SearchError::InvalidQuery(msg)) => Err(wire::SearchFault::InvalidQuery(msg)),
        Err(SearchError::StoreUnavailable(e)) => {
            Err(wire::SearchFault::StoreUnavailable(e.to_string()))
        }
    }
}

/// 执行联想请求（永不失败）
pub fn handle_suggest(engine: &SearchEngine, partial: &str) -> wire::SuggestResponse {
    let SuggestResponse { suggestions, cached } = engine.suggest(partial);
    wire::SuggestResponse {
        suggestions: suggestions
            .into_iter()
            .map(|s| wire::Suggestion { title: s.title, kind: kind_to_wire(s.kind) })
            .collect(),
        cached,
    }
}

fn faq_to_wire(record: models::FaqRecord) -> wire::FaqRecord {
    wire::FaqRecord {
        id: record.id,
        title: record.title,
        content: record.content,
        tags: record.tags,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn link_to_wire(record: models::LinkRecord) -> wire::LinkRecord {
    wire::LinkRecord {
        id: record.id,
        url: record.url,
        title: record.title,
        description: record.description,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn pdf_to_wire(record: models::PdfRecord) -> wire::PdfRecord {
    // 提取出的正文可能很大，不随记录回传；搜索命中时会带完整正文
    wire::PdfRecord {
        id: record.id,
        file_name: record.file_name,
        file_path: record.file_path,
        file_size: record.file_size,
        uploaded_at: record.uploaded_at,
    }
}

pub fn handle_create_faq(
    engine: &SearchEngine,
    req: wire::CreateFaq,
) -> Result<wire::FaqRecord, wire::StoreFault> {
    engine
        .create_faq(req.title, req.content, req.tags)
        .map(faq_to_wire)
        .map_err(store_fault)
}

pub fn handle_update_faq(
    engine: &SearchEngine,
    id: u64,
    req: wire::UpdateFaq,
) -> Result<wire::FaqRecord, wire::StoreFault> {
    engine
        .update_faq(id, req.title, req.content, req.tags)
        .map(faq_to_wire)
        .map_err(store_fault)
}

pub fn handle_create_link(
    engine: &SearchEngine,
    req: wire::CreateLink,
) -> Result<wire::LinkRecord, wire::StoreFault> {
    engine
        .create_link(req.url, req.title, req.description)
        .map(link_to_wire)
        .map_err(store_fault)
}

pub fn handle_update_link(
    engine: &SearchEngine,
    id: u64,
    req: wire::UpdateLink,
) -> Result<wire::LinkRecord, wire::StoreFault> {
    engine
        .update_link(id, req.url, req.title, req.description)
        .map(link_to_wire)
        .map_err(store_fault)
}

pub fn handle_ingest_pdf(
    engine: &SearchEngine,
    path: &Path,
) -> Result<wire::PdfRecord, wire::StoreFault> {
    engine.ingest_pdf(path).map(pdf_to_wire).map_err(store_fault)
}

pub fn handle_delete_record(
    engine: &SearchEngine,
    kind: wire::ContentKind,
    id: u64,
) -> Result<bool, wire::StoreFault> {
    engine
        .delete_record(kind_from_wire(kind), id)
        .map_err(store_fault)
}

pub fn handle_list_records(
    engine: &SearchEngine,
    kind: wire::ContentKind,
    page: u64,
    limit: u64,
) -> Result<wire::Paged<wire::RecordSummary>, wire::StoreFault> {
    let paged = engine
        .list_records(kind_from_wire(kind), page, limit)
        .map_err(store_fault)?;
    Ok(wire::Paged {
        data: paged
            .data
            .into_iter()
            .map(|s| wire::RecordSummary {
                kind: kind_to_wire(s.kind),
                id: s.id,
                title: s.title,
                created_at: s.created_at,
            })
            .collect(),
        page: paged.page,
        limit: paged.limit,
        total: paged.total,
        total_pages: paged.total_pages,
    })
}
