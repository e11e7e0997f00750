// search-core/src/error.rs
//! 错误类型定义
//!
//! 只有 `InvalidQuery` 与 `StoreUnavailable` 会传到调用方，其余失败
//! （缓存、 高亮、联想）都在内部降级处理。

use crate::models::ContentKind;
use thiserror::Error;

/// 搜索入口的调用方可见错误
#[derive(Debug, Error)]
pub enum SearchError {
    /// 空查询或无法解析的查询，属客户端错误，不应重试
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// 内容存储不可用或出错，属服务端瞬时错误，可以重试。
    /// 该结果不允许写入缓存。
    #[error("content store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// 内容存储内部错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    #[error("index directory error: {0}")]
    IndexDir(#[from] tantivy::directory::error::OpenDirectoryError),

    #[error("record store error: {0}")]
    Records(#[from] sled::Error),

    #[error("record decode error: {0}")]
    Decode(#[from] Box<bincode::ErrorKind>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record not found: {kind} {id}")]
    NotFound { kind: ContentKind, id: u64 },
}
