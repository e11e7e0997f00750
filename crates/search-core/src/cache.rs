// search-core/src/cache.rs
//! 结果缓存模块
//! 使用 sled 存储短 TTL 的搜索与联想结果，避免重复执行查询计划
//!
//! 缓存只是加速层：任何读写失败都降级为未命中并记录告警，绝不向上传播。

use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{ContentKind, SearchResult, TitleSuggestion};

/// 搜索结果缓存有效期（秒）
pub const SEARCH_TTL_SECS: u64 = 300;

/// 联想结果缓存有效期（秒）
pub const SUGGEST_TTL_SECS: u64 = 600;

/// 结果缓存管理器
pub struct ResultCache {
    db: sled::Db,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

impl ResultCache {
    /// 创建或打开缓存数据库
    pub fn open(cache_path: &Path) -> anyhow::Result<Self> {
        let db = sled::open(cache_path)?;
        tracing::info!("结果缓存已加载: {:?}", cache_path);
        Ok(Self { db })
    }

    fn search_key(query: &str, kind: Option<ContentKind>, limit: usize) -> String {
        let kind = kind.map(|k| k.to_string()).unwrap_or_default();
        format!("search:{}:{}:{}", query, kind, limit)
    }

    fn suggest_key(partial: &str) -> String {
        format!("suggest:{}", partial)
    }

    /// 条目按 (过期时间, 值) 元组序列化；到期条目在读取时顺手删除
    fn get_entry<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.db.get(key.as_bytes()) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("缓存读取失败 '{}': {}", key, e);
                return None;
            }
        };
        let (expires_at, value): (u64, T) = match bincode::deserialize(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("缓存条目解码失败 '{}': {}", key, e);
                let _ = self.db.remove(key.as_bytes());
                return None;
            }
        };
        if expires_at <= now_secs() {
            let _ = self.db.remove(key.as_bytes());
            return None;
        }
        Some(value)
    }

    fn set_entry<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let entry = (now_secs() + ttl_secs, value);
        let bytes = match bincode::serialize(&entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("缓存条目编码失败 '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = self.db.insert(key.as_bytes(), bytes) {
            tracing::warn!("缓存写入失败 '{}': {}", key, e);
            return;
        }
        let _ = self.db.flush();
    }

    pub fn get_search(
        &self,
        query: &str,
        kind: Option<ContentKind>,
        limit: usize,
    ) -> Option<Vec<SearchResult>> {
        self.get_entry(&Self::search_key(query, kind, limit))
    }

    pub fn set_search(
        &self,
        query: &str,
        kind: Option<ContentKind>,
        limit: usize,
        results: &[SearchResult],
        ttl_secs: u64,
    ) {
        self.set_entry(&Self::search_key(query, kind, limit), &results, ttl_secs);
    }

    pub fn get_suggestions(&self, partial: &str) -> Option<Vec<TitleSuggestion>> {
        self.get_entry(&Self::suggest_key(partial))
    }

    pub fn set_suggestions(&self, partial: &str, suggestions: &[TitleSuggestion], ttl_secs: u64) {
        self.set_entry(&Self::suggest_key(partial), &suggestions, ttl_secs);
    }

    /// 清空全部缓存条目
    pub fn clear(&self) -> anyhow::Result<()> {
        self.db.clear()?;
        self.db.flush()?;
        Ok(())
    }

    /// 获取缓存统计信息
    pub fn stats(&self) -> (usize, u64) {
        let count = self.db.len();
        let size = self.db.size_on_disk().unwrap_or(0);
        (count, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentKind;

    fn sample_results() -> Vec<SearchResult> {
        vec![SearchResult {
            kind: ContentKind::Faq,
            id: 1,
            title: "Refund Policy".to_string(),
            url: None,
            file_path: None,
            created_at: 1000,
            content: "Our refund policy allows 30 days".to_string(),
            highlighted_snippet: "Our <b>refund</b> <b>policy</b> allows 30 days".to_string(),
            snippet: "Our refund policy allows 30 days".to_string(),
            rank: 0.9,
        }]
    }

    fn open_cache() -> (tempfile::TempDir, ResultCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResultCache::open(dir.path()).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_search_round_trip() {
        let (_dir, cache) = open_cache();
        let results = sample_results();

        assert!(cache.get_search("refund", None, 20).is_none());
        cache.set_search("refund", None, 20, &results, SEARCH_TTL_SECS);
        assert_eq!(cache.get_search("refund", None, 20).unwrap(), results);

        // kind 与 limit 都是键的一部分
        assert!(cache.get_search("refund", Some(ContentKind::Faq), 20).is_none());
        assert!(cache.get_search("refund", None, 10).is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let (_dir, cache) = open_cache();
        cache.set_search("refund", None, 20, &sample_results(), 0);
        assert!(cache.get_search("refund", None, 20).is_none());
    }

    #[test]
    fn test_suggest_round_trip() {
        let (_dir, cache) = open_cache();
        let suggestions = vec![TitleSuggestion {
            title: "Refund Policy".to_string(),
            kind: ContentKind::Faq,
        }];
        cache.set_suggestions("re", &suggestions, SUGGEST_TTL_SECS);
        assert_eq!(cache.get_suggestions("re").unwrap(), suggestions);
    }

    #[test]
    fn test_clear() {
        let (_dir, cache) = open_cache();
        cache.set_suggestions("re", &[], SUGGEST_TTL_SECS);
        cache.clear().unwrap();
        assert!(cache.get_suggestions("re").is_none());
        assert_eq!(cache.stats().0, 0);
    }
}
