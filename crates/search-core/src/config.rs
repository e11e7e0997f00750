// search-core/src/config.rs
//! 配置模块

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cache::{SEARCH_TTL_SECS, SUGGEST_TTL_SECS};

/// 搜索服务配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub index: IndexConfig,
    pub cache: CacheConfig,
    pub search: SearchTuning,
}

/// 存储与索引配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// 记录库与索引所在目录
    pub storage_path: String,
    pub writer_memory: usize,
}

/// 结果缓存配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub path: String,
    pub search_ttl_secs: u64,
    pub suggest_ttl_secs: u64,
}

/// 检索行为参数
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchTuning {
    /// 未指定或非正数 limit 时的默认值
    pub default_limit: usize,
    pub suggest_limit: usize,
    /// 联想输入的最小字符数，不足直接返回空
    pub suggest_min_chars: usize,
    /// 纯文本摘要长度（字符）
    pub snippet_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index: IndexConfig::default(),
            cache: CacheConfig::default(),
            search: SearchTuning::default(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            storage_path: "./storage".to_string(),
            writer_memory: 50_000_000,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: "./cache".to_string(),
            search_ttl_secs: SEARCH_TTL_SECS,
            suggest_ttl_secs: SUGGEST_TTL_SECS,
        }
    }
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            default_limit: 20,
            suggest_limit: 5,
            suggest_min_chars: 2,
            snippet_length: 200,
        }
    }
}

impl SearchConfig {
    /// 从 TOML 文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SearchConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// 尝试加载配置，失败则使用默认值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path).unwrap_or_default()
    }
}
