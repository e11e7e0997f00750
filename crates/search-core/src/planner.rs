// search-core/src/planner.rs
//! 查询计划器与三层打分
//!
//! 对每个未被类型过滤排除的内容类型构建一个打分子查询，然后把所有
//! 子查询的结果合并成单一排名列表（UNION 合并）：
//!
//! 1. 全文层：解析后的查询精确命中检索投影，使用后端原生相关度分
//! 2. 前缀层：最后一个词元加尾部通配后命中，原生分 × 0.8
//! 3. 子串层：原始查询串大小写无关地包含于标题（0.6）或正文（0.4）
//!
//! 层按先后顺序对每行生效：先命中的层决定该行的分数档，后面的层
//! 不再重复收录（按记录 ID 去重）。三层都不命中的行不会出现在结果中。
//!
//! 截断发生在跨类型合并排序之后，而不是按类型各取一份；高分类型可以
//! 占满整页结果。

use std::collections::HashSet;

use query::WebQuery;

use crate::error::StoreError;
use crate::models::{ContentKind, StoreRow, TitleSuggestion};

/// 前缀层相对全文层的折价系数
pub const PREFIX_DISCOUNT: f32 = 0.8;

/// 子串层命中标题的固定分
pub const TITLE_SUBSTRING_RANK: f32 = 0.6;

/// 子串层命中正文的固定分
pub const BODY_SUBSTRING_RANK: f32 = 0.4;

/// 内容存储的读取接口
///
/// 计划器只通过该接口访问存储，便于注入测试替身。
pub trait ContentSource {
    /// 全文层：解析后的查询命中检索投影，返回原生相关度分
    fn search_full_text(
        &self,
        kind: ContentKind,
        query: &WebQuery,
        limit: usize,
    ) -> Result<Vec<StoreRow>, StoreError>;

    /// 前缀层：最后一个词元按前缀匹配
    fn search_prefix(
        &self,
        kind: ContentKind,
        query: &WebQuery,
        limit: usize,
    ) -> Result<Vec<StoreRow>, StoreError>;

    /// 子串层：原始查询串的大小写无关包含测试，
    /// 返回行的分数已按标题 / 正文命中填好
    fn search_substring(&self, kind: ContentKind, needle: &str)
    -> Result<Vec<StoreRow>, StoreError>;

    /// 标题联想候选（排序、去重、截断由上层负责）
    fn suggest_titles(&self, partial: &str) -> Result<Vec<TitleSuggestion>, StoreError>;
}

/// 执行一次搜索计划：逐类型收集、合并、排序、截断
pub fn plan_search(
    source: &dyn ContentSource,
    raw_query: &str,
    parsed: &WebQuery,
    kind_filter: Option<ContentKind>,
    limit: usize,
) -> Result<Vec<StoreRow>, StoreError> {
    let kinds: Vec<ContentKind> = match kind_filter {
        Some(kind) => vec![kind],
        None => ContentKind::ALL.to_vec(),
    };

    let mut merged: Vec<StoreRow> = Vec::new();
    for kind in kinds {
        merged.extend(collect_kind(source, kind, raw_query, parsed, limit)?);
    }

    sort_by_rank(&mut merged);
    merged.truncate(limit);
    Ok(merged)
}

/// 单一类型的三层收集。每层按类型各取 limit 条候选（过量抓取，
/// 避免某个来源在合并前就被饿死）。
fn collect_kind(
    source: &dyn ContentSource,
    kind: ContentKind,
    raw_query: &str,
    parsed: &WebQuery,
    limit: usize,
) -> Result<Vec<StoreRow>, StoreError> {
    let mut seen: HashSet<u64> = HashSet::new();
    let mut rows: Vec<StoreRow> = Vec::new();

    for row in source.search_full_text(kind, parsed, limit)? {
        if seen.insert(row.id) {
            rows.push(row);
        }
    }

    for mut row in source.search_prefix(kind, parsed, limit)? {
        if seen.insert(row.id) {
            row.score *= PREFIX_DISCOUNT;
            rows.push(row);
        }
    }

    for row in source.search_substring(kind, raw_query)? {
        if seen.insert(row.id) {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// 排名降序。同分行按 created_at 降序、类型、ID 排列，
/// 保证固定数据快照下输出顺序确定。
pub fn sort_by_rank(rows: &mut [StoreRow]) {
    rows.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.created_at.cmp(&a.created_at))
            .then(a.kind.cmp(&b.kind))
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn row(kind: ContentKind, id: u64, score: f32, created_at: u64) -> StoreRow {
        StoreRow {
            kind,
            id,
            title: format!("title {}", id),
            body: format!("body {}", id),
            url: None,
            file_path: None,
            created_at,
            score,
        }
    }

    /// 按层返回固定行的测试替身，同时计数每层被调用的次数
    #[derive(Default)]
    struct StubSource {
        full_text: Vec<StoreRow>,
        prefix: Vec<StoreRow>,
        substring: Vec<StoreRow>,
        titles: Vec<TitleSuggestion>,
        fail: bool,
        calls: RefCell<Vec<&'static str>>,
    }

    impl ContentSource for StubSource {
        fn search_full_text(
            &self,
            kind: ContentKind,
            _query: &WebQuery,
            _limit: usize,
        ) -> Result<Vec<StoreRow>, StoreError> {
            self.calls.borrow_mut().push("full_text");
            if self.fail {
                return Err(StoreError::NotFound { kind, id: 0 });
            }
            Ok(self.full_text.iter().filter(|r| r.kind == kind).cloned().collect())
        }

        fn search_prefix(
            &self,
            kind: ContentKind,
            _query: &WebQuery,
            _limit: usize,
        ) -> Result<Vec<StoreRow>, StoreError> {
            self.calls.borrow_mut().push("prefix");
            Ok(self.prefix.iter().filter(|r| r.kind == kind).cloned().collect())
        }

        fn search_substring(
            &self,
            kind: ContentKind,
            _needle: &str,
        ) -> Result<Vec<StoreRow>, StoreError> {
            self.calls.borrow_mut().push("substring");
            Ok(self.substring.iter().filter(|r| r.kind == kind).cloned().collect())
        }

        fn suggest_titles(&self, _partial: &str) -> Result<Vec<TitleSuggestion>, StoreError> {
            self.calls.borrow_mut().push("suggest");
            if self.fail {
                return Err(StoreError::NotFound { kind: ContentKind::Faq, id: 0 });
            }
            Ok(self.titles.clone())
        }
    }

    fn parsed(q: &str) -> WebQuery {
        query::parse_query(q).unwrap()
    }

    #[test]
    fn test_merge_takes_global_top_not_per_kind_quota() {
        // FAQ 与 PDF 各 15 条命中，limit 20：合并后应取全局前 20，
        // 而不是每类各 10 条
        let mut full_text = Vec::new();
        for i in 0..15 {
            full_text.push(row(ContentKind::Faq, i, 1.0 - i as f32 * 0.01, 100));
        }
        for i in 100..115 {
            full_text.push(row(ContentKind::Pdf, i, 0.5 - (i - 100) as f32 * 0.01, 100));
        }
        let source = StubSource { full_text, ..Default::default() };

        let rows = plan_search(&source, "refund", &parsed("refund"), None, 20).unwrap();
        assert_eq!(rows.len(), 20);
        // 全部 15 条 FAQ 分数都高于任何 PDF，应整体排在前面
        assert!(rows[..15].iter().all(|r| r.kind == ContentKind::Faq));
        assert_eq!(rows[15..].iter().filter(|r| r.kind == ContentKind::Pdf).count(), 5);
    }

    #[test]
    fn test_rank_descending_with_deterministic_ties() {
        let full_text = vec![
            row(ContentKind::Faq, 1, 0.5, 100),
            row(ContentKind::Pdf, 2, 0.5, 300),
            row(ContentKind::Link, 3, 0.5, 300),
            row(ContentKind::Faq, 4, 0.9, 50),
        ];
        let source = StubSource { full_text, ..Default::default() };

        let rows = plan_search(&source, "q", &parsed("q"), None, 20).unwrap();
        let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();
        // 0.9 在前；0.5 的三行按 created_at 降序，再按类型序 (faq < link < pdf)
        assert_eq!(ids, vec![4, 3, 2, 1]);

        // 同一快照重复执行，顺序不变
        let again: Vec<u64> = plan_search(&source, "q", &parsed("q"), None, 20)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn test_full_text_hit_is_not_rescored_by_fallbacks() {
        // 同一条记录同时命中全文层与前缀层：保留全文层的原生分，
        // 不得被前缀层折价重复收录
        let source = StubSource {
            full_text: vec![row(ContentKind::Faq, 1, 1.0, 100)],
            prefix: vec![row(ContentKind::Faq, 1, 1.0, 100)],
            substring: vec![row(ContentKind::Faq, 1, TITLE_SUBSTRING_RANK, 100)],
            ..Default::default()
        };

        let rows = plan_search(&source, "q", &parsed("q"), None, 20).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, 1.0);
    }

    #[test]
    fn test_prefix_fallback_is_discounted() {
        let source = StubSource {
            prefix: vec![row(ContentKind::Faq, 1, 1.0, 100)],
            ..Default::default()
        };
        let rows = plan_search(&source, "q", &parsed("q"), None, 20).unwrap();
        assert_eq!(rows[0].score, PREFIX_DISCOUNT);
    }

    #[test]
    fn test_kind_filter_limits_sub_queries() {
        let source = StubSource {
            full_text: vec![
                row(ContentKind::Faq, 1, 0.9, 100),
                row(ContentKind::Pdf, 2, 0.8, 100),
            ],
            ..Default::default()
        };
        let rows =
            plan_search(&source, "q", &parsed("q"), Some(ContentKind::Pdf), 20).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, ContentKind::Pdf);
        // 每类型三层各调用一次
        assert_eq!(source.calls.borrow().len(), 3);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let source = StubSource::default();
        let rows = plan_search(&source, "xyzzynomatch", &parsed("xyzzynomatch"), None, 20).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_store_failure_propagates() {
        let source = StubSource { fail: true, ..Default::default() };
        assert!(plan_search(&source, "q", &parsed("q"), None, 20).is_err());
    }
}
