// search-core/src/suggest.rs
//! 标题联想
//!
//! 输入过短直接返回空列表；候选按标题长度升序排列（短标题通常比
//! 偶然包含子串的长标题更贴近意图），去掉重复的 (标题, 类型) 对后
//! 截断到上限。

use crate::error::StoreError;
use crate::models::TitleSuggestion;
use crate::planner::ContentSource;

/// 联想输入的最小字符数
pub const MIN_PARTIAL_CHARS: usize = 2;

/// 在标题上做大小写无关的子串联想。
///
/// 存储错误原样返回，由调用方决定吞掉还是缓存；联想属于锦上添花的
/// 功能，入口处会把错误降级为空列表。
pub fn suggest_titles(
    source: &dyn ContentSource,
    partial: &str,
    limit: usize,
) -> Result<Vec<TitleSuggestion>, StoreError> {
    if partial.chars().count() < MIN_PARTIAL_CHARS {
        return Ok(Vec::new());
    }

    let mut suggestions = source.suggest_titles(partial)?;

    // 长度升序；次级键只为保证同一快照下顺序确定
    suggestions.sort_by(|a, b| {
        a.title
            .chars()
            .count()
            .cmp(&b.title.chars().count())
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.kind.cmp(&b.kind))
    });
    suggestions.dedup_by(|a, b| a.title == b.title && a.kind == b.kind);
    suggestions.truncate(limit);
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentKind, StoreRow};
    use query::WebQuery;
    use std::cell::Cell;

    struct TitleStub {
        titles: Vec<TitleSuggestion>,
        fail: bool,
        store_calls: Cell<usize>,
    }

    impl TitleStub {
        fn with(titles: Vec<(&str, ContentKind)>) -> Self {
            Self {
                titles: titles
                    .into_iter()
                    .map(|(title, kind)| TitleSuggestion { title: title.to_string(), kind })
                    .collect(),
                fail: false,
                store_calls: Cell::new(0),
            }
        }
    }

    impl ContentSource for TitleStub {
        fn search_full_text(
            &self,
            _kind: ContentKind,
            _query: &WebQuery,
            _limit: usize,
        ) -> Result<Vec<StoreRow>, StoreError> {
            unreachable!("suggest never runs search sub-queries")
        }

        fn search_prefix(
            &self,
            _kind: ContentKind,
            _query: &WebQuery,
            _limit: usize,
        ) -> Result<Vec<StoreRow>, StoreError> {
            unreachable!("suggest never runs search sub-queries")
        }

        fn search_substring(
            &self,
            _kind: ContentKind,
            _needle: &str,
        ) -> Result<Vec<StoreRow>, StoreError> {
            unreachable!("suggest never runs search sub-queries")
        }

        fn suggest_titles(&self, partial: &str) -> Result<Vec<TitleSuggestion>, StoreError> {
            self.store_calls.set(self.store_calls.get() + 1);
            if self.fail {
                return Err(StoreError::NotFound { kind: ContentKind::Faq, id: 0 });
            }
            let needle = partial.to_lowercase();
            Ok(self
                .titles
                .iter()
                .filter(|s| s.title.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }
    }

    #[test]
    fn test_short_partial_skips_store() {
        let stub = TitleStub::with(vec![("API keys", ContentKind::Faq)]);
        let suggestions = suggest_titles(&stub, "a", 5).unwrap();
        assert!(suggestions.is_empty());
        assert_eq!(stub.store_calls.get(), 0);
    }

    #[test]
    fn test_two_chars_reaches_store() {
        let stub = TitleStub::with(vec![("API keys", ContentKind::Faq)]);
        let suggestions = suggest_titles(&stub, "ap", 5).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(stub.store_calls.get(), 1);
    }

    #[test]
    fn test_shortest_title_first() {
        let stub = TitleStub::with(vec![
            ("Refund policy for enterprise customers", ContentKind::Faq),
            ("Refunds", ContentKind::Faq),
            ("Refund Policy", ContentKind::Faq),
        ]);
        let suggestions = suggest_titles(&stub, "refund", 5).unwrap();
        let titles: Vec<&str> = suggestions.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Refunds",
                "Refund Policy",
                "Refund policy for enterprise customers"
            ]
        );
    }

    #[test]
    fn test_duplicate_title_kind_pairs_suppressed() {
        let stub = TitleStub::with(vec![
            ("Billing", ContentKind::Faq),
            ("Billing", ContentKind::Faq),
            ("Billing", ContentKind::Link),
        ]);
        let suggestions = suggest_titles(&stub, "bill", 5).unwrap();
        // 同名不同类型各保留一条
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_limit_applied_after_ordering() {
        let stub = TitleStub::with(vec![
            ("aa match", ContentKind::Faq),
            ("match", ContentKind::Faq),
            ("a longer match title", ContentKind::Faq),
        ]);
        let suggestions = suggest_titles(&stub, "match", 2).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].title, "match");
    }

    #[test]
    fn test_store_error_propagates_for_caller_to_swallow() {
        let stub = TitleStub { fail: true, ..TitleStub::with(vec![]) };
        assert!(suggest_titles(&stub, "ab", 5).is_err());
    }
}
