// search-core/src/highlight.rs
//! 摘要与高亮
//!
//! 对每条结果的正文生成两种摘要：
//! - `highlighted`: 第一处命中附近的窗口，命中词包在 `<b>` 标记里。
//!   先按完整词序列匹配；不满足时退化为最后一个词元的前缀匹配；
//!   仍无命中则直接使用纯文本摘要。
//! - `snippet`: 正文前 N 个字符的纯文本截断，始终可用。

use query::{Atom, WebQuery};

pub const MARK_OPEN: &str = "<b>";
pub const MARK_CLOSE: &str = "</b>";

/// 命中点前保留的上下文字节数
const EXCERPT_CONTEXT: usize = 60;

/// 一条结果的两种摘要
#[derive(Debug, Clone, PartialEq)]
pub struct Excerpt {
    pub highlighted: String,
    pub snippet: String,
}

/// 生成摘要。空文本返回两个空串，不报错。
pub fn highlight(text: &str, query: &WebQuery, snippet_chars: usize) -> Excerpt {
    let snippet = truncate_chars(text, snippet_chars);
    if text.is_empty() {
        return Excerpt { highlighted: String::new(), snippet };
    }

    let spans = match_spans(text, query, false).or_else(|| match_spans(text, query, true));
    let highlighted = match spans {
        Some(spans) => render_excerpt(text, &spans, snippet_chars),
        None => snippet.clone(),
    };

    Excerpt { highlighted, snippet }
}

/// 纯文本截断：按字符数截断，保证落在字符边界上
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// 文本中的一个词：字节范围 + 小写形式
struct TextWord {
    start: usize,
    end: usize,
    lower: String,
}

fn words_of(text: &str) -> Vec<TextWord> {
    let mut words = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_alphanumeric() {
            let lc = ch.to_lowercase().next().unwrap_or(ch);
            match &mut current {
                Some((_, word)) => word.push(lc),
                None => current = Some((idx, lc.to_string())),
            }
        } else if let Some((start, word)) = current.take() {
            words.push(TextWord { start, end: idx, lower: word });
        }
    }
    if let Some((start, word)) = current {
        words.push(TextWord { start, end: text.len(), lower: word });
    }
    words
}

/// 找出全部正向原子的命中区间（字节范围）。
///
/// 每个原子的词元序列必须以相邻词的形式出现；`prefix_mode` 下最后一个
/// 原子的最后一个词元按前缀匹配（对应检索的前缀回退层）。任何一个原子
/// 无命中即整体视为不匹配。
fn match_spans(text: &str, query: &WebQuery, prefix_mode: bool) -> Option<Vec<(usize, usize)>> {
    let words = words_of(text);
    let atoms = &query.must;
    let mut all_spans: Vec<(usize, usize)> = Vec::new();

    for (i, atom) in atoms.iter().enumerate() {
        let prefix_last = prefix_mode && i == atoms.len() - 1;
        let spans = atom_spans(&words, atom, prefix_last);
        if spans.is_empty() {
            return None;
        }
        all_spans.extend(spans);
    }

    all_spans.sort_unstable();
    all_spans.dedup();
    Some(all_spans)
}

fn atom_spans(words: &[TextWord], atom: &Atom, prefix_last: bool) -> Vec<(usize, usize)> {
    let tokens = atom.words();
    let mut spans = Vec::new();
    if tokens.is_empty() || words.len() < tokens.len() {
        return spans;
    }

    for window in words.windows(tokens.len()) {
        let matched = window.iter().zip(&tokens).enumerate().all(|(i, (word, token))| {
            if prefix_last && i == tokens.len() - 1 {
                word.lower.starts_with(token.as_str())
            } else {
                word.lower == *token
            }
        });
        if matched {
            spans.push((window[0].start, window[tokens.len() - 1].end));
        }
    }
    spans
}

/// 以第一处命中为中心截取窗口并包裹命中词
fn render_excerpt(text: &str, spans: &[(usize, usize)], window_chars: usize) -> String {
    let first = spans[0];
    let mut start = first.0.saturating_sub(EXCERPT_CONTEXT);
    while start > 0 && !text.is_char_boundary(start) {
        start -= 1;
    }
    let end = advance_chars(text, start, window_chars);

    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    let mut cursor = start;
    for &(s, e) in spans {
        if s < cursor || e > end {
            continue;
        }
        out.push_str(&text[cursor..s]);
        out.push_str(MARK_OPEN);
        out.push_str(&text[s..e]);
        out.push_str(MARK_CLOSE);
        cursor = e;
    }
    out.push_str(&text[cursor..end]);
    if end < text.len() {
        out.push_str("...");
    }
    out
}

/// 从 start 起前进 n 个字符，返回字节位置
fn advance_chars(text: &str, start: usize, n: usize) -> usize {
    text[start..]
        .char_indices()
        .nth(n)
        .map(|(idx, _)| start + idx)
        .unwrap_or(text.len())
}
