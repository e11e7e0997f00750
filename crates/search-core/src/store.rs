// search-core/src/store.rs
//! 内容存储
//!
//! sled 保存三类记录的规范数据（按大端 ID 作键，ID 由 `generate_id`
//! 分配），tantivy 保存检索投影（title + body 的分词表示）。每次记录
//! 写入都同步重建该记录的投影并重载 reader，投影不允许落后于记录。
//!
//! 读取侧实现 [`ContentSource`](crate::planner::ContentSource)：
//! - 全文层 / 前缀层走 tantivy
//! - 子串层与标题联想直接扫描 sled 记录（规范数据，天然无陈旧问题）

use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use sled::Tree;
use tantivy::collector::TopDocs;
use tantivy::query::{
    BooleanQuery, EmptyQuery, Occur, PhrasePrefixQuery, PhraseQuery, Query, QueryParser,
    RegexQuery, TermQuery,
};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, TantivyDocument, Term, doc};

use query::{Atom, WebQuery};

use crate::error::StoreError;
use crate::models::{
    ContentKind, FaqRecord, LinkRecord, Paged, PdfRecord, RecordSummary, StoreRow, TitleSuggestion,
};
use crate::planner::{BODY_SUBSTRING_RANK, ContentSource, TITLE_SUBSTRING_RANK};
use crate::schema::{SchemaFields, TOKENIZER_NAME, build_schema};

const DEFAULT_PAGE_SIZE: u64 = 10;

/// 内容存储：sled 记录库 + tantivy 检索投影
pub struct RecordStore {
    db: sled::Db,
    faqs: Tree,
    links: Tree,
    pdfs: Tree,
    index: Index,
    reader: IndexReader,
    fields: SchemaFields,
    writer_memory: usize,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

impl RecordStore {
    /// 打开（或初始化）存储目录
    pub fn open(storage_path: &Path, writer_memory: usize) -> Result<Self, StoreError> {
        let db = sled::open(storage_path.join("records"))?;
        let faqs = db.open_tree(ContentKind::Faq.to_string())?;
        let links = db.open_tree(ContentKind::Link.to_string())?;
        let pdfs = db.open_tree(ContentKind::Pdf.to_string())?;

        let schema = build_schema();
        let index_path = storage_path.join("index");
        std::fs::create_dir_all(&index_path)?;
        let index = Index::open_or_create(
            tantivy::directory::MmapDirectory::open(&index_path)?,
            schema.clone(),
        )?;
        index.tokenizers().register(
            TOKENIZER_NAME,
            TextAnalyzer::builder(SimpleTokenizer::default())
                .filter(LowerCaser)
                .build(),
        );

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()?;
        let fields = SchemaFields::from_schema(&schema);

        tracing::info!("内容存储已加载: {:?}", storage_path);
        Ok(Self { db, faqs, links, pdfs, index, reader, fields, writer_memory })
    }

    fn tree(&self, kind: ContentKind) -> &Tree {
        match kind {
            ContentKind::Faq => &self.faqs,
            ContentKind::Link => &self.links,
            ContentKind::Pdf => &self.pdfs,
        }
    }

    // ============== 写入路径 ==============

    pub fn create_faq(
        &self,
        title: String,
        content: String,
        tags: Vec<String>,
    ) -> Result<FaqRecord, StoreError> {
        let now = now_secs();
        let record = FaqRecord {
            id: self.db.generate_id()?,
            title,
            content,
            tags,
            created_at: now,
            updated_at: now,
        };
        self.put_faq(&record)?;
        tracing::info!("已索引 FAQ #{}: {}", record.id, record.title);
        Ok(record)
    }

    /// 部分更新：None 字段保持原值
    pub fn update_faq(
        &self,
        id: u64,
        title: Option<String>,
        content: Option<String>,
        tags: Option<Vec<String>>,
    ) -> Result<FaqRecord, StoreError> {
        let mut record = self
            .get_faq(id)?
            .ok_or(StoreError::NotFound { kind: ContentKind::Faq, id })?;
        if let Some(title) = title {
            record.title = title;
        }
        if let Some(content) = content {
            record.content = content;
        }
        if let Some(tags) = tags {
            record.tags = tags;
        }
        record.updated_at = now_secs();
        self.put_faq(&record)?;
        Ok(record)
    }

    pub fn get_faq(&self, id: u64) -> Result<Option<FaqRecord>, StoreError> {
        Ok(self
            .faqs
            .get(id.to_be_bytes())?
            .map(|bytes| bincode::deserialize(&bytes))
            .transpose()?)
    }

    fn put_faq(&self, record: &FaqRecord) -> Result<(), StoreError> {
        self.faqs
            .insert(record.id.to_be_bytes(), bincode::serialize(record)?)?;
        self.reindex(
            ContentKind::Faq,
            record.id,
            &record.title,
            &record.content,
            None,
            None,
            record.created_at,
        )
    }

    pub fn create_link(
        &self,
        url: String,
        title: String,
        description: String,
    ) -> Result<LinkRecord, StoreError> {
        let now = now_secs();
        let record = LinkRecord {
            id: self.db.generate_id()?,
            url,
            title,
            description,
            created_at: now,
            updated_at: now,
        };
        self.put_link(&record)?;
        tracing::info!("已索引链接 #{}: {}", record.id, record.title);
        Ok(record)
    }

    pub fn update_link(
        &self,
        id: u64,
        url: Option<String>,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<LinkRecord, StoreError> {
        let mut record = self
            .get_link(id)?
            .ok_or(StoreError::NotFound { kind: ContentKind::Link, id })?;
        if let Some(url) = url {
            record.url = url;
        }
        if let Some(title) = title {
            record.title = title;
        }
        if let Some(description) = description {
            record.description = description;
        }
        record.updated_at = now_secs();
        self.put_link(&record)?;
        Ok(record)
    }

    pub fn get_link(&self, id: u64) -> Result<Option<LinkRecord>, StoreError> {
        Ok(self
            .links
            .get(id.to_be_bytes())?
            .map(|bytes| bincode::deserialize(&bytes))
            .transpose()?)
    }

    fn put_link(&self, record: &LinkRecord) -> Result<(), StoreError> {
        self.links
            .insert(record.id.to_be_bytes(), bincode::serialize(record)?)?;
        self.reindex(
            ContentKind::Link,
            record.id,
            &record.title,
            &record.description,
            Some(&record.url),
            None,
            record.created_at,
        )
    }

    pub fn create_pdf(
        &self,
        file_name: String,
        file_path: String,
        content_text: String,
        file_size: u64,
    ) -> Result<PdfRecord, StoreError> {
        let record = PdfRecord {
            id: self.db.generate_id()?,
            file_name,
            file_path,
            content_text,
            file_size,
            uploaded_at: now_secs(),
        };
        self.pdfs
            .insert(record.id.to_be_bytes(), bincode::serialize(&record)?)?;
        self.reindex(
            ContentKind::Pdf,
            record.id,
            &record.file_name,
            &record.content_text,
            None,
            Some(&record.file_path),
            record.uploaded_at,
        )?;
        tracing::info!("已索引 PDF #{}: {}", record.id, record.file_name);
        Ok(record)
    }

    pub fn get_pdf(&self, id: u64) -> Result<Option<PdfRecord>, StoreError> {
        Ok(self
            .pdfs
            .get(id.to_be_bytes())?
            .map(|bytes| bincode::deserialize(&bytes))
            .transpose()?)
    }

    /// 删除记录及其投影。返回记录是否存在。
    pub fn delete(&self, kind: ContentKind, id: u64) -> Result<bool, StoreError> {
        let existed = self.tree(kind).remove(id.to_be_bytes())?.is_some();
        if existed {
            let mut writer: IndexWriter = self.index.writer(self.writer_memory)?;
            writer.delete_term(Term::from_field_u64(self.fields.id, id));
            writer.commit()?;
            self.reader.reload()?;
            tracing::info!("已从索引删除 {} #{}", kind, id);
        }
        Ok(existed)
    }

    /// 分页列出某类型的记录，创建时间降序（ID 单调分配，键序即时序）
    pub fn list(
        &self,
        kind: ContentKind,
        page: u64,
        limit: u64,
    ) -> Result<Paged<RecordSummary>, StoreError> {
        let limit = if limit == 0 { DEFAULT_PAGE_SIZE } else { limit };
        let page = page.max(1);
        let tree = self.tree(kind);
        let total = tree.len() as u64;

        let offset = (page - 1) * limit;
        let mut data = Vec::new();
        for item in tree.iter().rev().skip(offset as usize).take(limit as usize) {
            let (_, bytes) = item?;
            data.push(self.summary_of(kind, &bytes)?);
        }

        Ok(Paged {
            data,
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        })
    }

    fn summary_of(&self, kind: ContentKind, bytes: &[u8]) -> Result<RecordSummary, StoreError> {
        Ok(match kind {
            ContentKind::Faq => {
                let r: FaqRecord = bincode::deserialize(bytes)?;
                RecordSummary { kind, id: r.id, title: r.title, created_at: r.created_at }
            }
            ContentKind::Link => {
                let r: LinkRecord = bincode::deserialize(bytes)?;
                RecordSummary { kind, id: r.id, title: r.title, created_at: r.created_at }
            }
            ContentKind::Pdf => {
                let r: PdfRecord = bincode::deserialize(bytes)?;
                RecordSummary { kind, id: r.id, title: r.file_name, created_at: r.uploaded_at }
            }
        })
    }

    /// 重建一条记录的检索投影：先删旧文档再写入，提交后立即重载 reader
    fn reindex(
        &self,
        kind: ContentKind,
        id: u64,
        title: &str,
        body: &str,
        url: Option<&str>,
        file_path: Option<&str>,
        created_at: u64,
    ) -> Result<(), StoreError> {
        let mut writer: IndexWriter = self.index.writer(self.writer_memory)?;
        writer.delete_term(Term::from_field_u64(self.fields.id, id));

        let mut document = doc!(
            self.fields.kind => kind.to_string(),
            self.fields.id => id,
            self.fields.title => title,
            self.fields.body => body,
            self.fields.created_at => created_at
        );
        if let Some(url) = url {
            document.add_text(self.fields.url, url);
        }
        if let Some(file_path) = file_path {
            document.add_text(self.fields.file_path, file_path);
        }
        writer.add_document(document)?;
        writer.commit()?;
        self.reader.reload()?;
        Ok(())
    }

    /// 记录总数（调试与统计用）
    pub fn stats(&self) -> (usize, usize, usize) {
        (self.faqs.len(), self.links.len(), self.pdfs.len())
    }

    // ============== 读取路径 ==============

    fn kind_clause(&self, kind: ContentKind) -> Box<dyn Query> {
        Box::new(TermQuery::new(
            Term::from_field_text(self.fields.kind, &kind.to_string()),
            IndexRecordOption::Basic,
        ))
    }

    /// 一个词元在标题或正文任一字段出现
    fn term_clause(&self, token: &str) -> Box<dyn Query> {
        let clauses: Vec<(Occur, Box<dyn Query>)> = [self.fields.title, self.fields.body]
            .into_iter()
            .map(|field| {
                (
                    Occur::Should,
                    Box::new(TermQuery::new(
                        Term::from_field_text(field, token),
                        IndexRecordOption::WithFreqs,
                    )) as Box<dyn Query>,
                )
            })
            .collect();
        Box::new(BooleanQuery::new(clauses))
    }

    /// 一个原子（词或短语）在标题或正文任一字段命中
    fn atom_clause(&self, atom: &Atom) -> Box<dyn Query> {
        let tokens = atom.words();
        match tokens.as_slice() {
            [] => Box::new(EmptyQuery),
            [token] => self.term_clause(token),
            tokens => {
                let clauses: Vec<(Occur, Box<dyn Query>)> = [self.fields.title, self.fields.body]
                    .into_iter()
                    .map(|field| {
                        let terms: Vec<Term> = tokens
                            .iter()
                            .map(|t| Term::from_field_text(field, t))
                            .collect();
                        (Occur::Should, Box::new(PhraseQuery::new(terms)) as Box<dyn Query>)
                    })
                    .collect();
                Box::new(BooleanQuery::new(clauses))
            }
        }
    }

    /// 原子的前缀形态：最后一个词元按前缀匹配。
    /// 词元只含字母数字，可直接拼进词典正则。
    fn atom_prefix_clause(&self, atom: &Atom) -> Result<Box<dyn Query>, StoreError> {
        let tokens = atom.words();
        match tokens.as_slice() {
            [] => Ok(Box::new(EmptyQuery)),
            [token] => {
                let pattern = format!("{}.*", token);
                let clauses: Vec<(Occur, Box<dyn Query>)> = vec![
                    (
                        Occur::Should,
                        Box::new(RegexQuery::from_pattern(&pattern, self.fields.title)?)
                            as Box<dyn Query>,
                    ),
                    (
                        Occur::Should,
                        Box::new(RegexQuery::from_pattern(&pattern, self.fields.body)?),
                    ),
                ];
                Ok(Box::new(BooleanQuery::new(clauses)))
            }
            tokens => {
                let clauses: Vec<(Occur, Box<dyn Query>)> = [self.fields.title, self.fields.body]
                    .into_iter()
                    .map(|field| {
                        let terms: Vec<Term> = tokens
                            .iter()
                            .map(|t| Term::from_field_text(field, t))
                            .collect();
                        (
                            Occur::Should,
                            Box::new(PhrasePrefixQuery::new(terms)) as Box<dyn Query>,
                        )
                    })
                    .collect();
                Ok(Box::new(BooleanQuery::new(clauses)))
            }
        }
    }

    fn collect_rows(
        &self,
        searcher: &Searcher,
        search_query: &dyn Query,
        limit: usize,
    ) -> Result<Vec<StoreRow>, StoreError> {
        let top_docs = searcher.search(search_query, &TopDocs::with_limit(limit.max(1)))?;
        let mut rows = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let document: TantivyDocument = searcher.doc(address)?;
            match self.row_of(&document, score) {
                Some(row) => rows.push(row),
                None => tracing::warn!("检索投影中存在残缺文档，已跳过"),
            }
        }
        Ok(rows)
    }

    fn row_of(&self, document: &TantivyDocument, score: f32) -> Option<StoreRow> {
        let kind = document
            .get_first(self.fields.kind)
            .and_then(|v| v.as_str())
            .and_then(|s| ContentKind::from_str(s).ok())?;
        let id = document.get_first(self.fields.id).and_then(|v| v.as_u64())?;
        let text = |field| {
            document
                .get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        Some(StoreRow {
            kind,
            id,
            title: text(self.fields.title),
            body: text(self.fields.body),
            url: document
                .get_first(self.fields.url)
                .and_then(|v| v.as_str())
                .map(str::to_string),
            file_path: document
                .get_first(self.fields.file_path)
                .and_then(|v| v.as_str())
                .map(str::to_string),
            created_at: document
                .get_first(self.fields.created_at)
                .and_then(|v| v.as_u64())
                .unwrap_or(0),
            score,
        })
    }
}

fn faq_row(record: FaqRecord, score: f32) -> StoreRow {
    StoreRow {
        kind: ContentKind::Faq,
        id: record.id,
        title: record.title,
        body: record.content,
        url: None,
        file_path: None,
        created_at: record.created_at,
        score,
    }
}

fn link_row(record: LinkRecord, score: f32) -> StoreRow {
    StoreRow {
        kind: ContentKind::Link,
        id: record.id,
        title: record.title,
        body: record.description,
        url: Some(record.url),
        file_path: None,
        created_at: record.created_at,
        score,
    }
}

fn pdf_row(record: PdfRecord, score: f32) -> StoreRow {
    StoreRow {
        kind: ContentKind::Pdf,
        id: record.id,
        title: record.file_name,
        body: record.content_text,
        url: None,
        file_path: Some(record.file_path),
        created_at: record.uploaded_at,
        score,
    }
}

/// 子串包含测试：命中标题给标题分，否则命中正文给正文分，都不中则丢弃
fn substring_score(title: &str, body: &str, needle: &str) -> Option<f32> {
    if title.to_lowercase().contains(needle) {
        Some(TITLE_SUBSTRING_RANK)
    } else if body.to_lowercase().contains(needle) {
        Some(BODY_SUBSTRING_RANK)
    } else {
        None
    }
}

impl ContentSource for RecordStore {
    fn search_full_text(
        &self,
        kind: ContentKind,
        web_query: &WebQuery,
        limit: usize,
    ) -> Result<Vec<StoreRow>, StoreError> {
        let searcher = self.reader.searcher();
        let mut query_parser =
            QueryParser::for_index(&self.index, vec![self.fields.title, self.fields.body]);
        query_parser.set_conjunction_by_default();

        let syntax = web_query.to_index_syntax();
        let parsed = match query_parser.parse_query(&syntax) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("全文查询语法无法解析: '{}' - {}", syntax, e);
                return Ok(Vec::new());
            }
        };

        let scoped = BooleanQuery::new(vec![
            (Occur::Must, self.kind_clause(kind)),
            (Occur::Must, parsed),
        ]);
        self.collect_rows(&searcher, &scoped, limit)
    }

    fn search_prefix(
        &self,
        kind: ContentKind,
        web_query: &WebQuery,
        limit: usize,
    ) -> Result<Vec<StoreRow>, StoreError> {
        let Some((last, head)) = web_query.must.split_last() else {
            return Ok(Vec::new());
        };

        let searcher = self.reader.searcher();
        let mut clauses: Vec<(Occur, Box<dyn Query>)> =
            vec![(Occur::Must, self.kind_clause(kind))];
        for atom in head {
            clauses.push((Occur::Must, self.atom_clause(atom)));
        }
        clauses.push((Occur::Must, self.atom_prefix_clause(last)?));
        for atom in &web_query.must_not {
            clauses.push((Occur::MustNot, self.atom_clause(atom)));
        }

        let boolean = BooleanQuery::new(clauses);
        self.collect_rows(&searcher, &boolean, limit)
    }

    fn search_substring(
        &self,
        kind: ContentKind,
        needle: &str,
    ) -> Result<Vec<StoreRow>, StoreError> {
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::new();
        for item in self.tree(kind).iter() {
            let (_, bytes) = item?;
            let row = match kind {
                ContentKind::Faq => {
                    let r: FaqRecord = bincode::deserialize(&bytes)?;
                    substring_score(&r.title, &r.content, &needle).map(|s| faq_row(r, s))
                }
                ContentKind::Link => {
                    let r: LinkRecord = bincode::deserialize(&bytes)?;
                    substring_score(&r.title, &r.description, &needle).map(|s| link_row(r, s))
                }
                ContentKind::Pdf => {
                    let r: PdfRecord = bincode::deserialize(&bytes)?;
                    substring_score(&r.file_name, &r.content_text, &needle).map(|s| pdf_row(r, s))
                }
            };
            if let Some(row) = row {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn suggest_titles(&self, partial: &str) -> Result<Vec<TitleSuggestion>, StoreError> {
        let needle = partial.to_lowercase();
        let mut suggestions = Vec::new();
        for kind in ContentKind::ALL {
            for item in self.tree(kind).iter() {
                let (_, bytes) = item?;
                let summary = self.summary_of(kind, &bytes)?;
                if summary.title.to_lowercase().contains(&needle) {
                    suggestions.push(TitleSuggestion { title: summary.title, kind });
                }
            }
        }
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path(), 50_000_000).unwrap();
        (dir, store)
    }

    fn parsed(q: &str) -> WebQuery {
        query::parse_query(q).unwrap()
    }

    #[test]
    fn test_full_text_search_after_create() {
        let (_dir, store) = open_store();
        store
            .create_faq(
                "Refund Policy".into(),
                "Our refund policy allows 30 days".into(),
                vec!["billing".into()],
            )
            .unwrap();

        let rows = store
            .search_full_text(ContentKind::Faq, &parsed("refund policy"), 20)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Refund Policy");
        assert!(rows[0].score > 0.0);
        assert!(rows[0].url.is_none() && rows[0].file_path.is_none());
    }

    #[test]
    fn test_full_text_requires_all_terms() {
        let (_dir, store) = open_store();
        store
            .create_pdf(
                "notes.pdf".into(),
                "/srv/uploads/notes.pdf".into(),
                "a refund was mentioned once".into(),
                42,
            )
            .unwrap();

        // PDF 只含 "refund"，两个词的查询不在全文层命中
        let rows = store
            .search_full_text(ContentKind::Pdf, &parsed("refund policy"), 20)
            .unwrap();
        assert!(rows.is_empty());

        let rows = store
            .search_full_text(ContentKind::Pdf, &parsed("refund"), 20)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].file_path.as_deref(), Some("/srv/uploads/notes.pdf"));
    }

    #[test]
    fn test_phrase_query_needs_adjacency() {
        let (_dir, store) = open_store();
        store
            .create_faq("Payments".into(), "policy of refund is strict".into(), vec![])
            .unwrap();
        store
            .create_faq("Refunds".into(), "our refund policy is lenient".into(), vec![])
            .unwrap();

        let rows = store
            .search_full_text(ContentKind::Faq, &parsed(r#""refund policy""#), 20)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Refunds");
    }

    #[test]
    fn test_exclusion_term() {
        let (_dir, store) = open_store();
        store
            .create_faq("Refund drafts".into(), "refund draft pending".into(), vec![])
            .unwrap();
        store
            .create_faq("Refunds".into(), "refund finalized".into(), vec![])
            .unwrap();

        let rows = store
            .search_full_text(ContentKind::Faq, &parsed("refund -draft"), 20)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Refunds");
    }

    #[test]
    fn test_prefix_search_matches_longer_token() {
        let (_dir, store) = open_store();
        store
            .create_faq("WebSocket Tutorial".into(), "how to use sockets".into(), vec![])
            .unwrap();

        let rows = store
            .search_prefix(ContentKind::Faq, &parsed("websock"), 20)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "WebSocket Tutorial");
    }

    #[test]
    fn test_substring_scan_prefers_title_over_body() {
        let (_dir, store) = open_store();
        store
            .create_faq("WebSocket Tutorial".into(), "streaming basics".into(), vec![])
            .unwrap();
        store
            .create_faq("Streaming".into(), "uses websockets internally".into(), vec![])
            .unwrap();
        store
            .create_faq("Unrelated".into(), "nothing here".into(), vec![])
            .unwrap();

        let rows = store.search_substring(ContentKind::Faq, "websock").unwrap();
        assert_eq!(rows.len(), 2);
        let title_hit = rows.iter().find(|r| r.title == "WebSocket Tutorial").unwrap();
        let body_hit = rows.iter().find(|r| r.title == "Streaming").unwrap();
        assert_eq!(title_hit.score, TITLE_SUBSTRING_RANK);
        assert_eq!(body_hit.score, BODY_SUBSTRING_RANK);
    }

    #[test]
    fn test_update_rebuilds_projection() {
        let (_dir, store) = open_store();
        let record = store
            .create_faq("Alpha".into(), "first version".into(), vec![])
            .unwrap();

        store
            .update_faq(record.id, Some("Beta".into()), None, None)
            .unwrap();

        // 旧标题立即失效，新标题立即可检索
        assert!(store
            .search_full_text(ContentKind::Faq, &parsed("alpha"), 20)
            .unwrap()
            .is_empty());
        let rows = store
            .search_full_text(ContentKind::Faq, &parsed("beta"), 20)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].body, "first version");
    }

    #[test]
    fn test_delete_removes_projection_and_record() {
        let (_dir, store) = open_store();
        let record = store
            .create_link(
                "https://example.com".into(),
                "Example".into(),
                "an example site".into(),
            )
            .unwrap();

        assert!(store.delete(ContentKind::Link, record.id).unwrap());
        assert!(!store.delete(ContentKind::Link, record.id).unwrap());
        assert!(store
            .search_full_text(ContentKind::Link, &parsed("example"), 20)
            .unwrap()
            .is_empty());
        assert!(store.search_substring(ContentKind::Link, "example").unwrap().is_empty());
    }

    #[test]
    fn test_empty_pdf_body_matches_title_substring_only() {
        let (_dir, store) = open_store();
        store
            .create_pdf("handbook.pdf".into(), "/srv/handbook.pdf".into(), String::new(), 0)
            .unwrap();

        assert!(store
            .search_full_text(ContentKind::Pdf, &parsed("handbook"), 20)
            .unwrap()
            .len() == 1);
        let rows = store.search_substring(ContentKind::Pdf, "handbo").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, TITLE_SUBSTRING_RANK);
    }

    #[test]
    fn test_list_pagination_newest_first() {
        let (_dir, store) = open_store();
        for i in 0..25 {
            store
                .create_faq(format!("FAQ {}", i), "body".into(), vec![])
                .unwrap();
        }

        let first = store.list(ContentKind::Faq, 1, 10).unwrap();
        assert_eq!(first.data.len(), 10);
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.data[0].title, "FAQ 24");

        let last = store.list(ContentKind::Faq, 3, 10).unwrap();
        assert_eq!(last.data.len(), 5);
        assert_eq!(last.data[4].title, "FAQ 0");
    }

    #[test]
    fn test_suggest_titles_across_kinds() {
        let (_dir, store) = open_store();
        store
            .create_faq("Billing FAQ".into(), "how billing works".into(), vec![])
            .unwrap();
        store
            .create_link(
                "https://example.com/billing".into(),
                "Billing portal".into(),
                "external billing portal".into(),
            )
            .unwrap();
        store
            .create_pdf("billing-guide.pdf".into(), "/srv/billing-guide.pdf".into(), String::new(), 0)
            .unwrap();

        let suggestions = store.suggest_titles("bill").unwrap();
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions.iter().any(|s| s.kind == ContentKind::Pdf));
    }
}
