// search-core/src/schema/builder.rs
//! Schema 构建器
//!
//! 构建 Tantivy 索引 Schema，统一管理字段配置

use super::fields::*;
use tantivy::schema::*;

/// 构建 Tantivy Schema
///
/// # 字段
/// - `title` / `body`: 分词索引（含词频与位置，支持短语查询），存储
/// - `kind`: 精确匹配，存储
/// - `id`: 数值索引（按记录 ID 删除旧投影），存储
/// - `url` / `file_path`: 仅存储
/// - `created_at`: 快速字段，存储
pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    let text_options = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(TOKENIZER_NAME)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored();

    schema_builder.add_text_field(FIELD_TITLE, text_options.clone());
    schema_builder.add_text_field(FIELD_BODY, text_options);

    schema_builder.add_text_field(FIELD_KIND, STRING | STORED);
    schema_builder.add_text_field(FIELD_URL, STORED);
    schema_builder.add_text_field(FIELD_FILE_PATH, STORED);

    schema_builder.add_u64_field(FIELD_ID, INDEXED | FAST | STORED);
    schema_builder.add_u64_field(FIELD_CREATED_AT, FAST | STORED);

    schema_builder.build()
}

/// Schema 字段辅助结构
///
/// 缓存字段引用，避免重复查找
pub struct SchemaFields {
    pub kind: Field,
    pub id: Field,
    pub title: Field,
    pub body: Field,
    pub url: Field,
    pub file_path: Field,
    pub created_at: Field,
}

impl SchemaFields {
    /// 从 Schema 中提取所有字段引用
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            kind: schema.get_field(FIELD_KIND).expect("missing kind field"),
            id: schema.get_field(FIELD_ID).expect("missing id field"),
            title: schema.get_field(FIELD_TITLE).expect("missing title field"),
            body: schema.get_field(FIELD_BODY).expect("missing body field"),
            url: schema.get_field(FIELD_URL).expect("missing url field"),
            file_path: schema
                .get_field(FIELD_FILE_PATH)
                .expect("missing file_path field"),
            created_at: schema
                .get_field(FIELD_CREATED_AT)
                .expect("missing created_at field"),
        }
    }
}
