// search-core/src/schema/fields.rs
//! 字段名常量定义
//!
//! 统一管理所有 Schema 字段名，避免魔法字符串

/// 内容类型（"faq" / "link" / "pdf"，精确匹配）
pub const FIELD_KIND: &str = "kind";

/// 记录 ID（由内容存储分配，删除与重建投影时按此定位）
pub const FIELD_ID: &str = "id";

/// 标题（FAQ 标题 / 链接标题 / PDF 文件名，分词索引）
pub const FIELD_TITLE: &str = "title";

/// 正文（FAQ 内容 / 链接描述 / PDF 提取文本，全文检索主字段）
pub const FIELD_BODY: &str = "body";

/// 链接 URL（仅存储，不索引）
pub const FIELD_URL: &str = "url";

/// PDF 文件路径（仅存储，不索引）
pub const FIELD_FILE_PATH: &str = "file_path";

/// 创建时间（Unix 时间戳秒，合并排序的次级键）
pub const FIELD_CREATED_AT: &str = "created_at";

/// 标题 / 正文使用的分词器名称。
/// 小写 + 按非字母数字切分，与查询侧的词元切分保持一致。
pub const TOKENIZER_NAME: &str = "en_simple";
