// search-core/src/extract.rs
//! 文本提取模块

use std::path::Path;

/// 从 PDF 提取正文文本。
///
/// 提取失败时返回空字符串并记录告警。空正文是合法状态：该记录不会命中
/// 全文层，但标题子串回退仍然有效。
pub fn extract_pdf_text(path: &Path) -> String {
    match pdf_extract::extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("PDF 文本提取失败 {:?}: {}", path, e);
            String::new()
        }
    }
}

/// PDF 记录的标题：文件名（含扩展名）
pub fn pdf_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(
            pdf_file_name(&PathBuf::from("/srv/uploads/manual.pdf")),
            "manual.pdf"
        );
    }

    #[test]
    fn test_extract_missing_file_degrades_to_empty() {
        let text = extract_pdf_text(&PathBuf::from("/does/not/exist.pdf"));
        assert!(text.is_empty());
    }
}
