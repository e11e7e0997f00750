// apps/server/src/command/ingest.rs
//! PDF 批量入库命令

use super::Command;
use crate::config::Config;
use crate::error::Result;
use ignore::WalkBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use search_core::SearchEngine;

pub struct IngestCommand {
    config: Config,
    root_path: PathBuf,
}

impl IngestCommand {
    pub fn new(cfg: Config, root_path: PathBuf) -> Self {
        Self { config: cfg, root_path }
    }

    fn collect_pdfs(root: &Path) -> Vec<PathBuf> {
        if root.is_file() {
            return vec![root.to_path_buf()];
        }
        WalkBuilder::new(root)
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl Command for IngestCommand {
    async fn execute(&self) -> Result<()> {
        let engine = SearchEngine::new(self.config.search_config())
            .map_err(|e| crate::error::error!("创建搜索引擎失败: {}", e))?;

        let pdfs = Self::collect_pdfs(&self.root_path);
        if pdfs.is_empty() {
            println!("{:?} 下没有找到 PDF 文件", self.root_path);
            return Ok(());
        }

        let bar = ProgressBar::new(pdfs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .expect("valid progress template"),
        );

        let mut indexed = 0usize;
        let mut failed = 0usize;
        for path in &pdfs {
            bar.set_message(
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
            match engine.ingest_pdf(path) {
                Ok(record) => {
                    indexed += 1;
                    tracing::debug!("已入库 #{}: {}", record.id, record.file_name);
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!("入库失败 {:?}: {}", path, e);
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        println!("入库完成: {} 成功, {} 失败", indexed, failed);
        Ok(())
    }
}
