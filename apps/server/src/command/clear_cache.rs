// apps/server/src/command/clear_cache.rs
//! 清除存储与缓存命令

use super::Command;
use crate::config::Config;
use crate::error::Result;
use std::fs;
use std::path::Path;

pub struct ClearCacheCommand {
    config: Config,
}

impl ClearCacheCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn count_dir(path: &Path) -> (usize, u64) {
        let mut files = 0;
        let mut bytes = 0u64;
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                if let Ok(metadata) = entry.metadata() {
                    if metadata.is_file() {
                        files += 1;
                        bytes += metadata.len();
                    } else if metadata.is_dir() {
                        let (sub_files, sub_bytes) = Self::count_dir(&entry.path());
                        files += sub_files;
                        bytes += sub_bytes;
                    }
                }
            }
        }
        (files, bytes)
    }

    fn remove_dir(path: &Path, name: &str) -> Result<(usize, u64)> {
        if !path.exists() {
            println!("  {} 不存在，跳过", name);
            return Ok((0, 0));
        }
        let (files, bytes) = Self::count_dir(path);
        fs::remove_dir_all(path)?;
        println!("  {} 已删除 {} 个文件, {}", name, files, Self::format_size(bytes));
        Ok((files, bytes))
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.2} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.2} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.2} KB", bytes as f64 / KB as f64)
        } else {
            format!("{} bytes", bytes)
        }
    }
}

#[async_trait::async_trait]
impl Command for ClearCacheCommand {
    async fn execute(&self) -> Result<()> {
        println!("清除存储与缓存");
        println!("  数据目录: {:?}", self.config.data_dir);
        println!("  缓存目录: {:?}", self.config.cache_dir);

        let mut total_files = 0;
        let mut total_bytes = 0u64;

        for (path, name) in [
            (self.config.data_dir.join("store"), "记录库与索引 (store/)"),
            (self.config.cache_dir.join("result_cache"), "结果缓存 (result_cache/)"),
        ] {
            let (files, bytes) = Self::remove_dir(&path, name)?;
            total_files += files;
            total_bytes += bytes;
        }

        println!(
            "清理完成: 共删除 {} 个文件, 释放 {}",
            total_files,
            Self::format_size(total_bytes)
        );
        println!("提示: 运行 'cargo run -p server -- ingest <路径>' 可重新索引 PDF");

        Ok(())
    }
}
