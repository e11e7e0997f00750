use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动搜索服务
    Serve,
    /// 扫描目录并索引其中的 PDF 文件
    Ingest {
        /// 要扫描的目录或单个 PDF 文件
        path: PathBuf,
    },
    /// 清除记录库、索引与结果缓存
    ClearCache,
}
