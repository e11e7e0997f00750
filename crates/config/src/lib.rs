pub mod constants;

pub use etcetera::AppStrategy;
use etcetera::{AppStrategyArgs, choose_app_strategy};

use std::env;
use std::path::PathBuf;

pub fn create_strategy() -> std::result::Result<impl AppStrategy, etcetera::HomeDirError> {
    choose_app_strategy(AppStrategyArgs {
        top_level_domain: constants::TOP_LEVEL_DOMAIN.to_string(),
        author: constants::AUTHOR.to_string(),
        app_name: constants::APP_NAME.to_string(),
    })
}

/// 目录解析顺序：环境变量 > 平台约定目录 > 临时目录兜底
pub fn resolve_dir<S: AppStrategy>(
    env_key: &str,
    strategy: &S,
    pick: impl FnOnce(&S) -> Option<PathBuf>,
) -> PathBuf {
    match env::var_os(env_key) {
        Some(dir) => PathBuf::from(dir),
        None => pick(strategy).unwrap_or_else(|| env::temp_dir().join(constants::APP_NAME)),
    }
}

/// 运行时目录下的 socket 路径
pub fn socket_path(runtime_dir: &std::path::Path) -> PathBuf {
    runtime_dir.join(constants::UNIX_SOCKET_FILE_NAME)
}
