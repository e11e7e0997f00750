use crate::error::Result;
use config::{AppStrategy, create_strategy, resolve_dir};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default = "default_config", deny_unknown_fields)]
pub struct Config {
    /// Unix socket 所在目录
    pub runtime_dir: PathBuf,
    /// 记录库与索引所在目录
    pub data_dir: PathBuf,
    /// 结果缓存所在目录
    pub cache_dir: PathBuf,
}

fn default_config() -> Config {
    let strategy = create_strategy().expect("cannot determine home directory");

    Config {
        runtime_dir: resolve_dir("RUNTIME_DIRECTORY", &strategy, |s| s.runtime_dir()),
        data_dir: resolve_dir("STATE_DIRECTORY", &strategy, |s| Some(s.data_dir())),
        cache_dir: resolve_dir("CACHE_DIRECTORY", &strategy, |s| Some(s.cache_dir())),
    }
}

impl Config {
    /// 由服务端目录布局拼出核心库配置
    pub fn search_config(&self) -> search_core::SearchConfig {
        search_core::SearchConfig {
            index: search_core::IndexConfig {
                storage_path: self.data_dir.join("store").to_string_lossy().to_string(),
                ..Default::default()
            },
            cache: search_core::CacheConfig {
                path: self.cache_dir.join("result_cache").to_string_lossy().to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn load_str(user_config_str: &str) -> Result<Config> {
        let user_config: Config = toml::from_str(user_config_str)?;
        Ok(user_config)
    }

    pub fn load() -> Result<Config> {
        let strategy = create_strategy()?;
        let config_path = strategy
            .config_dir()
            .join(config::constants::SERVER_CONFIG_FILE_NAME);

        match std::fs::read_to_string(&config_path) {
            Ok(user_config_str) => Self::load_str(&user_config_str),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // 配置文件不存在，创建示例配置文件
                Self::create_example_config(&config_path)?;
                Self::load_str("")
            }
            Err(e) => Err(e.into()),
        }
    }

    fn create_example_config(config_path: &PathBuf) -> Result<()> {
        use std::io::Write;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let example_config = r#"# Server 配置文件
#
# 此文件在首次运行时自动创建，修改后重启服务生效。
# 所有目录默认遵循平台约定，通常不需要改动。

# 可选：自定义运行时目录（unix socket）
# runtime-dir = "/custom/runtime/path"

# 可选：自定义数据目录（记录库 + 索引）
# data-dir = "/custom/data/path"

# 可选：自定义缓存目录（搜索结果缓存）
# cache-dir = "/custom/cache/path"
"#;

        let mut file = std::fs::File::create(config_path)?;
        file.write_all(example_config.as_bytes())?;

        eprintln!("\n已创建配置文件: {:?}", config_path);
        eprintln!("如需自定义目录请编辑该文件后重新启动\n");

        Ok(())
    }
}
