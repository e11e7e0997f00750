pub const TOP_LEVEL_DOMAIN: &str = "io";
pub const AUTHOR: &str = "docsearch";
pub const APP_NAME: &str = "docsearch";

/// 服务端配置文件名（位于平台配置目录下）
pub const SERVER_CONFIG_FILE_NAME: &str = "server.toml";

/// Unix socket 文件名（位于运行时目录下）
pub const UNIX_SOCKET_FILE_NAME: &str = "docsearch.sock";
