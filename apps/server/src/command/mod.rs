pub mod clear_cache;
pub mod ingest;
pub mod serve;

use crate::error::Result;

pub use clear_cache::ClearCacheCommand;
pub use ingest::IngestCommand;
pub use serve::ServeCommand;

#[async_trait::async_trait]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}
