use super::Command;
use crate::config::Config;
use crate::error::{Result, error};
use futures::{future, prelude::*};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use rpc::{
    Catalog,
    search::{
        ContentKind, CreateFaq, CreateLink, FaqRecord, LinkRecord, Paged, PdfRecord,
        RecordSummary, SearchFault, SearchRequest, SearchResponse, StoreFault, SuggestResponse,
        UpdateFaq, UpdateLink,
    },
};
use tarpc::{
    context::Context,
    server::{self, Channel},
    tokio_serde::formats::Bincode,
};

use search_core::{SearchEngine, rpc_compat};

async fn spawn(fut: impl Future<Output = ()> + Send + 'static) {
    tokio::spawn(fut);
}

#[derive(Clone)]
struct Server {
    engine: Arc<SearchEngine>,
}

impl Catalog for Server {
    async fn ping(self, _c: Context) -> String {
        "Pong".to_string()
    }

    async fn search(
        self,
        _c: Context,
        req: SearchRequest,
    ) -> std::result::Result<SearchResponse, SearchFault> {
        info!("收到搜索请求: '{}' kind={:?} limit={:?}", req.query, req.kind, req.limit);
        rpc_compat::handle_search(&self.engine, &req)
    }

    async fn suggest(self, _c: Context, partial: String) -> SuggestResponse {
        rpc_compat::handle_suggest(&self.engine, &partial)
    }

    async fn create_faq(
        self,
        _c: Context,
        req: CreateFaq,
    ) -> std::result::Result<FaqRecord, StoreFault> {
        rpc_compat::handle_create_faq(&self.engine, req)
    }

    async fn update_faq(
        self,
        _c: Context,
        id: u64,
        req: UpdateFaq,
    ) -> std::result::Result<FaqRecord, StoreFault> {
        rpc_compat::handle_update_faq(&self.engine, id, req)
    }

    async fn create_link(
        self,
        _c: Context,
        req: CreateLink,
    ) -> std::result::Result<LinkRecord, StoreFault> {
        rpc_compat::handle_create_link(&self.engine, req)
    }

    async fn update_link(
        self,
        _c: Context,
        id: u64,
        req: UpdateLink,
    ) -> std::result::Result<LinkRecord, StoreFault> {
        rpc_compat::handle_update_link(&self.engine, id, req)
    }

    async fn ingest_pdf(
        self,
        _c: Context,
        path: PathBuf,
    ) -> std::result::Result<PdfRecord, StoreFault> {
        info!("收到 PDF 入库请求: {:?}", path);
        rpc_compat::handle_ingest_pdf(&self.engine, &path)
    }

    async fn delete_record(
        self,
        _c: Context,
        kind: ContentKind,
        id: u64,
    ) -> std::result::Result<bool, StoreFault> {
        rpc_compat::handle_delete_record(&self.engine, kind, id)
    }

    async fn list_records(
        self,
        _c: Context,
        kind: ContentKind,
        page: u64,
        limit: u64,
    ) -> std::result::Result<Paged<RecordSummary>, StoreFault> {
        rpc_compat::handle_list_records(&self.engine, kind, page, limit)
    }
}

pub struct ServeCommand {
    config: Config,
}

impl ServeCommand {
    pub fn new(cfg: Config) -> Self {
        Self { config: cfg }
    }
}

#[async_trait::async_trait]
impl Command for ServeCommand {
    async fn execute(&self) -> Result<()> {
        let unix_socket_path = config::socket_path(&self.config.runtime_dir);

        if let Some(parent) = unix_socket_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if unix_socket_path.exists() {
            fs::remove_file(&unix_socket_path)?;
        }

        info!("正在初始化搜索引擎...");
        let engine = Arc::new(
            SearchEngine::new(self.config.search_config())
                .map_err(|e| error!("创建搜索引擎失败: {}", e))?,
        );

        info!("监听 {:?}", unix_socket_path);

        let mut listener =
            tarpc::serde_transport::unix::listen(&unix_socket_path, Bincode::default).await?;
        listener.config_mut().max_frame_length(usize::MAX);

        let server = Server { engine };

        listener
            .filter_map(|r| future::ready(r.ok()))
            .map(server::BaseChannel::with_defaults)
            .map(|channel| {
                let server = server.clone();
                channel.execute(server.serve()).for_each(spawn)
            })
            .buffer_unordered(10)
            .for_each(|_| async {})
            .await;

        Ok(())
    }
}
