pub mod search;

use std::path::PathBuf;

use search::{
    ContentKind, CreateFaq, CreateLink, FaqRecord, LinkRecord, Paged, PdfRecord, RecordSummary,
    SearchFault, SearchRequest, SearchResponse, StoreFault, SuggestResponse, UpdateFaq, UpdateLink,
};

#[tarpc::service]
pub trait Catalog {
    /// Heartbeat
    async fn ping() -> String;

    /// Unified search across all content kinds
    async fn search(req: SearchRequest) -> Result<SearchResponse, SearchFault>;

    /// Title autocomplete; advisory, never faults
    async fn suggest(partial: String) -> SuggestResponse;

    // === Record management ===

    async fn create_faq(req: CreateFaq) -> Result<FaqRecord, StoreFault>;
    async fn update_faq(id: u64, req: UpdateFaq) -> Result<FaqRecord, StoreFault>;
    async fn create_link(req: CreateLink) -> Result<LinkRecord, StoreFault>;
    async fn update_link(id: u64, req: UpdateLink) -> Result<LinkRecord, StoreFault>;

    /// Extracts text from a server-local PDF and indexes it
    async fn ingest_pdf(path: PathBuf) -> Result<PdfRecord, StoreFault>;

    async fn delete_record(kind: ContentKind, id: u64) -> Result<bool, StoreFault>;
    async fn list_records(
        kind: ContentKind,
        page: u64,
        limit: u64,
    ) -> Result<Paged<RecordSummary>, StoreFault>;
}
