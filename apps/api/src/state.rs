use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::retriever::Retriever;
use crate::store::ContentStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Built once at startup; no ambient module-level services.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContentStore>,
    /// Pluggable retrieval policy over the store (top-K, filtering).
    pub retriever: Arc<dyn Retriever>,
    pub llm: LlmClient,
    /// Kept for handlers that need runtime settings (none yet beyond startup).
    #[allow(dead_code)]
    pub config: Config,
}
