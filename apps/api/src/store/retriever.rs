//! Relevance retriever — the policy seam between the tailoring pipeline and
//! storage mechanics. Retrieval policy (top-K, filter predicate) lives here;
//! `AppState` holds an `Arc<dyn Retriever>` so the backend can be swapped
//! without touching handler or pipeline code.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::resume::RetrievalResult;
use crate::store::ContentStore;

/// How many stored sections a retrieval surfaces.
const TOP_K: usize = 5;

#[async_trait]
pub trait Retriever: Send + Sync {
    /// Ranks the stored sections of `resume_id` against `job_description`,
    /// nearest first. Degrades to an empty result on any internal failure.
    async fn find_relevant(&self, job_description: &str, resume_id: &str) -> Vec<RetrievalResult>;
}

/// Default retriever: delegates straight to the content store's similarity
/// query with the fixed [`TOP_K`].
pub struct StoreRetriever {
    store: Arc<ContentStore>,
}

impl StoreRetriever {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Retriever for StoreRetriever {
    async fn find_relevant(&self, job_description: &str, resume_id: &str) -> Vec<RetrievalResult> {
        self.store
            .find_relevant(job_description, resume_id, TOP_K)
            .await
    }
}
