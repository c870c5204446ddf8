//! Content store — persists embedded text fragments (resume sections, job
//! descriptions) in a local sqlite index and answers similarity queries.
//!
//! Every failure at this surface is absorbed: embedding or index errors are
//! logged and degrade to empty vectors / empty result sets, never an error
//! the tailoring pipeline has to handle. Fragments are write-once; there is
//! no eviction.

pub mod embedding;
pub mod retriever;

use anyhow::Result;
use sqlx::{Row, SqlitePool};
use tracing::{error, info, warn};

use crate::models::resume::{RetrievalResult, Section};
use crate::store::embedding::{cosine_distance, Embedder};

const KIND_RESUME_SECTION: &str = "resume_section";
const KIND_JOB_DESCRIPTION: &str = "job_description";

pub struct ContentStore {
    pool: SqlitePool,
    embedder: Embedder,
}

impl ContentStore {
    pub fn new(pool: SqlitePool, embedder: Embedder) -> Self {
        Self { pool, embedder }
    }

    /// Creates the fragment table. Called once at startup; a failure here is
    /// fatal, unlike every later store operation.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS fragments (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                body TEXT NOT NULL,
                embedding BLOB NOT NULL,
                resume_id TEXT,
                job_id TEXT,
                section_type TEXT
            )",
        )
        .execute(&self.pool)
        .await?;
        info!("content store initialized");
        Ok(())
    }

    /// Embeds `text`, mapping failure to an empty vector so downstream
    /// similarity queries degrade to "no matches" instead of erroring.
    fn embed_or_empty(&self, text: &str) -> Vec<f32> {
        match self.embedder.embed(text) {
            Ok(vector) => vector,
            Err(e) => {
                warn!("embedding failed, storing empty vector: {e}");
                Vec::new()
            }
        }
    }

    /// Stores one fragment per section under ids `{resume_id}_section_{i}`.
    /// Individual upsert failures are logged and skipped.
    pub async fn store_resume_sections(&self, resume_id: &str, sections: &[Section]) {
        let mut stored = 0usize;
        for (index, section) in sections.iter().enumerate() {
            let id = format!("{resume_id}_section_{index}");
            let embedding = self.embed_or_empty(&section.content);
            let result = sqlx::query(
                "INSERT INTO fragments (id, kind, body, embedding, resume_id, section_type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                     kind = excluded.kind,
                     body = excluded.body,
                     embedding = excluded.embedding,
                     resume_id = excluded.resume_id,
                     section_type = excluded.section_type",
            )
            .bind(&id)
            .bind(KIND_RESUME_SECTION)
            .bind(&section.content)
            .bind(vector_to_blob(&embedding))
            .bind(resume_id)
            .bind(section.section_type.as_str())
            .execute(&self.pool)
            .await;

            match result {
                Ok(_) => stored += 1,
                Err(e) => error!("error storing resume section {id}: {e}"),
            }
        }
        info!("stored {stored} resume sections for {resume_id}");
    }

    /// Stores a job description as a single fragment with id `job_id`.
    pub async fn store_job_description(&self, job_id: &str, job_description: &str) {
        let embedding = self.embed_or_empty(job_description);
        let result = sqlx::query(
            "INSERT INTO fragments (id, kind, body, embedding, job_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                 kind = excluded.kind,
                 body = excluded.body,
                 embedding = excluded.embedding,
                 job_id = excluded.job_id",
        )
        .bind(job_id)
        .bind(KIND_JOB_DESCRIPTION)
        .bind(job_description)
        .bind(vector_to_blob(&embedding))
        .bind(job_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => info!("stored job description for {job_id}"),
            Err(e) => error!("error storing job description {job_id}: {e}"),
        }
    }

    /// Returns the `top_k` stored sections of `resume_id` nearest to `query`,
    /// ordered by ascending cosine distance. Fragments whose stored vector
    /// cannot be compared with the query vector are skipped.
    pub async fn find_relevant(
        &self,
        query: &str,
        resume_id: &str,
        top_k: usize,
    ) -> Vec<RetrievalResult> {
        let query_vector = match self.embedder.embed(query) {
            Ok(vector) => vector,
            Err(e) => {
                warn!("error embedding retrieval query: {e}");
                return Vec::new();
            }
        };

        let rows = match sqlx::query(
            "SELECT body, section_type, embedding FROM fragments
             WHERE resume_id = ?1 AND kind = ?2",
        )
        .bind(resume_id)
        .bind(KIND_RESUME_SECTION)
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                error!("error finding relevant sections: {e}");
                return Vec::new();
            }
        };

        let mut hits: Vec<RetrievalResult> = rows
            .into_iter()
            .filter_map(|row| {
                let body: String = row.get("body");
                let section_type: Option<String> = row.get("section_type");
                let embedding = blob_to_vector(row.get::<Vec<u8>, _>("embedding").as_slice());
                cosine_distance(&query_vector, &embedding).map(|distance| RetrievalResult {
                    content: body,
                    section_type: section_type.unwrap_or_default(),
                    similarity: distance,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.similarity
                .partial_cmp(&b.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);

        info!("found {} relevant sections for {resume_id}", hits.len());
        hits
    }
}

fn vector_to_blob(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn blob_to_vector(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
