//! Catalog store over Qdrant: ingestion of the prepared product JSONL and
//! the vector index the ranker searches.
//!
//! The design is flat and splits responsibilities into focused modules.

mod config;
mod embed;
mod embed_pool;
mod errors;
mod index;
mod ingest;
mod io_jsonl;
mod mappers;
mod qdrant_facade;
mod record;

pub use config::{DistanceKind, EmbeddingConfig, StoreConfig, VectorSpace};
pub use embed::ollama::OllamaEmbedder;
pub use embed::{EmbedFuture, EmbeddingsProvider};
pub use errors::StoreError;
pub use index::QdrantProductIndex;
pub use ingest::CollectionMode;
pub use record::{CatalogRecord, IngestStats};

use std::path::Path;
use std::sync::Arc;

use rank_core::ProductIndex;
use tracing::trace;

/// High-level facade that wires configuration, the Qdrant client and the
/// embedding provider.
pub struct ProductStore {
    cfg: StoreConfig,
    client: Arc<qdrant_facade::QdrantFacade>,
    provider: Arc<dyn EmbeddingsProvider>,
}

impl ProductStore {
    /// Store with the Ollama embedder described by `cfg.embedding`.
    ///
    /// # Errors
    /// Invalid config, Qdrant client or HTTP client construction failures.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        let provider = Arc::new(OllamaEmbedder::new(&cfg.embedding)?);
        Self::with_provider(cfg, provider)
    }

    /// Store with a caller-supplied embedding provider.
    pub fn with_provider(
        cfg: StoreConfig,
        provider: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, StoreError> {
        trace!(target: "product_store", collection = %cfg.collection, "ProductStore::new");
        let client = Arc::new(qdrant_facade::QdrantFacade::new(&cfg)?);
        Ok(Self {
            cfg,
            client,
            provider,
        })
    }

    /// Ingests a prepared catalog JSONL file.
    ///
    /// # Errors
    /// I/O, embedding, vector size mismatch, or Qdrant failures. Malformed
    /// lines are skipped and counted, not fatal.
    pub async fn ingest_file(
        &self,
        jsonl_path: impl AsRef<Path>,
        mode: CollectionMode,
    ) -> Result<IngestStats, StoreError> {
        ingest::ingest_catalog(
            &self.cfg,
            jsonl_path,
            mode,
            self.provider.as_ref(),
            &self.client,
        )
        .await
    }

    /// Ingests the file at `cfg.data_path`.
    pub async fn ingest_default(&self, mode: CollectionMode) -> Result<IngestStats, StoreError> {
        let path = self.cfg.data_path.clone();
        self.ingest_file(path, mode).await
    }

    /// The vector index to hand to `rank_core::ProductRanker`.
    pub fn product_index(&self) -> Arc<dyn ProductIndex> {
        Arc::new(QdrantProductIndex::new(
            Arc::clone(&self.client),
            Arc::clone(&self.provider),
            self.cfg.exact_search,
        ))
    }
}
