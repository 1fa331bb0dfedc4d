//! Runtime and collection configuration.

use std::path::PathBuf;

use crate::errors::StoreError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    Cosine,
    Dot,
    Euclid,
}

impl DistanceKind {
    /// Parse from env string (case-insensitive). Defaults to Cosine.
    pub fn parse(s: Option<&str>) -> Self {
        match s.unwrap_or("cosine").to_lowercase().as_str() {
            "dot" | "dotproduct" => DistanceKind::Dot,
            "euclid" | "l2" => DistanceKind::Euclid,
            _ => DistanceKind::Cosine,
        }
    }
}

/// Describes the vector space of the collection.
#[derive(Clone, Debug)]
pub struct VectorSpace {
    pub size: usize,
    pub distance: DistanceKind,
}

/// Ollama embedding backend settings.
#[derive(Clone, Debug)]
pub struct EmbeddingConfig {
    /// Base URL of the Ollama server, e.g. `http://localhost:11434`.
    pub ollama_url: String,
    /// Embedding model identifier (e.g., "bge-m3").
    pub model: String,
    /// Embedding vector dimensionality (1024 for bge-m3).
    pub dim: usize,
    /// Max concurrent embedding requests during ingestion.
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".into(),
            model: "bge-m3".into(),
            dim: 1024,
            concurrency: 4,
            timeout_secs: 30,
        }
    }
}

/// Configuration for catalog ingestion and product retrieval.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Rows embedded and upserted per batch.
    pub upsert_batch: usize,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
    pub embedding: EmbeddingConfig,
    /// Prepared catalog JSONL used by ingestion.
    pub data_path: PathBuf,
}

impl StoreConfig {
    /// Creates a default config for a given Qdrant endpoint and collection name.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            upsert_batch: 64,
            exact_search: false,
            embedding: EmbeddingConfig::default(),
            data_path: PathBuf::from("data/processed/flipkart_products_prepared_25k.jsonl"),
        }
    }

    /// Build configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `QDRANT_URL` (default: "http://localhost:6334")
    /// - `QDRANT_API_KEY` (optional)
    /// - `QDRANT_COLLECTION` (default: "flipkart_products")
    /// - `QDRANT_DISTANCE` ("Cosine" | "Dot" | "Euclid"; default: "Cosine")
    /// - `QDRANT_UPSERT_BATCH` (default: 64)
    /// - `QDRANT_EXACT_SEARCH` (default: false)
    /// - `OLLAMA_URL` (default: "http://localhost:11434")
    /// - `EMBEDDING_MODEL` (default: "bge-m3")
    /// - `EMBEDDING_DIM` (default: 1024)
    /// - `EMBEDDING_CONCURRENCY` (default: 4)
    /// - `EMBEDDING_TIMEOUT_SECS` (default: 30)
    /// - `DATA_PATH` (default: "data/processed/flipkart_products_prepared_25k.jsonl")
    pub fn from_env() -> Result<Self, StoreError> {
        let mut cfg = Self::new_default(
            env_string("QDRANT_URL").unwrap_or_else(|| "http://localhost:6334".into()),
            env_string("QDRANT_COLLECTION").unwrap_or_else(|| "flipkart_products".into()),
        );

        cfg.qdrant_api_key = env_string("QDRANT_API_KEY");
        cfg.distance = DistanceKind::parse(env_string("QDRANT_DISTANCE").as_deref());
        cfg.upsert_batch = read_env("QDRANT_UPSERT_BATCH")?.unwrap_or(cfg.upsert_batch);
        cfg.exact_search = read_env("QDRANT_EXACT_SEARCH")?.unwrap_or(false);

        let defaults = EmbeddingConfig::default();
        cfg.embedding = EmbeddingConfig {
            ollama_url: env_string("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            model: env_string("EMBEDDING_MODEL").unwrap_or(defaults.model),
            dim: read_env("EMBEDDING_DIM")?.unwrap_or(defaults.dim),
            concurrency: read_env("EMBEDDING_CONCURRENCY")?.unwrap_or(defaults.concurrency),
            timeout_secs: read_env("EMBEDDING_TIMEOUT_SECS")?.unwrap_or(defaults.timeout_secs),
        };

        if let Some(p) = env_string("DATA_PATH") {
            cfg.data_path = PathBuf::from(p);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(StoreError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        if self.upsert_batch == 0 {
            return Err(StoreError::Config("upsert_batch must be > 0".into()));
        }
        if self.embedding.dim == 0 {
            return Err(StoreError::Config("EMBEDDING_DIM must be > 0".into()));
        }
        if self.embedding.model.trim().is_empty() {
            return Err(StoreError::Config("EMBEDDING_MODEL is empty".into()));
        }
        Ok(())
    }

    pub fn vector_space(&self) -> VectorSpace {
        VectorSpace {
            size: self.embedding.dim,
            distance: self.distance,
        }
    }
}

/// Non-empty, trimmed env value.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parsed env value; `Ok(None)` when unset.
fn read_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, StoreError> {
    match env_string(key) {
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| StoreError::EnvParse {
                key: key.into(),
                value: v,
            }),
        None => Ok(None),
    }
}
