use product_store::{ProductStore, StoreConfig, StoreError};
use rank_core::{ProductRanker, RankError, RankerConfig};
use thiserror::Error;

use crate::core::metrics::Metrics;

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Rank(#[from] RankError),

    #[error("metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ranking pipeline over the Qdrant product index.
    pub ranker: ProductRanker,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(ranker: ProductRanker) -> Result<Self, ConfigError> {
        Ok(Self {
            ranker,
            metrics: Metrics::new()?,
        })
    }

    /// Wire store and ranker from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store = ProductStore::new(StoreConfig::from_env()?)?;
        let ranker = ProductRanker::new(store.product_index(), RankerConfig::from_env()?);
        Self::new(ranker)
    }
}
