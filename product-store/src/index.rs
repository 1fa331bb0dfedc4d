//! Qdrant-backed [`ProductIndex`] used by the ranker in production.

use std::sync::Arc;

use rank_core::{Candidate, ProductIndex, RankError, SearchFuture};
use tracing::debug;

use crate::embed::EmbeddingsProvider;
use crate::qdrant_facade::QdrantFacade;

/// Embeds the biased query and runs a k-NN search with payload.
#[derive(Clone)]
pub struct QdrantProductIndex {
    client: Arc<QdrantFacade>,
    provider: Arc<dyn EmbeddingsProvider>,
    exact: bool,
}

impl QdrantProductIndex {
    pub fn new(
        client: Arc<QdrantFacade>,
        provider: Arc<dyn EmbeddingsProvider>,
        exact: bool,
    ) -> Self {
        Self {
            client,
            provider,
            exact,
        }
    }
}

impl ProductIndex for QdrantProductIndex {
    fn search<'a>(&'a self, biased_query: &'a str, candidate_count: usize) -> SearchFuture<'a> {
        Box::pin(async move {
            let vector = self
                .provider
                .embed(biased_query)
                .await
                .map_err(RankError::from)?;

            let hits = self
                .client
                .search(vector, candidate_count as u64, self.exact)
                .await
                .map_err(RankError::from)?;

            debug!(
                target: "product_store::index",
                hits = hits.len(),
                top_score = ?hits.first().map(|(s, _)| *s),
                "qdrant search done"
            );

            Ok::<_, RankError>(
                hits.into_iter()
                    .map(|(_, payload)| Candidate::from_payload(payload))
                    .collect(),
            )
        })
    }
}
