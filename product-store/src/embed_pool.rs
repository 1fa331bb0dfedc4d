//! Embedding executor with concurrency and dimension checks.

use crate::{embed::EmbeddingsProvider, errors::StoreError};
use futures::stream::{self, StreamExt};
use tracing::debug;

/// Embeds `texts` with at most `concurrency` requests in flight.
///
/// Output order matches input order.
///
/// # Errors
/// Returns [`StoreError::VectorSizeMismatch`] if a vector is not `expected_dim`
/// long, or the first provider error.
pub async fn embed_all(
    texts: &[String],
    provider: &dyn EmbeddingsProvider,
    expected_dim: usize,
    concurrency: usize,
) -> Result<Vec<Vec<f32>>, StoreError> {
    debug!(
        target: "product_store::embed",
        total = texts.len(),
        concurrency,
        "embed_all: start"
    );

    let mut results: Vec<(usize, Vec<f32>)> = stream::iter(texts.iter().enumerate())
        .map(|(i, text)| async move {
            let v = provider.embed(text).await?;
            Ok::<(usize, Vec<f32>), StoreError>((i, v))
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, StoreError>>()?;

    results.sort_by_key(|(i, _)| *i);

    let mut out = Vec::with_capacity(results.len());
    for (_, v) in results {
        if v.len() != expected_dim {
            return Err(StoreError::VectorSizeMismatch {
                got: v.len(),
                want: expected_dim,
            });
        }
        out.push(v);
    }

    Ok(out)
}
