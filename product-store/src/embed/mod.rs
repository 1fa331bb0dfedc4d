//! Embedding abstraction.

use crate::errors::StoreError;
use std::{future::Future, pin::Pin};

pub mod ollama;

/// Future returned by [`EmbeddingsProvider::embed`].
pub type EmbedFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>;

/// Provider interface for embedding generation.
///
/// Async because real providers (Ollama and friends) talk HTTP. The same
/// provider must embed both catalog rows and queries.
pub trait EmbeddingsProvider: Send + Sync {
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a>;
}
