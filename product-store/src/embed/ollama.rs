//! Ollama embedding provider.
//!
//! Calls `POST {OLLAMA_URL}/api/embeddings` with `{model, prompt}` through a
//! shared `reqwest::Client`.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::EmbeddingConfig;
use crate::embed::{EmbedFuture, EmbeddingsProvider};
use crate::errors::StoreError;

#[derive(Debug, Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct OllamaEmbedResponse {
    embedding: Vec<f32>,
}

/// Ollama embedding provider (async).
#[derive(Clone)]
pub struct OllamaEmbedder {
    client: reqwest::Client,
    url: String,
    model: String,
    dim: usize,
}

impl OllamaEmbedder {
    pub fn new(cfg: &EmbeddingConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .build()
            .map_err(|e| StoreError::Embedding(format!("http client build: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}/api/embeddings", cfg.ollama_url.trim_end_matches('/')),
            model: cfg.model.clone(),
            dim: cfg.dim,
        })
    }
}

impl EmbeddingsProvider for OllamaEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a> {
        Box::pin(async move {
            trace!(target: "product_store::embed", chars = text.len(), "ollama embed");

            let req = OllamaEmbedRequest {
                model: &self.model,
                prompt: text,
            };

            let resp = self
                .client
                .post(&self.url)
                .json(&req)
                .send()
                .await
                .map_err(|e| StoreError::Embedding(format!("POST {}: {e}", self.url)))?;

            if resp.status() != StatusCode::OK {
                let code = resp.status();
                let body = resp
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read body>".into());
                return Err(StoreError::Embedding(format!(
                    "ollama embeddings non-200: {code}; body: {body}"
                )));
            }

            let parsed: OllamaEmbedResponse = resp
                .json()
                .await
                .map_err(|e| StoreError::Embedding(format!("parse embeddings json: {e}")))?;

            if parsed.embedding.len() != self.dim {
                return Err(StoreError::VectorSizeMismatch {
                    got: parsed.embedding.len(),
                    want: self.dim,
                });
            }

            Ok(parsed.embedding)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_built_from_base_url() {
        let cfg = EmbeddingConfig {
            ollama_url: "http://ollama:11434/".into(),
            ..Default::default()
        };
        let e = OllamaEmbedder::new(&cfg).unwrap();
        assert_eq!(e.url, "http://ollama:11434/api/embeddings");
        assert_eq!(e.dim, 1024);
        assert_eq!(e.model, "bge-m3");
    }
}
