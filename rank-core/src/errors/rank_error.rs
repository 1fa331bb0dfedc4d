//! Unified error type for the rank-core crate.

use thiserror::Error;

/// Errors produced while configuring the ranker or talking to the index.
///
/// None of these ever reach the caller of [`crate::ranker::ProductRanker::rank`];
/// the ranker logs them and degrades to the no-match payload.
#[derive(Debug, Error)]
pub enum RankError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Environment variable is not set.
    #[error("missing env variable: {key}")]
    EnvMissing { key: String },

    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Vector index ────────────────────────────────────────────────────────
    /// The index backend failed (embedding, transport, payload decoding).
    #[error("index error: {0}")]
    Index(String),

    /// The index did not answer within the configured budget.
    #[error("index search timed out after {secs}s")]
    Timeout { secs: u64 },

    // ── JSON / serialization ────────────────────────────────────────────────
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
