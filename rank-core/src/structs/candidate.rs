//! Candidate rows as they come back from the vector index.
//!
//! Catalog metadata is loosely typed: prices arrive as numbers, numeric
//! strings, `"nan"` or `null` depending on how the row was exported. The
//! [`RawField`] union holds whatever arrived; only the sanitizers in
//! [`crate::sanitize`] turn it into typed values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One metadata value exactly as stored in the index payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// Absent key or JSON `null`.
    #[default]
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<RawField>),
    /// Nested objects and anything else we never read.
    Other(Value),
}

impl RawField {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawField::Missing)
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::Text(s.to_string())
    }
}

impl From<f64> for RawField {
    fn from(v: f64) -> Self {
        RawField::Number(v)
    }
}

/// Metadata keys the ranker reads. Unknown keys are ignored, absent keys
/// default to [`RawField::Missing`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateMetadata {
    pub id: RawField,
    pub product_name: RawField,
    pub brand: RawField,
    pub category_path: RawField,
    pub product_url: RawField,
    pub image: RawField,
    pub retail_price: RawField,
    pub discounted_price: RawField,
    pub product_rating: RawField,
    pub overall_rating: RawField,
}

/// A retrieved document: the embedded text plus its catalog metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Text that was embedded (`Product: ...\nDescription: ...` lines).
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: CandidateMetadata,
}

impl Candidate {
    /// Builds a candidate from a flat index payload where `content` sits next
    /// to the metadata keys.
    pub fn from_payload(payload: Value) -> Self {
        let Value::Object(mut map) = payload else {
            debug!(target: "rank_core::candidate", "from_payload: payload is not an object");
            return Self::default();
        };

        let content = match map.remove("content") {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };

        let metadata = match serde_json::from_value::<CandidateMetadata>(Value::Object(map)) {
            Ok(m) => m,
            Err(e) => {
                debug!(target: "rank_core::candidate", error = %e, "from_payload: metadata fell back to defaults");
                CandidateMetadata::default()
            }
        };

        Self { content, metadata }
    }
}
