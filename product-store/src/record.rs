//! Core data models used by the library.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata keys copied from a catalog row into the point payload.
pub const METADATA_KEYS: &[&str] = &[
    "id",
    "product_name",
    "brand",
    "category_path",
    "product_url",
    "image",
    "retail_price",
    "discounted_price",
    "product_rating",
    "overall_rating",
    "is_FK_Advantage_product",
];

/// Payload key holding the embedded text.
pub const CONTENT_KEY: &str = "content";

/// One catalog product ready for embedding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Stable catalog identifier; also the seed of the point id.
    pub id: String,
    /// Text sent to the embedding model and stored as `content`.
    pub text: String,
    /// Subset of the row restricted to [`METADATA_KEYS`].
    pub metadata: Map<String, Value>,
}

/// Outcome of one ingestion run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Non-empty JSON rows read from the file.
    pub read: usize,
    /// Rows dropped: unusable, duplicate id, or malformed.
    pub skipped: usize,
    /// Points upserted.
    pub indexed: usize,
    pub duration_ms: u128,
}
