use serde::{Deserialize, Serialize};

/// Sanitized product card handed to the calling agent.
///
/// Prices are whole rupees, ratings are rounded to one decimal. Absent
/// numbers serialize as `null`, never as a sentinel string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Option<String>,
    pub title: String,
    pub brand: String,
    pub category_path: String,
    pub discounted_price: Option<i64>,
    pub retail_price: Option<i64>,
    pub product_rating: Option<f64>,
    pub overall_rating: Option<f64>,
    pub image: String,
    pub url: String,
    /// Plain text, at most 180 characters.
    pub description: String,
}

/// A record with its transient rerank score. Never serialized.
#[derive(Debug, Clone)]
pub(crate) struct ScoredCandidate {
    pub record: ProductRecord,
    pub score: u32,
}
