use serde::Deserialize;

/// Request payload for /recommend.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Free-text shopping query, e.g. "red cotton kurti under 500".
    pub query: String,
}
