use serde::{Deserialize, Serialize};

use crate::structs::product_record::ProductRecord;

/// Reply used when the index yields nothing usable.
pub const NO_MATCH_REPLY: &str = "I couldn't find a strong match for that. Try simpler terms, like a product type with a brand or colour.";

/// Reply prefixed to a non-empty product list.
pub const BEST_MATCHES_REPLY: &str = "Here are the best matches I found:";

/// The only shape the calling agent ever sees: `reply` plus up to four products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub reply: String,
    pub products: Vec<ProductRecord>,
}

impl ResponsePayload {
    pub fn no_match() -> Self {
        Self {
            reply: NO_MATCH_REPLY.to_string(),
            products: Vec::new(),
        }
    }

    pub fn best_matches(products: Vec<ProductRecord>) -> Self {
        Self {
            reply: BEST_MATCHES_REPLY.to_string(),
            products,
        }
    }
}
