//! Product ranking for the shopping assistant.
//!
//! Public API:
//! - `ProductRanker::rank`: hint-biased vector search, lexical rerank, top-4 payload.
//! - `ProductIndex`: the vector index seam; `product-store` provides the Qdrant one.
//! - sanitizers and scorers, usable on their own.

pub mod category_hint;
pub mod errors;
pub mod index;
pub mod keyword_score;
pub mod ranker;
pub mod sanitize;
pub mod structs;
pub mod text_normalize;

pub use category_hint::{CategoryHintDetector, HintRule, detect_category_hint};
pub use errors::rank_error::RankError;
pub use index::{ProductIndex, SearchFuture};
pub use keyword_score::keyword_score;
pub use ranker::ProductRanker;
pub use structs::candidate::{Candidate, CandidateMetadata, RawField};
pub use structs::product_record::ProductRecord;
pub use structs::ranker_config::RankerConfig;
pub use structs::response_payload::{BEST_MATCHES_REPLY, NO_MATCH_REPLY, ResponsePayload};
pub use text_normalize::normalize_text;
