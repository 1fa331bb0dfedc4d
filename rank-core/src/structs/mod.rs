pub mod candidate;
pub mod product_record;
pub mod ranker_config;
pub mod response_payload;
