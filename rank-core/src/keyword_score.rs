//! Deterministic lexical rerank score.
//!
//! Contributions are independent of each other:
//! - brand (normalized) appears inside the normalized query: `+5`
//! - distinct query tokens shared with the title: `min(2 * n, 6)`
//! - distinct query tokens shared with the category path: `min(n, 4)`
//!
//! The category-hint bonus is not part of this score; the ranker adds it.

use crate::text_normalize::{normalize_text, token_set};

pub const BRAND_BONUS: u32 = 5;
pub const TITLE_CAP: u32 = 6;
pub const CATEGORY_CAP: u32 = 4;
pub const HINT_BONUS: u32 = 4;

/// Lexical score in `0..=15`. An empty normalized query scores 0.
pub fn keyword_score(query: &str, title: &str, brand: &str, category_path: &str) -> u32 {
    let q = normalize_text(query);
    if q.is_empty() {
        return 0;
    }
    let q_tokens = token_set(&q);

    let mut score = 0u32;

    let b = normalize_text(brand);
    if !b.is_empty() && q.contains(&b) {
        score += BRAND_BONUS;
    }

    let t = normalize_text(title);
    let title_overlap = token_set(&t).intersection(&q_tokens).count() as u32;
    score += (2 * title_overlap).min(TITLE_CAP);

    let c = normalize_text(category_path);
    let cat_overlap = token_set(&c).intersection(&q_tokens).count() as u32;
    score += cat_overlap.min(CATEGORY_CAP);

    score
}

/// `HINT_BONUS` when the raw category path starts with a non-empty hint.
pub fn hint_bonus(category_path: &str, hint: &str) -> u32 {
    if !hint.is_empty() && category_path.starts_with(hint) {
        HINT_BONUS
    } else {
        0
    }
}
