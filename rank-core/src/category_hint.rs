//! Keyword rules that map a free-text query onto a catalog category prefix.
//!
//! Rules are evaluated top-down and the first match wins. A hint is the
//! leading part of a `category_path` (segments joined by `" >> "`), so the
//! ranker can both append it to the query and reward candidates whose path
//! starts with it.

use crate::text_normalize::normalize_text;

const WOMEN_TOKENS: &[&str] = &[
    "women", "womens", "woman", "female", "ladies", "lady", "girl", "girls",
];

/// One `(predicate, hint)` entry of the cascade.
#[derive(Debug, Clone)]
pub struct HintRule {
    pub hint: String,
    /// Fires when any of these words or phrases occurs in the query.
    pub any_of: Vec<String>,
    /// Suppresses the rule when any of these occurs.
    pub none_of: Vec<String>,
}

impl HintRule {
    pub fn new(hint: &str, any_of: &[&str]) -> Self {
        Self {
            hint: hint.to_string(),
            any_of: any_of.iter().map(|s| s.to_string()).collect(),
            none_of: Vec::new(),
        }
    }

    pub fn unless(mut self, none_of: &[&str]) -> Self {
        self.none_of = none_of.iter().map(|s| s.to_string()).collect();
        self
    }

    /// `padded` is a normalized query wrapped in single spaces.
    fn matches(&self, padded: &str) -> bool {
        let has = |kw: &String| padded.contains(&format!(" {kw} "));
        self.any_of.iter().any(has) && !self.none_of.iter().any(has)
    }
}

/// Ordered rule table with first-match-wins evaluation.
#[derive(Debug, Clone)]
pub struct CategoryHintDetector {
    rules: Vec<HintRule>,
}

impl Default for CategoryHintDetector {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl CategoryHintDetector {
    pub fn new(rules: Vec<HintRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[HintRule] {
        &self.rules
    }

    /// Returns the hint of the first matching rule, or `""`.
    pub fn detect(&self, query: &str) -> String {
        let normalized = normalize_text(query);
        if normalized.is_empty() {
            return String::new();
        }
        let padded = format!(" {normalized} ");
        self.rules
            .iter()
            .find(|r| r.matches(&padded))
            .map(|r| r.hint.clone())
            .unwrap_or_default()
    }
}

/// Hint for `query` using the built-in catalog rules.
pub fn detect_category_hint(query: &str) -> String {
    CategoryHintDetector::default().detect(query)
}

/// Built-in rules for the fashion / home / automotive catalog.
pub fn default_rules() -> Vec<HintRule> {
    vec![
        HintRule::new(
            "Clothing >> Men's Clothing",
            &["men", "mens", "man", "male", "gents", "boy", "boys"],
        )
        .unless(WOMEN_TOKENS),
        HintRule::new(
            "Clothing >> Women's Clothing",
            &[
                "women", "womens", "woman", "female", "ladies", "lady", "girl", "girls", "saree",
                "sarees", "kurti", "kurtis", "lehenga", "dupatta", "salwar", "leggings", "dress",
                "dresses",
            ],
        ),
        HintRule::new(
            "Jewellery >>",
            &[
                "jewellery", "jewelry", "necklace", "necklaces", "earring", "earrings", "ring",
                "rings", "bracelet", "bracelets", "bangle", "bangles", "pendant", "pendants",
                "anklet", "anklets", "mangalsutra", "chain", "chains",
            ],
        ),
        HintRule::new(
            "Footwear >>",
            &[
                "shoe", "shoes", "sneaker", "sneakers", "sandal", "sandals", "slipper",
                "slippers", "footwear", "boots", "heels", "loafers", "floaters", "flip flops",
            ],
        ),
        HintRule::new(
            "Watches >>",
            &["watch", "watches", "wristwatch", "smartwatch", "chronograph"],
        ),
        HintRule::new(
            "Home Furnishing >>",
            &[
                "bedsheet", "bedsheets", "bed sheet", "curtain", "curtains", "cushion",
                "cushions", "pillow", "pillows", "blanket", "blankets", "quilt", "towel", "towels",
                "mattress", "furnishing", "doormat", "sofa cover",
            ],
        ),
        HintRule::new(
            "Home Decor & Festive Needs >>",
            &[
                "decor", "showpiece", "figurine", "vase", "wall art", "painting", "candle",
                "candles", "diya", "rangoli", "festive", "idol",
            ],
        ),
        HintRule::new(
            "Automotive >>",
            &[
                "car", "bike", "motorcycle", "scooter", "helmet", "automotive", "vehicle", "tyre",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_examples() {
        assert_eq!(
            detect_category_hint("women's dress"),
            "Clothing >> Women's Clothing"
        );
        assert_eq!(
            detect_category_hint("men's tshirt"),
            "Clothing >> Men's Clothing"
        );
        assert_eq!(detect_category_hint("red necklace"), "Jewellery >>");
        assert_eq!(detect_category_hint("random gibberish xyz"), "");
    }

    #[test]
    fn women_token_suppresses_men_rule() {
        assert_eq!(
            detect_category_hint("men and women jackets"),
            "Clothing >> Women's Clothing"
        );
    }

    #[test]
    fn first_match_wins() {
        // Both the men's and the watches rule match.
        assert_eq!(
            detect_category_hint("watch for men"),
            "Clothing >> Men's Clothing"
        );
        assert_eq!(detect_category_hint("analog watch"), "Watches >>");
    }

    #[test]
    fn keywords_match_whole_words_only() {
        assert_eq!(detect_category_hint("carpet"), "");
        assert_eq!(detect_category_hint("earring set"), "Jewellery >>");
        assert_eq!(detect_category_hint("cotton bed sheet"), "Home Furnishing >>");
        assert_eq!(detect_category_hint("rubber flip-flops"), "Footwear >>");
    }

    #[test]
    fn remaining_rules() {
        assert_eq!(
            detect_category_hint("brass diya"),
            "Home Decor & Festive Needs >>"
        );
        assert_eq!(detect_category_hint("bike helmet"), "Automotive >>");
    }

    #[test]
    fn empty_query_has_no_hint() {
        assert_eq!(detect_category_hint(""), "");
        assert_eq!(detect_category_hint("   "), "");
    }

    #[test]
    fn custom_rule_table() {
        let d = CategoryHintDetector::new(vec![HintRule::new("Toys >>", &["lego"])]);
        assert_eq!(d.detect("Lego set"), "Toys >>");
        assert_eq!(d.detect("red necklace"), "");
        assert_eq!(d.rules().len(), 1);
    }
}
