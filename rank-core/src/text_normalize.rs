//! Query and field normalization shared by hint detection and scoring.

use std::collections::HashSet;

/// Lowercases, replaces every non-alphanumeric char with a space, collapses
/// whitespace runs and trims. Unicode letters and digits survive.
pub fn normalize_text(text: &str) -> String {
    let mut spaced = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            spaced.extend(ch.to_lowercase());
        } else {
            spaced.push(' ');
        }
    }
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Distinct tokens of an already normalized string.
pub fn token_set(normalized: &str) -> HashSet<&str> {
    normalized.split(' ').filter(|t| !t.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_case() {
        assert_eq!(normalize_text("  Men's  T-Shirt!! "), "men s t shirt");
        assert_eq!(normalize_text("Women's DRESS"), "women s dress");
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(normalize_text("Café—Crème"), "café crème");
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \t\n "), "");
    }

    #[test]
    fn token_set_dedups() {
        let s = token_set("red red shoe");
        assert_eq!(s.len(), 2);
        assert!(s.contains("shoe"));
    }
}
