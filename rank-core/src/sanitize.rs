//! Conversion of loosely typed catalog metadata into a [`ProductRecord`].
//!
//! Every helper is total: bad input maps to `None` or `""`, so one broken
//! field never drops the whole candidate.

use std::sync::LazyLock;

use regex::Regex;

use crate::structs::candidate::{Candidate, RawField};
use crate::structs::product_record::ProductRecord;

/// Hard cap on `ProductRecord::description`, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 180;

const ELLIPSIS: char = '…';

/// Text values that the catalog export writes instead of leaving a cell empty.
const TEXT_SENTINELS: &[&str] = &["nan", "none", "null"];

static DESCRIPTION_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdescription\s*:").expect("description label regex is valid")
});

/// Labels that end the description segment: a line-leading `Product:`,
/// `Brand:` or `Category:`, or a `Specs:` / `Specifications:` anywhere.
static NEXT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:product|brand|category)[ \t]*:|\bspec(?:ification)?s\s*:")
        .expect("next label regex is valid")
});

/// Parses a float from a number or numeric text; `None` for `"nan"`,
/// non-numeric text, infinities and anything non-scalar.
fn raw_to_f64(v: &RawField) -> Option<f64> {
    let x = match v {
        RawField::Number(n) => *n,
        RawField::Text(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    x.is_finite().then_some(x)
}

/// Whole-number price: parsed as float, then truncated toward zero.
pub fn safe_int(v: &RawField) -> Option<i64> {
    raw_to_f64(v).map(|x| x.trunc() as i64)
}

/// Rating rounded to one decimal place.
///
/// Rounds the exact binary value with ties to even, so `4.25` gives `4.2`
/// and `4.35` (stored just below the tie) gives `4.3`.
pub fn safe_rating(v: &RawField) -> Option<f64> {
    raw_to_f64(v).and_then(|x| format!("{x:.1}").parse().ok())
}

/// Trimmed text with export sentinels blanked. Numbers are rendered so that
/// integral ids print without a fractional part.
pub fn safe_text(v: &RawField) -> String {
    match v {
        RawField::Text(s) => {
            let s = s.trim();
            if TEXT_SENTINELS.iter().any(|t| s.eq_ignore_ascii_case(t)) {
                String::new()
            } else {
                s.to_string()
            }
        }
        RawField::Number(n) if n.is_finite() => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }
        }
        _ => String::new(),
    }
}

/// First image URL out of a plain URL, a JSON-encoded array string, or a list.
pub fn parse_first_image(v: &RawField) -> String {
    match v {
        RawField::Text(s) => {
            let s = s.trim();
            if s.starts_with('[') {
                match serde_json::from_str::<Vec<serde_json::Value>>(s) {
                    Ok(items) => match items.first() {
                        Some(serde_json::Value::String(url)) => url.trim().to_string(),
                        _ => String::new(),
                    },
                    Err(_) => String::new(),
                }
            } else {
                s.to_string()
            }
        }
        RawField::List(items) => match items.first() {
            Some(RawField::Text(url)) => url.trim().to_string(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

/// Pulls the `Description:` segment out of labelled embedding text and caps it.
///
/// Without a `Description:` label the whole text is used.
pub fn extract_description(content: &str) -> String {
    let segment = match DESCRIPTION_LABEL_RE.find(content) {
        Some(m) => {
            let rest = &content[m.end()..];
            match NEXT_LABEL_RE.find(rest) {
                Some(next) => &rest[..next.start()],
                None => rest,
            }
        }
        None => content,
    };

    let flat = segment.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_description(&flat)
}

/// Caps `text` at [`DESCRIPTION_MAX_CHARS`], cutting on a word boundary and
/// appending `…`. Text within the cap is returned unchanged.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_MAX_CHARS {
        return text.to_string();
    }

    // One char is reserved for the ellipsis.
    let budget = DESCRIPTION_MAX_CHARS - 1;
    let head_end = text
        .char_indices()
        .nth(budget)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let head = &text[..head_end];

    let cut = if text[head_end..].starts_with(char::is_whitespace) {
        head_end
    } else {
        head.rfind(char::is_whitespace).unwrap_or(head_end)
    };

    let kept = text[..cut].trim_end();
    let kept = if kept.is_empty() { head } else { kept };

    let mut out = String::with_capacity(kept.len() + ELLIPSIS.len_utf8());
    out.push_str(kept);
    out.push(ELLIPSIS);
    out
}

/// Sanitizes one retrieved candidate into the public product shape.
pub fn sanitize_candidate(c: &Candidate) -> ProductRecord {
    let m = &c.metadata;
    let id = safe_text(&m.id);

    ProductRecord {
        id: (!id.is_empty()).then_some(id),
        title: safe_text(&m.product_name),
        brand: safe_text(&m.brand),
        category_path: safe_text(&m.category_path),
        discounted_price: safe_int(&m.discounted_price),
        retail_price: safe_int(&m.retail_price),
        product_rating: safe_rating(&m.product_rating),
        overall_rating: safe_rating(&m.overall_rating),
        image: parse_first_image(&m.image),
        url: safe_text(&m.product_url),
        description: extract_description(&c.content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::candidate::CandidateMetadata;

    fn text(s: &str) -> RawField {
        RawField::Text(s.to_string())
    }

    #[test]
    fn safe_int_variants() {
        assert_eq!(safe_int(&text("999")), Some(999));
        assert_eq!(safe_int(&text(" 1499.99 ")), Some(1499));
        assert_eq!(safe_int(&RawField::Number(349.0)), Some(349));
        assert_eq!(safe_int(&text("nan")), None);
        assert_eq!(safe_int(&text("NaN")), None);
        assert_eq!(safe_int(&text("inf")), None);
        assert_eq!(safe_int(&text("abc")), None);
        assert_eq!(safe_int(&text("")), None);
        assert_eq!(safe_int(&RawField::Missing), None);
        assert_eq!(safe_int(&RawField::Bool(true)), None);
        assert_eq!(safe_int(&RawField::Number(f64::NAN)), None);
    }

    #[test]
    fn safe_rating_rounds_to_one_decimal() {
        assert_eq!(safe_rating(&text("4.26")), Some(4.3));
        assert_eq!(safe_rating(&RawField::Number(3.0)), Some(3.0));
        assert_eq!(safe_rating(&RawField::Number(3.96)), Some(4.0));
        assert_eq!(safe_rating(&RawField::Number(4.25)), Some(4.2));
        assert_eq!(safe_rating(&RawField::Number(4.35)), Some(4.3));
        assert_eq!(safe_rating(&text("4.45")), Some(4.5));
        assert_eq!(safe_rating(&text("No rating available")), None);
        assert_eq!(safe_rating(&text("nan")), None);
        assert_eq!(safe_rating(&RawField::Missing), None);
    }

    #[test]
    fn image_forms() {
        assert_eq!(parse_first_image(&text("[\"a\",\"b\"]")), "a");
        assert_eq!(parse_first_image(&text("http://x")), "http://x");
        assert_eq!(parse_first_image(&text("[broken")), "");
        assert_eq!(parse_first_image(&text("[]")), "");
        assert_eq!(parse_first_image(&text("[1, \"b\"]")), "");
        assert_eq!(parse_first_image(&text("  [\" http://y \"]  ")), "http://y");
        assert_eq!(
            parse_first_image(&RawField::List(vec![text("http://z"), text("http://w")])),
            "http://z"
        );
        assert_eq!(parse_first_image(&RawField::Missing), "");
        assert_eq!(parse_first_image(&RawField::Number(1.0)), "");
    }

    #[test]
    fn text_sentinels_are_blanked() {
        assert_eq!(safe_text(&text("nan")), "");
        assert_eq!(safe_text(&text(" None ")), "");
        assert_eq!(safe_text(&text("NULL")), "");
        assert_eq!(safe_text(&text(" Alisha ")), "Alisha");
        assert_eq!(safe_text(&RawField::Number(42.0)), "42");
        assert_eq!(safe_text(&RawField::Missing), "");
    }

    #[test]
    fn description_segment_between_labels() {
        let content = "Product: Mug\nBrand: Acme\nDescription: A white\n  ceramic mug.\nSpecifications: Capacity 300 ml";
        assert_eq!(extract_description(content), "A white ceramic mug.");
    }

    #[test]
    fn description_stops_at_inline_specs() {
        let content = "Description: Soft cotton kurti Specs: Fabric cotton";
        assert_eq!(extract_description(content), "Soft cotton kurti");
    }

    #[test]
    fn description_runs_to_end_of_text() {
        assert_eq!(extract_description("Description:  Just this. "), "Just this.");
    }

    #[test]
    fn description_without_label_uses_whole_text() {
        assert_eq!(extract_description("line one\nline two"), "line one line two");
        assert_eq!(extract_description(""), "");
    }

    #[test]
    fn truncation_boundary() {
        let exact = "a".repeat(DESCRIPTION_MAX_CHARS);
        assert_eq!(truncate_description(&exact), exact);

        // 181 chars: words of 9 letters separated by spaces.
        let mut long = String::new();
        while long.chars().count() < DESCRIPTION_MAX_CHARS + 1 {
            if !long.is_empty() {
                long.push(' ');
            }
            long.push_str("abcdefghi");
        }
        let long: String = long.chars().take(DESCRIPTION_MAX_CHARS + 1).collect();
        assert_eq!(long.chars().count(), 181);

        let out = truncate_description(&long);
        assert!(out.chars().count() <= DESCRIPTION_MAX_CHARS);
        assert!(out.ends_with('…'));
        let body = out.trim_end_matches('…');
        assert!(!body.ends_with(' '));
        assert!(long.starts_with(body));
        // The cut lands right before a space in the source text.
        assert_eq!(long[body.len()..].chars().next(), Some(' '));
    }

    #[test]
    fn truncation_without_whitespace_hard_cuts() {
        let long = "x".repeat(400);
        let out = truncate_description(&long);
        assert_eq!(out.chars().count(), DESCRIPTION_MAX_CHARS);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let long = "é".repeat(200);
        let out = truncate_description(&long);
        assert_eq!(out.chars().count(), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn sanitize_candidate_with_garbage_fields() {
        let c = Candidate {
            content: "Description: Nice shoe".into(),
            metadata: CandidateMetadata {
                id: text("SHOE1"),
                product_name: text("Running Shoe"),
                brand: text("nan"),
                retail_price: text("nan"),
                discounted_price: RawField::Number(799.5),
                product_rating: text("No rating available"),
                image: text("[\"http://img/1.jpg\"]"),
                ..Default::default()
            },
        };
        let r = sanitize_candidate(&c);
        assert_eq!(r.id.as_deref(), Some("SHOE1"));
        assert_eq!(r.title, "Running Shoe");
        assert_eq!(r.brand, "");
        assert_eq!(r.retail_price, None);
        assert_eq!(r.discounted_price, Some(799));
        assert_eq!(r.product_rating, None);
        assert_eq!(r.image, "http://img/1.jpg");
        assert_eq!(r.description, "Nice shoe");
        assert_eq!(r.url, "");
    }
}
