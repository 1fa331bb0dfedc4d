//! Maps raw catalog JSON rows into [`CatalogRecord`]s.

use serde_json::{Map, Value};

use crate::record::{CatalogRecord, METADATA_KEYS};

/// Map one prepared-catalog row.
///
/// - id: `id`, then `uniq_id`, then `pid` (strings or integers); stored as
///   metadata `id` whatever its source key.
/// - text: `embedding_text`, else composed from name / brand / category.
///
/// Returns `None` when the row has no id or nothing to embed.
pub fn map_catalog_row(v: &Value) -> Option<CatalogRecord> {
    let obj = v.as_object()?;

    let id = pick_id(obj, &["id", "uniq_id", "pid"])?;

    let text = match pick_str(obj, &["embedding_text"]) {
        Some(t) => t.to_string(),
        None => compose_text(obj)?,
    };

    let mut metadata = METADATA_KEYS
        .iter()
        .filter_map(|k| obj.get(*k).map(|v| (k.to_string(), v.clone())))
        .collect::<Map<_, _>>();
    // Whichever key supplied the id, the payload carries it as `id`.
    metadata.insert("id".into(), Value::String(id.clone()));

    Some(CatalogRecord { id, text, metadata })
}

/// Labelled fallback text, the same line format the dataset preparation emits.
fn compose_text(obj: &Map<String, Value>) -> Option<String> {
    let mut lines = Vec::new();
    if let Some(name) = pick_str(obj, &["product_name"]) {
        lines.push(format!("Product: {name}"));
    }
    if let Some(brand) = pick_str(obj, &["brand"]) {
        lines.push(format!("Brand: {brand}"));
    }
    if let Some(cat) = pick_str(obj, &["category_path"]) {
        lines.push(format!("Category: {cat}"));
    }
    if let Some(desc) = pick_str(obj, &["description"]) {
        lines.push(format!("Description: {desc}"));
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// First non-empty, non-`"nan"` string among `keys`.
pub fn pick_str<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty() && !s.eq_ignore_ascii_case("nan"))
}

fn pick_id(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    for k in keys {
        match obj.get(*k) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_prepared_row() {
        let row = json!({
            "id": "SRTEH2FF9KEDEFGF",
            "embedding_text": "Product: Alisha Solid Women's Cycling Shorts\nBrand: Alisha",
            "product_name": "Alisha Solid Women's Cycling Shorts",
            "brand": "Alisha",
            "retail_price": 999.0,
            "discounted_price": 379.0,
            "product_rating": null,
            "description": "not copied",
            "is_FK_Advantage_product": false
        });
        let r = map_catalog_row(&row).unwrap();
        assert_eq!(r.id, "SRTEH2FF9KEDEFGF");
        assert!(r.text.starts_with("Product: Alisha"));
        assert_eq!(r.metadata["retail_price"], json!(999.0));
        assert!(r.metadata["product_rating"].is_null());
        assert!(!r.metadata.contains_key("description"));
        assert!(!r.metadata.contains_key("embedding_text"));
    }

    #[test]
    fn composes_text_when_missing() {
        let row = json!({
            "uniq_id": 42,
            "product_name": "Steel Bottle",
            "brand": "nan",
            "category_path": "Kitchen >> Bottles"
        });
        let r = map_catalog_row(&row).unwrap();
        assert_eq!(r.id, "42");
        assert_eq!(r.metadata["id"], json!("42"));
        assert_eq!(r.text, "Product: Steel Bottle\nCategory: Kitchen >> Bottles");
    }

    #[test]
    fn rejects_rows_without_id_or_text() {
        assert!(map_catalog_row(&json!({"product_name": "x"})).is_none());
        assert!(map_catalog_row(&json!({"id": "a", "embedding_text": "  "})).is_none());
        assert!(map_catalog_row(&json!(["not", "an", "object"])).is_none());
    }
}
