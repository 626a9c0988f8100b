//! Value Normalizer
//!
//! Canonicalizes property values into a comparable form so cosmetic
//! differences (case, padding, array order, key order) never surface as
//! mismatches. Display formatting is separate: reports always show the
//! original values, not the normalized ones.
//!
//! Total and pure: any shape that cannot be serialized degrades to a
//! string coercion instead of failing the comparison run.

use serde_json::Value;

/// Shown in reports when a side has no value
pub const EMPTY_DISPLAY: &str = "<empty>";

/// Comparable form of an absent value. The leading control character
/// cannot survive whitespace folding, so no real string equals it.
const NULL_SENTINEL: &str = "\u{1}absent\u{1}";

/// Joins normalized array elements; also unable to appear in folded text.
const LIST_SEPARATOR: &str = "\u{1f}";

/// Canonical comparable form of a property value.
///
/// Array elements are sorted before joining, so two arrays holding the
/// same elements in different order normalize identically.
pub fn normalize(value: &Value) -> String {
    normalize_with_order(value, false)
}

/// Like [`normalize`], but keeps array element order when
/// `order_sensitive` is set (a per-kind configuration point).
pub fn normalize_with_order(value: &Value, order_sensitive: bool) -> String {
    match value {
        Value::Null => NULL_SENTINEL.to_string(),
        Value::Bool(b) => if *b { "yes" } else { "no" }.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => fold_text(s),
        Value::Array(items) => {
            let mut parts: Vec<String> = items
                .iter()
                .map(|item| normalize_with_order(item, order_sensitive))
                .collect();
            if !order_sensitive {
                parts.sort();
            }
            parts.join(LIST_SEPARATOR)
        }
        // serde_json maps are BTreeMap-backed, so this serialization is
        // already key-sorted and stable.
        Value::Object(_) => serde_json::to_string(value).unwrap_or_else(|_| value.to_string()),
    }
}

/// Formatted display form of a property value, original text preserved
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_DISPLAY.to_string(),
        Value::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_else(|_| value.to_string()),
    }
}

/// Trim, collapse internal whitespace runs, case-fold
fn fold_text(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_never_matches_empty_string() {
        assert_ne!(normalize(&Value::Null), normalize(&json!("")));
    }

    #[test]
    fn test_booleans_match_their_string_labels() {
        assert_eq!(normalize(&json!(true)), normalize(&json!("Yes")));
        assert_eq!(normalize(&json!(false)), normalize(&json!("no ")));
        assert_ne!(normalize(&json!(true)), normalize(&json!(false)));
    }

    #[test]
    fn test_whitespace_and_case_fold() {
        assert_eq!(normalize(&json!("Open  Status")), normalize(&json!("open status")));
        assert_eq!(normalize(&json!("  Open ")), normalize(&json!("OPEN")));
        assert_ne!(normalize(&json!("Open")), normalize(&json!("Closed")));
    }

    #[test]
    fn test_arrays_compare_order_independently() {
        let a = json!(["g1", "g2", "g3"]);
        let b = json!(["g3", "g1", "g2"]);
        assert_eq!(normalize(&a), normalize(&b));

        assert_ne!(
            normalize_with_order(&a, true),
            normalize_with_order(&b, true)
        );
    }

    #[test]
    fn test_arrays_with_different_elements_differ() {
        assert_ne!(normalize(&json!(["g1", "g2"])), normalize(&json!(["g1", "g4"])));
        assert_ne!(normalize(&json!(["g1"])), normalize(&json!(["g1", "g1"])));
    }

    #[test]
    fn test_object_key_order_is_stable() {
        let a: Value = serde_json::from_str(r#"{"b":1,"a":2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"a":2,"b":1}"#).unwrap();
        assert_eq!(normalize(&a), normalize(&b));
    }

    #[test]
    fn test_display_keeps_original_text() {
        assert_eq!(display(&json!("Open  Status")), "Open  Status");
        assert_eq!(display(&json!(true)), "Yes");
        assert_eq!(display(&Value::Null), EMPTY_DISPLAY);
        assert_eq!(display(&json!(["b", "a"])), "b, a");
    }
}
