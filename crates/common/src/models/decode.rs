//! Lenient decoding of loosely-typed document fields
//!
//! Graph documents are produced by many exporters. List-valued fields
//! (`fields_of_study`, `affiliations`, `authors`, `contexts`) show up as real
//! arrays, as JSON arrays encoded into a string, or as bare scalars. They are
//! collapsed once, at build time, into a plain `Vec<String>`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A list-valued field as it appears in the raw document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    /// Already an array
    Items(Vec<Value>),

    /// A string, usually a JSON-encoded array
    Encoded(String),

    /// Anything else (number, bool, object)
    Scalar(Value),
}

impl ListField {
    /// Collapse into strings. Objects are rendered as JSON text.
    pub fn into_strings(self) -> Vec<String> {
        self.collapse(value_text)
    }

    /// Collapse into names. Objects contribute their `name` field, which is
    /// how author lists are usually exported.
    pub fn into_names(self) -> Vec<String> {
        self.collapse(name_text)
    }

    fn collapse(self, render: fn(&Value) -> String) -> Vec<String> {
        match self {
            ListField::Items(items) => items.iter().map(render).collect(),
            ListField::Encoded(raw) => {
                if raw.is_empty() {
                    return Vec::new();
                }
                match serde_json::from_str::<Vec<Value>>(&raw) {
                    Ok(items) => items.iter().map(render).collect(),
                    Err(e) => {
                        tracing::debug!(raw = %raw, error = %e, "List field is not a JSON array, keeping raw string");
                        vec![raw]
                    }
                }
            }
            ListField::Scalar(value) => vec![render(&value)],
        }
    }
}

/// Decode an optional list field; a missing or null field is empty
pub fn decode_strings(field: Option<ListField>) -> Vec<String> {
    field.map(ListField::into_strings).unwrap_or_default()
}

/// Decode a list field whose presence matters. Missing, null and `""` are
/// absent; anything else is present, even when it decodes to no items.
pub fn decode_present_strings(field: Option<ListField>) -> Option<Vec<String>> {
    match field? {
        ListField::Encoded(raw) if raw.is_empty() => None,
        field => Some(field.into_strings()),
    }
}

/// Decode an optional list of names; a missing or null field is empty
pub fn decode_names(field: Option<ListField>) -> Vec<String> {
    field.map(ListField::into_names).unwrap_or_default()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn name_text(value: &Value) -> String {
    match value {
        Value::Object(map) => map.get("name").map(value_text).unwrap_or_default(),
        other => value_text(other),
    }
}

/// Text of a scalar field. Empty strings and null count as absent.
pub fn scalar_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Serde adapter for [`scalar_text`]
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Option::<Value>::deserialize(deserializer)?))
}

/// Identifier text: strings and numbers, or an object carrying an `id`.
///
/// Force-layout libraries replace edge endpoints with the node objects
/// themselves, so `{ "id": "p1", ... }` is accepted wherever an id is.
pub fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => match map.get("id")? {
            Value::Object(_) => None,
            inner => identifier(inner),
        },
        _ => None,
    }
}

/// Year as an integer. Numeric strings are parsed by their leading digits;
/// zero and non-numeric values are absent.
pub fn year(value: Option<&Value>) -> Option<i32> {
    let parsed = match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => leading_integer(s),
        _ => None,
    };
    parsed.filter(|&y| y != 0)
}

/// Non-negative count; anything unusable is 0
pub fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.trunc() as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => leading_integer(s)
            .and_then(|c| u64::try_from(c).ok())
            .unwrap_or(0),
        _ => 0,
    }
}

/// Boolean flag; `"true"` strings and non-zero numbers count as set
pub fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn leading_integer(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let digits_start = usize::from(s.starts_with(['-', '+']));
    let end = s[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + digits_start);
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(value: Value) -> Option<ListField> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_encoded_array_decodes() {
        let fields = decode_strings(field(json!("[\"AI\",\"NLP\"]")));
        assert_eq!(fields, vec!["AI", "NLP"]);
    }

    #[test]
    fn test_malformed_encoded_array_falls_back() {
        let fields = decode_strings(field(json!("[AI")));
        assert_eq!(fields, vec!["[AI"]);
    }

    #[test]
    fn test_plain_string_is_single_item() {
        assert_eq!(decode_strings(field(json!("Biology"))), vec!["Biology"]);
    }

    #[test]
    fn test_encoded_non_array_keeps_raw() {
        assert_eq!(decode_strings(field(json!("\"AI\""))), vec!["\"AI\""]);
    }

    #[test]
    fn test_array_used_as_is() {
        let fields = decode_strings(field(json!(["Physics", 42])));
        assert_eq!(fields, vec!["Physics", "42"]);
    }

    #[test]
    fn test_scalar_coerced() {
        assert_eq!(decode_strings(field(json!(7))), vec!["7"]);
        assert_eq!(decode_strings(field(json!(true))), vec!["true"]);
    }

    #[test]
    fn test_null_and_missing_are_empty() {
        assert!(decode_strings(field(json!(null))).is_empty());
        assert!(decode_strings(None).is_empty());
        assert!(decode_strings(field(json!(""))).is_empty());
    }

    #[test]
    fn test_presence_survives_empty_lists() {
        assert_eq!(decode_present_strings(field(json!([]))), Some(vec![]));
        assert_eq!(decode_present_strings(field(json!("[]"))), Some(vec![]));
        assert_eq!(decode_present_strings(field(json!("AI"))), Some(vec!["AI".to_string()]));
        assert_eq!(decode_present_strings(field(json!(""))), None);
        assert_eq!(decode_present_strings(field(json!(null))), None);
        assert_eq!(decode_present_strings(None), None);
    }

    #[test]
    fn test_author_objects_use_name() {
        let names = decode_names(field(json!([{"name": "Ada Lovelace"}, "Alan Turing", {"id": "a9"}])));
        assert_eq!(names, vec!["Ada Lovelace", "Alan Turing", ""]);

        let encoded = decode_names(field(json!("[{\"name\":\"Grace Hopper\"}]")));
        assert_eq!(encoded, vec!["Grace Hopper"]);
    }

    #[test]
    fn test_identifier_forms() {
        assert_eq!(identifier(&json!("p1")), Some("p1".to_string()));
        assert_eq!(identifier(&json!(17)), Some("17".to_string()));
        assert_eq!(identifier(&json!({"id": "p2", "x": 1.5})), Some("p2".to_string()));
        assert_eq!(identifier(&json!("")), None);
        assert_eq!(identifier(&json!(null)), None);
    }

    #[test]
    fn test_year_parsing() {
        assert_eq!(year(Some(&json!(2021))), Some(2021));
        assert_eq!(year(Some(&json!("2019"))), Some(2019));
        assert_eq!(year(Some(&json!("2018-05"))), Some(2018));
        assert_eq!(year(Some(&json!(2020.0))), Some(2020));
        assert_eq!(year(Some(&json!("n/a"))), None);
        assert_eq!(year(Some(&json!(0))), None);
        assert_eq!(year(None), None);
    }

    #[test]
    fn test_count_and_flag() {
        assert_eq!(count(Some(&json!(12))), 12);
        assert_eq!(count(Some(&json!("5"))), 5);
        assert_eq!(count(Some(&json!(-3))), 0);
        assert_eq!(count(None), 0);

        assert!(flag(Some(&json!(true))));
        assert!(flag(Some(&json!("TRUE"))));
        assert!(flag(Some(&json!(1))));
        assert!(!flag(Some(&json!("no"))));
        assert!(!flag(None));
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(Some(json!("x"))), Some("x".to_string()));
        assert_eq!(scalar_text(Some(json!(""))), None);
        assert_eq!(scalar_text(Some(json!(3))), Some("3".to_string()));
        assert_eq!(scalar_text(Some(json!(null))), None);
    }
}
