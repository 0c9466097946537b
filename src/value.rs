//! Contains the `JsonValue` enum, a native Rust representation of any
//! decoded JSON value.
use crate::error::DecodeError;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A native Rust representation of any valid JSON value.
///
/// Numbers are always `f64`: integers beyond 2^53 lose precision.
#[derive(Debug, PartialEq, Clone)]
pub enum JsonValue {
    /// Represents a JSON `null`.
    Null,
    /// Represents a JSON `true` or `false`.
    Boolean(bool),
    /// Represents a JSON number.
    Number(f64),
    /// Represents a JSON string.
    String(String),
    /// Represents a JSON array (list).
    Array(Vec<JsonValue>),
    /// Represents a JSON object (map). Keys are unique and iterate in order.
    Object(BTreeMap<String, JsonValue>),
}

impl JsonValue {
    /// Decodes a JSON string into a `JsonValue`.
    ///
    /// Same as [`crate::decode`].
    ///
    /// # Errors
    /// Returns a `DecodeError` if the JSON is invalid, empty, or has trailing tokens.
    pub fn parse(input: &str) -> Result<JsonValue, DecodeError> {
        crate::decode(input)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, JsonValue>> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?.get(key)
    }

    /// Compares two values structurally, treating numbers as equal when
    /// they differ by less than `epsilon`.
    pub fn approx_eq(&self, other: &JsonValue, epsilon: f64) -> bool {
        match (self, other) {
            (JsonValue::Number(a), JsonValue::Number(b)) => (a - b).abs() < epsilon,
            (JsonValue::Array(a), JsonValue::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.approx_eq(y, epsilon))
            }
            (JsonValue::Object(a), JsonValue::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, x)| {
                        b.get(key).is_some_and(|y| x.approx_eq(y, epsilon))
                    })
            }
            _ => self == other,
        }
    }
}

impl FromStr for JsonValue {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let value: JsonValue = r#"{"a": [1, "two", true, null]}"#.parse().unwrap();
        let items = value.get("a").and_then(JsonValue::as_array).unwrap();
        assert_eq!(items[0].as_f64(), Some(1.0));
        assert_eq!(items[1].as_str(), Some("two"));
        assert_eq!(items[2].as_bool(), Some(true));
        assert!(items[3].is_null());
        assert_eq!(items[0].as_str(), None);
        assert_eq!(value.get("missing"), None);
        assert_eq!(items[0].get("a"), None);
    }

    #[test]
    fn test_approx_eq() {
        let a = JsonValue::Array(vec![JsonValue::Number(0.1 + 0.2), JsonValue::Null]);
        let b = JsonValue::Array(vec![JsonValue::Number(0.3), JsonValue::Null]);
        assert!(a.approx_eq(&b, 1e-6));
        assert!(!a.approx_eq(&JsonValue::Array(vec![JsonValue::Number(0.3)]), 1e-6));
        assert!(!JsonValue::Number(1.0).approx_eq(&JsonValue::Number(1.1), 1e-6));
        assert!(!JsonValue::Null.approx_eq(&JsonValue::Boolean(false), 1e-6));

        let mut x = BTreeMap::new();
        x.insert("k".to_string(), JsonValue::Number(1.0000001));
        let mut y = BTreeMap::new();
        y.insert("k".to_string(), JsonValue::Number(1.0));
        assert!(JsonValue::Object(x).approx_eq(&JsonValue::Object(y), 1e-6));
    }

    #[test]
    fn test_parse_matches_decode() {
        assert_eq!(JsonValue::parse("[1]"), crate::decode("[1]"));
        assert!(JsonValue::parse("").is_err());
    }
}
