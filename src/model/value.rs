//! Raw cell values as stored in row records.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A raw value held by one field of a row record.
///
/// Equality is exact value equality (not display-text equality) and is
/// total: `NaN` equals `NaN` and `-0.0` equals `0.0`, so values can be
/// collected into a hash set for de-duplication.
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Missing or explicit null value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Text(String),
}

impl CellValue {
    /// Canonical bit pattern used for float equality and hashing.
    fn float_key(value: f64) -> u64 {
        if value.is_nan() {
            f64::NAN.to_bits()
        } else if value == 0.0 {
            0.0f64.to_bits()
        } else {
            value.to_bits()
        }
    }

    /// Text used when no formatter is configured.
    ///
    /// Null renders as the empty string.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Whether this is [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                Self::float_key(*a) == Self::float_key(*b)
            }
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Null => {}
            CellValue::Bool(b) => b.hash(state),
            CellValue::Int(i) => i.hash(state),
            CellValue::Float(f) => Self::float_key(*f).hash(state),
            CellValue::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<serde_json::Value> for CellValue {
    /// Nested arrays and objects keep their compact JSON text.
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => CellValue::Text(s),
            nested @ (Value::Array(_) | Value::Object(_)) => CellValue::Text(nested.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_exact_not_textual() {
        assert_ne!(CellValue::Int(1), CellValue::Text("1".into()));
        assert_ne!(CellValue::Int(1), CellValue::Float(1.0));
        assert_eq!(CellValue::Text("a".into()), CellValue::from("a"));
    }

    #[test]
    fn nan_and_signed_zero_compare_equal() {
        assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
        assert_eq!(CellValue::Float(-0.0), CellValue::Float(0.0));
    }

    #[test]
    fn hash_set_collapses_equal_values() {
        let set: HashSet<CellValue> = [
            CellValue::Float(-0.0),
            CellValue::Float(0.0),
            CellValue::Null,
            CellValue::Null,
            CellValue::from("x"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn display_renders_null_as_empty() {
        assert_eq!(CellValue::Null.to_display_string(), "");
        assert_eq!(CellValue::Bool(true).to_display_string(), "true");
        assert_eq!(CellValue::Float(2.5).to_display_string(), "2.5");
    }

    #[test]
    fn from_json_maps_scalars_and_nested() {
        let v: serde_json::Value = serde_json::json!({"a": [1, 2]});
        assert_eq!(CellValue::from(v), CellValue::Text(r#"{"a":[1,2]}"#.into()));
        assert_eq!(
            CellValue::from(serde_json::json!(42)),
            CellValue::Int(42)
        );
        assert_eq!(
            CellValue::from(serde_json::json!(1.5)),
            CellValue::Float(1.5)
        );
        assert!(CellValue::from(serde_json::Value::Null).is_null());
    }
}
