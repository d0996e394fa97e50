//! Core identifier newtypes with smart constructors.
//!
//! All identifiers validate non-empty strings at construction time.

use serde::Deserialize;
use std::fmt;

/// Stable identity of a grid column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct ColumnId(String);

impl ColumnId {
    /// Smart constructor: validates non-empty column id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidColumnId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidColumnId::Empty);
        }
        Ok(Self(raw))
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ColumnId {
    type Error = InvalidColumnId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Key of a row record field that a column displays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct FieldKey(String);

impl FieldKey {
    /// Smart constructor: validates non-empty field key
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidFieldKey> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidFieldKey::Empty);
        }
        Ok(Self(raw))
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldKey {
    type Error = InvalidFieldKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ===== Error Types =====

/// Rejected column id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidColumnId {
    /// The id was empty.
    #[error("Column ID cannot be empty")]
    Empty,
}

/// Rejected field key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidFieldKey {
    /// The key was empty.
    #[error("Field key cannot be empty")]
    Empty,
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_id_accepts_valid_string() {
        let id = ColumnId::new("price");
        assert!(id.is_ok(), "Valid column id should be accepted");
    }

    #[test]
    fn column_id_rejects_empty_string() {
        let id = ColumnId::new("");
        assert!(
            matches!(id, Err(InvalidColumnId::Empty)),
            "Empty string should return InvalidColumnId::Empty"
        );
    }

    #[test]
    fn column_id_display_returns_inner_string() {
        let id = ColumnId::new("price").expect("Valid column id");
        assert_eq!(id.to_string(), "price");
        assert_eq!(id.as_str(), "price");
    }

    #[test]
    fn field_key_rejects_empty_string() {
        assert!(matches!(FieldKey::new(""), Err(InvalidFieldKey::Empty)));
    }

    #[test]
    fn field_key_accepts_owned_string() {
        let key = FieldKey::new(String::from("name")).expect("Valid key");
        assert_eq!(key.as_str(), "name");
    }

    #[test]
    fn column_id_deserializes_through_smart_constructor() {
        #[derive(Deserialize)]
        struct Holder {
            id: ColumnId,
        }

        let ok: Holder = toml::from_str(r#"id = "name""#).expect("valid id");
        assert_eq!(ok.id.as_str(), "name");

        let err = toml::from_str::<Holder>(r#"id = """#);
        assert!(err.is_err(), "Empty id must be rejected on deserialize");
    }
}
