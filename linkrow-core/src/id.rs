//! Identifier newtypes.
//!
//! The API issues table and row ids as integers, while the CLI receives them as
//! text. Both normalize to their decimal string so `1` and `"1"` name the same
//! table.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// Accepts either a JSON string or a JSON integer.
fn deserialize_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => Ok(s.trim().to_string()),
        Raw::Unsigned(n) => Ok(n.to_string()),
        Raw::Signed(n) => Ok(n.to_string()),
    }
}

macro_rules! text_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Borrow the id as text.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Read the id from a JSON cell value (string or integer).
            pub fn from_value(value: &serde_json::Value) -> Option<Self> {
                match value {
                    serde_json::Value::String(s) if !s.trim().is_empty() => {
                        Some(Self(s.trim().to_string()))
                    }
                    serde_json::Value::Number(n) => Some(Self(n.to_string())),
                    _ => None,
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = deserialize_text_or_number(deserializer)?;
                if s.is_empty() {
                    return Err(de::Error::custom(concat!(stringify!($name), " must not be empty")));
                }
                Ok(Self(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.trim().to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.trim().to_string())
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }
    };
}

text_id!(
    /// Opaque table identifier, as issued by the API or passed on the command line.
    TableId
);

text_id!(
    /// Row identifier, unique within its table.
    RowId
);

/// Numeric field identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u64);

impl FieldId {
    /// Row key the API uses for this field when user field names are off.
    pub fn column_key(&self) -> String {
        format!("field_{}", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_table_id_from_number_and_string() {
        let from_number: TableId = serde_json::from_value(json!(12)).unwrap();
        let from_string: TableId = serde_json::from_value(json!("12")).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "12");
    }

    #[test]
    fn test_table_id_trims_whitespace() {
        assert_eq!(TableId::from(" 7 "), TableId::from("7"));
    }

    #[test]
    fn test_empty_table_id_rejected() {
        let result: Result<TableId, _> = serde_json::from_value(json!(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_row_id_from_value() {
        assert_eq!(RowId::from_value(&json!(5)), Some(RowId::from(5)));
        assert_eq!(RowId::from_value(&json!("5")), Some(RowId::from("5")));
        assert_eq!(RowId::from_value(&json!(null)), None);
        assert_eq!(RowId::from_value(&json!({"id": 5})), None);
    }

    #[test]
    fn test_field_column_key() {
        assert_eq!(FieldId(9).column_key(), "field_9");
    }

    #[test]
    fn test_table_id_serializes_as_string() {
        let id: TableId = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""3""#);
    }
}
