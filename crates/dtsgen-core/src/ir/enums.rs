use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Enumeration declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Enum name.
    #[serde(rename = "Identifier")]
    pub identifier: String,

    /// Entries in declaration order.
    #[serde(
        rename = "Values",
        default,
        deserialize_with = "deserialize_values",
        serialize_with = "serialize_values"
    )]
    pub values: Vec<EnumValue>,
}

impl EnumDef {
    /// Create an enum with no entries.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            values: Vec::new(),
        }
    }

    /// Add an entry. `None` leaves the value to be assigned by position.
    pub fn with_value(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value: value.map(str::to_string),
        });
        self
    }
}

/// A single enum entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Entry name.
    pub name: String,
    /// Explicit literal value as written in the source.
    pub value: Option<String>,
}

fn deserialize_values<'de, D>(deserializer: D) -> Result<Vec<EnumValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?;

    map.unwrap_or_default()
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::Bool(b) => Some(b.to_string()),
                other => {
                    return Err(D::Error::custom(format!(
                        "enum value `{}` must be a string, number or null, got {}",
                        name, other
                    )))
                }
            };
            Ok(EnumValue { name, value })
        })
        .collect()
}

fn serialize_values<S>(values: &[EnumValue], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(values.len()))?;
    for entry in values {
        map.serialize_entry(&entry.name, &entry.value)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_keep_declaration_order() {
        let json = r#"{"Identifier":"Status","Values":{"Zeta":null,"Alpha":"5","Mid":7}}"#;
        let def: EnumDef = serde_json::from_str(json).unwrap();

        let names: Vec<_> = def.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(def.values[0].value, None);
        assert_eq!(def.values[1].value.as_deref(), Some("5"));
        assert_eq!(def.values[2].value.as_deref(), Some("7"));
    }

    #[test]
    fn test_null_values_map() {
        let json = r#"{"Identifier":"Empty","Values":null}"#;
        let def: EnumDef = serde_json::from_str(json).unwrap();
        assert!(def.values.is_empty());
    }

    #[test]
    fn test_nested_value_rejected() {
        let json = r#"{"Identifier":"Bad","Values":{"A":[1]}}"#;
        assert!(serde_json::from_str::<EnumDef>(json).is_err());
    }

    #[test]
    fn test_serialize_keeps_order() {
        let def = EnumDef::new("Color")
            .with_value("Red", None)
            .with_value("Blue", Some("4"));
        let json = serde_json::to_string(&def).unwrap();
        assert_eq!(json, r#"{"Identifier":"Color","Values":{"Red":null,"Blue":"4"}}"#);
    }
}
