use serde::{Deserialize, Serialize};

use super::null_as_empty;

/// A typed member: field, property or method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Raw identifier as written in the source. Field identifiers may still
    /// carry an initializer (`Count = 5`).
    #[serde(rename = "Identifier")]
    pub identifier: String,

    /// Raw type signature (`List<int>`, `Dictionary<string, Foo>?`, ...).
    #[serde(rename = "Type")]
    pub type_signature: String,
}

impl Member {
    /// Create a new member.
    pub fn new(identifier: impl Into<String>, type_signature: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            type_signature: type_signature.into(),
        }
    }

    /// Whether the type signature carries a trailing nullability marker.
    pub fn is_nullable(&self) -> bool {
        self.type_signature.trim_end().ends_with('?')
    }
}

/// A class, record or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Declared name, including type parameters (`Page<T>`).
    #[serde(rename = "ModelName", alias = "Name")]
    pub name: String,

    /// Base classes and implemented interfaces, in declaration order.
    #[serde(rename = "BaseClasses", default, deserialize_with = "null_as_empty")]
    pub base_classes: Vec<String>,

    /// Public fields.
    #[serde(rename = "Fields", default, deserialize_with = "null_as_empty")]
    pub fields: Vec<Member>,

    /// Public properties.
    #[serde(rename = "Properties", default, deserialize_with = "null_as_empty")]
    pub properties: Vec<Member>,
}

impl Model {
    /// Create an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_classes: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Add a base class.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_classes.push(base.into());
        self
    }

    /// Add a field.
    pub fn with_field(mut self, identifier: &str, type_signature: &str) -> Self {
        self.fields.push(Member::new(identifier, type_signature));
        self
    }

    /// Add a property.
    pub fn with_property(mut self, identifier: &str, type_signature: &str) -> Self {
        self.properties.push(Member::new(identifier, type_signature));
        self
    }

    /// Fields followed by properties.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.fields.iter().chain(self.properties.iter())
    }

    /// Name without type parameters.
    pub fn bare_name(&self) -> &str {
        split_generic_name(&self.name).0
    }

    /// Declared type parameters.
    pub fn type_parameters(&self) -> Vec<&str> {
        split_generic_name(&self.name).1
    }
}

/// Split `Page<T, U>` into `("Page", ["T", "U"])`.
///
/// Names without a well-formed parameter list are returned whole.
pub fn split_generic_name(name: &str) -> (&str, Vec<&str>) {
    let name = name.trim();
    let Some(open) = name.find('<') else {
        return (name, Vec::new());
    };
    let Some(params) = name[open + 1..].strip_suffix('>') else {
        return (name, Vec::new());
    };

    let params = params
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    (name[..open].trim_end(), params)
}
