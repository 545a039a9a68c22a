use serde::{Deserialize, Serialize};

use super::model::{split_generic_name, Member};
use super::null_as_empty;

/// An HTTP API controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    /// Controller class name.
    #[serde(rename = "ModelName", alias = "Name")]
    pub name: String,

    /// Base classes, in declaration order.
    #[serde(rename = "BaseClasses", default, deserialize_with = "null_as_empty")]
    pub base_classes: Vec<String>,

    /// Public action methods.
    #[serde(rename = "Methods", default, deserialize_with = "null_as_empty")]
    pub methods: Vec<Method>,
}

impl Controller {
    /// Create a controller with no methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_classes: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Add a base class.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_classes.push(base.into());
        self
    }

    /// Add a method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
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

/// A controller action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Method name.
    #[serde(rename = "Identifier")]
    pub identifier: String,

    /// Raw return type signature.
    #[serde(rename = "Type")]
    pub return_type: String,

    /// Route template as written in the routing attribute, quotes included.
    #[serde(rename = "Route", default)]
    pub route: Option<String>,

    /// Routing attribute tag (`HttpGet`, `HttpPost`, `Route`, ...).
    #[serde(rename = "HttpMethod", default)]
    pub http_verb: Option<String>,

    /// Parameters in declaration order.
    #[serde(rename = "Parameters", default, deserialize_with = "null_as_empty")]
    pub parameters: Vec<Member>,
}

impl Method {
    /// Create a method without route information.
    pub fn new(identifier: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            return_type: return_type.into(),
            route: None,
            http_verb: None,
            parameters: Vec::new(),
        }
    }

    /// Set the route template.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set the routing attribute tag.
    pub fn with_verb(mut self, verb: impl Into<String>) -> Self {
        self.http_verb = Some(verb.into());
        self
    }

    /// Add a parameter.
    pub fn with_param(mut self, identifier: &str, type_signature: &str) -> Self {
        self.parameters.push(Member::new(identifier, type_signature));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_builder() {
        let method = Method::new("GetItem", "Item")
            .with_route("\"items/{id}\"")
            .with_verb("HttpGet")
            .with_param("id", "int");

        assert_eq!(method.route.as_deref(), Some("\"items/{id}\""));
        assert_eq!(method.http_verb.as_deref(), Some("HttpGet"));
        assert_eq!(method.parameters.len(), 1);
    }

    #[test]
    fn test_deserialize_controller_with_null_lists() {
        let json = r#"{
            "ModelName": "ItemsController",
            "BaseClasses": null,
            "Methods": [
                {"Identifier": "List", "Type": "List<Item>", "Route": null, "HttpMethod": null, "Parameters": null}
            ]
        }"#;

        let controller: Controller = serde_json::from_str(json).unwrap();
        assert_eq!(controller.bare_name(), "ItemsController");
        assert!(controller.base_classes.is_empty());
        assert!(controller.methods[0].parameters.is_empty());
        assert!(controller.methods[0].route.is_none());
    }
}
