use std::collections::{HashMap, HashSet};

use dtsgen_core::DtsgenConfig;

/// Built-in scalar translations.
const DEFAULT_TRANSLATIONS: &[(&str, &str)] = &[
    ("int", "number"),
    ("double", "number"),
    ("float", "number"),
    ("Int32", "number"),
    ("Int64", "number"),
    ("short", "number"),
    ("long", "number"),
    ("decimal", "number"),
    ("byte", "number"),
    ("uint", "number"),
    ("ulong", "number"),
    ("ushort", "number"),
    ("sbyte", "number"),
    ("Int16", "number"),
    ("UInt16", "number"),
    ("UInt32", "number"),
    ("UInt64", "number"),
    ("Single", "number"),
    ("Double", "number"),
    ("Decimal", "number"),
    ("bool", "boolean"),
    ("Boolean", "boolean"),
    ("string", "string"),
    ("String", "string"),
    ("char", "string"),
    ("DateTime", "string"),
    ("DateTimeOffset", "string"),
    ("DateOnly", "string"),
    ("TimeOnly", "string"),
    ("TimeSpan", "string"),
    ("Guid", "string"),
    ("dynamic", "any"),
    ("object", "any"),
    ("void", "void"),
    ("Task", "void"),
    ("ValueTask", "void"),
    ("IActionResult", "any"),
    ("ActionResult", "any"),
];

const DEFAULT_COLLECTIONS: &[&str] = &[
    "List",
    "IList",
    "IReadOnlyList",
    "IEnumerable",
    "ICollection",
    "IReadOnlyCollection",
    "HashSet",
];

const DEFAULT_DICTIONARIES: &[&str] = &[
    "Dictionary",
    "IDictionary",
    "SortedDictionary",
    "IReadOnlyDictionary",
];

const DEFAULT_TRANSPARENT: &[&str] = &["Task", "ValueTask", "ActionResult", "Nullable"];

/// Names that already mean something in TypeScript and never need an import.
const TS_BUILTINS: &[&str] = &[
    "string",
    "number",
    "boolean",
    "any",
    "unknown",
    "never",
    "void",
    "null",
    "undefined",
    "object",
    "Date",
    "Record",
    "Array",
    "Promise",
];

/// Lookup tables driving type translation.
///
/// Scalar translations are the built-in defaults overlaid with the
/// caller's overrides; wrapper sets decide how generic signatures parse.
#[derive(Debug, Clone)]
pub struct TypeTable {
    translations: HashMap<String, String>,
    collections: HashSet<String>,
    dictionaries: HashSet<String>,
    transparent: HashSet<String>,
}

impl TypeTable {
    /// Create a table with the built-in defaults only.
    pub fn new() -> Self {
        Self {
            translations: DEFAULT_TRANSLATIONS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            collections: DEFAULT_COLLECTIONS.iter().map(|s| s.to_string()).collect(),
            dictionaries: DEFAULT_DICTIONARIES.iter().map(|s| s.to_string()).collect(),
            transparent: DEFAULT_TRANSPARENT.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build the table for a run from its configuration.
    pub fn from_config(config: &DtsgenConfig) -> Self {
        let mut table = Self::new();
        for (from, to) in &config.custom_type_translations {
            table.translations.insert(from.clone(), to.clone());
        }
        table
            .collections
            .extend(config.wrappers.collections.iter().cloned());
        table
            .dictionaries
            .extend(config.wrappers.dictionaries.iter().cloned());
        table
            .transparent
            .extend(config.wrappers.transparent.iter().cloned());
        table
    }

    /// Add or override a scalar translation.
    pub fn with_translation(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.translations.insert(from.into(), to.into());
        self
    }

    /// Translate an atomic name, passing unknown names through.
    ///
    /// Namespace-qualified names (`System.Guid`) fall back to their last
    /// segment, which is also the name they are imported under.
    pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
        if let Some(to) = self.translations.get(name) {
            return to;
        }
        let short = name.rsplit('.').next().unwrap_or(name);
        self.translations
            .get(short)
            .map(String::as_str)
            .unwrap_or(short)
    }

    /// Whether the name has an entry in the translation table.
    pub fn is_scalar(&self, name: &str) -> bool {
        self.translations.contains_key(name)
    }

    /// Whether the name needs no import: a scalar source name, a translation
    /// target or a TypeScript built-in.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.is_scalar(name)
            || TS_BUILTINS.contains(&name)
            || self.translations.values().any(|to| to == name)
    }

    pub fn is_collection(&self, name: &str) -> bool {
        self.collections.contains(name)
    }

    pub fn is_dictionary(&self, name: &str) -> bool {
        self.dictionaries.contains(name)
    }

    pub fn is_transparent(&self, name: &str) -> bool {
        self.transparent.contains(name)
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_translations() {
        let table = TypeTable::new();
        assert_eq!(table.translate("int"), "number");
        assert_eq!(table.translate("bool"), "boolean");
        assert_eq!(table.translate("Guid"), "string");
        assert_eq!(table.translate("object"), "any");
        assert_eq!(table.translate("Customer"), "Customer");
        assert_eq!(table.translate("System.Guid"), "string");
        assert_eq!(table.translate("Acme.Models.Customer"), "Customer");
    }

    #[test]
    fn test_custom_translations_override_defaults() {
        let mut config = DtsgenConfig::new("src/", "out");
        config
            .custom_type_translations
            .insert("DateTime".to_string(), "Date".to_string());
        config
            .custom_type_translations
            .insert("Money".to_string(), "number".to_string());
        config.wrappers.collections.push("ImmutableArray".to_string());

        let table = TypeTable::from_config(&config);
        assert_eq!(table.translate("DateTime"), "Date");
        assert_eq!(table.translate("Money"), "number");
        assert_eq!(table.translate("int"), "number");
        assert!(table.is_collection("ImmutableArray"));
        assert!(table.is_collection("List"));
    }

    #[test]
    fn test_builtin_detection() {
        let table = TypeTable::new().with_translation("Money", "Decimal128");
        assert!(table.is_builtin("int"));
        assert!(table.is_builtin("number"));
        assert!(table.is_builtin("Date"));
        assert!(table.is_builtin("Decimal128"));
        assert!(!table.is_builtin("Customer"));
    }
}
