mod client;
mod wrappers;

pub use client::ClientConfig;
pub use wrappers::WrapperConfig;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{DtsgenError, Result};

/// Root configuration for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtsgenConfig {
    /// Directory the generated modules are written under.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Source root prefix stripped from every IR file path. Required.
    #[serde(default)]
    pub root: String,

    /// Namespace wrapping every generated module.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Extension of generated files, replacing the source extension.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Skip the `// path` comment above each declaration.
    #[serde(default)]
    pub omit_file_path_comment: bool,

    /// Base classes never emitted in `extends` clauses.
    #[serde(default)]
    pub omit_base_classes: Vec<String>,

    /// Drop the trailing semicolon after members.
    #[serde(default)]
    pub omit_semicolon: bool,

    /// Apply the casing transform to member names.
    #[serde(default)]
    pub camel_case: bool,

    /// Options for the casing transform.
    #[serde(default)]
    pub camel_case_options: CamelCaseOptions,

    /// Apply the casing transform to enum string values.
    #[serde(default)]
    pub camel_case_enums: bool,

    /// Emit enums with numeric values instead of string values.
    #[serde(default)]
    pub numeric_enums: bool,

    /// Emit enums as unions of string literals.
    #[serde(default)]
    pub string_literal_types_instead_of_enums: bool,

    /// Scalar translations overlaid on the built-in table.
    #[serde(default)]
    pub custom_type_translations: BTreeMap<String, String>,

    /// Drop imports of names no file declares instead of emitting them
    /// with an empty path.
    #[serde(default)]
    pub omit_unresolved_imports: bool,

    /// Additional generic wrappers.
    #[serde(default)]
    pub wrappers: WrapperConfig,

    /// API client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Casing transform options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamelCaseOptions {
    /// Uppercase the first letter (`FooBar` instead of `fooBar`).
    #[serde(default)]
    pub pascal_case: bool,

    /// Keep runs of uppercase letters as they are (`XMLHttp` stays `XMLHttp`).
    #[serde(default)]
    pub preserve_consecutive_uppercase: bool,
}

impl DtsgenConfig {
    /// Create a configuration with defaults for everything but the paths.
    pub fn new(root: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            root: root.into(),
            namespace: None,
            extension: default_extension(),
            omit_file_path_comment: false,
            omit_base_classes: Vec::new(),
            omit_semicolon: false,
            camel_case: false,
            camel_case_options: CamelCaseOptions::default(),
            camel_case_enums: false,
            numeric_enums: false,
            string_literal_types_instead_of_enums: false,
            custom_type_translations: BTreeMap::new(),
            omit_unresolved_imports: false,
            wrappers: WrapperConfig::default(),
            client: ClientConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DtsgenError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::parse_toml(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| DtsgenError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Check the settings a run cannot proceed without.
    pub fn validate(&self) -> Result<()> {
        if self.root.trim().is_empty() {
            return Err(DtsgenError::Config(
                "`root` must be set to the source root path".to_string(),
            ));
        }

        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            return Err(DtsgenError::Config(format!(
                "`extension` must start with a dot, got `{}`",
                self.extension
            )));
        }

        if let Some(ns) = &self.namespace {
            if ns.trim().is_empty() {
                return Err(DtsgenError::Config(
                    "`namespace` must not be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// The root prefix with path separators normalized to `/`.
    pub fn normalized_root(&self) -> String {
        self.root.replace('\\', "/")
    }
}

impl Default for DtsgenConfig {
    fn default() -> Self {
        Self::new(String::new(), default_output())
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("generated")
}

fn default_extension() -> String {
    ".ts".to_string()
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
        return content.to_string();
    };

    let mut result = content.to_string();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}
