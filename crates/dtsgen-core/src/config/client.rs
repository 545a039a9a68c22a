use serde::{Deserialize, Serialize};

/// Settings for the generated API client stubs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Module holding the environment handle, relative to the output root
    /// and without extension.
    #[serde(default = "default_environment_module")]
    pub environment_module: String,

    /// Exported name of the environment handle.
    #[serde(default = "default_environment_symbol")]
    pub environment_symbol: String,

    /// Property of the environment handle holding the API base URL.
    #[serde(default = "default_api_base_property")]
    pub api_base_property: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment_module: default_environment_module(),
            environment_symbol: default_environment_symbol(),
            api_base_property: default_api_base_property(),
        }
    }
}

impl ClientConfig {
    /// Expression evaluating to the API base URL, e.g. `environment.apiUrl`.
    pub fn base_url_expr(&self) -> String {
        format!("{}.{}", self.environment_symbol, self.api_base_property)
    }
}

fn default_environment_module() -> String {
    "environment".to_string()
}

fn default_environment_symbol() -> String {
    "environment".to_string()
}

fn default_api_base_property() -> String {
    "apiUrl".to_string()
}
