use serde::{Deserialize, Serialize};

/// Extra generic wrapper names recognized by the type translator.
///
/// These are added on top of the built-in sets, never replace them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperConfig {
    /// Single-argument wrappers rendered as arrays.
    #[serde(default)]
    pub collections: Vec<String>,

    /// Two-argument wrappers rendered as `Record<K, V>`.
    #[serde(default)]
    pub dictionaries: Vec<String>,

    /// Single-argument wrappers rendered as their argument (`Task<T>` -> `T`).
    #[serde(default)]
    pub transparent: Vec<String>,
}
