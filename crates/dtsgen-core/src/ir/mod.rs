//! Intermediate representation handed over by the source front-end.
//!
//! The front-end walks the backend sources and emits one JSON record per
//! compilation unit. The IR is read once per run and never mutated.

mod controller;
mod enums;
mod model;

pub use controller::{Controller, Method};
pub use enums::{EnumDef, EnumValue};
pub use model::{split_generic_name, Member, Model};

use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// One input compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path of the source file as reported by the front-end.
    #[serde(rename = "FileName", alias = "Path")]
    pub path: String,

    /// Namespace wrapping this file's declarations, overriding the
    /// configured one.
    #[serde(rename = "Namespace", default)]
    pub namespace: Option<String>,

    /// Class and interface declarations.
    #[serde(rename = "Models", default, deserialize_with = "null_as_empty")]
    pub models: Vec<Model>,

    /// Enum declarations.
    #[serde(rename = "Enums", default, deserialize_with = "null_as_empty")]
    pub enums: Vec<EnumDef>,

    /// Controller declarations.
    #[serde(rename = "Controllers", default, deserialize_with = "null_as_empty")]
    pub controllers: Vec<Controller>,
}

impl SourceFile {
    /// Create an empty file record.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: None,
            models: Vec::new(),
            enums: Vec::new(),
            controllers: Vec::new(),
        }
    }

    /// Add a model.
    pub fn with_model(mut self, model: Model) -> Self {
        self.models.push(model);
        self
    }

    /// Add an enum.
    pub fn with_enum(mut self, enum_def: EnumDef) -> Self {
        self.enums.push(enum_def);
        self
    }

    /// Add a controller.
    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controllers.push(controller);
        self
    }

    /// Set the file namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Bare names of everything this file declares, in declaration order.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.models
            .iter()
            .map(Model::bare_name)
            .chain(self.enums.iter().map(|e| e.identifier.trim()))
            .chain(self.controllers.iter().map(Controller::bare_name))
    }

    /// Whether the file declares nothing.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.enums.is_empty() && self.controllers.is_empty()
    }
}

/// Parse an IR document from a JSON string.
pub fn parse_ir(json: &str) -> Result<Vec<SourceFile>> {
    Ok(serde_json::from_str(json)?)
}

/// Read an IR document from any reader (a file or stdin).
pub fn read_ir(reader: impl Read) -> Result<Vec<SourceFile>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load an IR document from a file.
pub fn load_ir(path: impl AsRef<Path>) -> Result<Vec<SourceFile>> {
    let file = std::fs::File::open(path.as_ref())?;
    let files = read_ir(std::io::BufReader::new(file))?;
    tracing::debug!(path = %path.as_ref().display(), files = files.len(), "Loaded IR document");
    Ok(files)
}

/// Accept `null` wherever a list is expected.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
