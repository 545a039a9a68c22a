//! TypeScript generation from the backend declaration IR.

pub mod error;
pub mod heritage;
pub mod naming;
pub mod paths;
pub mod resolver;
pub mod route;
pub mod types;
pub mod typescript;
pub mod writer;

pub use error::Error;
pub use naming::{camel_case, normalize_identifier, NamingOptions};
pub use paths::{relative_import_path, OutputLayout};
pub use resolver::{FileImports, ImportResolver, SymbolTable};
pub use route::{template_route, HttpVerb, RouteTemplate};
pub use types::{translate, TypeExpr, TypeTable};
pub use typescript::{
    GeneratedFile, Generation, GenerationReport, TypeScriptGenerator,
};
pub use writer::{FileWriter, FsWriter, MemoryWriter};
