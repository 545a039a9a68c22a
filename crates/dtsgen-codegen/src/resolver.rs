//! Cross-file symbol resolution.
//!
//! Resolution runs in two strictly ordered phases. [`SymbolTable::build`]
//! indexes every declaration of the whole IR first; only then can
//! [`ImportResolver::resolve`] run for any file, so forward references
//! across files resolve the same way backward ones do.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use dtsgen_core::{Member, SourceFile};
use tracing::{debug, warn};

use crate::heritage::Heritage;
use crate::types::{TypeExpr, TypeTable};

/// Declared name to declaring file path.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, String>,
}

impl SymbolTable {
    /// Index every model, enum and controller of the IR in file order.
    ///
    /// The first declaration of a name wins.
    pub fn build(files: &[SourceFile]) -> Self {
        let mut symbols = HashMap::new();

        for file in files {
            for name in file.declared_names() {
                if let Some(existing) = symbols.get(name) {
                    debug!(
                        name,
                        kept = %existing,
                        ignored = %file.path,
                        "Duplicate declaration"
                    );
                    continue;
                }
                symbols.insert(name.to_string(), file.path.clone());
            }
        }

        Self { symbols }
    }

    /// Path of the file declaring `name`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Imports one generated file needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileImports {
    /// Declaring file path to the names imported from it.
    pub edges: BTreeMap<String, BTreeSet<String>>,
    /// Referenced names no file declares.
    pub unresolved: BTreeSet<String>,
}

impl FileImports {
    /// Whether the file needs no cross-file imports.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.unresolved.is_empty()
    }

    /// Whether the file imports `name` from `path`.
    pub fn imports_from(&self, path: &str, name: &str) -> bool {
        self.edges.get(path).is_some_and(|names| names.contains(name))
    }
}

/// Computes per-file imports against a complete symbol table.
pub struct ImportResolver<'a> {
    symbols: &'a SymbolTable,
    types: &'a TypeTable,
    omit_base_classes: &'a [String],
}

impl<'a> ImportResolver<'a> {
    /// Create a resolver over a fully built symbol table.
    pub fn new(
        symbols: &'a SymbolTable,
        types: &'a TypeTable,
        omit_base_classes: &'a [String],
    ) -> Self {
        Self {
            symbols,
            types,
            omit_base_classes,
        }
    }

    /// Resolve every type reference of `file`.
    pub fn resolve(&self, file: &SourceFile) -> FileImports {
        let local: HashSet<&str> = file.declared_names().collect();
        let mut imports = FileImports::default();

        for model in &file.models {
            let scope = model.type_parameters();
            let heritage = Heritage::split(&model.base_classes, self.omit_base_classes, self.types);
            for name in heritage.referenced_names(self.types) {
                self.record(file, name, &scope, &local, &mut imports);
            }
            self.record_members(file, model.members(), &scope, &local, &mut imports);
        }

        for controller in &file.controllers {
            let scope = controller.type_parameters();
            let heritage =
                Heritage::split(&controller.base_classes, self.omit_base_classes, self.types);
            for name in heritage.referenced_names(self.types) {
                self.record(file, name, &scope, &local, &mut imports);
            }

            for method in &controller.methods {
                let returns = TypeExpr::parse(&method.return_type, self.types);
                for name in returns.referenced_names(self.types) {
                    self.record(file, name, &scope, &local, &mut imports);
                }
                self.record_members(file, method.parameters.iter(), &scope, &local, &mut imports);
            }
        }

        for name in &imports.unresolved {
            warn!(file = %file.path, name = %name, "Unresolved type reference");
        }

        imports
    }

    fn record_members<'m>(
        &self,
        file: &SourceFile,
        members: impl Iterator<Item = &'m Member>,
        scope: &[&str],
        local: &HashSet<&str>,
        imports: &mut FileImports,
    ) {
        for member in members {
            let expr = TypeExpr::parse(&member.type_signature, self.types);
            for name in expr.referenced_names(self.types) {
                self.record(file, name, scope, local, imports);
            }
        }
    }

    fn record(
        &self,
        file: &SourceFile,
        name: &str,
        scope: &[&str],
        local: &HashSet<&str>,
        imports: &mut FileImports,
    ) {
        let short = name.rsplit('.').next().unwrap_or(name);
        if self.types.is_scalar(name)
            || self.types.is_scalar(short)
            || scope.contains(&name)
            || local.contains(name)
        {
            return;
        }

        let found = self
            .symbols
            .lookup(name)
            .map(|path| (path, name))
            .or_else(|| self.symbols.lookup(short).map(|path| (path, short)));

        match found {
            Some((path, _)) if path == file.path => {}
            Some((path, symbol)) => {
                imports
                    .edges
                    .entry(path.to_string())
                    .or_default()
                    .insert(symbol.to_string());
            }
            // Built-in names only apply when nothing in the IR declares them.
            None if self.types.is_builtin(name) || self.types.is_builtin(short) => {}
            None => {
                imports.unresolved.insert(name.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtsgen_core::{Controller, EnumDef, Method, Model};

    fn resolve(files: &[SourceFile], index: usize) -> FileImports {
        let symbols = SymbolTable::build(files);
        let types = TypeTable::new();
        ImportResolver::new(&symbols, &types, &[]).resolve(&files[index])
    }

    #[test]
    fn test_symbol_table_first_declaration_wins() {
        let files = vec![
            SourceFile::new("a.cs").with_model(Model::new("Foo")),
            SourceFile::new("b.cs")
                .with_model(Model::new("Foo"))
                .with_enum(EnumDef::new("Color")),
        ];

        let symbols = SymbolTable::build(&files);
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols.lookup("Foo"), Some("a.cs"));
        assert_eq!(symbols.lookup("Color"), Some("b.cs"));
        assert_eq!(symbols.lookup("Missing"), None);
    }

    #[test]
    fn test_field_reference_creates_edge() {
        let files = vec![
            SourceFile::new("a.cs").with_model(Model::new("Foo")),
            SourceFile::new("b.cs").with_model(Model::new("Bar").with_field("Foo", "Foo")),
        ];

        let imports = resolve(&files, 1);
        assert!(imports.imports_from("a.cs", "Foo"));
        assert!(!imports.edges.contains_key("b.cs"));
        assert!(imports.unresolved.is_empty());
    }

    #[test]
    fn test_forward_reference_resolves() {
        let files = vec![
            SourceFile::new("a.cs").with_model(Model::new("Order").with_property("Lines", "List<Line>")),
            SourceFile::new("b.cs").with_model(Model::new("Line")),
        ];

        let imports = resolve(&files, 0);
        assert!(imports.imports_from("b.cs", "Line"));
    }

    #[test]
    fn test_nested_wrappers_and_scalars() {
        let files = vec![
            SourceFile::new("models.cs")
                .with_model(Model::new("Customer"))
                .with_enum(EnumDef::new("Status")),
            SourceFile::new("view.cs").with_model(
                Model::new("View")
                    .with_property("Lookup", "Dictionary<Status, List<Customer[]>>?")
                    .with_property("Count", "int")
                    .with_property("When", "DateTime?"),
            ),
        ];

        let imports = resolve(&files, 1);
        let names: Vec<_> = imports.edges["models.cs"].iter().cloned().collect();
        assert_eq!(names, vec!["Customer", "Status"]);
        assert_eq!(imports.edges.len(), 1);
    }

    #[test]
    fn test_declared_names_shadow_typescript_builtins() {
        let files = vec![
            SourceFile::new("calendar.cs")
                .with_model(Model::new("Date"))
                .with_model(Model::new("Record")),
            SourceFile::new("event.cs").with_model(
                Model::new("Event")
                    .with_property("On", "Date")
                    .with_property("Audit", "List<Record>")
                    .with_property("Tags", "Array")
                    .with_property("Id", "Guid"),
            ),
        ];

        let imports = resolve(&files, 1);
        let names: Vec<_> = imports.edges["calendar.cs"].iter().cloned().collect();
        assert_eq!(names, vec!["Date", "Record"]);
        assert!(imports.unresolved.is_empty());
    }

    #[test]
    fn test_same_file_and_type_parameters_are_skipped() {
        let files = vec![SourceFile::new("page.cs")
            .with_model(Model::new("Page<T>").with_property("Items", "List<T>").with_property("Meta", "PageMeta"))
            .with_model(Model::new("PageMeta"))];

        let imports = resolve(&files, 0);
        assert!(imports.is_empty());
    }

    #[test]
    fn test_unresolved_names_are_collected() {
        let files = vec![SourceFile::new("a.cs").with_model(Model::new("A").with_field("B", "Missing"))];

        let imports = resolve(&files, 0);
        assert!(imports.edges.is_empty());
        assert!(imports.unresolved.contains("Missing"));
    }

    #[test]
    fn test_controller_references() {
        let files = vec![
            SourceFile::new("models.cs")
                .with_model(Model::new("Item"))
                .with_model(Model::new("ItemQuery"))
                .with_model(Model::new("ApiController")),
            SourceFile::new("controllers.cs").with_controller(
                Controller::new("ItemsController")
                    .with_base("ApiController")
                    .with_base("ControllerBase")
                    .with_method(
                        Method::new("Search", "Task<ActionResult<List<Item>>>")
                            .with_param("query", "ItemQuery")
                            .with_param("page", "int"),
                    ),
            ),
        ];

        let symbols = SymbolTable::build(&files);
        let types = TypeTable::new();
        let omit = vec!["ControllerBase".to_string()];
        let imports = ImportResolver::new(&symbols, &types, &omit).resolve(&files[1]);

        let names: Vec<_> = imports.edges["models.cs"].iter().cloned().collect();
        assert_eq!(names, vec!["ApiController", "Item", "ItemQuery"]);
        assert!(imports.unresolved.is_empty());
    }

    #[test]
    fn test_qualified_names_resolve_by_last_segment() {
        let files = vec![
            SourceFile::new("a.cs").with_model(Model::new("Foo")),
            SourceFile::new("b.cs").with_model(
                Model::new("Bar")
                    .with_field("Foo", "Acme.Models.Foo")
                    .with_field("Id", "System.Guid"),
            ),
        ];

        let imports = resolve(&files, 1);
        assert!(imports.imports_from("a.cs", "Foo"));
        assert!(imports.unresolved.is_empty());
    }
}
