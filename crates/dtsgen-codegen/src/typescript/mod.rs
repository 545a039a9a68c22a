//! TypeScript emission.
//!
//! [`TypeScriptGenerator`] drives a run: it indexes the whole IR, resolves
//! each file's imports, runs the model, enum and controller emitters per
//! file and hands every assembled file to a [`FileWriter`].

mod controllers;
mod enums;
mod models;

pub use controllers::ControllerEmitter;
pub use enums::EnumEmitter;
pub use models::ModelEmitter;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use dtsgen_core::{split_generic_name, DtsgenConfig, Member, SourceFile};
use tracing::{debug, error, info};

use crate::naming::{normalize_identifier, NamingOptions};
use crate::paths::OutputLayout;
use crate::resolver::{FileImports, ImportResolver, SymbolTable};
use crate::types::{TypeExpr, TypeTable};
use crate::writer::FileWriter;
use crate::Error;

/// Settings shared by the declaration emitters of one run.
pub struct EmitContext<'a> {
    pub config: &'a DtsgenConfig,
    pub types: &'a TypeTable,
    pub layout: &'a OutputLayout,
    pub members: NamingOptions,
    pub enum_values: NamingOptions,
}

impl<'a> EmitContext<'a> {
    pub fn new(config: &'a DtsgenConfig, types: &'a TypeTable, layout: &'a OutputLayout) -> Self {
        Self {
            config,
            types,
            layout,
            members: NamingOptions::members(config),
            enum_values: NamingOptions::enum_values(config),
        }
    }

    /// Statement terminator for member declarations.
    pub fn terminator(&self) -> &'static str {
        if self.config.omit_semicolon {
            ""
        } else {
            ";"
        }
    }

    /// `// Models/User.cs` header naming the originating file.
    pub fn path_comment(&self, source_path: &str) -> Option<String> {
        if self.config.omit_file_path_comment {
            return None;
        }
        Some(format!("// {}", self.layout.relative_source(source_path)))
    }

    /// Declaration name with its type parameter list, `Page<T>`.
    pub fn declaration_name(&self, raw: &str) -> String {
        let (name, params) = split_generic_name(raw);
        if params.is_empty() {
            name.to_string()
        } else {
            format!("{}<{}>", name, params.join(", "))
        }
    }

    /// `name?: Type;` for a field or property.
    pub fn member_line(&self, member: &Member) -> String {
        let expr = TypeExpr::parse(&member.type_signature, self.types);
        let optional = if expr.is_nullable() { "?" } else { "" };
        format!(
            "{}{}: {}{}",
            normalize_identifier(&member.identifier, &self.members),
            optional,
            expr.render(self.types),
            self.terminator()
        )
    }
}

/// One generated file.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Source path from the IR.
    pub source: String,
    /// Output path.
    pub path: PathBuf,
    /// Full file text.
    pub contents: String,
    /// Declarations without imports or file namespace.
    pub body: String,
    /// Resolved imports.
    pub imports: FileImports,
}

/// Everything a run produces, before anything is written.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub files: Vec<GeneratedFile>,
    /// All bodies concatenated, wrapped in the configured namespace.
    pub aggregate: String,
}

/// Outcome of writing a [`Generation`].
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub aggregate: String,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// TypeScript code generator.
///
/// Generates interfaces, enums and API client classes from the IR.
pub struct TypeScriptGenerator {
    config: DtsgenConfig,
    types: TypeTable,
    layout: OutputLayout,
}

impl TypeScriptGenerator {
    /// Create a generator. Fails when the configuration cannot drive a run.
    pub fn new(config: &DtsgenConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config: config.clone(),
            types: TypeTable::from_config(config),
            layout: OutputLayout::new(config),
        })
    }

    /// Output path mapping used by this generator.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Render every file in memory.
    pub fn render(&self, files: &[SourceFile]) -> Generation {
        // Every declaration must be indexed before any file is resolved.
        let symbols = SymbolTable::build(files);
        debug!(symbols = symbols.len(), files = files.len(), "Symbol table built");

        let resolver = ImportResolver::new(&symbols, &self.types, &self.config.omit_base_classes);
        let imports: Vec<FileImports> = files.iter().map(|f| resolver.resolve(f)).collect();

        let ctx = EmitContext::new(&self.config, &self.types, &self.layout);
        let mut namespaces: HashMap<&str, &str> = HashMap::new();
        for file in files {
            if let Some(ns) = self.file_namespace(file) {
                namespaces.entry(file.path.as_str()).or_insert(ns);
            }
        }

        let mut generated = Vec::with_capacity(files.len());
        let mut aggregate_parts = Vec::with_capacity(files.len());

        for (file, imports) in files.iter().zip(imports) {
            let body = emit_body(&ctx, file);
            let path = self.layout.output_path(&file.path);
            let block = self.import_block(file, &imports, &namespaces);

            let mut contents = String::new();
            for line in &block.lines {
                contents.push_str(line);
                contents.push('\n');
            }
            contents.push('\n');

            let module_body = if block.aliases.is_empty() {
                body.clone()
            } else {
                format!("{}\n\n{}", block.aliases.join("\n"), body)
            };
            match self.file_namespace(file) {
                Some(ns) => contents.push_str(&wrap_namespace(ns, &module_body)),
                None => contents.push_str(&module_body),
            }

            aggregate_parts.push(match file.namespace.as_deref() {
                Some(ns) => wrap_namespace(ns, &body),
                None => body.clone(),
            });

            debug!(source = %file.path, output = %path.display(), "Rendered file");
            generated.push(GeneratedFile {
                source: file.path.clone(),
                path,
                contents,
                body,
                imports,
            });
        }

        let joined = aggregate_parts.join("\n");
        let aggregate = match self.config.namespace.as_deref() {
            Some(ns) => wrap_namespace(ns, &joined),
            None => joined,
        };

        Generation {
            files: generated,
            aggregate,
        }
    }

    /// Render and write every file. A failed write is logged and the
    /// remaining files are still written.
    pub fn generate(&self, files: &[SourceFile], writer: &mut dyn FileWriter) -> GenerationReport {
        let generation = self.render(files);
        let mut report = GenerationReport {
            aggregate: generation.aggregate,
            ..Default::default()
        };

        for file in generation.files {
            match writer.write(&file.path, &file.contents) {
                Ok(()) => report.written.push(file.path),
                Err(e) => {
                    error!(path = %file.path.display(), error = %e, "Failed to write file");
                    report.failed.push(file.path);
                }
            }
        }

        info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "Generation finished"
        );
        report
    }

    /// The namespace a file's declarations are wrapped in, its own first.
    fn file_namespace<'f>(&'f self, file: &'f SourceFile) -> Option<&'f str> {
        file.namespace.as_deref().or(self.config.namespace.as_deref())
    }

    /// Environment import, resolved imports sorted by specifier, then the
    /// unresolved names.
    ///
    /// A namespaced module only exports its namespace, so names declared
    /// there are reached through an aliased namespace import plus one
    /// `import Name = Alias.Name;` declaration each.
    fn import_block(
        &self,
        file: &SourceFile,
        imports: &FileImports,
        namespaces: &HashMap<&str, &str>,
    ) -> ImportBlock {
        let client = &self.config.client;
        let mut block = ImportBlock {
            lines: vec![format!(
                "import {{ {} }} from '{}';",
                client.environment_symbol,
                self.layout
                    .root_module_specifier(&file.path, &client.environment_module)
            )],
            aliases: Vec::new(),
        };

        let mut resolved: Vec<(String, &str, Vec<&str>)> = imports
            .edges
            .iter()
            .map(|(path, names)| {
                (
                    self.layout.import_specifier(&file.path, path),
                    path.as_str(),
                    names.iter().map(String::as_str).collect(),
                )
            })
            .collect();
        resolved.sort();

        let mut used = HashSet::new();
        for (specifier, path, names) in resolved {
            match namespaces.get(path) {
                Some(ns) => {
                    let (root, rest) = match ns.split_once('.') {
                        Some((root, rest)) => (root, Some(rest)),
                        None => (*ns, None),
                    };
                    let alias = namespace_alias(root, &specifier, &mut used);
                    block.lines.push(format!(
                        "import {{ {} as {} }} from '{}';",
                        root, alias, specifier
                    ));
                    let qualifier = match rest {
                        Some(rest) => format!("{}.{}", alias, rest),
                        None => alias,
                    };
                    block.aliases.extend(
                        names
                            .iter()
                            .map(|name| format!("import {} = {}.{};", name, qualifier, name)),
                    );
                }
                None => block.lines.push(format!(
                    "import {{ {} }} from '{}';",
                    names.join(", "),
                    specifier
                )),
            }
        }

        if !imports.unresolved.is_empty() && !self.config.omit_unresolved_imports {
            let names: Vec<&str> = imports.unresolved.iter().map(String::as_str).collect();
            block
                .lines
                .push(format!("import {{ {} }} from '';", names.join(", ")));
        }

        block
    }
}

/// Module-level import lines and the alias declarations that go inside the
/// file's namespace.
struct ImportBlock {
    lines: Vec<String>,
    aliases: Vec<String>,
}

/// Local name for a namespace imported from `specifier`: `Api_User`, with a
/// numeric suffix when two modules share a file name.
fn namespace_alias(namespace: &str, specifier: &str, used: &mut HashSet<String>) -> String {
    let stem: String = specifier
        .rsplit('/')
        .next()
        .unwrap_or(specifier)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    let base = format!("{}_{}", namespace, stem);

    let mut alias = base.clone();
    let mut n = 2;
    while !used.insert(alias.clone()) {
        alias = format!("{}_{}", base, n);
        n += 1;
    }
    alias
}

/// Models, then enums, then controllers.
fn emit_body(ctx: &EmitContext<'_>, file: &SourceFile) -> String {
    let models = ModelEmitter::new(ctx);
    let enums = EnumEmitter::new(ctx);
    let controllers = ControllerEmitter::new(ctx);

    let mut lines = Vec::new();
    for model in &file.models {
        lines.extend(models.emit(model, &file.path));
    }
    for enum_def in &file.enums {
        lines.extend(enums.emit(enum_def, &file.path));
    }
    for controller in &file.controllers {
        lines.extend(controllers.emit(controller, &file.path));
    }

    lines.join("\n")
}

/// Wrap a body in `export namespace <name> { ... }`, indenting it.
pub fn wrap_namespace(name: &str, body: &str) -> String {
    let mut out = format!("export namespace {} {{\n", name);
    for line in body.trim_end_matches('\n').lines() {
        if !line.is_empty() {
            out.push_str("    ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push_str("}\n");
    out
}
