//! Type signature translation.
//!
//! Source signatures are parsed once into a [`TypeExpr`]; the same tree
//! renders the TypeScript type and yields the names the resolver imports.

mod parser;
mod table;

pub use table::TypeTable;

/// Parsed type signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Bare name: `int`, `Customer`.
    Atomic(String),
    /// Trailing `?`. Only affects member optionality.
    Nullable(Box<TypeExpr>),
    /// `T[]`.
    Array(Box<TypeExpr>),
    /// Single-argument collection wrapper: `List<T>`.
    Collection {
        wrapper: String,
        element: Box<TypeExpr>,
    },
    /// Two-argument dictionary wrapper with a bare key: `Dictionary<K, V>`.
    Dictionary {
        wrapper: String,
        key: String,
        value: Box<TypeExpr>,
    },
    /// Any other generic: `Page<T>`, `Task<T>`.
    Generic { name: String, args: Vec<TypeExpr> },
    /// Text outside the grammar, passed through as written.
    Opaque(String),
}

impl TypeExpr {
    /// Parse a raw signature.
    pub fn parse(signature: &str, table: &TypeTable) -> Self {
        parser::parse_signature(signature, table)
    }

    /// Whether the outermost layer is nullable.
    pub fn is_nullable(&self) -> bool {
        match self {
            TypeExpr::Nullable(_) => true,
            TypeExpr::Opaque(text) => text.ends_with('?'),
            _ => false,
        }
    }

    /// The expression with outer nullability markers removed.
    pub fn non_null(&self) -> &TypeExpr {
        match self {
            TypeExpr::Nullable(inner) => inner.non_null(),
            other => other,
        }
    }

    /// Render as a TypeScript type expression.
    pub fn render(&self, table: &TypeTable) -> String {
        match self {
            TypeExpr::Atomic(name) => table.translate(name).to_string(),
            TypeExpr::Nullable(inner) => inner.render(table),
            TypeExpr::Array(element) | TypeExpr::Collection { element, .. } => {
                format!("{}[]", element.render(table))
            }
            TypeExpr::Dictionary { key, value, .. } => {
                format!("Record<{}, {}>", table.translate(key), value.render(table))
            }
            TypeExpr::Generic { name, args } => {
                if table.is_transparent(name) && args.len() == 1 {
                    return args[0].render(table);
                }
                let args: Vec<String> = args.iter().map(|a| a.render(table)).collect();
                format!("{}<{}>", table.translate(name), args.join(", "))
            }
            TypeExpr::Opaque(text) => text.strip_suffix('?').unwrap_or(text).to_string(),
        }
    }

    /// Render a dictionary as an index signature member (`[key: K]: V`).
    pub fn render_index_signature(&self, table: &TypeTable) -> Option<String> {
        match self.non_null() {
            TypeExpr::Dictionary { key, value, .. } => Some(format!(
                "[key: {}]: {}",
                table.translate(key),
                value.render(table)
            )),
            _ => None,
        }
    }

    /// Whether the expression is dictionary-shaped.
    pub fn is_dictionary(&self) -> bool {
        matches!(self.non_null(), TypeExpr::Dictionary { .. })
    }

    /// Atomic names this expression refers to, in order of appearance.
    ///
    /// Wrapper keywords are not references; opaque text yields nothing.
    pub fn referenced_names<'a>(&'a self, table: &TypeTable) -> Vec<&'a str> {
        let mut names = Vec::new();
        self.collect_names(table, &mut names);
        names
    }

    fn collect_names<'a>(&'a self, table: &TypeTable, out: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Atomic(name) => out.push(name),
            TypeExpr::Nullable(inner)
            | TypeExpr::Array(inner)
            | TypeExpr::Collection { element: inner, .. } => inner.collect_names(table, out),
            TypeExpr::Dictionary { key, value, .. } => {
                out.push(key);
                value.collect_names(table, out);
            }
            TypeExpr::Generic { name, args } => {
                if !table.is_transparent(name) {
                    out.push(name);
                }
                for arg in args {
                    arg.collect_names(table, out);
                }
            }
            TypeExpr::Opaque(_) => {}
        }
    }
}

/// Translate a raw signature straight to a TypeScript type expression.
pub fn translate(signature: &str, table: &TypeTable) -> String {
    TypeExpr::parse(signature, table).render(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(signature: &str) -> String {
        translate(signature, &TypeTable::new())
    }

    #[test]
    fn test_translate_scalars() {
        assert_eq!(ts("int"), "number");
        assert_eq!(ts("bool?"), "boolean");
        assert_eq!(ts("DateTimeOffset"), "string");
        assert_eq!(ts("dynamic"), "any");
        assert_eq!(ts("Customer"), "Customer");
    }

    #[test]
    fn test_translate_collections_and_arrays() {
        assert_eq!(ts("List<int>"), "number[]");
        assert_eq!(ts("int[]"), "number[]");
        assert_eq!(ts("List<int>[]"), "number[][]");
        assert_eq!(ts("HashSet<Guid>?"), "string[]");
        assert_eq!(ts("IReadOnlyList<List<Order>>"), "Order[][]");
        assert_eq!(ts("List<int?>"), "number[]");
        assert_eq!(ts("int[]?"), "number[]");
    }

    #[test]
    fn test_translate_dictionaries() {
        assert_eq!(ts("Dictionary<string,int>"), "Record<string, number>");
        assert_eq!(
            ts("IEnumerable<Dictionary<string,Guid>>"),
            "Record<string, string>[]"
        );
        assert_eq!(
            ts("IDictionary<int, Dictionary<string, List<Order>>>"),
            "Record<number, Record<string, Order[]>>"
        );
    }

    #[test]
    fn test_translate_generics() {
        assert_eq!(ts("Page<Customer>"), "Page<Customer>");
        assert_eq!(ts("Page<int>"), "Page<number>");
        assert_eq!(ts("Task<List<Order>>"), "Order[]");
        assert_eq!(ts("ActionResult<Customer>"), "Customer");
        assert_eq!(ts("Task"), "void");
        assert_eq!(ts("Nullable<int>"), "number");
        assert_eq!(ts("Acme.Page<int>"), "Page<number>");
    }

    #[test]
    fn test_translate_opaque_passes_through() {
        assert_eq!(ts("int[,]"), "int[,]");
        assert_eq!(ts("(int, string)?"), "(int, string)");
        assert_eq!(ts("List<int"), "List<int");
    }

    #[test]
    fn test_nullability() {
        let table = TypeTable::new();
        assert!(TypeExpr::parse("int?", &table).is_nullable());
        assert!(TypeExpr::parse("List<int>?", &table).is_nullable());
        assert!(TypeExpr::parse("int[,]?", &table).is_nullable());
        assert!(!TypeExpr::parse("int?[]", &table).is_nullable());
        assert!(!TypeExpr::parse("int", &table).is_nullable());
    }

    #[test]
    fn test_index_signature() {
        let table = TypeTable::new();
        let expr = TypeExpr::parse("Dictionary<string, List<int>>", &table);
        assert!(expr.is_dictionary());
        assert_eq!(
            expr.render_index_signature(&table).as_deref(),
            Some("[key: string]: number[]")
        );
        assert!(TypeExpr::parse("List<int>", &table)
            .render_index_signature(&table)
            .is_none());
    }

    #[test]
    fn test_referenced_names() {
        let table = TypeTable::new();
        let expr = TypeExpr::parse("Task<Dictionary<CustomerId, Page<List<Order>>>>", &table);
        assert_eq!(
            expr.referenced_names(&table),
            vec!["CustomerId", "Page", "Order"]
        );
        assert!(TypeExpr::parse("int[,]", &table)
            .referenced_names(&table)
            .is_empty());
    }

    /// Nesting layers from the outside in: `a` for arrays, `m` for maps.
    fn shape(expr: &TypeExpr) -> String {
        match expr.non_null() {
            TypeExpr::Array(inner) | TypeExpr::Collection { element: inner, .. } => {
                format!("a{}", shape(inner))
            }
            TypeExpr::Dictionary { value, .. } => format!("m{}", shape(value)),
            TypeExpr::Generic { name, args } if name == "Record" && args.len() == 2 => {
                format!("m{}", shape(&args[1]))
            }
            _ => String::new(),
        }
    }

    #[test]
    fn test_rendered_output_keeps_nesting_shape() {
        let table = TypeTable::new();
        let leaves = ["int", "Customer", "Guid?"];
        let wrappers: [fn(&str) -> String; 4] = [
            |t| format!("{}[]", t),
            |t| format!("List<{}>", t),
            |t| format!("Dictionary<string, {}>", t),
            |t| format!("IEnumerable<{}>?", t),
        ];

        for leaf in leaves {
            for outer in &wrappers {
                for middle in &wrappers {
                    for inner in &wrappers {
                        let signature = outer(&middle(&inner(leaf)));
                        let original = TypeExpr::parse(&signature, &table);
                        let rendered = original.render(&table);
                        let reparsed = TypeExpr::parse(&rendered, &table);

                        assert_eq!(shape(&original).len(), 3, "{}", signature);
                        assert_eq!(
                            shape(&original),
                            shape(&reparsed),
                            "{} -> {}",
                            signature,
                            rendered
                        );
                    }
                }
            }
        }
    }
}
