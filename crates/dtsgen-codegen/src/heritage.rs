use crate::types::{TypeExpr, TypeTable};

/// Base-class list of a declaration after filtering.
///
/// A dictionary-shaped base becomes the declaration's index signature
/// instead of a supertype; denylisted bases are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heritage {
    /// Source of the index signature, the first dictionary-shaped base.
    pub index_signature: Option<TypeExpr>,
    /// Remaining bases in declaration order.
    pub bases: Vec<TypeExpr>,
}

impl Heritage {
    /// Split a raw base-class list.
    pub fn split(raw_bases: &[String], omit: &[String], table: &TypeTable) -> Self {
        let mut index_signature = None;
        let mut bases = Vec::new();

        for raw in raw_bases {
            let raw = raw.trim();
            if raw.is_empty() || omit.iter().any(|o| o.trim() == raw) {
                continue;
            }

            let expr = TypeExpr::parse(raw, table);
            if expr.is_dictionary() {
                if index_signature.is_none() {
                    index_signature = Some(expr);
                }
            } else {
                bases.push(expr);
            }
        }

        Self {
            index_signature,
            bases,
        }
    }

    /// ` extends A, B`, or nothing when no bases remain.
    pub fn extends_clause(&self, table: &TypeTable) -> String {
        if self.bases.is_empty() {
            return String::new();
        }
        let bases: Vec<String> = self.bases.iter().map(|b| b.render(table)).collect();
        format!(" extends {}", bases.join(", "))
    }

    /// The index signature member, if any.
    pub fn index_line(&self, table: &TypeTable) -> Option<String> {
        self.index_signature
            .as_ref()
            .and_then(|expr| expr.render_index_signature(table))
    }

    /// Type names referenced by the remaining bases and the index signature.
    pub fn referenced_names<'a>(&'a self, table: &TypeTable) -> Vec<&'a str> {
        self.index_signature
            .iter()
            .chain(self.bases.iter())
            .flat_map(|expr| expr.referenced_names(table))
            .collect()
    }
}
