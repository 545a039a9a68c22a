//! Recursive-descent parser for source type signatures.
//!
//! ```text
//! Type    := Primary ( '[]' | '?' )*
//! Primary := Ident ( '<' Type ( ',' Type )* '>' )?
//! ```
//!
//! Wrapper names are classified after their arguments are parsed, so
//! `List<Dictionary<string, int>>` and `List<int>` go through the same path.

use super::{TypeExpr, TypeTable};

/// Parse a signature. Input that does not fit the grammar comes back as
/// [`TypeExpr::Opaque`] holding the trimmed source text.
pub(crate) fn parse_signature(signature: &str, table: &TypeTable) -> TypeExpr {
    let source = signature.trim();
    let mut parser = Parser {
        src: source,
        pos: 0,
        table,
    };

    match parser.parse_type() {
        Some(expr) if parser.at_end() => expr,
        _ => TypeExpr::Opaque(source.to_string()),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    table: &'a TypeTable,
}

impl<'a> Parser<'a> {
    fn parse_type(&mut self) -> Option<TypeExpr> {
        self.skip_ws();
        let start = self.pos;
        let name = self.ident()?;
        self.skip_ws();

        let mut expr = if self.eat('<') {
            let mut args = vec![self.parse_type()?];
            loop {
                self.skip_ws();
                if self.eat(',') {
                    args.push(self.parse_type()?);
                } else if self.eat('>') {
                    break;
                } else {
                    return None;
                }
            }
            let text = &self.src[start..self.pos];
            classify(name, args, text, self.table)
        } else {
            TypeExpr::Atomic(name.to_string())
        };

        loop {
            self.skip_ws();
            if self.src[self.pos..].starts_with("[]") {
                self.pos += 2;
                expr = TypeExpr::Array(Box::new(expr));
            } else if self.eat('?') {
                expr = TypeExpr::Nullable(Box::new(expr));
            } else {
                break;
            }
        }

        Some(expr)
    }

    fn ident(&mut self) -> Option<&'a str> {
        let src = self.src;
        let start = self.pos;
        let rest = &src[start..];

        let mut len = 0;
        for (i, c) in rest.char_indices() {
            let allowed = c.is_alphanumeric() || c == '_' || c == '.' || (i == 0 && c == '@');
            if !allowed {
                break;
            }
            len = i + c.len_utf8();
        }

        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&src[start..start + len])
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.src[self.pos..].starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }
}

/// Decide what a `Name<args>` signature means.
fn classify(name: &str, mut args: Vec<TypeExpr>, text: &str, table: &TypeTable) -> TypeExpr {
    if table.is_collection(name) && args.len() == 1 {
        return TypeExpr::Collection {
            wrapper: name.to_string(),
            element: Box::new(args.remove(0)),
        };
    }

    if table.is_dictionary(name) && args.len() == 2 {
        let value = args.remove(1);
        return match args.remove(0) {
            TypeExpr::Atomic(key) => TypeExpr::Dictionary {
                wrapper: name.to_string(),
                key,
                value: Box::new(value),
            },
            // Keys must be bare names.
            _ => TypeExpr::Opaque(text.to_string()),
        };
    }

    TypeExpr::Generic {
        name: name.to_string(),
        args,
    }
}
