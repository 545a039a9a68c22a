use dtsgen_core::EnumDef;

use super::EmitContext;
use crate::naming::normalize_identifier;

/// Emits an enum either as a TypeScript `enum` or as a union of string
/// literals.
pub struct EnumEmitter<'a> {
    ctx: &'a EmitContext<'a>,
}

impl<'a> EnumEmitter<'a> {
    pub fn new(ctx: &'a EmitContext<'a>) -> Self {
        Self { ctx }
    }

    /// Lines of the declaration, ending with a blank line.
    pub fn emit(&self, enum_def: &EnumDef, source_path: &str) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend(self.ctx.path_comment(source_path));

        if self.ctx.config.string_literal_types_instead_of_enums {
            self.emit_union(enum_def, &mut lines);
        } else {
            self.emit_enum(enum_def, &mut lines);
        }

        lines.push(String::new());
        lines
    }

    fn emit_union(&self, enum_def: &EnumDef, lines: &mut Vec<String>) {
        let name = enum_def.identifier.trim();
        let terminator = self.ctx.terminator();

        if enum_def.values.is_empty() {
            lines.push(format!("export type {} = never{}", name, terminator));
            return;
        }

        lines.push(format!("export type {} =", name));
        let last = enum_def.values.len() - 1;
        for (i, value) in enum_def.values.iter().enumerate() {
            let delimiter = if i == last { terminator } else { " |" };
            lines.push(format!("    '{}'{}", self.literal(&value.name), delimiter));
        }
    }

    fn emit_enum(&self, enum_def: &EnumDef, lines: &mut Vec<String>) {
        lines.push(format!("export enum {} {{", enum_def.identifier.trim()));

        for (i, value) in enum_def.values.iter().enumerate() {
            let key = value.name.trim();
            let rhs = if self.ctx.config.numeric_enums {
                match &value.value {
                    Some(explicit) => explicit.trim().to_string(),
                    None => i.to_string(),
                }
            } else {
                format!("'{}'", self.literal(&value.name))
            };
            lines.push(format!("    {} = {},", key, rhs));
        }

        lines.push("}".to_string());
    }

    /// Literal text of a value name, escaped for a single-quoted string.
    fn literal(&self, name: &str) -> String {
        normalize_identifier(name, &self.ctx.enum_values)
            .replace('\\', "\\\\")
            .replace('\'', "\\'")
    }
}
