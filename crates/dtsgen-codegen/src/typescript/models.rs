use dtsgen_core::Model;

use super::EmitContext;
use crate::heritage::Heritage;

/// Emits a model as an exported interface.
pub struct ModelEmitter<'a> {
    ctx: &'a EmitContext<'a>,
}

impl<'a> ModelEmitter<'a> {
    pub fn new(ctx: &'a EmitContext<'a>) -> Self {
        Self { ctx }
    }

    /// Lines of the declaration, ending with a blank line.
    pub fn emit(&self, model: &Model, source_path: &str) -> Vec<String> {
        let ctx = self.ctx;
        let heritage = Heritage::split(&model.base_classes, &ctx.config.omit_base_classes, ctx.types);

        let mut lines = Vec::new();
        lines.extend(ctx.path_comment(source_path));
        lines.push(format!(
            "export interface {}{} {{",
            ctx.declaration_name(&model.name),
            heritage.extends_clause(ctx.types)
        ));

        if let Some(index) = heritage.index_line(ctx.types) {
            lines.push(format!("    {}{}", index, ctx.terminator()));
        }
        for member in model.members() {
            lines.push(format!("    {}", ctx.member_line(member)));
        }

        lines.push("}".to_string());
        lines.push(String::new());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::OutputLayout;
    use crate::types::TypeTable;
    use dtsgen_core::DtsgenConfig;

    fn emit(config: &DtsgenConfig, model: &Model) -> String {
        let types = TypeTable::from_config(config);
        let layout = OutputLayout::new(config);
        let ctx = EmitContext::new(config, &types, &layout);
        ModelEmitter::new(&ctx)
            .emit(model, "/src/Models/User.cs")
            .join("\n")
    }

    #[test]
    fn test_emit_model() {
        let config = DtsgenConfig::new("/src/", "out");
        let model = Model::new("User")
            .with_base("Entity")
            .with_base("Dictionary<string, object>")
            .with_field("Id = Guid.NewGuid()", "Guid")
            .with_property("Email", "string?")
            .with_property("Roles", "List<Role>");

        assert_eq!(
            emit(&config, &model),
            "// Models/User.cs\n\
             export interface User extends Entity {\n\
             \x20   [key: string]: any;\n\
             \x20   Id: string;\n\
             \x20   Email?: string;\n\
             \x20   Roles: Role[];\n\
             }\n"
        );
    }

    #[test]
    fn test_emit_generic_model_with_options() {
        let mut config = DtsgenConfig::new("/src/", "out");
        config.omit_file_path_comment = true;
        config.omit_semicolon = true;
        config.camel_case = true;
        config.omit_base_classes = vec!["IEntity".to_string()];
        config
            .custom_type_translations
            .insert("DateTime".to_string(), "Date".to_string());

        let model = Model::new("Page<T>")
            .with_base("IEntity")
            .with_property("Items", "IEnumerable<T>")
            .with_property("CreatedAt", "DateTime");

        assert_eq!(
            emit(&config, &model),
            "export interface Page<T> {\n\
             \x20   items: T[]\n\
             \x20   createdAt: Date\n\
             }\n"
        );
    }
}
