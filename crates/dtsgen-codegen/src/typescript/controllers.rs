use dtsgen_core::{Controller, Method};

use super::EmitContext;
use crate::heritage::Heritage;
use crate::naming::normalize_identifier;
use crate::route::{parameter_name, template_route, HttpVerb, RouteParam};
use crate::types::TypeExpr;

/// Emits a controller as a client class with one async method per action.
pub struct ControllerEmitter<'a> {
    ctx: &'a EmitContext<'a>,
}

impl<'a> ControllerEmitter<'a> {
    pub fn new(ctx: &'a EmitContext<'a>) -> Self {
        Self { ctx }
    }

    /// Lines of the declaration, ending with a blank line.
    pub fn emit(&self, controller: &Controller, source_path: &str) -> Vec<String> {
        let ctx = self.ctx;
        let heritage = Heritage::split(
            &controller.base_classes,
            &ctx.config.omit_base_classes,
            ctx.types,
        );

        let mut lines = Vec::new();
        lines.extend(ctx.path_comment(source_path));
        lines.push(format!(
            "export class {}{} {{",
            ctx.declaration_name(&controller.name),
            heritage.extends_clause(ctx.types)
        ));

        if let Some(index) = heritage.index_line(ctx.types) {
            lines.push(format!("    {}{}", index, ctx.terminator()));
        }

        for (i, method) in controller.methods.iter().enumerate() {
            if i > 0 || heritage.index_signature.is_some() {
                lines.push(String::new());
            }
            self.emit_method(method, &mut lines);
        }

        lines.push("}".to_string());
        lines.push(String::new());
        lines
    }

    fn emit_method(&self, method: &Method, lines: &mut Vec<String>) {
        let ctx = self.ctx;
        let route = template_route(method);
        let returns = TypeExpr::parse(&method.return_type, ctx.types).render(ctx.types);

        lines.push(format!(
            "    public async {}({}): Promise<{}> {{",
            normalize_identifier(&method.identifier, &ctx.members),
            self.parameter_list(method),
            returns
        ));

        let query = route.query_params();
        if !query.is_empty() {
            lines.push("        const searchParams = new URLSearchParams();".to_string());
            for param in query {
                self.emit_query_param(method, param, lines);
            }
            lines.push("        const queryString = searchParams.toString();".to_string());
        }

        let url = route.url_expr(&ctx.config.client.base_url_expr());
        let verb = route.verb.as_str();
        match route.body.as_deref() {
            Some(body) if route.verb.sends_body() => {
                lines.push(format!("        const response = await fetch({}, {{", url));
                lines.push(format!("            method: '{}',", verb));
                lines.push("            headers: { 'Content-Type': 'application/json' },".to_string());
                lines.push(format!("            body: JSON.stringify({}),", body));
                lines.push("        });".to_string());
            }
            _ if route.verb == HttpVerb::Get => {
                lines.push(format!("        const response = await fetch({});", url));
            }
            _ => {
                lines.push(format!(
                    "        const response = await fetch({}, {{ method: '{}' }});",
                    url, verb
                ));
            }
        }

        lines.push("        if (!response.ok) {".to_string());
        lines.push(format!(
            "            throw new Error(`{} {} failed with status ${{response.status}}`);",
            verb,
            normalize_identifier(&method.identifier, &ctx.members)
        ));
        lines.push("        }".to_string());
        if returns != "void" {
            lines.push("        return response.json();".to_string());
        }
        lines.push("    }".to_string());
    }

    /// Append one parameter to `searchParams`, skipping `null` and
    /// `undefined`. Arrays repeat the key; objects contribute their own
    /// fields, matching how complex types bind from the query.
    fn emit_query_param(&self, method: &Method, param: &RouteParam, lines: &mut Vec<String>) {
        let ctx = self.ctx;
        let expr = method
            .parameters
            .get(param.index)
            .map(|p| TypeExpr::parse(&p.type_signature, ctx.types));
        let rendered = expr.as_ref().map(|e| e.non_null().render(ctx.types));
        let (key, ident) = (&param.key, &param.ident);

        match expr.as_ref().map(TypeExpr::non_null) {
            Some(TypeExpr::Array(_)) | Some(TypeExpr::Collection { .. }) => {
                lines.push(format!("        for (const value of {} ?? []) {{", ident));
                lines.push(format!(
                    "            searchParams.append('{}', String(value));",
                    key
                ));
                lines.push("        }".to_string());
            }
            _ if matches!(rendered.as_deref(), Some("string" | "number" | "boolean")) => {
                lines.push(format!(
                    "        if ({} !== undefined && {} !== null) {{",
                    ident, ident
                ));
                lines.push(format!(
                    "            searchParams.append('{}', String({}));",
                    key, ident
                ));
                lines.push("        }".to_string());
            }
            _ => {
                lines.push(format!(
                    "        if ({} !== undefined && {} !== null) {{",
                    ident, ident
                ));
                lines.push(format!("            if (typeof {} === 'object') {{", ident));
                lines.push(format!(
                    "                for (const [key, value] of Object.entries({})) {{",
                    ident
                ));
                lines.push(
                    "                    if (value !== undefined && value !== null) {".to_string(),
                );
                lines.push(
                    "                        searchParams.append(key, String(value));".to_string(),
                );
                lines.push("                    }".to_string());
                lines.push("                }".to_string());
                lines.push("            } else {".to_string());
                lines.push(format!(
                    "                searchParams.append('{}', String({}));",
                    key, ident
                ));
                lines.push("            }".to_string());
                lines.push("        }".to_string());
            }
        }
    }

    /// Parameters in declaration order. Nullable parameters are optional
    /// only when every parameter after them is too.
    fn parameter_list(&self, method: &Method) -> String {
        let ctx = self.ctx;
        let exprs: Vec<TypeExpr> = method
            .parameters
            .iter()
            .map(|p| TypeExpr::parse(&p.type_signature, ctx.types))
            .collect();

        let trailing_optional = exprs
            .iter()
            .rev()
            .take_while(|e| e.is_nullable())
            .count();
        let first_optional = exprs.len() - trailing_optional;

        method
            .parameters
            .iter()
            .zip(&exprs)
            .enumerate()
            .map(|(i, (param, expr))| {
                let rendered = expr.render(ctx.types);
                if i >= first_optional {
                    format!("{}?: {}", parameter_name(param), rendered)
                } else if expr.is_nullable() {
                    format!("{}: {} | null", parameter_name(param), rendered)
                } else {
                    format!("{}: {}", parameter_name(param), rendered)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
