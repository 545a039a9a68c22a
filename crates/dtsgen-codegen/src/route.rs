//! Route templating for controller actions.
//!
//! A route attribute such as `[HttpGet("items/{id=0}/sub")]` reaches the IR
//! as the raw attribute expression `"items/{id=0}/sub"`. This module turns
//! it into a template-literal path with the method parameters interpolated.

use std::fmt;

use dtsgen_core::{Member, Method};

/// HTTP verb of a client call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpVerb {
    /// Map a routing attribute tag to a verb.
    ///
    /// `HttpGet`, `Get` and `GET` are equivalent. `Route`, an unknown tag
    /// or no tag at all fall back to GET, or POST when the action takes a
    /// body argument.
    pub fn from_tag(tag: Option<&str>, has_body: bool) -> Self {
        let fallback = if has_body { Self::Post } else { Self::Get };
        let Some(tag) = tag else {
            return fallback;
        };

        let tag = tag.trim().to_ascii_lowercase();
        let tag = tag.strip_prefix("http").unwrap_or(&tag);
        match tag {
            "get" => Self::Get,
            "post" => Self::Post,
            "put" => Self::Put,
            "delete" => Self::Delete,
            "patch" => Self::Patch,
            _ => fallback,
        }
    }

    /// Upper-case method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Whether calls with this verb carry a serialized body.
    pub fn sends_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method parameter the route does not bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParam {
    /// Position in the method's parameter list.
    pub index: usize,
    /// Name as sent on the wire.
    pub key: String,
    /// Identifier in the emitted signature.
    pub ident: String,
}

/// A templated route ready to be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    /// Path with placeholders rewritten to `${param}`, no leading slash.
    pub path: String,
    /// Identifier of the first parameter not referenced by the route.
    pub body: Option<String>,
    /// Every parameter not referenced by the route, in declaration order.
    pub unbound: Vec<RouteParam>,
    /// Verb of the call.
    pub verb: HttpVerb,
}

impl RouteTemplate {
    /// Parameters passed in the query string: all unbound parameters of a
    /// GET-style call, the ones after the body otherwise.
    pub fn query_params(&self) -> &[RouteParam] {
        if self.verb.sends_body() {
            self.unbound.get(1..).unwrap_or_default()
        } else {
            &self.unbound
        }
    }

    /// The template literal for the request URL, rooted at `base`.
    ///
    /// With query parameters the literal ends in the `queryString` the stub
    /// builds before calling `fetch`.
    pub fn url_expr(&self, base: &str) -> String {
        let mut url = format!("`${{{}}}", base);
        if !self.path.is_empty() {
            url.push('/');
            url.push_str(&self.path);
        }
        if !self.query_params().is_empty() {
            url.push_str("${queryString ? `?${queryString}` : ''}");
        }
        url.push('`');
        url
    }
}

/// Template the route of a controller action.
pub fn template_route(method: &Method) -> RouteTemplate {
    let raw = match method.route.as_deref().map(strip_quotes) {
        Some(route) if !route.is_empty() => route,
        _ => method.identifier.trim(),
    };

    let mut path = strip_placeholder_modifiers(raw);
    let mut unbound = Vec::new();

    for (index, param) in method.parameters.iter().enumerate() {
        let key = parameter_key(param);
        let ident = parameter_name(param);
        if !bind_placeholder(&mut path, key, &ident) {
            unbound.push(RouteParam {
                index,
                key: key.to_string(),
                ident,
            });
        }
    }

    let path = path
        .trim_start_matches('~')
        .trim_start_matches('/')
        .replace('`', "\\`");
    let body = unbound.first().map(|p| p.ident.clone());
    let verb = HttpVerb::from_tag(method.http_verb.as_deref(), body.is_some());

    RouteTemplate {
        path,
        body,
        unbound,
        verb,
    }
}

/// Words that cannot name a parameter in TypeScript.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Parameter name as written in the source, verbatim `@` removed.
pub fn parameter_key(param: &Member) -> &str {
    let token = param
        .identifier
        .split_whitespace()
        .next()
        .unwrap_or_default();
    token.strip_prefix('@').unwrap_or(token)
}

/// Parameter name as used in the emitted signature. Reserved words get a
/// trailing underscore: `@class` becomes `class_`.
pub fn parameter_name(param: &Member) -> String {
    let key = parameter_key(param);
    if RESERVED.contains(&key) {
        format!("{}_", key)
    } else {
        key.to_string()
    }
}

/// Remove the quotes of an attribute string literal, `@"..."` included.
fn strip_quotes(route: &str) -> &str {
    let route = route.trim();
    let route = route.strip_prefix('@').unwrap_or(route);
    route.trim_matches(|c| c == '"' || c == '\'')
}

/// Reduce every `{name=default}`, `{name:constraint}`, `{name?}` and
/// `{*name}` placeholder to `{name}`.
fn strip_placeholder_modifiers(route: &str) -> String {
    let mut out = String::with_capacity(route.len());
    let mut rest = route;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let inner = after[..close].trim_start_matches('*');
        let end = inner.find(['=', ':', '?']).unwrap_or(inner.len());
        out.push('{');
        out.push_str(inner[..end].trim());
        out.push('}');

        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Replace every `{key}` (matched case-insensitively) with `${ident}`.
fn bind_placeholder(path: &mut String, key: &str, ident: &str) -> bool {
    let needle = format!("{{{}}}", key.to_ascii_lowercase());
    let replacement = format!("${{{}}}", ident);
    let mut bound = false;
    let mut from = 0;

    while let Some(offset) = path[from..].to_ascii_lowercase().find(&needle) {
        let start = from + offset;
        bound = true;
        if start > 0 && path.as_bytes()[start - 1] == b'$' {
            from = start + needle.len();
            continue;
        }
        path.replace_range(start..start + needle.len(), &replacement);
        from = start + replacement.len();
    }

    bound
}
