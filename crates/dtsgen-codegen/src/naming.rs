//! Identifier normalization.

use dtsgen_core::{CamelCaseOptions, DtsgenConfig};

/// How raw identifiers are turned into TypeScript identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamingOptions {
    /// Apply the casing transform.
    pub camel_case: bool,
    /// Casing transform options.
    pub case: CamelCaseOptions,
}

impl NamingOptions {
    /// Options for member and method names.
    pub fn members(config: &DtsgenConfig) -> Self {
        Self {
            camel_case: config.camel_case,
            case: config.camel_case_options,
        }
    }

    /// Options for enum literal values.
    pub fn enum_values(config: &DtsgenConfig) -> Self {
        Self {
            camel_case: config.camel_case_enums,
            case: CamelCaseOptions::default(),
        }
    }
}

/// Normalize a raw member identifier.
///
/// Only the first whitespace-separated token is kept, so a field reported
/// as `Count = 5` becomes `Count`. A verbatim `@` prefix is dropped.
pub fn normalize_identifier(raw: &str, options: &NamingOptions) -> String {
    let token = raw.split_whitespace().next().unwrap_or_default();
    let token = token.strip_prefix('@').unwrap_or(token);

    if !options.camel_case {
        return token.to_string();
    }

    let cased = camel_case(token, &options.case);
    if cased.is_empty() {
        token.to_string()
    } else {
        cased
    }
}

/// Convert `input` to camelCase (or PascalCase).
///
/// ```
/// use dtsgen_codegen::naming::camel_case;
/// use dtsgen_core::CamelCaseOptions;
///
/// assert_eq!(camel_case("XMLHttpRequest", &CamelCaseOptions::default()), "xmlHttpRequest");
/// ```
pub fn camel_case(input: &str, options: &CamelCaseOptions) -> String {
    let mut out = String::with_capacity(input.len());

    for (index, word) in split_words(input).iter().enumerate() {
        let keep = options.preserve_consecutive_uppercase
            && word.chars().count() > 1
            && word.chars().all(|c| !c.is_lowercase());

        if keep {
            out.push_str(word);
        } else if index == 0 && !options.pascal_case {
            out.push_str(&word.to_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        }
    }

    out
}

/// Split an identifier into words at separators and case transitions.
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(char::is_lowercase))
                || (prev.is_ascii_digit() && c.is_alphabetic());

            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
