//! Naming convention utilities for schema and generated names.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `PascalCase` | [`to_snake_case`] | `pascal_case` |
//! | `snake_case` | [`to_pascal_case`] | `SnakeCase` |
//! | `word` | [`capitalize`] | `Word` |
//! | `type` | [`to_rust_ident`] | `r#type` |

/// Convert a PascalCase or camelCase name to snake_case.
///
/// Runs of capitals are kept together, so acronyms fold into one word.
///
/// # Examples
///
/// ```
/// use kafkagen_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("ReplicaId"), "replica_id");
/// assert_eq!(to_snake_case("APIKey"), "api_key");
/// assert_eq!(to_snake_case("Int32Value"), "int32_value");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '-' | '_' | ' ' | '.') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 && !result.is_empty() && !result.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    if result.ends_with('_') {
        result.pop();
    }
    result
}

/// Convert a string to PascalCase.
///
/// Handles snake_case, kebab-case, and already-capitalized input.
///
/// # Examples
///
/// ```
/// use kafkagen_core::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("validateOnly"), "ValidateOnly");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_']).map(capitalize).collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "super", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super"];

/// Turn a snake_case name into a usable Rust identifier.
///
/// Keywords become raw identifiers; the few names that cannot be raw get a
/// trailing underscore.
pub fn to_rust_ident(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}_")
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn to_snake_case___converts_pascal_case() {
        assert_eq!(to_snake_case("ReplicaId"), "replica_id");
        assert_eq!(to_snake_case("CreateTopicsRequest"), "create_topics_request");
        assert_eq!(to_snake_case("Echo"), "echo");
    }

    #[test]
    fn to_snake_case___keeps_acronyms_together() {
        assert_eq!(to_snake_case("APIKey"), "api_key");
        assert_eq!(to_snake_case("TopicID"), "topic_id");
        assert_eq!(to_snake_case("SASLHandshake"), "sasl_handshake");
    }

    #[test]
    fn to_snake_case___splits_after_digits() {
        assert_eq!(to_snake_case("Int32Value"), "int32_value");
        assert_eq!(to_snake_case("V2"), "v2");
    }

    #[test]
    fn to_snake_case___normalizes_separators() {
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("kebab-case"), "kebab_case");
        assert_eq!(to_snake_case("Trailing_"), "trailing");
        assert_eq!(to_snake_case("camelCase"), "camel_case");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn to_pascal_case___converts_snake_and_camel_case() {
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("my-plugin"), "MyPlugin");
        assert_eq!(to_pascal_case("validateOnly"), "ValidateOnly");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn capitalize___preserves_rest_of_string() {
        assert_eq!(capitalize("helloWorld"), "HelloWorld");
        assert_eq!(capitalize("ALLCAPS"), "ALLCAPS");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn to_rust_ident___escapes_keywords() {
        assert_eq!(to_rust_ident("type"), "r#type");
        assert_eq!(to_rust_ident("match"), "r#match");
        assert_eq!(to_rust_ident("self"), "self_");
        assert_eq!(to_rust_ident("topics"), "topics");
    }
}
