//! Line-level TypeScript fragments shared by the module generator.

use tracing::debug;

use crate::core::types::{EnumLiteral, EnumValue, ResolvedImport};

/// One import statement, in named, aliased or default form.
pub fn import_line(import: &ResolvedImport, quote: char) -> String {
    if import.default_export {
        return format!(
            "import {} from {quote}{}{quote};",
            import.name, import.path
        );
    }
    match &import.alias {
        Some(alias) => format!(
            "import {{ {} as {alias} }} from {quote}{}{quote};",
            import.name, import.path
        ),
        None => format!(
            "import {{ {} }} from {quote}{}{quote};",
            import.name, import.path
        ),
    }
}

/// ` extends A` / ` implements B, C` suffix for a declaration line. Both
/// parts are optional; interfaces fold everything into the extends list.
pub fn heritage_clause(extends: &[String], implements: &[String]) -> String {
    let mut clause = String::new();
    if !extends.is_empty() {
        clause.push_str(" extends ");
        clause.push_str(&extends.join(", "));
    }
    if !implements.is_empty() {
        clause.push_str(" implements ");
        clause.push_str(&implements.join(", "));
    }
    clause
}

/// One enum entry, with its literal when declared.
pub fn enum_value_line(value: &EnumValue, converted_name: &str, indent: &str, quote: char) -> String {
    match &value.value {
        Some(EnumLiteral::Int(literal)) => format!("{indent}{converted_name} = {literal},"),
        Some(EnumLiteral::Str(literal)) => format!(
            "{indent}{converted_name} = {},",
            string_literal(literal, quote)
        ),
        None => format!("{indent}{converted_name},"),
    }
}

/// A quoted TypeScript string literal with the configured quote character.
pub fn string_literal(text: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push(quote);
    for ch in text.chars() {
        if ch == quote || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push(quote);
    escaped
}

/// Degraded initializer text for a member default value. Strings honor the
/// configured quote; arrays and objects fall back to compact JSON.
pub fn value_literal(value: &serde_json::Value, quote: char) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => string_literal(s, quote),
        other => serde_json::to_string(other).unwrap_or_else(|err| {
            debug!("Could not serialize default value, emitting null: {err}");
            "null".to_string()
        }),
    }
}

/// Barrel re-export line for the index file.
pub fn index_export_line(module_stem: &str, quote: char) -> String {
    format!("export * from {quote}./{module_stem}{quote};")
}
