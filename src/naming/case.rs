use super::CaseConverter;

fn capitalize_first(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `SomeName` -> `someName`
pub struct PascalToCamelCase;

impl CaseConverter for PascalToCamelCase {
    fn convert(&self, name: &str) -> String {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// `SomeTypeName` -> `some-type-name`. Acronym runs stay together, so
/// `MyURLValue` becomes `my-url-value`.
pub struct PascalToKebabCase;

impl CaseConverter for PascalToKebabCase {
    fn convert(&self, name: &str) -> String {
        let chars: Vec<char> = name.chars().collect();
        let mut out = String::with_capacity(name.len() + 4);
        for (i, c) in chars.iter().enumerate() {
            if c.is_uppercase() && i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
                if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
                {
                    out.push('-');
                }
            }
            out.extend(c.to_lowercase());
        }
        out
    }
}

/// `some_name` -> `someName`
pub struct SnakeToCamelCase;

impl CaseConverter for SnakeToCamelCase {
    fn convert(&self, name: &str) -> String {
        let mut parts = name.split('_').filter(|p| !p.is_empty());
        match parts.next() {
            Some(first) => first.to_string() + &parts.map(capitalize_first).collect::<String>(),
            None => String::new(),
        }
    }
}

/// `some_name` -> `SomeName`
pub struct SnakeToPascalCase;

impl CaseConverter for SnakeToPascalCase {
    fn convert(&self, name: &str) -> String {
        name.split('_')
            .filter(|p| !p.is_empty())
            .map(capitalize_first)
            .collect()
    }
}
