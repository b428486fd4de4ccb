use crate::{Result, VdkError};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Matches {+[^{}]*}+ so nested braces are captured as one match
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{+[^{}]*\}+").expect("Invalid regex pattern"))
}

/// Must start with a letter or underscore, followed by letters, digits, or underscores
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn replace_match(vars: &HashMap<String, Value>, match_str: &str) -> Result<String> {
    let var_name = match_str.trim_matches(|c| c == '{' || c == '}').trim();

    let (var_name, optional) = match var_name.strip_suffix('?') {
        Some(name) => (name, true),
        None => (var_name, false),
    };

    if !is_identifier(var_name) {
        // JSON snippets and other literal braces pass through untouched
        return Ok(match_str.to_string());
    }

    match vars.get(var_name) {
        Some(value) => Ok(render_value(value)),
        None if optional => Ok(String::new()),
        None => Err(VdkError::Config(format!("Instruction variable '{}' not found", var_name))),
    }
}

/// Fills `{placeholders}` in a persona instruction template.
///
/// - `{var}` must be present in `vars`
/// - `{var?}` renders as an empty string when absent
/// - anything between braces that is not an identifier is left as-is
///
/// String values are inserted without JSON quoting.
pub fn render_instructions(template: &str, vars: &HashMap<String, Value>) -> Result<String> {
    let regex = placeholder_regex();
    let mut result = String::with_capacity(template.len());
    let mut last_end = 0;

    for found in regex.find_iter(template) {
        let range = found.range();
        result.push_str(&template[last_end..range.start]);
        result.push_str(&replace_match(vars, found.as_str())?);
        last_end = range.end;
    }

    result.push_str(&template[last_end..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("valid_name"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("name123"));
        assert!(!is_identifier("123invalid"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("with-dash"));
        assert!(!is_identifier("\"drinkType\": \"string\""));
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&Value::String("Falcon Brew".into())), "Falcon Brew");
        assert_eq!(render_value(&Value::from(3)), "3");
        assert_eq!(render_value(&Value::Null), "");
    }
}
