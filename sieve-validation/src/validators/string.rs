// `string` rule

use crate::value::is_trim_char;
use crate::{Rule, RuleError};
use serde_json::Value;

/// Accepts strings, returning them HTML-escaped and trimmed.
pub struct IsString;

impl IsString {
    pub const MESSAGE: &'static str = "Invalid String";
}

impl Rule for IsString {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, RuleError> {
        match value {
            Value::String(s) => Ok(Value::String(
                escape_html(s).trim_matches(is_trim_char).to_string(),
            )),
            _ => Err(RuleError::violation(Self::MESSAGE)),
        }
    }
}

/// Escape `&`, `"`, `'`, `<` and `>` as HTML entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
