// `bool` rule

use crate::value::scalar_to_string;
use crate::{Rule, RuleError};
use serde_json::Value;

/// Interprets the value as a checkbox-style flag. Never fails.
///
/// `"1"`, `"true"`, `"on"` and `"yes"` (any case, surrounding whitespace
/// ignored) are `true`, as are `true` and the number 1. Anything else,
/// including arrays and objects, is `false`.
pub struct IsBool;

impl IsBool {
    pub fn truthy(value: &Value) -> bool {
        scalar_to_string(value)
            .map(|s| {
                matches!(
                    s.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "on" | "yes"
                )
            })
            .unwrap_or(false)
    }
}

impl Rule for IsBool {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, RuleError> {
        Ok(Value::Bool(Self::truthy(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_values() {
        for value in [json!("1"), json!("true"), json!(" ON "), json!("Yes"), json!(true), json!(1)] {
            assert_eq!(IsBool.apply(&value, &[]).unwrap(), json!(true), "{value}");
        }
    }

    #[test]
    fn test_everything_else_is_false() {
        for value in [
            json!("0"),
            json!("no"),
            json!("off"),
            json!("banana"),
            json!(""),
            json!(2),
            json!(null),
            json!(false),
            json!(["1"]),
        ] {
            assert_eq!(IsBool.apply(&value, &[]).unwrap(), json!(false), "{value}");
        }
    }
}
