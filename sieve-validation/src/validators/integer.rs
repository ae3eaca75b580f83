// `integer` rule

use crate::value::is_trim_char;
use crate::{Rule, RuleError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(0|[1-9][0-9]*)$").unwrap());

/// Accepts integer literals and converts them to a JSON integer.
///
/// Strings may carry surrounding whitespace and a sign but no leading zeros,
/// and must fit an `i64`. `true` is 1. Floats are accepted only when they have
/// no fractional part.
pub struct IsInteger;

impl IsInteger {
    pub const MESSAGE: &'static str = "Invalid Integer";

    pub fn parse(value: &Value) -> Option<i64> {
        match value {
            Value::Bool(true) => Some(1),
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => {
                let trimmed = s.trim_matches(is_trim_char);
                if INTEGER_REGEX.is_match(trimmed) {
                    trimmed.parse().ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Rule for IsInteger {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, RuleError> {
        Self::parse(value)
            .map(Value::from)
            .ok_or_else(|| RuleError::violation(Self::MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apply(value: Value) -> Result<Value, RuleError> {
        IsInteger.apply(&value, &[])
    }

    #[test]
    fn test_integer_strings() {
        assert_eq!(apply(json!("42")).unwrap(), json!(42));
        assert_eq!(apply(json!(" -7\n")).unwrap(), json!(-7));
        assert_eq!(apply(json!("+3")).unwrap(), json!(3));
        assert_eq!(apply(json!("0")).unwrap(), json!(0));
        assert_eq!(
            apply(json!("9223372036854775807")).unwrap(),
            json!(i64::MAX)
        );
    }

    #[test]
    fn test_invalid_strings() {
        for raw in ["abc", "", "007", "1.5", "1e3", "12abc", "- 1", "9223372036854775808"] {
            let err = apply(json!(raw)).unwrap_err();
            assert_eq!(err.to_string(), "Invalid Integer", "{raw:?} should fail");
        }
    }

    #[test]
    fn test_typed_values() {
        assert_eq!(apply(json!(12)).unwrap(), json!(12));
        assert_eq!(apply(json!(12.0)).unwrap(), json!(12));
        assert_eq!(apply(json!(true)).unwrap(), json!(1));
        assert!(apply(json!(12.5)).is_err());
        assert!(apply(json!(false)).is_err());
        assert!(apply(json!(null)).is_err());
        assert!(apply(json!([1])).is_err());
    }
}
