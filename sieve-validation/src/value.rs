//! Loose interpretation of raw input values.
//!
//! Form and query input arrives as strings while JSON input is typed; the
//! built-in rules treat both the same way through these helpers.

use serde_json::Value;

/// Whether a value counts as "not provided".
///
/// Null, `false`, zero, the empty string, the string `"0"` and empty
/// arrays/objects are empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// String form of a scalar, as it would have been submitted in a form.
///
/// `true` is `"1"`, `false` and null are `""`, whole floats drop their
/// fraction. Arrays and objects have no scalar form.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        }),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whitespace stripped by the `string` rule: space, tab, newline, carriage
/// return, NUL and vertical tab.
pub(crate) fn is_trim_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty() {
        for value in [json!(null), json!(""), json!("0"), json!(0), json!(0.0), json!(false), json!([]), json!({})] {
            assert!(is_empty(&value), "{value} should be empty");
        }
        for value in [json!(" "), json!("00"), json!(1), json!(-0.5), json!(true), json!([0]), json!("false")] {
            assert!(!is_empty(&value), "{value} should not be empty");
        }
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string(&json!(true)).as_deref(), Some("1"));
        assert_eq!(scalar_to_string(&json!(false)).as_deref(), Some(""));
        assert_eq!(scalar_to_string(&json!(null)).as_deref(), Some(""));
        assert_eq!(scalar_to_string(&json!(-17)).as_deref(), Some("-17"));
        assert_eq!(scalar_to_string(&json!(42.0)).as_deref(), Some("42"));
        assert_eq!(scalar_to_string(&json!(4.5)).as_deref(), Some("4.5"));
        assert_eq!(scalar_to_string(&json!("x")).as_deref(), Some("x"));
        assert_eq!(scalar_to_string(&json!([1])), None);
    }
}
