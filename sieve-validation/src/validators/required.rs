// `required` rule

use crate::value::is_empty;
use crate::{Rule, RuleError};
use serde_json::Value;

/// Fails on empty values; passes everything else through unchanged.
pub struct Required;

impl Required {
    pub const MESSAGE: &'static str = "Data is required";
}

impl Rule for Required {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, RuleError> {
        if is_empty(value) {
            Err(RuleError::violation(Self::MESSAGE))
        } else {
            Ok(value.clone())
        }
    }
}
