// `email` rule

use crate::{Rule, RuleError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+",
        r"[A-Za-z](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    ))
    .unwrap()
});

const MAX_LOCAL_LEN: usize = 64;
const MAX_LEN: usize = 320;

/// Accepts well-formed `local@domain` addresses and returns them unchanged.
pub struct IsEmail;

impl IsEmail {
    pub const MESSAGE: &'static str = "Invalid Email";

    pub fn is_valid(address: &str) -> bool {
        if address.len() > MAX_LEN || !EMAIL_REGEX.is_match(address) {
            return false;
        }
        address
            .rsplit_once('@')
            .is_some_and(|(local, _)| local.len() <= MAX_LOCAL_LEN)
    }
}

impl Rule for IsEmail {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, RuleError> {
        match value {
            Value::String(s) if Self::is_valid(s) => Ok(value.clone()),
            _ => Err(RuleError::violation(Self::MESSAGE)),
        }
    }
}
