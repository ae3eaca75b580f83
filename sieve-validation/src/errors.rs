// Validation errors

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Status code carried by validation failures ("unprocessable input").
pub const DEFAULT_CODE: u16 = 422;

/// Message carried by validation failures unless overridden.
pub const DEFAULT_MESSAGE: &str = "Invalid data";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a single rule for a single field.
///
/// Either kind ends the evaluation of the field's remaining rules but never
/// the whole run.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule name has no registered implementation.
    #[error("Rule [{rule}] is not defined")]
    NotDefined { rule: String },

    /// The value failed the rule.
    #[error("{message}")]
    Violation {
        message: String,
        code: u16,
        #[source]
        source: Option<BoxError>,
    },
}

impl RuleError {
    pub fn not_defined(rule: impl Into<String>) -> Self {
        RuleError::NotDefined { rule: rule.into() }
    }

    pub fn violation(message: impl Into<String>) -> Self {
        RuleError::Violation {
            message: message.into(),
            code: DEFAULT_CODE,
            source: None,
        }
    }

    /// Attach the lower-level error that caused a violation.
    pub fn with_source(self, cause: impl Into<BoxError>) -> Self {
        match self {
            RuleError::Violation { message, code, .. } => RuleError::Violation {
                message,
                code,
                source: Some(cause.into()),
            },
            other => other,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            RuleError::NotDefined { .. } => DEFAULT_CODE,
            RuleError::Violation { code, .. } => *code,
        }
    }

    pub fn is_not_defined(&self) -> bool {
        matches!(self, RuleError::NotDefined { .. })
    }
}

/// Per-field error messages, in field evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: IndexMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the message for a field, replacing an earlier one
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.errors
    }

    /// `{"field": "message", ...}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.errors
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            errors: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Aggregate failure of a validation run, carrying every field's message.
///
/// Only raised when raise-on-failure mode is enabled or when the validated
/// output is requested for invalid input.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    errors: FieldErrors,
    message: String,
    code: u16,
    #[source]
    source: Option<BoxError>,
}

impl ValidationFailure {
    pub fn new(errors: FieldErrors) -> Self {
        Self {
            errors,
            message: DEFAULT_MESSAGE.to_string(),
            code: DEFAULT_CODE,
            source: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        self.source = Some(cause.into());
        self
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// `{"message": .., "code": .., "errors": {field: message}}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "message": self.message,
            "code": self.code,
            "errors": self.errors.to_json(),
        })
    }
}

/// Keeps the message only. Render field errors with
/// [`ValidationPipe::error_response`](crate::ValidationPipe::error_response).
impl From<ValidationFailure> for sieve_core::Error {
    fn from(failure: ValidationFailure) -> Self {
        sieve_core::Error::UnprocessableEntity(failure.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_rule_error_messages() {
        assert_eq!(
            RuleError::not_defined("frobnicate").to_string(),
            "Rule [frobnicate] is not defined"
        );
        let err = RuleError::violation("Invalid Email");
        assert_eq!(err.to_string(), "Invalid Email");
        assert_eq!(err.code(), 422);
        assert!(!err.is_not_defined());
    }

    #[test]
    fn test_rule_error_source() {
        let io = std::io::Error::other("connection reset");
        let err = RuleError::violation("recaptcha validation failed").with_source(io);
        assert_eq!(err.source().unwrap().to_string(), "connection reset");

        let undefined = RuleError::not_defined("x").with_source("ignored");
        assert!(undefined.source().is_none());
    }

    #[test]
    fn test_field_errors_order_and_json() {
        let mut errors = FieldErrors::new();
        errors.insert("b", "Invalid Integer");
        errors.insert("a", "Data is required");
        errors.insert("b", "Invalid String");

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(errors.get("b"), Some("Invalid String"));
        assert_eq!(
            errors.to_json(),
            serde_json::json!({"b": "Invalid String", "a": "Data is required"})
        );
        assert_eq!(errors.to_string(), "b: Invalid String\na: Data is required\n");
    }

    #[test]
    fn test_validation_failure_defaults() {
        let errors: FieldErrors = [("age", "Invalid Integer")].into_iter().collect();
        let failure = ValidationFailure::new(errors.clone());

        assert_eq!(failure.to_string(), "Invalid data");
        assert_eq!(failure.code(), 422);
        assert_eq!(failure.errors(), &errors);
        assert!(failure.source().is_none());
        assert_eq!(failure.to_json()["errors"]["age"], "Invalid Integer");
    }

    #[test]
    fn test_validation_failure_customised() {
        let failure = ValidationFailure::new(FieldErrors::new())
            .with_message("Signup rejected")
            .with_code(400)
            .with_source(std::io::Error::other("upstream"));

        assert_eq!(failure.message(), "Signup rejected");
        assert_eq!(failure.code(), 400);
        assert!(failure.source().is_some());

        let core: sieve_core::Error = failure.into();
        assert_eq!(core.status_code(), 422);
    }
}
