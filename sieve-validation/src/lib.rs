//! Declarative rule-based validation for Sieve
//!
//! Input fields are checked against ordered lists of named rules such as
//! `"required"`, `"integer"` or `"recaptcha:url,secret"`. Every field stops at
//! its first failing rule; the outputs of fully passing fields form the
//! validated (sanitized and coerced) data.
//!
//! # Examples
//!
//! ## Validating a submission
//!
//! ```
//! use sieve_validation::{Validation, rules};
//! use serde_json::json;
//!
//! let mut validation = Validation::new(
//!     [
//!         ("name", json!("  <b>Ada</b> ")),
//!         ("age", json!("36")),
//!         ("newsletter", json!("on")),
//!     ],
//!     rules! {
//!         "name" => ["required", "string"],
//!         "age" => ["required", "integer"],
//!         "newsletter" => ["bool"],
//!     },
//! );
//!
//! let data = validation.validated().unwrap();
//! assert_eq!(data.get("name"), Some(&json!("&lt;b&gt;Ada&lt;/b&gt;")));
//! assert_eq!(data.get("age"), Some(&json!(36)));
//! assert_eq!(data.get("newsletter"), Some(&json!(true)));
//! ```
//!
//! ## Raising on failure
//!
//! ```
//! use sieve_validation::{Validation, rules};
//! use serde_json::json;
//!
//! let mut validation = Validation::new(
//!     [("email", json!("not-an-email"))],
//!     rules! { "email" => ["required", "email"], "password" => ["required"] },
//! )
//! .throws();
//!
//! let failure = validation.validate().unwrap_err();
//! assert_eq!(failure.message(), "Invalid data");
//! assert_eq!(failure.errors().get("email"), Some("Invalid Email"));
//! assert_eq!(failure.errors().get("password"), Some("Data is required"));
//! ```
//!
//! ## Custom rules
//!
//! ```
//! use sieve_validation::{RuleError, Validation, rules};
//! use serde_json::{Value, json};
//!
//! let mut validation = Validation::builder()
//!     .data([("slug", json!("Hello World"))])
//!     .rules(rules! { "slug" => ["required", "slug"] })
//!     .rule("slug", |value: &Value, _: &[String]| -> Result<Value, RuleError> {
//!         let text = value.as_str().ok_or_else(|| RuleError::violation("Invalid Slug"))?;
//!         Ok(json!(text.to_lowercase().replace(' ', "-")))
//!     })
//!     .build();
//!
//! assert_eq!(validation.validated().unwrap().get("slug"), Some(&json!("hello-world")));
//! ```

mod config;
mod data;
mod errors;
mod parser;
mod pipe;
mod registry;
mod rule_set;
mod traits;
mod validation;
pub mod validators;
pub mod value;

pub use config::ValidationConfig;
pub use data::{InputData, ValidatedData};
pub use errors::{DEFAULT_CODE, DEFAULT_MESSAGE, FieldErrors, RuleError, ValidationFailure};
pub use parser::{ARG_DELIMITER, NAME_DELIMITER, RuleSpec};
pub use pipe::ValidationPipe;
pub use registry::RuleRegistry;
pub use rule_set::{REQUIRED, RuleSet};
pub use traits::{Rule, TokenVerifier};
pub use validation::{Validation, ValidationBuilder};
pub use validators::{HttpVerifier, IsBool, IsEmail, IsInteger, IsString, Recaptcha, Required};
