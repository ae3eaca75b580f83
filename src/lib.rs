// Sieve - Declarative rule-based validation for Rust
//
// This library validates and sanitizes request data against ordered lists of
// named rules, with pluggable rules and remote CAPTCHA token verification.

// Re-export core functionality
pub use sieve_core::*;

// Logging macros and configuration
pub use sieve_log as log;

// Re-export optional crates
#[cfg(feature = "validation")]
pub use sieve_validation;

#[cfg(feature = "validation")]
pub use sieve_validation::rules;

#[cfg(feature = "config")]
pub use sieve_config;

#[cfg(feature = "http-client")]
pub use sieve_http_client;

// Prelude for common imports
pub mod prelude {
    pub use crate::{Error, HttpRequest, HttpResponse, RequestParams};

    #[cfg(feature = "validation")]
    pub use sieve_validation::{
        FieldErrors, InputData, Rule, RuleError, RuleRegistry, RuleSet, TokenVerifier,
        ValidatedData, Validation, ValidationConfig, ValidationFailure, ValidationPipe, rules,
    };

    #[cfg(feature = "config")]
    pub use sieve_config::ConfigManager;
}
