// Built-in rules

mod boolean;
mod email;
mod integer;
mod recaptcha;
mod required;
mod string;

pub use boolean::IsBool;
pub use email::IsEmail;
pub use integer::IsInteger;
pub use recaptcha::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, HttpVerifier, Recaptcha};
pub use required::Required;
pub use string::{IsString, escape_html};

use crate::{RuleRegistry, TokenVerifier};
use std::sync::Arc;

/// Register every built-in rule under its token name.
///
/// Without a verifier the `recaptcha` rule posts to the verification
/// endpoint through [`HttpVerifier`].
pub fn register_builtins(registry: &mut RuleRegistry, verifier: Option<Arc<dyn TokenVerifier>>) {
    let verifier = verifier.unwrap_or_else(|| Arc::new(HttpVerifier::new()));

    registry
        .register("required", Required)
        .register("integer", IsInteger)
        .register("string", IsString)
        .register("bool", IsBool)
        .register("email", IsEmail)
        .register("recaptcha", Recaptcha::new(verifier));
}
