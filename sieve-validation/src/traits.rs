// Validation traits

use crate::RuleError;
use serde_json::Value;
use sieve_http_client::HttpClientError;

/// A named validator/coercer registered in a [`RuleRegistry`](crate::RuleRegistry).
///
/// `args` are the raw comma-separated arguments of the rule token. On success
/// the returned value becomes the field's validated output.
pub trait Rule: Send + Sync {
    fn apply(&self, value: &Value, args: &[String]) -> Result<Value, RuleError>;
}

impl<F> Rule for F
where
    F: Fn(&Value, &[String]) -> Result<Value, RuleError> + Send + Sync,
{
    fn apply(&self, value: &Value, args: &[String]) -> Result<Value, RuleError> {
        self(value, args)
    }
}

/// Remote verification of a client-side CAPTCHA token.
pub trait TokenVerifier: Send + Sync {
    /// Post `secret` and `token` to `endpoint`.
    ///
    /// `Ok(true)` only when the service answered with a JSON object whose
    /// `success` member is the boolean `true`. Truthy stand-ins such as `1`
    /// or `"true"` are not accepted. Unparsable answers are `Ok(false)`;
    /// `Err` is reserved for transport failures.
    fn verify(&self, endpoint: &str, secret: &str, token: &str) -> Result<bool, HttpClientError>;
}
