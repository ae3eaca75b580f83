// `recaptcha:url,secret` rule

use crate::value::scalar_to_string;
use crate::{Rule, RuleError, TokenVerifier};
use once_cell::sync::OnceCell;
use serde_json::Value;
use sieve_http_client::{HttpClient, HttpClientConfig, HttpClientError};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Timeout of one verification round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Redirects followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

const URL_REQUIRED: &str = "Google API url required for recaptcha validation";
const SECRET_REQUIRED: &str = "Google API secret required for recaptcha validation";
const TRANSPORT_FAILED: &str = "recaptcha validation failed";
const INVALID: &str = "Invalid recaptcha";

/// Verifies a client-side CAPTCHA token against a remote endpoint.
///
/// The first argument is the verification URL, the second the server secret.
/// On success the token is returned unchanged.
pub struct Recaptcha {
    verifier: Arc<dyn TokenVerifier>,
}

impl Recaptcha {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

/// Argument at `index`, unless missing or empty (`""` and `"0"` count as empty).
fn configured(args: &[String], index: usize) -> Option<&str> {
    args.get(index)
        .map(String::as_str)
        .filter(|arg| !arg.is_empty() && *arg != "0")
}

impl Rule for Recaptcha {
    fn apply(&self, value: &Value, args: &[String]) -> Result<Value, RuleError> {
        let endpoint = configured(args, 0).ok_or_else(|| RuleError::violation(URL_REQUIRED))?;
        let secret = configured(args, 1).ok_or_else(|| RuleError::violation(SECRET_REQUIRED))?;
        let token = scalar_to_string(value).ok_or_else(|| RuleError::violation(INVALID))?;

        match self.verifier.verify(endpoint, secret, &token) {
            Ok(true) => Ok(value.clone()),
            Ok(false) => Err(RuleError::violation(INVALID)),
            Err(e) => {
                sieve_log::warn!(target: "sieve::recaptcha", "token verification failed: {}", e);
                Err(RuleError::violation(TRANSPORT_FAILED).with_source(e))
            }
        }
    }
}

/// [`TokenVerifier`] posting `secret` and `response` as a URL-encoded form.
///
/// The HTTP client is built on first use.
pub struct HttpVerifier {
    config: HttpClientConfig,
    client: OnceCell<HttpClient>,
}

impl HttpVerifier {
    pub fn new() -> Self {
        Self::with_config(
            HttpClientConfig::builder()
                .timeout(DEFAULT_TIMEOUT)
                .follow_redirects(true)
                .max_redirects(DEFAULT_MAX_REDIRECTS)
                .build(),
        )
    }

    pub fn with_config(config: HttpClientConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn client(&self) -> Result<&HttpClient, HttpClientError> {
        self.client
            .get_or_try_init(|| HttpClient::new(self.config.clone()))
    }
}

impl Default for HttpVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HttpVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpVerifier")
            .field("config", &self.config)
            .field("initialized", &self.client.get().is_some())
            .finish()
    }
}

impl TokenVerifier for HttpVerifier {
    fn verify(&self, endpoint: &str, secret: &str, token: &str) -> Result<bool, HttpClientError> {
        let response = self
            .client()?
            .post(endpoint)
            .form(&[("secret", secret), ("response", token)])
            .send()?;

        let success = match response.json::<Value>() {
            Ok(Value::Object(body)) => body.get("success") == Some(&Value::Bool(true)),
            Ok(_) => false,
            Err(e) => {
                sieve_log::debug!(
                    target: "sieve::recaptcha",
                    "unreadable verification response ({}): {}",
                    response.status(),
                    e
                );
                false
            }
        };
        Ok(success)
    }
}
