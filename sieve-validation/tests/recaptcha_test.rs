//! `recaptcha` rule against a mock verification endpoint.
//!
//! Validation blocks on the HTTP round trip, so every run happens on
//! `spawn_blocking` while the mock server lives on the test runtime.

use serde_json::json;
use sieve_http_client::HttpClientError;
use sieve_validation::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

fn captcha_rules(url: &str, secret: &str) -> RuleSet {
    RuleSet::new().field("captcha", [format!("recaptcha:{},{}", url, secret)])
}

/// Runs the built-in rules for one captcha token and returns the outcome.
async fn run(token: serde_json::Value, rules: RuleSet) -> Result<ValidatedData, ValidationFailure> {
    blocking(move || Validation::new([("captcha", token)], rules).validated()).await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_successful_verification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/siteverify"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("secret=s3cret&response=client-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/siteverify", server.uri());
    let data = run(json!("client-token"), captcha_rules(&url, "s3cret"))
        .await
        .unwrap();
    assert_eq!(data.get("captcha"), Some(&json!("client-token")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "error-codes": ["invalid-input-response"]})),
        )
        .mount(&server)
        .await;

    let failure = run(json!("stale"), captcha_rules(&server.uri(), "s3cret"))
        .await
        .unwrap_err();
    assert_eq!(failure.errors().get("captcha"), Some("Invalid recaptcha"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_success_must_be_boolean() {
    for success in [json!("true"), json!(1), json!("1")] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": success.clone()})))
            .expect(1)
            .mount(&server)
            .await;

        let failure = run(json!("tok"), captcha_rules(&server.uri(), "s3cret"))
            .await
            .unwrap_err();
        assert_eq!(
            failure.errors().get("captcha"),
            Some("Invalid recaptcha"),
            "success = {}",
            success
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unparsable_body_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let failure = run(json!("tok"), captcha_rules(&server.uri(), "s3cret"))
        .await
        .unwrap_err();
    assert_eq!(failure.errors().get("captcha"), Some("Invalid recaptcha"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_code_is_not_inspected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let data = run(json!("tok"), captcha_rules(&server.uri(), "s3cret"))
        .await
        .unwrap();
    assert_eq!(data.get("captcha"), Some(&json!("tok")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_follows_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(307).insert_header("Location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/old", server.uri());
    assert!(run(json!("tok"), captcha_rules(&url, "s3cret")).await.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let rules = captcha_rules(&server.uri(), "s3cret");
    let failure = blocking(move || {
        let config = ValidationConfig {
            verification_timeout_secs: 1,
            ..Default::default()
        };
        Validation::builder()
            .data([("captcha", "tok")])
            .rules(rules)
            .config(&config)
            .build()
            .validated()
    })
    .await
    .unwrap_err();

    assert_eq!(
        failure.errors().get("captcha"),
        Some("recaptcha validation failed")
    );
}

#[test]
fn test_missing_configuration_fails_without_network() {
    let mut validation = Validation::new(
        [("a", "tok"), ("b", "tok")],
        rules! { "a" => ["recaptcha"], "b" => ["recaptcha:https://verify.invalid/api"] },
    );

    assert!(!validation.validate().unwrap());
    assert_eq!(
        validation.errors().get("a"),
        Some("Google API url required for recaptcha validation")
    );
    assert_eq!(
        validation.errors().get("b"),
        Some("Google API secret required for recaptcha validation")
    );
}

struct CountingVerifier {
    calls: AtomicUsize,
    answer: bool,
}

impl TokenVerifier for CountingVerifier {
    fn verify(&self, _endpoint: &str, secret: &str, token: &str) -> Result<bool, HttpClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if secret == "offline" {
            return Err(HttpClientError::Connection("network unreachable".to_string()));
        }
        Ok(self.answer && token == "human")
    }
}

#[test]
fn test_injected_verifier() {
    let verifier = Arc::new(CountingVerifier {
        calls: AtomicUsize::new(0),
        answer: true,
    });

    let mut validation = Validation::builder()
        .data([("human", "human"), ("bot", "bot"), ("down", "human")])
        .rules(rules! {
            "human" => ["required", "recaptcha:https://verify.test,s"],
            "bot" => ["recaptcha:https://verify.test,s"],
            "down" => ["recaptcha:https://verify.test,offline"],
        })
        .verifier(verifier.clone())
        .build();

    assert!(!validation.validate().unwrap());
    assert!(!validation.errors().contains("human"));
    assert_eq!(validation.errors().get("bot"), Some("Invalid recaptcha"));
    assert_eq!(
        validation.errors().get("down"),
        Some("recaptcha validation failed")
    );
    assert_eq!(verifier.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_non_scalar_token() {
    let verifier = Arc::new(CountingVerifier {
        calls: AtomicUsize::new(0),
        answer: true,
    });

    let mut validation = Validation::builder()
        .data([("captcha", json!({"token": "human"}))])
        .rules(rules! { "captcha" => ["recaptcha:https://verify.test,s"] })
        .verifier(verifier.clone())
        .build();

    assert!(!validation.validate().unwrap());
    assert_eq!(validation.errors().get("captcha"), Some("Invalid recaptcha"));
    assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
}
