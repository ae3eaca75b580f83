// Validation pipe for request validation

use crate::{RuleSet, ValidatedData, Validation, ValidationFailure};
use serde::de::DeserializeOwned;
use sieve_core::{Error, HttpRequest, HttpResponse, RequestParams};

/// Runs a rule set against the parameters of an HTTP request.
pub struct ValidationPipe;

impl ValidationPipe {
    /// Validate the request's query and body parameters.
    ///
    /// Malformed bodies are a 400, failed rules a 422. The returned
    /// [`Error`] carries only the failure message, not the per-field errors;
    /// use [`check`](Self::check) with [`error_response`](Self::error_response)
    /// to send those back to the client.
    pub fn validate_request(
        req: &HttpRequest,
        rules: impl Into<RuleSet>,
    ) -> Result<ValidatedData, Error> {
        let params = RequestParams::from_request(req)?;
        Self::run(params, rules).map_err(|failure| {
            sieve_log::debug!(
                target: "sieve::pipe",
                "{} {} rejected: {} field error(s)",
                req.method,
                req.path,
                failure.errors().len()
            );
            Error::from(failure)
        })
    }

    /// Like [`validate_request`](Self::validate_request), keeping the
    /// per-field errors. A malformed body yields a failure without field
    /// errors carrying the body's status code.
    pub fn check(
        req: &HttpRequest,
        rules: impl Into<RuleSet>,
    ) -> Result<ValidatedData, ValidationFailure> {
        let params = RequestParams::from_request(req).map_err(|e| {
            ValidationFailure::new(Default::default())
                .with_message(e.to_string())
                .with_code(e.status_code())
                .with_source(e)
        })?;
        Self::run(params, rules)
    }

    fn run(
        params: RequestParams,
        rules: impl Into<RuleSet>,
    ) -> Result<ValidatedData, ValidationFailure> {
        Validation::builder()
            .rules(rules)
            .request_params(params)
            .use_ambient_request_data(true)
            .build()
            .validated()
    }

    /// Validate the request, then deserialize the validated fields.
    pub fn parse<T: DeserializeOwned>(
        req: &HttpRequest,
        rules: impl Into<RuleSet>,
    ) -> Result<T, Error> {
        Self::validate_request(req, rules)?
            .deserialize()
            .map_err(|e| Error::Deserialization(e.to_string()))
    }

    /// `422` response listing every field error.
    pub fn error_response(failure: &ValidationFailure) -> HttpResponse {
        let body = serde_json::json!({
            "message": failure.message(),
            "errors": failure.errors().to_json(),
        });
        HttpResponse::new(failure.code())
            .with_header("Content-Type".to_string(), "application/json".to_string())
            .with_body(body.to_string().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;
    use serde::Deserialize;

    fn form_request(body: &str) -> HttpRequest {
        HttpRequest::new("POST", "/signup")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body(body.as_bytes().to_vec())
    }

    #[test]
    fn test_validate_request_form() {
        let req = form_request("age=42&newsletter=on&ignored=x");
        let data = ValidationPipe::validate_request(
            &req,
            rules! { "age" => ["required", "integer"], "newsletter" => ["bool"] },
        )
        .unwrap();

        assert_eq!(data.get("age"), Some(&serde_json::json!(42)));
        assert_eq!(data.get("newsletter"), Some(&serde_json::json!(true)));
        assert!(!data.contains("ignored"));
    }

    #[test]
    fn test_validate_request_failure_is_422() {
        let req = form_request("age=old");
        let err = ValidationPipe::validate_request(&req, rules! { "age" => ["integer"] })
            .unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_malformed_json_is_400() {
        let req = HttpRequest::new("POST", "/signup")
            .with_header("Content-Type", "application/json")
            .with_body(b"[1, 2]".to_vec());
        let failure = ValidationPipe::check(&req, rules! { "age" => ["integer"] }).unwrap_err();
        assert_eq!(failure.code(), 400);
        assert!(failure.errors().is_empty());
    }

    #[test]
    fn test_field_errors_only_survive_check() {
        let req = form_request("age=old");
        let rules = rules! { "age" => ["integer"] };

        let err = ValidationPipe::validate_request(&req, rules.clone()).unwrap_err();
        let body: serde_json::Value =
            serde_json::from_slice(&HttpResponse::from(&err).body).unwrap();
        assert!(body.get("errors").is_none());

        let failure = ValidationPipe::check(&req, rules).unwrap_err();
        let body: serde_json::Value =
            serde_json::from_slice(&ValidationPipe::error_response(&failure).body).unwrap();
        assert_eq!(body["errors"]["age"], "Invalid Integer");
    }

    #[test]
    fn test_parse_typed() {
        #[derive(Debug, Deserialize)]
        struct Search {
            q: String,
            page: i64,
        }

        let req = HttpRequest::new("GET", "/search")
            .with_query("q", " rust ")
            .with_query("page", "2");
        let search: Search =
            ValidationPipe::parse(&req, rules! { "q" => ["string"], "page" => ["integer"] })
                .unwrap();
        assert_eq!(search.q, "rust");
        assert_eq!(search.page, 2);
    }

    #[test]
    fn test_error_response() {
        let req = form_request("email=nope");
        let failure = ValidationPipe::check(
            &req,
            rules! { "email" => ["email"], "name" => ["required"] },
        )
        .unwrap_err();

        let response = ValidationPipe::error_response(&failure);
        assert_eq!(response.status, 422);
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["message"], "Invalid data");
        assert_eq!(body["errors"]["email"], "Invalid Email");
        assert_eq!(body["errors"]["name"], "Data is required");
    }
}
