// HTTP request and response types

use crate::form::{parse_form_map, parse_query};
use crate::Error;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// HTTP request wrapper
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub query_params: IndexMap<String, String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Build a request from a target such as `/signup?ref=mail`.
    pub fn from_target(method: impl Into<String>, target: &str) -> Result<Self, Error> {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let mut request = Self::new(method, path);
        request.query_params = parse_query(query)?;
        Ok(request)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Header value, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Media type of the body without parameters, lowercased
    pub fn content_type(&self) -> Option<String> {
        self.header("Content-Type").map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    /// Parse the request body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Deserialization(e.to_string()))
    }

    /// Get a query parameter by name
    pub fn query(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }
}

/// HTTP response wrapper
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }
}

impl From<&Error> for HttpResponse {
    fn from(error: &Error) -> Self {
        let body = serde_json::json!({ "message": error.to_string() });
        HttpResponse::new(error.status_code())
            .with_header("Content-Type".to_string(), "application/json".to_string())
            .with_body(body.to_string().into_bytes())
    }
}

/// Parameters carried by the current request: the query string merged with
/// the body. Body values overwrite query values of the same name.
///
/// URL-encoded bodies contribute strings; JSON object bodies contribute their
/// values as-is. Other content types leave the body out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams {
    params: IndexMap<String, Value>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_request(request: &HttpRequest) -> Result<Self, Error> {
        let mut params: IndexMap<String, Value> = request
            .query_params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        if !request.body.is_empty() {
            match request.content_type().as_deref() {
                Some("application/x-www-form-urlencoded") => {
                    for (k, v) in parse_form_map(&request.body)? {
                        params.insert(k, Value::String(v));
                    }
                }
                Some("application/json") => match request.json::<Value>()? {
                    Value::Object(map) => params.extend(map),
                    _ => {
                        return Err(Error::BadRequest(
                            "JSON request body must be an object".to_string(),
                        ));
                    }
                },
                other => {
                    sieve_log::debug!(
                        target: "sieve::request",
                        "ignoring request body with content type {:?}",
                        other
                    );
                }
            }
        }

        Ok(Self { params })
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.params.iter()
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.params
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
