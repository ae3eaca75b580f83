//! # Sieve HTTP Client
//!
//! A small blocking HTTP client used by Sieve rules that must call out to a
//! remote service (such as CAPTCHA token verification). Built on
//! `reqwest::blocking` with bounded timeouts and redirect limits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sieve_http_client::{HttpClient, HttpClientConfig};
//! use std::time::Duration;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpClientConfig::builder()
//!         .timeout(Duration::from_secs(60))
//!         .max_redirects(10)
//!         .build();
//!     let client = HttpClient::new(config)?;
//!
//!     let response = client
//!         .post("https://www.google.com/recaptcha/api/siteverify")
//!         .form(&[("secret", "server-secret"), ("response", "client-token")])
//!         .send()?;
//!
//!     let body: serde_json::Value = response.json()?;
//!     println!("success = {}", body["success"]);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;

pub use client::HttpClient;
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use error::{HttpClientError, Result};
pub use request::RequestBuilder;
pub use response::Response;

pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use url::Url;
