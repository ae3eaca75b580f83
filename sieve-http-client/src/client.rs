//! HTTP client implementation.

use http::Method;
use reqwest::blocking::Request;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{HttpClientConfig, HttpClientError, RequestBuilder, Response, Result};

/// Blocking HTTP client.
///
/// Every call blocks the current thread until the response body has been
/// read or the configured timeout elapses. Do not call it from inside an
/// async runtime worker; use `spawn_blocking` there.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::blocking::Client,
    config: Arc<HttpClientConfig>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let inner = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent.as_str())
            .gzip(config.compression)
            .brotli(config.compression)
            .redirect(redirect)
            .build()?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Create a client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(HttpClientConfig::default())
    }

    pub fn inner(&self) -> &reqwest::blocking::Client {
        &self.inner
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    pub fn get(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::GET, url.into())
    }

    pub fn post(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::POST, url.into())
    }

    /// Send a built request and read the full response body.
    pub(crate) fn execute(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        let timeout = request.timeout().copied().unwrap_or(self.config.timeout);

        debug!(%method, %url, "sending request");

        let response = self
            .inner
            .execute(request)
            .and_then(Response::from_reqwest)
            .map_err(|e| classify(e, timeout))
            .inspect_err(|e| warn!(%method, %url, error = %e, "request failed"))?;

        debug!(%method, %url, status = %response.status(), "received response");
        Ok(response)
    }
}

fn classify(error: reqwest::Error, timeout: Duration) -> HttpClientError {
    if error.is_timeout() {
        HttpClientError::Timeout(timeout)
    } else if error.is_connect() {
        HttpClientError::Connection(error.to_string())
    } else {
        HttpClientError::Http(error)
    }
}
