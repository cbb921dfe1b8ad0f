use crate::core::errors::ExchangeError;
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{instrument, trace};

/// A fully addressed, possibly signed request ready for dispatch
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl SignedRequest {
    /// Path component of the URL, the part covered by the signature
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Encoded query string without the leading '?'
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_signed(&self) -> bool {
        self.header("ACCESS-SIGN").is_some()
    }
}

/// Raw outcome of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Transport seam between the kernel and the HTTP stack
///
/// Implementations perform exactly one attempt and report transport-level
/// failures as `ExchangeError::NetworkError`. Any status code, including
/// errors, is a successful exchange at this layer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: SignedRequest) -> Result<HttpResponse, ExchangeError>;
}

/// `HttpTransport` backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.url.path()))]
    async fn execute(&self, request: SignedRequest) -> Result<HttpResponse, ExchangeError> {
        let mut builder = self.client.request(request.method, request.url);

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            ExchangeError::NetworkError(format!("Failed to read response body: {}", e))
        })?;

        trace!(status, "Response body: {}", body);

        Ok(HttpResponse { status, body })
    }
}
