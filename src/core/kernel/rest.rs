use crate::core::errors::ExchangeError;
use crate::core::kernel::query::QueryParams;
use crate::core::kernel::signer::Signer;
use crate::core::kernel::transport::{HttpTransport, ReqwestTransport, SignedRequest};
use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// REST client trait for making HTTP requests
///
/// `execute` is the single build → sign → send → decode operation every
/// endpoint is an instance of. The remaining methods are conveniences over it.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Execute one request and decode the body into `T`
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `endpoint` - Endpoint subpath below the versioned base path, e.g. `me/getbalance`
    /// * `query` - Query parameters; only set values are present
    /// * `body` - Serialized JSON body, if any
    async fn execute<T: DeserializeOwned + Send>(
        &self,
        method: Method,
        endpoint: &str,
        query: &QueryParams,
        body: Option<String>,
    ) -> Result<T, ExchangeError>;

    /// Execute one request whose success carries no payload worth decoding
    async fn execute_unit(
        &self,
        method: Method,
        endpoint: &str,
        query: &QueryParams,
        body: Option<String>,
    ) -> Result<(), ExchangeError>;

    /// GET with a strongly-typed response
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        query: &QueryParams,
    ) -> Result<T, ExchangeError> {
        self.execute(Method::GET, endpoint, query, None).await
    }

    /// POST a JSON body with a strongly-typed response
    async fn post_json<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync,
    {
        let body = serde_json::to_string(body).map_err(ExchangeError::SerializationError)?;
        self.execute(Method::POST, endpoint, &QueryParams::new(), Some(body))
            .await
    }

    /// POST a JSON body, ignoring the response payload
    async fn post_unit<B>(&self, endpoint: &str, body: &B) -> Result<(), ExchangeError>
    where
        B: Serialize + Sync,
    {
        let body = serde_json::to_string(body).map_err(ExchangeError::SerializationError)?;
        self.execute_unit(Method::POST, endpoint, &QueryParams::new(), Some(body))
            .await
    }
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API, scheme and host plus an optional path prefix
    pub base_url: String,
    /// Version segment inserted between the base path and every endpoint
    pub api_version: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds, enforced by the transport
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the API
    /// * `exchange_name` - Name of the exchange
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            api_version: "v1".to_string(),
            exchange_name,
            timeout_seconds: 30,
            user_agent: concat!("bitflyer-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the API version segment
    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
            transport: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Replace the default reqwest transport
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the REST client
    pub fn build(self) -> Result<SignedRest, ExchangeError> {
        let mut base = Url::parse(&self.config.base_url).map_err(|e| {
            ExchangeError::ConfigurationError(format!(
                "Invalid base URL '{}': {}",
                self.config.base_url, e
            ))
        })?;

        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ExchangeError::ConfigurationError(format!(
                "Base URL '{}' must be an http(s) URL",
                self.config.base_url
            )));
        }
        base.set_query(None);
        base.set_fragment(None);

        validate_subpath(&self.config.api_version).map_err(|reason| {
            ExchangeError::ConfigurationError(format!(
                "Invalid API version '{}': {}",
                self.config.api_version, reason
            ))
        })?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                Duration::from_secs(self.config.timeout_seconds),
                &self.config.user_agent,
            )?),
        };

        Ok(SignedRest {
            config: self.config,
            base,
            transport,
            signer: self.signer,
        })
    }
}

/// `RestClient` that signs requests when a signer is configured
#[derive(Clone)]
pub struct SignedRest {
    config: RestClientConfig,
    base: Url,
    transport: Arc<dyn HttpTransport>,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for SignedRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl SignedRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    /// Current Unix time in seconds
    fn get_timestamp() -> Result<u64, ExchangeError> {
        u64::try_from(chrono::Utc::now().timestamp()).map_err(|_| {
            ExchangeError::AuthError("System clock is before the Unix epoch".to_string())
        })
    }

    /// Build the full URL for an endpoint: base path + version + endpoint + query
    fn build_url(&self, endpoint: &str, query: &QueryParams) -> Result<Url, ExchangeError> {
        validate_subpath(endpoint).map_err(|reason| {
            ExchangeError::InvalidRequest(format!("Invalid endpoint '{}': {}", endpoint, reason))
        })?;

        let path = format!(
            "{}/{}/{}",
            self.base.path().trim_end_matches('/'),
            self.config.api_version,
            endpoint
        );

        let mut url = self.base.clone();
        url.set_path(&path);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        Ok(url)
    }

    /// Build a fully addressed request, signing it when credentials are configured
    pub fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        query: &QueryParams,
        body: Option<String>,
    ) -> Result<SignedRequest, ExchangeError> {
        let url = self.build_url(endpoint, query)?;

        let mut headers = HashMap::new();
        if let Some(signer) = &self.signer {
            let timestamp = Self::get_timestamp()?;
            headers = signer.sign_request(
                method.as_str(),
                url.path(),
                body.as_deref().unwrap_or_default(),
                timestamp,
            )?;
        } else if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        Ok(SignedRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Send a request and return the body of a 200 response
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        query: &QueryParams,
        body: Option<String>,
    ) -> Result<String, ExchangeError> {
        let request = self.build_request(method, endpoint, query, body)?;
        debug!(url = %request.url, signed = request.is_signed(), "request URL");

        let response = self.transport.execute(request).await?;

        if response.status != 200 {
            warn!(status = response.status, "request rejected");
            return Err(ExchangeError::ApiError {
                code: response.status,
                message: response.body,
            });
        }

        Ok(response.body)
    }
}

#[async_trait]
impl RestClient for SignedRest {
    #[instrument(skip(self, query, body), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn execute<T: DeserializeOwned + Send>(
        &self,
        method: Method,
        endpoint: &str,
        query: &QueryParams,
        body: Option<String>,
    ) -> Result<T, ExchangeError> {
        let text = self.send(method, endpoint, query, body).await?;
        serde_json::from_str(&text).map_err(ExchangeError::DeserializationError)
    }

    #[instrument(skip(self, query, body), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn execute_unit(
        &self,
        method: Method,
        endpoint: &str,
        query: &QueryParams,
        body: Option<String>,
    ) -> Result<(), ExchangeError> {
        self.send(method, endpoint, query, body).await.map(|_| ())
    }
}

/// Endpoint subpaths are fixed literals: lowercase segments joined by '/'
fn validate_subpath(subpath: &str) -> Result<(), &'static str> {
    if subpath.is_empty() {
        return Err("empty path");
    }

    for segment in subpath.split('/') {
        if segment.is_empty() {
            return Err("empty path segment");
        }
        if segment == "." || segment == ".." {
            return Err("relative path segment");
        }
        if !segment
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        {
            return Err("unexpected character");
        }
    }

    Ok(())
}
