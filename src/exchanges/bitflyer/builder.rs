use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    HttpTransport, ReqwestTransport, RestClientBuilder, RestClientConfig, SignedRest,
};
use crate::exchanges::bitflyer::{connector::BitflyerConnector, signer::BitflyerSigner};
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://api.bitflyer.jp";
pub const API_VERSION: &str = "v1";

/// Builder for creating bitFlyer connectors
///
/// Requests are signed only when both key and secret are non-empty;
/// otherwise the connector talks to the public endpoints unauthenticated.
pub struct BitflyerBuilder {
    config: ExchangeConfig,
    api_version: String,
    rest_timeout: u64,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl Default for BitflyerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BitflyerBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::read_only(),
            api_version: API_VERSION.to_string(),
            rest_timeout: 30,
            user_agent: None,
            transport: None,
        }
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set API credentials
    pub fn with_credentials(mut self, api_key: String, secret_key: String) -> Self {
        let base_url = self.config.base_url.take();
        self.config = ExchangeConfig::new(api_key, secret_key);
        self.config.base_url = base_url;
        self
    }

    /// Set base URL for REST API
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    /// Set REST client timeout in seconds
    pub fn with_rest_timeout(mut self, timeout: u64) -> Self {
        self.rest_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    /// Use a custom transport instead of the default reqwest client
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Send through a caller-configured reqwest client (proxy, TLS, pool settings)
    ///
    /// The client's own timeout and user agent apply; `with_rest_timeout` and
    /// `with_user_agent` are ignored.
    pub fn with_http_client(self, client: reqwest::Client) -> Self {
        self.with_transport(Arc::new(ReqwestTransport::from_client(client)))
    }

    /// Build the signing rest client without the endpoint grouping
    pub fn build_rest(self) -> Result<SignedRest, ExchangeError> {
        let base_url = self
            .config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut rest_config = RestClientConfig::new(base_url, "bitflyer".to_string())
            .with_api_version(self.api_version)
            .with_timeout(self.rest_timeout);
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let mut rest_builder = RestClientBuilder::new(rest_config);

        if self.config.has_credentials() {
            let signer = Arc::new(BitflyerSigner::new(
                self.config.api_key().to_string(),
                self.config.secret_key().to_string(),
            ));
            rest_builder = rest_builder.with_signer(signer);
        }

        if let Some(transport) = self.transport {
            rest_builder = rest_builder.with_transport(transport);
        }

        rest_builder.build()
    }

    /// Build a bitFlyer connector
    pub fn build(self) -> Result<BitflyerConnector, ExchangeError> {
        Ok(BitflyerConnector::new(self.build_rest()?))
    }
}

/// Create a bitFlyer connector from an exchange configuration
pub fn build_connector(config: ExchangeConfig) -> Result<BitflyerConnector, ExchangeError> {
    BitflyerBuilder::new().with_config(config).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_credentials_has_no_signer() {
        let rest = BitflyerBuilder::new().build_rest().unwrap();
        assert!(!rest.has_signer());
        assert_eq!(rest.config().base_url, DEFAULT_BASE_URL);
        assert_eq!(rest.config().api_version, API_VERSION);
    }

    #[test]
    fn test_build_with_credentials_signs() {
        let rest = BitflyerBuilder::new()
            .with_credentials("key".to_string(), "secret".to_string())
            .build_rest()
            .unwrap();
        assert!(rest.has_signer());
    }

    #[test]
    fn test_half_configured_credentials_do_not_sign() {
        let config = ExchangeConfig::new("key".to_string(), String::new());
        let rest = BitflyerBuilder::new()
            .with_config(config)
            .build_rest()
            .unwrap();
        assert!(!rest.has_signer());
    }

    #[test]
    fn test_credentials_keep_base_url_override() {
        let rest = BitflyerBuilder::new()
            .with_base_url("http://127.0.0.1:9000".to_string())
            .with_credentials("key".to_string(), "secret".to_string())
            .with_rest_timeout(5)
            .build_rest()
            .unwrap();
        assert_eq!(rest.config().base_url, "http://127.0.0.1:9000");
        assert_eq!(rest.config().timeout_seconds, 5);
    }

    #[test]
    fn test_custom_http_client_is_accepted() {
        let client = reqwest::Client::builder()
            .user_agent("custom-agent/1.0")
            .build()
            .unwrap();
        let rest = BitflyerBuilder::new()
            .with_credentials("key".to_string(), "secret".to_string())
            .with_http_client(client)
            .build_rest()
            .unwrap();
        assert!(rest.has_signer());
        assert_eq!(rest.config().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_build_connector_rejects_bad_base_url() {
        let config = ExchangeConfig::read_only().base_url("::not-a-url".to_string());
        let result = build_connector(config);
        assert!(matches!(result, Err(ExchangeError::ConfigurationError(_))));
    }
}
