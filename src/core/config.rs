use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Credentials and endpoint overrides for a bitFlyer client
///
/// Empty credentials are valid: requests are then sent unsigned, which is
/// enough for the public market data endpoints.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub api_key: Secret<String>,
    pub secret_key: Secret<String>,
    pub base_url: Option<String>,
}

// Never expose secrets in serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ExchangeConfig", 3)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("secret_key", "[REDACTED]")?;
        state.serialize_field("base_url", &self.base_url)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            #[serde(default)]
            api_key: String,
            #[serde(default)]
            secret_key: String,
            #[serde(default)]
            base_url: Option<String>,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            secret_key: Secret::new(helper.secret_key),
            base_url: helper.base_url,
        })
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self::read_only()
    }
}

impl ExchangeConfig {
    /// Create a new configuration with API credentials
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            base_url: None,
        }
    }

    /// Read Lightning API credentials from the process environment
    ///
    /// With the usual `BITFLYER` prefix this reads `BITFLYER_API_KEY` and
    /// `BITFLYER_SECRET_KEY`, plus `BITFLYER_BASE_URL` to point at a proxy or
    /// test server. Key and secret must both be set; set them to empty strings
    /// for a public-only client.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let api_key_var = format!("{}_API_KEY", prefix);
        let secret_key_var = format!("{}_SECRET_KEY", prefix);
        let base_url_var = format!("{}_BASE_URL", prefix);

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;

        let secret_key = env::var(&secret_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(secret_key_var))?;

        let base_url = env::var(&base_url_var).ok();

        Ok(Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            base_url,
        })
    }

    /// Load `./.env` into the environment, then read it like `from_env`
    ///
    /// Variables already set in the process take precedence over the file.
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Same as `from_env_file` with an explicit file
    ///
    /// A missing file is not an error; the process environment is used as is.
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "cannot read bitFlyer credentials from '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Configuration for public endpoints only
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            api_key: Secret::new(String::new()),
            secret_key: Secret::new(String::new()),
            base_url: None,
        }
    }

    /// Both key and secret must be present for requests to be signed
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Key sent as `ACCESS-KEY`
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// HMAC key; never logged or serialized
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingEnvironmentVariable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_key_and_secret() {
        assert!(ExchangeConfig::new("key".to_string(), "secret".to_string()).has_credentials());
        assert!(!ExchangeConfig::new("key".to_string(), String::new()).has_credentials());
        assert!(!ExchangeConfig::new(String::new(), "secret".to_string()).has_credentials());
        assert!(!ExchangeConfig::read_only().has_credentials());
    }

    #[test]
    fn test_serialization_redacts_secrets() {
        let config = ExchangeConfig::new("my_key".to_string(), "my_secret".to_string())
            .base_url("http://localhost:8080".to_string());
        let json = serde_json::to_string(&config).unwrap();

        assert!(!json.contains("my_key"));
        assert!(!json.contains("my_secret"));
        assert!(json.contains("[REDACTED]"));
        assert!(json.contains("http://localhost:8080"));
    }

    #[test]
    fn test_deserialize_without_credentials() {
        let config: ExchangeConfig = serde_json::from_str(r#"{"base_url": null}"#).unwrap();
        assert!(!config.has_credentials());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_from_env_missing_variable() {
        let result = ExchangeConfig::from_env("BITFLYER_CONFIG_TEST_UNSET");
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvironmentVariable(var)) if var == "BITFLYER_CONFIG_TEST_UNSET_API_KEY"
        ));
    }

    #[cfg(feature = "env-file")]
    fn write_env_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("{}-{}.env", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[cfg(feature = "env-file")]
    #[test]
    fn test_env_file_supplies_credentials() {
        let path = write_env_file(
            "bitflyer-config",
            "BFENVFILE_API_KEY=file_key\nBFENVFILE_SECRET_KEY=file_secret\nBFENVFILE_BASE_URL=http://127.0.0.1:9000\n",
        );

        let config =
            ExchangeConfig::from_env_file_with_path("bfenvfile", path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(config.has_credentials());
        assert_eq!(config.api_key(), "file_key");
        assert_eq!(config.secret_key(), "file_secret");
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:9000"));
    }

    #[cfg(feature = "env-file")]
    #[test]
    fn test_missing_env_file_falls_back_to_environment() {
        let missing = env::temp_dir().join("bitflyer-config-does-not-exist.env");

        let result =
            ExchangeConfig::from_env_file_with_path("BFNOFILE", missing.to_str().unwrap());
        match result {
            Err(ConfigError::MissingEnvironmentVariable(var)) => {
                assert_eq!(var, "BFNOFILE_API_KEY");
            }
            other => panic!("expected missing variable, got {:?}", other),
        }
    }
}
