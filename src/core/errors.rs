use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request cancelled: {0}")]
    Cancelled(String),

    #[error("API error: {code} - {message}")]
    ApiError { code: u16, message: String },

    #[error("Failed to decode response: {0}")]
    DeserializationError(#[source] serde_json::Error),

    #[error("Failed to serialize request body: {0}")]
    SerializationError(#[source] serde_json::Error),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Authentication error: {0}")]
    AuthError(String),
}

impl ExchangeError {
    /// HTTP status code carried by a rejected response, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_only_for_api_errors() {
        let err = ExchangeError::ApiError {
            code: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.to_string(), "API error: 401 - unauthorized");

        let err = ExchangeError::NetworkError("connection refused".to_string());
        assert_eq!(err.status_code(), None);
    }
}
