use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// Result type for signing operations: headers to attach to the request
pub type SignatureResult = Result<HashMap<String, String>, ExchangeError>;

/// Signer trait for request authentication
///
/// The kernel calls a signer once per request, after the URL and body are
/// final, so the signature always covers exactly what goes on the wire.
pub trait Signer: Send + Sync {
    /// Sign a request and return the headers to include
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST)
    /// * `path` - Path component of the request URL, without scheme, host or query
    /// * `body` - Exact request body text, empty when there is none
    /// * `timestamp` - Unix time in seconds
    fn sign_request(&self, method: &str, path: &str, body: &str, timestamp: u64)
        -> SignatureResult;
}

/// Hex-encoded HMAC-SHA256 of `payload` keyed by `secret`
pub fn hmac_sha256_hex(secret: &[u8], payload: &[u8]) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;

    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha256_rfc4231_case_2() {
        let digest = hmac_sha256_hex(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_accepts_empty_secret() {
        let digest = hmac_sha256_hex(b"", b"payload").unwrap();
        assert_eq!(digest.len(), 64);
    }
}
