use crate::core::errors::ExchangeError;
use crate::core::kernel::{hmac_sha256_hex, SignatureResult, Signer};
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;

pub const ACCESS_KEY: &str = "ACCESS-KEY";
pub const ACCESS_TIMESTAMP: &str = "ACCESS-TIMESTAMP";
pub const ACCESS_SIGN: &str = "ACCESS-SIGN";

/// bitFlyer Lightning request signer
///
/// The prehash string is `timestamp + method + path + body`, signed with
/// HMAC-SHA256 and hex encoded.
pub struct BitflyerSigner {
    api_key: String,
    secret_key: Secret<String>,
}

impl BitflyerSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key: Secret::new(secret_key),
        }
    }

    /// Generate the `ACCESS-SIGN` value for one request
    pub fn generate_signature(
        &self,
        timestamp: &str,
        method: &str,
        path: &str,
        body: &str,
    ) -> Result<String, ExchangeError> {
        let prehash = format!("{}{}{}{}", timestamp, method, path, body);
        hmac_sha256_hex(self.secret_key.expose_secret().as_bytes(), prehash.as_bytes())
    }
}

impl std::fmt::Debug for BitflyerSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitflyerSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl Signer for BitflyerSigner {
    fn sign_request(
        &self,
        method: &str,
        path: &str,
        body: &str,
        timestamp: u64,
    ) -> SignatureResult {
        let timestamp = timestamp.to_string();
        let signature = self.generate_signature(&timestamp, method, path, body)?;

        let mut headers = HashMap::new();
        headers.insert(ACCESS_KEY.to_string(), self.api_key.clone());
        headers.insert(ACCESS_TIMESTAMP.to_string(), timestamp);
        headers.insert(ACCESS_SIGN.to_string(), signature);
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    fn reference_signature(secret: &str, text: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(text.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_signature_matches_reference() {
        let signer = BitflyerSigner::new("key".to_string(), "secret".to_string());
        let headers = signer
            .sign_request("GET", "/v1/me/getbalance", "", 1_700_000_000)
            .unwrap();

        assert_eq!(headers[ACCESS_KEY], "key");
        assert_eq!(headers[ACCESS_TIMESTAMP], "1700000000");
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(
            headers[ACCESS_SIGN],
            reference_signature("secret", "1700000000GET/v1/me/getbalance")
        );
    }

    #[test]
    fn test_each_input_changes_signature() {
        let signer = BitflyerSigner::new("key".to_string(), "secret".to_string());
        let base = signer
            .generate_signature("1700000000", "POST", "/v1/me/sendchildorder", "{}")
            .unwrap();

        let variants = [
            signer.generate_signature("1700000001", "POST", "/v1/me/sendchildorder", "{}"),
            signer.generate_signature("1700000000", "GET", "/v1/me/sendchildorder", "{}"),
            signer.generate_signature("1700000000", "POST", "/v1/me/cancelchildorder", "{}"),
            signer.generate_signature("1700000000", "POST", "/v1/me/sendchildorder", "{\"a\":1}"),
            BitflyerSigner::new("key".to_string(), "other".to_string()).generate_signature(
                "1700000000",
                "POST",
                "/v1/me/sendchildorder",
                "{}",
            ),
        ];

        for variant in variants {
            assert_ne!(variant.unwrap(), base);
        }
    }

    #[test]
    fn test_debug_hides_secret() {
        let signer = BitflyerSigner::new("key".to_string(), "top_secret".to_string());
        assert!(!format!("{:?}", signer).contains("top_secret"));
    }
}
