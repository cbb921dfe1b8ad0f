//! Transport kernel shared by every endpoint
//!
//! The kernel knows nothing about individual endpoints. It turns
//! `(method, endpoint, query, body)` into a signed request, dispatches it over
//! an [`HttpTransport`], rejects any status other than 200 and decodes the
//! body into the caller's type.
//!
//! # Components
//!
//! - `RestClient` / `SignedRest`: the generic execute operation
//! - `Signer`: pluggable request authentication
//! - `HttpTransport` / `ReqwestTransport`: one HTTP exchange per call
//! - `QueryParams`: query strings that only carry values the caller set
//! - `with_deadline` / `with_timeout`: caller-side cancellation
//!
//! # Example
//! ```rust,no_run
//! use bitflyer::core::kernel::*;
//!
//! # async fn example() -> Result<(), bitflyer::ExchangeError> {
//! let config = RestClientConfig::new("https://api.bitflyer.jp".to_string(), "bitflyer".to_string());
//! let rest = RestClientBuilder::new(config).build()?;
//!
//! let mut query = QueryParams::new();
//! query.push_str("product_code", "BTC_JPY");
//! let ticker: serde_json::Value = rest.get_json("ticker", &query).await?;
//! # Ok(())
//! # }
//! ```
pub mod deadline;
pub mod query;
pub mod rest;
pub mod signer;
pub mod transport;

pub use deadline::{with_deadline, with_timeout};
pub use query::QueryParams;
pub use rest::{RestClient, RestClientBuilder, RestClientConfig, SignedRest};
pub use signer::{hmac_sha256_hex, SignatureResult, Signer};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, SignedRequest};
