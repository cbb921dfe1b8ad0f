//! Typed, signed REST client for the bitFlyer Lightning API
//!
//! ```rust,no_run
//! use bitflyer::BitflyerBuilder;
//!
//! # async fn example() -> Result<(), bitflyer::ExchangeError> {
//! let client = BitflyerBuilder::new().build()?;
//! let ticker = client.market.get_ticker("BTC_JPY").await?;
//! println!("best bid {}", ticker.best_bid);
//! # Ok(())
//! # }
//! ```
pub mod core;
pub mod exchanges;

pub use crate::core::{config::ExchangeConfig, errors::ExchangeError};
pub use exchanges::bitflyer::{BitflyerBuilder, BitflyerConnector};
