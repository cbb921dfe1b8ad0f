use crate::core::kernel::{RestClient, SignedRest};

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// bitFlyer connector that groups the endpoint catalog by concern
///
/// All three groups share one rest client; cloning the connector is cheap
/// and clones can be used from concurrent tasks.
#[derive(Debug, Clone)]
pub struct BitflyerConnector<R: RestClient = SignedRest> {
    pub market: MarketData<R>,
    pub account: Account<R>,
    pub trading: Trading<R>,
}

impl<R: RestClient + Clone> BitflyerConnector<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
            account: Account::new(&rest),
            trading: Trading::new(&rest),
        }
    }
}
