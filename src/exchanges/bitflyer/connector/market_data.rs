use crate::core::errors::ExchangeError;
use crate::core::kernel::{QueryParams, RestClient};
use crate::exchanges::bitflyer::types::{Board, Chat, Execution, HealthStatus, Market, Page, Ticker};
use tracing::instrument;

/// Public market data endpoints; these work without credentials
#[derive(Debug, Clone)]
pub struct MarketData<R: RestClient> {
    rest: R,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self { rest: rest.clone() }
    }
}

/// Query carrying only `product_code`, omitted when empty
fn product_query(product_code: &str) -> QueryParams {
    let mut query = QueryParams::new();
    query.push_str("product_code", product_code);
    query
}

impl<R: RestClient> MarketData<R> {
    /// List tradable products
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_markets(&self) -> Result<Vec<Market>, ExchangeError> {
        self.rest.get_json("markets", &QueryParams::new()).await
    }

    /// Order book for a product; an empty product code means the exchange default
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_board(&self, product_code: &str) -> Result<Board, ExchangeError> {
        self.rest
            .get_json("board", &product_query(product_code))
            .await
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_ticker(&self, product_code: &str) -> Result<Ticker, ExchangeError> {
        self.rest
            .get_json("ticker", &product_query(product_code))
            .await
    }

    /// Public trade history, newest first
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_executions(
        &self,
        product_code: &str,
        page: Page,
    ) -> Result<Vec<Execution>, ExchangeError> {
        let mut query = product_query(product_code);
        page.apply(&mut query);

        self.rest.get_json("executions", &query).await
    }

    /// Exchange health for a product
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_health(&self, product_code: &str) -> Result<HealthStatus, ExchangeError> {
        self.rest
            .get_json("gethealth", &product_query(product_code))
            .await
    }

    /// Chat feed, optionally starting at `from_date`
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_chats(&self, from_date: Option<&str>) -> Result<Vec<Chat>, ExchangeError> {
        let mut query = QueryParams::new();
        query.push_opt("from_date", from_date);

        self.rest.get_json("getchats", &query).await
    }
}
