use crate::core::errors::ExchangeError;
use crate::core::kernel::{QueryParams, RestClient};
use crate::exchanges::bitflyer::types::{
    Address, Balance, BankAccount, CoinIn, CoinOut, Collateral, Deposit, Page, WithdrawRequest,
    WithdrawResponse, Withdrawal,
};
use tracing::instrument;

/// Private account, asset and funding endpoints
#[derive(Debug, Clone)]
pub struct Account<R: RestClient> {
    rest: R,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R) -> Self {
        Self { rest: rest.clone() }
    }
}

fn paged_query(page: Page, message_id: Option<&str>) -> QueryParams {
    let mut query = QueryParams::new();
    page.apply(&mut query);
    query.push_opt("message_id", message_id);
    query
}

impl<R: RestClient> Account<R> {
    /// Endpoints the API key is allowed to call
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_permissions(&self) -> Result<Vec<String>, ExchangeError> {
        self.rest
            .get_json("me/getpermissions", &QueryParams::new())
            .await
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_balance(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.rest
            .get_json("me/getbalance", &QueryParams::new())
            .await
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_collateral(&self) -> Result<Collateral, ExchangeError> {
        self.rest
            .get_json("me/getcollateral", &QueryParams::new())
            .await
    }

    /// Crypto deposit addresses
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_addresses(&self) -> Result<Vec<Address>, ExchangeError> {
        self.rest
            .get_json("me/getaddresses", &QueryParams::new())
            .await
    }

    /// Crypto deposit history
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_coin_ins(&self, page: Page) -> Result<Vec<CoinIn>, ExchangeError> {
        self.rest
            .get_json("me/getcoinins", &paged_query(page, None))
            .await
    }

    /// Crypto transfer history, optionally narrowed to one withdrawal message
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_coin_outs(
        &self,
        page: Page,
        message_id: Option<&str>,
    ) -> Result<Vec<CoinOut>, ExchangeError> {
        self.rest
            .get_json("me/getcoinouts", &paged_query(page, message_id))
            .await
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_bank_accounts(&self) -> Result<Vec<BankAccount>, ExchangeError> {
        self.rest
            .get_json("me/getbankaccounts", &QueryParams::new())
            .await
    }

    /// Cash deposit history
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_deposits(&self, page: Page) -> Result<Vec<Deposit>, ExchangeError> {
        self.rest
            .get_json("me/getdeposits", &paged_query(page, None))
            .await
    }

    /// Withdraw cash to a registered bank account
    #[instrument(skip(self, request), fields(exchange = "bitflyer", currency = %request.currency_code))]
    pub async fn withdraw(
        &self,
        request: &WithdrawRequest,
    ) -> Result<WithdrawResponse, ExchangeError> {
        if request.amount <= 0 {
            return Err(ExchangeError::InvalidParameters(
                "withdrawal amount must be positive".to_string(),
            ));
        }

        self.rest.post_json("me/withdraw", request).await
    }

    /// Cash withdrawal history, optionally narrowed to one withdrawal message
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_withdrawals(
        &self,
        page: Page,
        message_id: Option<&str>,
    ) -> Result<Vec<Withdrawal>, ExchangeError> {
        self.rest
            .get_json("me/getwithdrawals", &paged_query(page, message_id))
            .await
    }
}
