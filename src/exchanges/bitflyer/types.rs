use crate::core::errors::ExchangeError;
use crate::core::kernel::QueryParams;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Request enums

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChildOrderType {
    Limit,
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Fok,
}

/// Special order method used by parent orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderMethod {
    Simple,
    Ifd,
    Oco,
    Ifdoco,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionType {
    Limit,
    Market,
    Stop,
    StopLimit,
    Trail,
}

/// State filter shared by child and parent order listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Active,
    Completed,
    Canceled,
    Expired,
    Rejected,
}

impl OrderState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
            Self::Expired => "EXPIRED",
            Self::Rejected => "REJECTED",
        }
    }
}

// Paging and filters

/// Cursor triple for the history endpoints
///
/// Zero means "not set"; only non-zero fields are sent, in the order
/// count, before, after.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub count: u64,
    pub before: u64,
    pub after: u64,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    pub fn before(mut self, before: u64) -> Self {
        self.before = before;
        self
    }

    pub fn after(mut self, after: u64) -> Self {
        self.after = after;
        self
    }

    pub fn apply(&self, query: &mut QueryParams) {
        query
            .push_nonzero("count", self.count)
            .push_nonzero("before", self.before)
            .push_nonzero("after", self.after);
    }
}

/// Filters for `me/getchildorders`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildOrderFilter {
    pub product_code: String,
    pub page: Page,
    pub child_order_state: Option<OrderState>,
    pub parent_order_id: Option<String>,
}

impl ChildOrderFilter {
    pub fn new(product_code: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn with_state(mut self, state: OrderState) -> Self {
        self.child_order_state = Some(state);
        self
    }

    pub fn with_parent_order_id(mut self, parent_order_id: impl Into<String>) -> Self {
        self.parent_order_id = Some(parent_order_id.into());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push_str("product_code", &self.product_code);
        self.page.apply(&mut query);
        query
            .push_opt("child_order_state", self.child_order_state.map(OrderState::as_str))
            .push_opt("parent_order_id", self.parent_order_id.as_deref());
        query
    }
}

/// Filters for `me/getparentorders`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentOrderFilter {
    pub product_code: String,
    pub page: Page,
    pub parent_order_state: Option<OrderState>,
}

impl ParentOrderFilter {
    pub fn new(product_code: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn with_state(mut self, state: OrderState) -> Self {
        self.parent_order_state = Some(state);
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push_str("product_code", &self.product_code);
        self.page.apply(&mut query);
        query.push_opt(
            "parent_order_state",
            self.parent_order_state.map(OrderState::as_str),
        );
        query
    }
}

/// Filters for `me/getexecutions`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionFilter {
    pub product_code: String,
    pub page: Page,
    pub child_order_id: Option<String>,
    pub child_order_acceptance_id: Option<String>,
}

impl ExecutionFilter {
    pub fn new(product_code: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn with_child_order_id(mut self, child_order_id: impl Into<String>) -> Self {
        self.child_order_id = Some(child_order_id.into());
        self
    }

    pub fn with_child_order_acceptance_id(mut self, acceptance_id: impl Into<String>) -> Self {
        self.child_order_acceptance_id = Some(acceptance_id.into());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push_str("product_code", &self.product_code);
        self.page.apply(&mut query);
        query
            .push_opt("child_order_id", self.child_order_id.as_deref())
            .push_opt(
                "child_order_acceptance_id",
                self.child_order_acceptance_id.as_deref(),
            );
        query
    }
}

// Public API responses

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub product_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardLevel {
    pub price: f64,
    pub size: f64,
}

/// Order book snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub mid_price: f64,
    pub bids: Vec<BoardLevel>,
    pub asks: Vec<BoardLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub product_code: String,
    #[serde(default)]
    pub timestamp: String,
    pub tick_id: i64,
    pub best_bid: f64,
    pub best_ask: f64,
    #[serde(default)]
    pub best_bid_size: f64,
    #[serde(default)]
    pub best_ask_size: f64,
    #[serde(default)]
    pub total_bid_depth: f64,
    #[serde(default)]
    pub total_ask_depth: f64,
    pub ltp: f64, // Last traded price
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub volume_by_product: f64,
}

/// Public trade history entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub id: i64,
    #[serde(default)]
    pub side: String, // BUY, SELL, or empty during itayose
    pub price: f64,
    pub size: f64,
    pub exec_date: String,
    #[serde(default)]
    pub buy_child_order_acceptance_id: String,
    #[serde(default)]
    pub sell_child_order_acceptance_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String, // NORMAL, BUSY, VERY BUSY, SUPER BUSY, NO ORDER, STOP
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub nickname: String,
    pub message: String,
    pub date: String,
}

// Account responses

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub currency_code: String,
    pub amount: f64,
    pub available: f64,
}

/// Margin status, amounts in JPY
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collateral {
    pub collateral: i64,
    pub open_position_pnl: i64,
    pub require_collateral: i64,
    pub keep_rate: f64,
}

/// Deposit address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "type")]
    pub address_type: String,
    pub currency_code: String,
    pub address: String,
}

/// Crypto deposit record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinIn {
    pub id: i64,
    #[serde(default)]
    pub order_id: String,
    pub currency_code: String,
    pub amount: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tx_hash: String,
    pub status: String,
    pub event_date: String,
}

/// Crypto transfer record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinOut {
    pub id: i64,
    #[serde(default)]
    pub order_id: String,
    pub currency_code: String,
    pub amount: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tx_hash: String,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub additional_fee: f64,
    pub status: String,
    pub event_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: i64,
    #[serde(default)]
    pub is_verified: bool,
    pub bank_name: String,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub account_type: String,
    pub account_number: String,
    #[serde(default)]
    pub account_name: String,
}

/// Cash deposit or withdrawal record, amounts in whole currency units
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashMovement {
    pub id: i64,
    #[serde(default)]
    pub order_id: String,
    pub currency_code: String,
    pub amount: i64,
    pub status: String,
    pub event_date: String,
}

pub type Deposit = CashMovement;
pub type Withdrawal = CashMovement;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawRequest {
    pub currency_code: String,
    pub bank_account_id: i64,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>, // Two-factor authentication code
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WithdrawResponse {
    pub message_id: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub error_message: String,
    /// Payload of unspecified structure, kept raw until asked for
    pub data: Option<Value>,
}

impl WithdrawResponse {
    /// Decode the raw `data` payload into a caller-chosen shape
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<Option<T>, ExchangeError> {
        self.data
            .clone()
            .filter(|value| !value.is_null())
            .map(serde_json::from_value)
            .transpose()
            .map_err(ExchangeError::DeserializationError)
    }
}

// Trading requests

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildOrderRequest {
    pub product_code: String,
    pub child_order_type: ChildOrderType,
    pub side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute_to_expire: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
}

impl ChildOrderRequest {
    pub fn limit(product_code: impl Into<String>, side: Side, price: f64, size: f64) -> Self {
        Self {
            product_code: product_code.into(),
            child_order_type: ChildOrderType::Limit,
            side,
            price: Some(price),
            size,
            minute_to_expire: None,
            time_in_force: None,
        }
    }

    pub fn market(product_code: impl Into<String>, side: Side, size: f64) -> Self {
        Self {
            product_code: product_code.into(),
            child_order_type: ChildOrderType::Market,
            side,
            price: None,
            size,
            minute_to_expire: None,
            time_in_force: None,
        }
    }

    pub fn with_minute_to_expire(mut self, minutes: u32) -> Self {
        self.minute_to_expire = Some(minutes);
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        require_positive("size", self.size)?;
        if let Some(price) = self.price {
            require_positive("price", price)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildOrderAcceptance {
    pub child_order_acceptance_id: String,
}

/// Cancel one child order by exchange order id or acceptance id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelChildOrderRequest {
    pub product_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_order_acceptance_id: Option<String>,
}

impl CancelChildOrderRequest {
    pub fn by_order_id(product_code: impl Into<String>, child_order_id: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            child_order_id: Some(child_order_id.into()),
            child_order_acceptance_id: None,
        }
    }

    pub fn by_acceptance_id(
        product_code: impl Into<String>,
        acceptance_id: impl Into<String>,
    ) -> Self {
        Self {
            product_code: product_code.into(),
            child_order_id: None,
            child_order_acceptance_id: Some(acceptance_id.into()),
        }
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        require_identifier(
            self.child_order_id.as_deref(),
            self.child_order_acceptance_id.as_deref(),
            "child_order_id or child_order_acceptance_id",
        )
    }
}

/// One leg of a special order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentOrderParameter {
    pub product_code: String,
    pub condition_type: ConditionType,
    pub side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
}

impl ParentOrderParameter {
    pub fn validate(&self) -> Result<(), ExchangeError> {
        require_positive("size", self.size)?;
        for (name, value) in [
            ("price", self.price),
            ("trigger_price", self.trigger_price),
            ("offset", self.offset),
        ] {
            if let Some(value) = value {
                require_positive(name, value)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentOrderRequest {
    pub order_method: OrderMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute_to_expire: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    pub parameters: Vec<ParentOrderParameter>,
}

impl ParentOrderRequest {
    /// Number of legs each order method requires
    const fn expected_legs(method: OrderMethod) -> usize {
        match method {
            OrderMethod::Simple => 1,
            OrderMethod::Ifd | OrderMethod::Oco => 2,
            OrderMethod::Ifdoco => 3,
        }
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        let expected = Self::expected_legs(self.order_method);
        if self.parameters.len() != expected {
            return Err(ExchangeError::InvalidParameters(format!(
                "{:?} orders take {} parameter(s), got {}",
                self.order_method,
                expected,
                self.parameters.len()
            )));
        }
        for leg in &self.parameters {
            leg.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentOrderAcceptance {
    pub parent_order_acceptance_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelParentOrderRequest {
    pub product_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_order_acceptance_id: Option<String>,
}

impl CancelParentOrderRequest {
    pub fn by_order_id(
        product_code: impl Into<String>,
        parent_order_id: impl Into<String>,
    ) -> Self {
        Self {
            product_code: product_code.into(),
            parent_order_id: Some(parent_order_id.into()),
            parent_order_acceptance_id: None,
        }
    }

    pub fn by_acceptance_id(
        product_code: impl Into<String>,
        acceptance_id: impl Into<String>,
    ) -> Self {
        Self {
            product_code: product_code.into(),
            parent_order_id: None,
            parent_order_acceptance_id: Some(acceptance_id.into()),
        }
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        require_identifier(
            self.parent_order_id.as_deref(),
            self.parent_order_acceptance_id.as_deref(),
            "parent_order_id or parent_order_acceptance_id",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelAllChildOrdersRequest {
    pub product_code: String,
}

// Trading responses

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildOrder {
    pub id: i64,
    pub child_order_id: String,
    pub product_code: String,
    pub side: String,
    pub child_order_type: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub average_price: f64,
    pub size: f64,
    pub child_order_state: String,
    #[serde(default)]
    pub expire_date: String,
    #[serde(default)]
    pub child_order_date: String,
    pub child_order_acceptance_id: String,
    #[serde(default)]
    pub outstanding_size: f64,
    #[serde(default)]
    pub cancel_size: f64,
    #[serde(default)]
    pub executed_size: f64,
    #[serde(default)]
    pub total_commission: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentOrder {
    pub id: i64,
    pub parent_order_id: String,
    pub product_code: String,
    pub side: String,
    pub parent_order_type: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub average_price: f64,
    pub size: f64,
    pub parent_order_state: String,
    #[serde(default)]
    pub expire_date: String,
    #[serde(default)]
    pub parent_order_date: String,
    pub parent_order_acceptance_id: String,
    #[serde(default)]
    pub outstanding_size: f64,
    #[serde(default)]
    pub cancel_size: f64,
    #[serde(default)]
    pub executed_size: f64,
    #[serde(default)]
    pub total_commission: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentOrderDetailParameter {
    pub product_code: String,
    pub condition_type: String,
    pub side: String,
    #[serde(default)]
    pub price: f64,
    pub size: f64,
    #[serde(default)]
    pub trigger_price: f64,
    #[serde(default)]
    pub offset: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentOrderDetail {
    pub id: i64,
    pub parent_order_id: String,
    pub order_method: String,
    #[serde(default)]
    pub expire_date: String,
    #[serde(default)]
    pub time_in_force: String,
    pub parameters: Vec<ParentOrderDetailParameter>,
    pub parent_order_acceptance_id: String,
}

/// Own execution, as listed by `me/getexecutions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MyExecution {
    pub id: i64,
    pub child_order_id: String,
    pub side: String,
    pub price: f64,
    pub size: f64,
    #[serde(default)]
    pub commission: i64,
    pub exec_date: String,
    pub child_order_acceptance_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub product_code: String,
    pub side: String,
    pub price: f64,
    pub size: f64,
    #[serde(default)]
    pub commission: i64,
    #[serde(default)]
    pub swap_point_accumulate: i64,
    #[serde(default)]
    pub require_collateral: i64,
    pub open_date: String,
    #[serde(default)]
    pub leverage: i64,
    #[serde(default)]
    pub pnl: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TradingCommission {
    pub commission_rate: f64,
}

/// NaN and infinities would be written as `null`, so they are rejected here
fn require_positive(name: &str, value: f64) -> Result<(), ExchangeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ExchangeError::InvalidParameters(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

/// At least one of two identifiers must be present and non-empty
pub(crate) fn require_identifier(
    primary: Option<&str>,
    secondary: Option<&str>,
    what: &str,
) -> Result<(), ExchangeError> {
    let present = |id: Option<&str>| id.is_some_and(|id| !id.is_empty());
    if present(primary) || present(secondary) {
        Ok(())
    } else {
        Err(ExchangeError::InvalidParameters(format!("{} is required", what)))
    }
}
