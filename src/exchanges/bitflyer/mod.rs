pub mod builder;
pub mod connector;
pub mod signer;
pub mod types;

// Re-export main components
pub use builder::{build_connector, BitflyerBuilder, API_VERSION, DEFAULT_BASE_URL};
pub use connector::{Account, BitflyerConnector, MarketData, Trading};
pub use signer::BitflyerSigner;
pub use types::{
    Address, Balance, BankAccount, Board, BoardLevel, CancelAllChildOrdersRequest,
    CancelChildOrderRequest, CancelParentOrderRequest, CashMovement, Chat, ChildOrder,
    ChildOrderAcceptance, ChildOrderFilter, ChildOrderRequest, ChildOrderType, CoinIn, CoinOut,
    Collateral, ConditionType, Deposit, Execution, ExecutionFilter, HealthStatus, Market,
    MyExecution, OrderMethod, OrderState, Page, ParentOrder, ParentOrderAcceptance,
    ParentOrderDetail, ParentOrderDetailParameter, ParentOrderFilter, ParentOrderParameter,
    ParentOrderRequest, Position, Side, Ticker, TimeInForce, TradingCommission, WithdrawRequest,
    WithdrawResponse, Withdrawal,
};
