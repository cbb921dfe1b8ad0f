use crate::core::errors::ExchangeError;
use crate::core::kernel::{QueryParams, RestClient};
use crate::exchanges::bitflyer::types::{
    require_identifier, CancelAllChildOrdersRequest, CancelChildOrderRequest,
    CancelParentOrderRequest, ChildOrder, ChildOrderAcceptance, ChildOrderFilter,
    ChildOrderRequest, ExecutionFilter, MyExecution, ParentOrder, ParentOrderAcceptance,
    ParentOrderDetail, ParentOrderFilter, ParentOrderRequest, Position, TradingCommission,
};
use tracing::instrument;

/// Private order management endpoints
#[derive(Debug, Clone)]
pub struct Trading<R: RestClient> {
    rest: R,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &R) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<R: RestClient> Trading<R> {
    /// Place a simple order; the acceptance id resolves to an order id later
    #[instrument(skip(self, order), fields(exchange = "bitflyer", product = %order.product_code))]
    pub async fn send_child_order(
        &self,
        order: &ChildOrderRequest,
    ) -> Result<ChildOrderAcceptance, ExchangeError> {
        order.validate()?;
        self.rest.post_json("me/sendchildorder", order).await
    }

    #[instrument(skip(self, request), fields(exchange = "bitflyer", product = %request.product_code))]
    pub async fn cancel_child_order(
        &self,
        request: &CancelChildOrderRequest,
    ) -> Result<(), ExchangeError> {
        request.validate()?;
        self.rest.post_unit("me/cancelchildorder", request).await
    }

    /// Place a special (conditional) order
    #[instrument(skip(self, order), fields(exchange = "bitflyer", method = ?order.order_method))]
    pub async fn send_parent_order(
        &self,
        order: &ParentOrderRequest,
    ) -> Result<ParentOrderAcceptance, ExchangeError> {
        order.validate()?;
        self.rest.post_json("me/sendparentorder", order).await
    }

    #[instrument(skip(self, request), fields(exchange = "bitflyer", product = %request.product_code))]
    pub async fn cancel_parent_order(
        &self,
        request: &CancelParentOrderRequest,
    ) -> Result<(), ExchangeError> {
        request.validate()?;
        self.rest.post_unit("me/cancelparentorder", request).await
    }

    /// Cancel every open child order for a product
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn cancel_all_child_orders(&self, product_code: &str) -> Result<(), ExchangeError> {
        if product_code.is_empty() {
            return Err(ExchangeError::InvalidParameters(
                "product_code is required".to_string(),
            ));
        }

        let request = CancelAllChildOrdersRequest {
            product_code: product_code.to_string(),
        };
        self.rest.post_unit("me/cancelallchildorders", &request).await
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_child_orders(
        &self,
        filter: &ChildOrderFilter,
    ) -> Result<Vec<ChildOrder>, ExchangeError> {
        self.rest
            .get_json("me/getchildorders", &filter.to_query())
            .await
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_parent_orders(
        &self,
        filter: &ParentOrderFilter,
    ) -> Result<Vec<ParentOrder>, ExchangeError> {
        self.rest
            .get_json("me/getparentorders", &filter.to_query())
            .await
    }

    /// Details of one parent order
    ///
    /// The order id wins when both identifiers are given; at least one is required.
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_parent_order(
        &self,
        parent_order_id: Option<&str>,
        parent_order_acceptance_id: Option<&str>,
    ) -> Result<ParentOrderDetail, ExchangeError> {
        require_identifier(
            parent_order_id,
            parent_order_acceptance_id,
            "parent_order_id or parent_order_acceptance_id",
        )?;

        let mut query = QueryParams::new();
        match parent_order_id.filter(|id| !id.is_empty()) {
            Some(id) => query.push_str("parent_order_id", id),
            None => query.push_opt("parent_order_acceptance_id", parent_order_acceptance_id),
        };

        self.rest.get_json("me/getparentorder", &query).await
    }

    /// Own executions
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_executions(
        &self,
        filter: &ExecutionFilter,
    ) -> Result<Vec<MyExecution>, ExchangeError> {
        self.rest
            .get_json("me/getexecutions", &filter.to_query())
            .await
    }

    /// Open margin positions
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_positions(&self, product_code: &str) -> Result<Vec<Position>, ExchangeError> {
        let mut query = QueryParams::new();
        query.push_str("product_code", product_code);

        self.rest.get_json("me/getpositions", &query).await
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    pub async fn get_trading_commission(
        &self,
        product_code: &str,
    ) -> Result<TradingCommission, ExchangeError> {
        let mut query = QueryParams::new();
        query.push_str("product_code", product_code);

        self.rest.get_json("me/gettradingcommission", &query).await
    }
}
