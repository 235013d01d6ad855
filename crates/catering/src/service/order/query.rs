use crate::{
    abstract_trait::order::{DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::{
        requests::{order::FindAllOrders, validate_request},
        response::order::OrderResponse,
    },
    model::order::Order as OrderModel,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::{ApiResponse, ApiResponsePagination, Pagination},
    errors::ServiceError,
    utils::{Method, OperationTracker},
};
use tracing::info;

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    tracker: OperationTracker,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracker: OperationTracker::new("order-query-service", "order_query_service", registry),
        }
    }

    async fn with_items(&self, orders: Vec<OrderModel>) -> Result<Vec<OrderResponse>, ServiceError> {
        let ids: Vec<i32> = orders.iter().map(|order| order.order_id).collect();
        let items = self.query.find_items(&ids).await?;
        Ok(OrderResponse::group(orders, items))
    }

    async fn list(
        &self,
        user_id: Option<i32>,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        validate_request(req)?;

        let (orders, total) = match user_id {
            Some(user_id) => self.query.find_by_user(user_id, req).await?,
            None => self.query.find_all(req).await?,
        };

        info!("📦 Found {} orders (total {})", orders.len(), total);

        let data = self.with_items(orders).await?;

        Ok(ApiResponsePagination::success(
            "Orders retrieved successfully",
            data,
            Pagination::new(req.page, req.page_size, total),
        ))
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_mine(
        &self,
        user_id: i32,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start_tracing(
            "find_my_orders",
            vec![
                KeyValue::new("user_id", user_id.to_string()),
                KeyValue::new("status", req.status.clone().unwrap_or_default()),
                KeyValue::new("page", req.page.to_string()),
            ],
        );

        let result = self.list(Some(user_id), req).await;

        match &result {
            Ok(response) => {
                self.tracker
                    .complete_tracing_success(&tracing_ctx, method, &response.message)
            }
            Err(e) => self
                .tracker
                .complete_tracing_error(&tracing_ctx, method, &e.to_string()),
        }

        result
    }

    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start_tracing(
            "find_all_orders",
            vec![
                KeyValue::new("status", req.status.clone().unwrap_or_default()),
                KeyValue::new("page", req.page.to_string()),
            ],
        );

        let result = self.list(None, req).await;

        match &result {
            Ok(response) => {
                self.tracker
                    .complete_tracing_success(&tracing_ctx, method, &response.message)
            }
            Err(e) => self
                .tracker
                .complete_tracing_error(&tracing_ctx, method, &e.to_string()),
        }

        result
    }

    async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start_tracing(
            "find_order_by_id",
            vec![
                KeyValue::new("order_id", id.to_string()),
                KeyValue::new("user_id", user_id.to_string()),
            ],
        );

        let order = match self.query.find_by_id(id, user_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                self.tracker
                    .complete_tracing_error(&tracing_ctx, method, "Order not found");
                return Err(ServiceError::NotFound("Order not found".into()));
            }
            Err(e) => {
                self.tracker
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                return Err(e.into());
            }
        };

        match self.query.find_items(&[order.order_id]).await {
            Ok(items) => {
                self.tracker.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    &format!("Found order {}", order.order_number),
                );
                Ok(ApiResponse::success(
                    "Order retrieved successfully",
                    OrderResponse::from_parts(order, items),
                ))
            }
            Err(e) => {
                self.tracker
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e.into())
            }
        }
    }
}
