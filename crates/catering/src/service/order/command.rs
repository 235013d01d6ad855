use crate::{
    abstract_trait::order::{
        DynOrderCommandRepository, DynOrderQueryRepository, OrderCommandServiceTrait,
    },
    domain::{
        requests::{
            order::{CreateOrderItemRecordRequest, CreateOrderRecordRequest, CreateOrderRequest},
            validate_request,
        },
        response::order::OrderResponse,
    },
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, OperationTracker, generate_random_string, parse_date, parse_time},
};
use tracing::{info, warn};

const ORDER_NUMBER_ATTEMPTS: usize = 3;

/// `ORD-YYYYMMDD-XXXXXXXX` with eight random alphanumeric characters.
pub fn generate_order_number(date: NaiveDate) -> Result<String, ServiceError> {
    let suffix = generate_random_string(8)
        .map_err(|e| ServiceError::Internal(format!("Failed to generate order number: {e}")))?;

    Ok(format!("ORD-{}-{}", date.format("%Y%m%d"), suffix))
}

/// Sum of `quantity * price` over all items; `None` on overflow.
fn order_total(items: &[CreateOrderItemRecordRequest]) -> Option<i64> {
    items.iter().try_fold(0i64, |total, item| {
        (item.quantity as i64)
            .checked_mul(item.price)
            .and_then(|line| total.checked_add(line))
    })
}

pub struct OrderCommandServiceDeps {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
}

#[derive(Clone)]
pub struct OrderCommandService {
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    tracker: OperationTracker,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps, registry: &mut Registry) -> Self {
        Self {
            query: deps.query,
            command: deps.command,
            tracker: OperationTracker::new(
                "order-command-service",
                "order_command_service",
                registry,
            ),
        }
    }

    async fn create(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let req = req.normalized();
        validate_request(&req)?;

        let delivery_date = parse_date(&req.delivery_date).ok_or_else(|| {
            ServiceError::validation("delivery_date: must be a date in YYYY-MM-DD format")
        })?;
        let delivery_time = parse_time(&req.delivery_time).ok_or_else(|| {
            ServiceError::validation("delivery_time: must be a time in HH:MM format")
        })?;

        let items: Vec<CreateOrderItemRecordRequest> = req
            .items
            .into_iter()
            .map(|item| CreateOrderItemRecordRequest {
                name: item.name,
                quantity: item.quantity,
                price: item.price,
                category: item.category,
                dietary_tags: item.dietary_tags,
            })
            .collect();

        let total_price = order_total(&items)
            .ok_or_else(|| ServiceError::validation("items: order total is too large"))?;

        let mut record = CreateOrderRecordRequest {
            user_id,
            order_number: String::new(),
            delivery_date,
            delivery_time,
            delivery_address: req.delivery_address,
            special_instructions: req.special_instructions,
            total_price,
            items,
        };

        let mut attempt = 0;
        let (order, items) = loop {
            attempt += 1;
            record.order_number = generate_order_number(Utc::now().date_naive())?;

            match self.command.create_order(&record).await {
                Ok(created) => break created,
                Err(RepositoryError::AlreadyExists(constraint))
                    if constraint.contains("order_number") && attempt < ORDER_NUMBER_ATTEMPTS =>
                {
                    warn!(
                        "🔁 Order number {} already taken, regenerating",
                        record.order_number
                    );
                }
                Err(RepositoryError::AlreadyExists(constraint))
                    if constraint.contains("order_number") =>
                {
                    return Err(ServiceError::Internal(
                        "Could not allocate a unique order number".into(),
                    ));
                }
                Err(e) => return Err(e.into()),
            }
        };

        info!(
            "🧾 Order {} placed by user {} (total {})",
            order.order_number, user_id, order.total_price
        );

        Ok(ApiResponse::success(
            "Order created successfully",
            OrderResponse::from_parts(order, items),
        ))
    }

    async fn cancel(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        match self.command.cancel_order(id, user_id).await? {
            Some(order) => {
                let items = self.query.find_items(&[order.order_id]).await?;
                Ok(ApiResponse::success(
                    "Order cancelled successfully",
                    OrderResponse::from_parts(order, items),
                ))
            }
            None => match self.query.find_by_id(id, user_id).await? {
                Some(order) if order.is_cancelled() => {
                    Err(ServiceError::Conflict("Order is already cancelled".into()))
                }
                Some(order) => Err(ServiceError::Conflict(format!(
                    "Order cannot be cancelled from status '{}'",
                    order.status
                ))),
                None => Err(ServiceError::NotFound("Order not found".into())),
            },
        }
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracker.start_tracing(
            "create_order",
            vec![
                KeyValue::new("user_id", user_id.to_string()),
                KeyValue::new("items", req.items.len() as i64),
            ],
        );

        let result = self.create(user_id, req).await;

        match &result {
            Ok(response) => self.tracker.complete_tracing_success(
                &tracing_ctx,
                method,
                &format!("Created order {}", response.data.order_number),
            ),
            Err(e) => self
                .tracker
                .complete_tracing_error(&tracing_ctx, method, &e.to_string()),
        }

        result
    }

    async fn cancel_order(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracker.start_tracing(
            "cancel_order",
            vec![
                KeyValue::new("order_id", id.to_string()),
                KeyValue::new("user_id", user_id.to_string()),
            ],
        );

        let result = self.cancel(id, user_id).await;

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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_has_date_and_alphanumeric_suffix() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let number = generate_order_number(date).unwrap();

        let suffix = number.strip_prefix("ORD-20250307-").unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn total_multiplies_quantity_by_unit_price() {
        let item = |quantity, price| CreateOrderItemRecordRequest {
            name: "x".into(),
            quantity,
            price,
            category: "c".into(),
            dietary_tags: vec![],
        };

        assert_eq!(order_total(&[item(3, 15_000), item(2, 2_500)]), Some(50_000));
        assert_eq!(order_total(&[item(2, i64::MAX)]), None);
    }
}
