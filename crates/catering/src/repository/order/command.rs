use crate::{
    abstract_trait::order::OrderCommandRepositoryTrait,
    domain::requests::order::CreateOrderRecordRequest,
    model::order::{Order as OrderModel, OrderItem as OrderItemModel, OrderStatus},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders
                (user_id, order_number, status, delivery_date, delivery_time, delivery_address,
                 special_instructions, total_price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, current_timestamp, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(req.user_id)
        .bind(&req.order_number)
        .bind(OrderStatus::Active.as_str())
        .bind(req.delivery_date)
        .bind(req.delivery_time)
        .bind(&req.delivery_address)
        .bind(&req.special_instructions)
        .bind(req.total_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to create order for user {}: {:?}",
                req.user_id, e
            );
            RepositoryError::from(e)
        })?;

        let mut items = Vec::with_capacity(req.items.len());

        for item in &req.items {
            let row = sqlx::query_as::<_, OrderItemModel>(
                r#"
                INSERT INTO order_items
                    (order_id, name, quantity, price, category, dietary_tags, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, current_timestamp)
                RETURNING *
                "#,
            )
            .bind(order.order_id)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(item.price)
            .bind(&item.category)
            .bind(&item.dietary_tags)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    "❌ Failed to insert item '{}' for order {}: {:?}",
                    item.name, order.order_id, e
                );
                RepositoryError::from(e)
            })?;

            items.push(row);
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created order {} (ID {}) with {} items for user {}",
            order.order_number,
            order.order_id,
            items.len(),
            order.user_id
        );

        Ok((order, items))
    }

    async fn cancel_order(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET status       = $3,
                cancelled_at = current_timestamp,
                updated_at   = current_timestamp
            WHERE order_id = $1 AND user_id = $2 AND status = $4
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(OrderStatus::Cancelled.as_str())
        .bind(OrderStatus::Active.as_str())
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to cancel order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        if order.is_some() {
            info!("🚫 Cancelled order ID {}", id);
        }

        Ok(order)
    }
}
