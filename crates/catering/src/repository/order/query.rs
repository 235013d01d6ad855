use crate::{
    abstract_trait::order::OrderQueryRepositoryTrait,
    domain::requests::order::FindAllOrders,
    model::order::{Order as OrderModel, OrderItem as OrderItemModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn offset(page: i32, page_size: i32) -> i64 {
    ((page.max(1) - 1) as i64) * page_size as i64
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching orders for user {} | status {:?}, page {}, size {}",
            user_id, req.status, req.page, req.page_size
        );

        let orders = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT * FROM orders
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC, order_id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(req.status.as_deref())
        .bind(req.page_size as i64)
        .bind(offset(req.page, req.page_size))
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders for user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE user_id = $1 AND ($2::TEXT IS NULL OR status = $2)",
        )
        .bind(user_id)
        .bind(req.status.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)?;

        Ok((orders, total))
    }

    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching all orders | status {:?}, page {}, size {}",
            req.status, req.page, req.page_size
        );

        let orders = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT * FROM orders
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, order_id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(req.status.as_deref())
        .bind(req.page_size as i64)
        .bind(offset(req.page, req.page_size))
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE ($1::TEXT IS NULL OR status = $1)")
                .bind(req.status.as_deref())
                .fetch_one(&self.db)
                .await
                .map_err(RepositoryError::from)?;

        Ok((orders, total))
    }

    async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        sqlx::query_as::<_, OrderModel>("SELECT * FROM orders WHERE order_id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to find order {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_items(&self, order_ids: &[i32]) -> Result<Vec<OrderItemModel>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, OrderItemModel>(
            "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY order_id, order_item_id",
        )
        .bind(order_ids)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch items for orders {:?}: {:?}", order_ids, e);
            RepositoryError::from(e)
        })
    }
}
