use crate::{
    domain::{
        requests::order::{CreateOrderRecordRequest, CreateOrderRequest, FindAllOrders},
        response::order::OrderResponse,
    },
    model::order::{Order as OrderModel, OrderItem as OrderItemModel},
};
use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{ApiResponse, ApiResponsePagination},
    errors::{RepositoryError, ServiceError},
};
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;
pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;
pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError>;
    async fn find_all(&self, req: &FindAllOrders)
    -> Result<(Vec<OrderModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32, user_id: i32)
    -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_items(&self, order_ids: &[i32]) -> Result<Vec<OrderItemModel>, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts the order and all of its items atomically.
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError>;
    /// Moves an active order owned by `user_id` to cancelled. Returns `None`
    /// when no active order matched.
    async fn cancel_order(&self, id: i32, user_id: i32)
    -> Result<Option<OrderModel>, RepositoryError>;
}

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_mine(
        &self,
        user_id: i32,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn cancel_order(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
