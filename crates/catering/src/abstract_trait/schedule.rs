use crate::{
    domain::{
        requests::schedule::{
            CreateScheduleRecordRequest, CreateScheduleRequest, FindAllSchedules,
            UpdateScheduleRecordRequest, UpdateScheduleRequest,
        },
        response::schedule::ScheduleResponse,
    },
    model::schedule::Schedule as ScheduleModel,
};
use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{ApiResponse, ApiResponsePagination},
    errors::{RepositoryError, ServiceError},
};
use std::sync::Arc;

pub type DynScheduleQueryRepository = Arc<dyn ScheduleQueryRepositoryTrait + Send + Sync>;
pub type DynScheduleCommandRepository = Arc<dyn ScheduleCommandRepositoryTrait + Send + Sync>;
pub type DynScheduleQueryService = Arc<dyn ScheduleQueryServiceTrait + Send + Sync>;
pub type DynScheduleCommandService = Arc<dyn ScheduleCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ScheduleQueryRepositoryTrait {
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllSchedules,
    ) -> Result<(Vec<ScheduleModel>, i64), RepositoryError>;
    async fn find_all(
        &self,
        req: &FindAllSchedules,
    ) -> Result<(Vec<ScheduleModel>, i64), RepositoryError>;
    async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<ScheduleModel>, RepositoryError>;
}

#[async_trait]
pub trait ScheduleCommandRepositoryTrait {
    async fn create_schedule(
        &self,
        req: &CreateScheduleRecordRequest,
    ) -> Result<ScheduleModel, RepositoryError>;
    /// Returns `None` when the schedule does not exist for that owner.
    async fn update_schedule(
        &self,
        req: &UpdateScheduleRecordRequest,
    ) -> Result<Option<ScheduleModel>, RepositoryError>;
    /// Returns `false` when nothing was deleted.
    async fn delete_schedule(&self, id: i32, user_id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait ScheduleQueryServiceTrait {
    async fn find_mine(
        &self,
        user_id: i32,
        req: &FindAllSchedules,
    ) -> Result<ApiResponsePagination<Vec<ScheduleResponse>>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllSchedules,
    ) -> Result<ApiResponsePagination<Vec<ScheduleResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<ScheduleResponse>, ServiceError>;
}

#[async_trait]
pub trait ScheduleCommandServiceTrait {
    async fn create_schedule(
        &self,
        user_id: i32,
        req: &CreateScheduleRequest,
    ) -> Result<ApiResponse<ScheduleResponse>, ServiceError>;
    async fn update_schedule(
        &self,
        id: i32,
        user_id: i32,
        req: &UpdateScheduleRequest,
    ) -> Result<ApiResponse<ScheduleResponse>, ServiceError>;
    async fn delete_schedule(&self, id: i32, user_id: i32)
    -> Result<ApiResponse<()>, ServiceError>;
}
