use crate::{
    abstract_trait::schedule::{DynScheduleQueryRepository, ScheduleQueryServiceTrait},
    domain::{
        requests::{schedule::FindAllSchedules, validate_request},
        response::schedule::ScheduleResponse,
    },
    model::schedule::Schedule as ScheduleModel,
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
pub struct ScheduleQueryService {
    query: DynScheduleQueryRepository,
    tracker: OperationTracker,
}

impl ScheduleQueryService {
    pub fn new(query: DynScheduleQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracker: OperationTracker::new(
                "schedule-query-service",
                "schedule_query_service",
                registry,
            ),
        }
    }

    fn paginate(
        req: &FindAllSchedules,
        schedules: Vec<ScheduleModel>,
        total: i64,
    ) -> ApiResponsePagination<Vec<ScheduleResponse>> {
        let data: Vec<ScheduleResponse> =
            schedules.into_iter().map(ScheduleResponse::from).collect();

        ApiResponsePagination::success(
            "Schedules retrieved successfully",
            data,
            Pagination::new(req.page, req.page_size, total),
        )
    }
}

#[async_trait]
impl ScheduleQueryServiceTrait for ScheduleQueryService {
    async fn find_mine(
        &self,
        user_id: i32,
        req: &FindAllSchedules,
    ) -> Result<ApiResponsePagination<Vec<ScheduleResponse>>, ServiceError> {
        validate_request(req)?;

        let method = Method::Get;
        let tracing_ctx = self.tracker.start_tracing(
            "find_my_schedules",
            vec![
                KeyValue::new("user_id", user_id.to_string()),
                KeyValue::new("page", req.page.to_string()),
                KeyValue::new("page_size", req.page_size.to_string()),
            ],
        );

        match self.query.find_by_user(user_id, req).await {
            Ok((schedules, total)) => {
                let log_message = format!("Found {} schedules for user {user_id}", schedules.len());
                info!("📅 {log_message}");
                self.tracker
                    .complete_tracing_success(&tracing_ctx, method, &log_message);
                Ok(Self::paginate(req, schedules, total))
            }
            Err(e) => {
                self.tracker.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to fetch schedules: {e}"),
                );
                Err(e.into())
            }
        }
    }

    async fn find_all(
        &self,
        req: &FindAllSchedules,
    ) -> Result<ApiResponsePagination<Vec<ScheduleResponse>>, ServiceError> {
        validate_request(req)?;

        let method = Method::Get;
        let tracing_ctx = self.tracker.start_tracing(
            "find_all_schedules",
            vec![
                KeyValue::new("page", req.page.to_string()),
                KeyValue::new("page_size", req.page_size.to_string()),
            ],
        );

        match self.query.find_all(req).await {
            Ok((schedules, total)) => {
                let log_message = format!("Found {} schedules", schedules.len());
                self.tracker
                    .complete_tracing_success(&tracing_ctx, method, &log_message);
                Ok(Self::paginate(req, schedules, total))
            }
            Err(e) => {
                self.tracker.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to fetch schedules: {e}"),
                );
                Err(e.into())
            }
        }
    }

    async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<ScheduleResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start_tracing(
            "find_schedule_by_id",
            vec![
                KeyValue::new("schedule_id", id.to_string()),
                KeyValue::new("user_id", user_id.to_string()),
            ],
        );

        let result = match self.query.find_by_id(id, user_id).await {
            Ok(Some(schedule)) => Ok(ApiResponse::success(
                "Schedule retrieved successfully",
                ScheduleResponse::from(schedule),
            )),
            Ok(None) => Err(ServiceError::NotFound("Schedule not found".into())),
            Err(e) => Err(ServiceError::from(e)),
        };

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
