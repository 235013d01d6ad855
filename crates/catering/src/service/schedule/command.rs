use crate::{
    abstract_trait::schedule::{
        DynScheduleCommandRepository, DynScheduleQueryRepository, ScheduleCommandServiceTrait,
    },
    domain::{
        requests::{
            schedule::{
                CreateScheduleRecordRequest, CreateScheduleRequest, UpdateScheduleRecordRequest,
                UpdateScheduleRequest,
            },
            validate_request,
        },
        response::schedule::ScheduleResponse,
    },
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::ApiResponse,
    errors::ServiceError,
    utils::{Method, OperationTracker, TracingContext, parse_date, parse_time},
};

fn event_date(value: &str) -> Result<NaiveDate, ServiceError> {
    parse_date(value)
        .ok_or_else(|| ServiceError::validation("date: must be a date in YYYY-MM-DD format"))
}

fn event_time(value: &str) -> Result<NaiveTime, ServiceError> {
    parse_time(value)
        .ok_or_else(|| ServiceError::validation("time: must be a time in HH:MM format"))
}

pub struct ScheduleCommandServiceDeps {
    pub query: DynScheduleQueryRepository,
    pub command: DynScheduleCommandRepository,
}

#[derive(Clone)]
pub struct ScheduleCommandService {
    query: DynScheduleQueryRepository,
    command: DynScheduleCommandRepository,
    tracker: OperationTracker,
}

impl ScheduleCommandService {
    pub fn new(deps: ScheduleCommandServiceDeps, registry: &mut Registry) -> Self {
        Self {
            query: deps.query,
            command: deps.command,
            tracker: OperationTracker::new(
                "schedule-command-service",
                "schedule_command_service",
                registry,
            ),
        }
    }

    async fn create(
        &self,
        user_id: i32,
        req: &CreateScheduleRequest,
    ) -> Result<ApiResponse<ScheduleResponse>, ServiceError> {
        let req = req.normalized();
        validate_request(&req)?;

        let record = CreateScheduleRecordRequest {
            user_id,
            event_date: event_date(&req.date)?,
            event_time: event_time(&req.time)?,
            title: req.title,
            description: req.description,
            attendees: req.attendees,
            location: req.location,
        };

        let schedule = self.command.create_schedule(&record).await?;

        Ok(ApiResponse::success(
            "Schedule created successfully",
            ScheduleResponse::from(schedule),
        ))
    }

    async fn update(
        &self,
        id: i32,
        user_id: i32,
        req: &UpdateScheduleRequest,
    ) -> Result<ApiResponse<ScheduleResponse>, ServiceError> {
        let req = req.normalized();
        validate_request(&req)?;

        let existing = self
            .query
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Schedule not found".into()))?;

        let record = UpdateScheduleRecordRequest {
            schedule_id: id,
            user_id,
            title: req.title.unwrap_or(existing.title),
            event_date: match &req.date {
                Some(date) => event_date(date)?,
                None => existing.event_date,
            },
            event_time: match &req.time {
                Some(time) => event_time(time)?,
                None => existing.event_time,
            },
            description: req.description.unwrap_or(existing.description),
            attendees: req.attendees.unwrap_or(existing.attendees),
            location: req.location.unwrap_or(existing.location),
        };

        let schedule = self
            .command
            .update_schedule(&record)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Schedule not found".into()))?;

        Ok(ApiResponse::success(
            "Schedule updated successfully",
            ScheduleResponse::from(schedule),
        ))
    }

    fn finish<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: &Result<ApiResponse<T>, ServiceError>,
    ) {
        match result {
            Ok(response) => {
                self.tracker
                    .complete_tracing_success(tracing_ctx, method, &response.message)
            }
            Err(e) => self
                .tracker
                .complete_tracing_error(tracing_ctx, method, &e.to_string()),
        }
    }
}

#[async_trait]
impl ScheduleCommandServiceTrait for ScheduleCommandService {
    async fn create_schedule(
        &self,
        user_id: i32,
        req: &CreateScheduleRequest,
    ) -> Result<ApiResponse<ScheduleResponse>, ServiceError> {
        let tracing_ctx = self.tracker.start_tracing(
            "create_schedule",
            vec![
                KeyValue::new("user_id", user_id.to_string()),
                KeyValue::new("title", req.title.clone()),
            ],
        );

        let result = self.create(user_id, req).await;
        self.finish(&tracing_ctx, Method::Post, &result);
        result
    }

    async fn update_schedule(
        &self,
        id: i32,
        user_id: i32,
        req: &UpdateScheduleRequest,
    ) -> Result<ApiResponse<ScheduleResponse>, ServiceError> {
        let tracing_ctx = self.tracker.start_tracing(
            "update_schedule",
            vec![
                KeyValue::new("schedule_id", id.to_string()),
                KeyValue::new("user_id", user_id.to_string()),
            ],
        );

        let result = self.update(id, user_id, req).await;
        self.finish(&tracing_ctx, Method::Put, &result);
        result
    }

    async fn delete_schedule(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.tracker.start_tracing(
            "delete_schedule",
            vec![
                KeyValue::new("schedule_id", id.to_string()),
                KeyValue::new("user_id", user_id.to_string()),
            ],
        );

        let result = match self.command.delete_schedule(id, user_id).await {
            Ok(true) => Ok(ApiResponse::success("Schedule deleted successfully", ())),
            Ok(false) => Err(ServiceError::NotFound("Schedule not found".into())),
            Err(e) => Err(ServiceError::from(e)),
        };

        self.finish(&tracing_ctx, Method::Delete, &result);
        result
    }
}
