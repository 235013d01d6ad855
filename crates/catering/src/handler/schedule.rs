use crate::{
    abstract_trait::schedule::{DynScheduleCommandService, DynScheduleQueryService},
    domain::{
        requests::schedule::{CreateScheduleRequest, FindAllSchedules, UpdateScheduleRequest},
        response::schedule::ScheduleResponse,
    },
    middleware::{
        jwt::auth_middleware,
        validate::{JsonPath, JsonQuery, SimpleValidatedJson},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::{
    domain::{ApiResponse, ApiResponsePagination},
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    params(FindAllSchedules),
    responses(
        (status = 200, description = "Caller's schedules ordered by date and time", body = ApiResponsePagination<Vec<ScheduleResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_schedules(
    Extension(service): Extension<DynScheduleQueryService>,
    Extension(user_id): Extension<i32>,
    JsonQuery(params): JsonQuery<FindAllSchedules>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_mine(user_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule details", body = ApiResponse<ScheduleResponse>),
        (status = 404, description = "Schedule not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_schedule(
    Extension(service): Extension<DynScheduleQueryService>,
    Extension(user_id): Extension<i32>,
    JsonPath(id): JsonPath<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id, user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/schedules",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = ApiResponse<ScheduleResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_schedule(
    Extension(service): Extension<DynScheduleCommandService>,
    Extension(user_id): Extension<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateScheduleRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_schedule(user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = ApiResponse<ScheduleResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Schedule not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_schedule(
    Extension(service): Extension<DynScheduleCommandService>,
    Extension(user_id): Extension<i32>,
    JsonPath(id): JsonPath<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_schedule(id, user_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_schedule(
    Extension(service): Extension<DynScheduleCommandService>,
    Extension(user_id): Extension<i32>,
    JsonPath(id): JsonPath<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_schedule(id, user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn schedule_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/schedules", get(get_schedules).post(create_schedule))
        .route(
            "/api/schedules/{id}",
            get(get_schedule)
                .put(update_schedule)
                .delete(delete_schedule),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.schedule_query.clone()))
        .layer(Extension(app_state.di_container.schedule_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
